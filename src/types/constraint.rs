use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tracing::trace;

use super::error::RuleError;
use super::predicate::FieldPredicate;
use super::value::Value;

/// The logical connective of a constraint group. A rule holds at most one
/// group of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupKind {
    /// AND: every predicate of a field holds.
    AllOf,
    /// OR: at least one predicate of a field holds.
    AnyOf,
    /// XOR: every predicate is an independent pattern.
    OneOf,
    /// NOT: the predicates of a field must not hold.
    NoneOf,
    /// `IN (...)`
    MemberOf,
    /// `NOT IN (...)`
    NotMemberOf,
}

impl GroupKind {
    #[must_use]
    pub fn is_membership(self) -> bool {
        matches!(self, GroupKind::MemberOf | GroupKind::NotMemberOf)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupKind::AllOf => "AND",
            GroupKind::AnyOf => "OR",
            GroupKind::OneOf => "XOR",
            GroupKind::NoneOf => "NOT",
            GroupKind::MemberOf => "IN",
            GroupKind::NotMemberOf => "NOT IN",
        };
        f.write_str(s)
    }
}

/// How the predicates inside one [`Pattern`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    And,
    Or,
    /// The pattern holds exactly one predicate.
    Single,
}

/// One pattern as a rule emitter would write it: a field and the predicates
/// tested against its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern<'a> {
    field: &'a str,
    predicates: Vec<&'a FieldPredicate>,
    joiner: Joiner,
    negated: bool,
}

impl<'a> Pattern<'a> {
    #[must_use]
    pub fn field(&self) -> &'a str {
        self.field
    }

    #[must_use]
    pub fn predicates(&self) -> &[&'a FieldPredicate] {
        &self.predicates
    }

    #[must_use]
    pub fn joiner(&self) -> Joiner {
        self.joiner
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

/// Field predicates combined by a single connective (AND, OR, XOR or NOT).
///
/// Predicates are kept in the order they were supplied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "super::wire::RawConstraintGroup")
)]
pub struct ConstraintGroup {
    kind: GroupKind,
    predicates: Arc<[FieldPredicate]>,
}

impl ConstraintGroup {
    pub(crate) fn new(kind: GroupKind, predicates: Vec<FieldPredicate>) -> Self {
        debug_assert!(!kind.is_membership());
        Self {
            kind,
            predicates: predicates.into(),
        }
    }

    /// Build a group after checking it is non-empty and every predicate is
    /// well formed.
    pub(crate) fn checked(
        kind: GroupKind,
        predicates: Vec<FieldPredicate>,
    ) -> Result<Self, RuleError> {
        if kind.is_membership() {
            return Err(RuleError::InvalidArgument {
                argument: format!("{kind} constraint"),
                reason: "membership groups hold field-to-values entries".to_owned(),
            });
        }
        if predicates.is_empty() {
            return Err(RuleError::ConflictingConstraint {
                kind,
                reason: "no predicates supplied".to_owned(),
            });
        }
        let argument = format!("{kind} predicate");
        for predicate in &predicates {
            predicate.check(&argument)?;
        }
        trace!(%kind, count = predicates.len(), "constraint group accepted");
        Ok(Self::new(kind, predicates))
    }

    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[must_use]
    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Distinct field names, in order of first appearance.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for p in self.predicates.iter() {
            if !fields.contains(&p.field()) {
                fields.push(p.field());
            }
        }
        fields
    }

    /// Predicates that test `name`, in input order.
    pub fn for_field<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldPredicate> {
        self.predicates.iter().filter(move |p| p.field() == name)
    }

    /// The patterns this group contributes to a rule's LHS.
    ///
    /// AND, OR and NOT produce one pattern per field; XOR produces one
    /// pattern per predicate.
    #[must_use]
    pub fn patterns(&self) -> Vec<Pattern<'_>> {
        if self.kind == GroupKind::OneOf {
            return self
                .predicates
                .iter()
                .map(|p| Pattern {
                    field: p.field(),
                    predicates: vec![p],
                    joiner: Joiner::Single,
                    negated: false,
                })
                .collect();
        }

        let (joiner, negated) = match self.kind {
            GroupKind::AnyOf => (Joiner::Or, false),
            GroupKind::NoneOf => (Joiner::And, true),
            _ => (Joiner::And, false),
        };
        self.fields()
            .into_iter()
            .map(|name| {
                let predicates: Vec<&FieldPredicate> = self.for_field(name).collect();
                let joiner = if predicates.len() == 1 {
                    Joiner::Single
                } else {
                    joiner
                };
                Pattern {
                    field: name,
                    predicates,
                    joiner,
                    negated,
                }
            })
            .collect()
    }
}

/// A field and the values it is tested for membership against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MembershipEntry {
    field: String,
    values: Arc<[Value]>,
}

impl MembershipEntry {
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Field-to-values membership tests (`IN` or `NOT IN`).
///
/// Fields and values keep insertion order. Supplying the same field twice
/// replaces its values but keeps its first position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "super::wire::RawMembershipGroup")
)]
pub struct MembershipGroup {
    kind: GroupKind,
    entries: Arc<[MembershipEntry]>,
}

impl MembershipGroup {
    pub(crate) fn new<K, I, V>(kind: GroupKind, entries: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        debug_assert!(kind.is_membership());
        let mut collected: Vec<MembershipEntry> = Vec::new();
        for (field, values) in entries {
            let field = field.into();
            let values: Arc<[Value]> = values.into_iter().map(Into::into).collect();
            match collected.iter_mut().find(|e| e.field == field) {
                Some(existing) => existing.values = values,
                None => collected.push(MembershipEntry { field, values }),
            }
        }
        Self {
            kind,
            entries: collected.into(),
        }
    }

    pub(crate) fn check(&self) -> Result<(), RuleError> {
        let kind = self.kind;
        if self.is_empty() {
            return Err(RuleError::ConflictingConstraint {
                kind,
                reason: "no fields supplied".to_owned(),
            });
        }
        for entry in self.entries.iter() {
            if entry.field.trim().is_empty() {
                return Err(RuleError::InvalidArgument {
                    argument: format!("{kind} constraint"),
                    reason: "field name is empty".to_owned(),
                });
            }
            if entry.values.is_empty() {
                return Err(RuleError::ConflictingConstraint {
                    kind,
                    reason: format!("field '{}' has no values", entry.field),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.kind == GroupKind::NotMemberOf
    }

    #[must_use]
    pub fn entries(&self) -> &[MembershipEntry] {
        &self.entries
    }

    /// The values listed for `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(MembershipEntry::values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
