use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constraint::{ConstraintGroup, GroupKind, MembershipGroup};
use super::predicate::BreakClause;
use super::rhs::{NodeKind, OutputField, ResultCode, RhsAction, RhsStatus};
use super::value::Value;

/// One compiled production rule: its LHS constraints and its RHS effects,
/// with the status each activation branch writes already resolved.
///
/// Produced by [`RuleBuilder::build`](crate::RuleBuilder::build). Immutable;
/// collections are shared behind `Arc`, so clones are cheap and the value
/// can be read from many threads at once.
///
/// With the `serde` feature, deserializing re-runs the builder checks and
/// rejects a `status` that disagrees with the node kind and break clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "super::wire::RawRuleDescriptor")
)]
pub struct RuleDescriptor {
    pub(crate) name: String,
    pub(crate) node_kind: NodeKind,
    pub(crate) agenda_group: Option<String>,
    pub(crate) activation_group: Option<String>,
    pub(crate) focused_agenda_group: Option<String>,
    pub(crate) status_constraint: Option<String>,
    pub(crate) and_constraints: Option<ConstraintGroup>,
    pub(crate) or_constraints: Option<ConstraintGroup>,
    pub(crate) xor_constraints: Option<ConstraintGroup>,
    pub(crate) not_constraints: Option<ConstraintGroup>,
    pub(crate) in_constraints: Option<MembershipGroup>,
    pub(crate) not_in_constraints: Option<MembershipGroup>,
    pub(crate) if_break: Option<BreakClause>,
    pub(crate) rhs: RhsAction,
    pub(crate) status: RhsStatus,
}

impl RuleDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node shape the rule was resolved for.
    #[must_use]
    pub fn node_kind(&self) -> NodeKind {
        self.node_kind
    }

    #[must_use]
    pub fn agenda_group(&self) -> Option<&str> {
        self.agenda_group.as_deref()
    }

    #[must_use]
    pub fn activation_group(&self) -> Option<&str> {
        self.activation_group.as_deref()
    }

    /// Agenda group the RHS gives focus to when the rule fires.
    #[must_use]
    pub fn focused_agenda_group(&self) -> Option<&str> {
        self.focused_agenda_group.as_deref()
    }

    /// Guard on the status holder the LHS must match, e.g. `status == "CONTINUE"`.
    #[must_use]
    pub fn status_constraint(&self) -> Option<&str> {
        self.status_constraint.as_deref()
    }

    #[must_use]
    pub fn and_constraints(&self) -> Option<&ConstraintGroup> {
        self.and_constraints.as_ref()
    }

    #[must_use]
    pub fn or_constraints(&self) -> Option<&ConstraintGroup> {
        self.or_constraints.as_ref()
    }

    #[must_use]
    pub fn xor_constraints(&self) -> Option<&ConstraintGroup> {
        self.xor_constraints.as_ref()
    }

    #[must_use]
    pub fn not_constraints(&self) -> Option<&ConstraintGroup> {
        self.not_constraints.as_ref()
    }

    #[must_use]
    pub fn in_constraints(&self) -> Option<&MembershipGroup> {
        self.in_constraints.as_ref()
    }

    #[must_use]
    pub fn not_in_constraints(&self) -> Option<&MembershipGroup> {
        self.not_in_constraints.as_ref()
    }

    /// Look up a predicate group by kind. Membership kinds return `None`;
    /// use [`membership`](Self::membership) for those.
    #[must_use]
    pub fn constraint_group(&self, kind: GroupKind) -> Option<&ConstraintGroup> {
        match kind {
            GroupKind::AllOf => self.and_constraints(),
            GroupKind::AnyOf => self.or_constraints(),
            GroupKind::OneOf => self.xor_constraints(),
            GroupKind::NoneOf => self.not_constraints(),
            GroupKind::MemberOf | GroupKind::NotMemberOf => None,
        }
    }

    #[must_use]
    pub fn membership(&self, kind: GroupKind) -> Option<&MembershipGroup> {
        match kind {
            GroupKind::MemberOf => self.in_constraints(),
            GroupKind::NotMemberOf => self.not_in_constraints(),
            _ => None,
        }
    }

    #[must_use]
    pub fn if_break(&self) -> Option<&BreakClause> {
        self.if_break.as_ref()
    }

    #[must_use]
    pub fn rhs(&self) -> &RhsAction {
        &self.rhs
    }

    #[must_use]
    pub fn status_to_set(&self) -> &str {
        self.rhs.status_to_set()
    }

    #[must_use]
    pub fn output_fields(&self) -> &[OutputField] {
        self.rhs.output_fields()
    }

    #[must_use]
    pub fn result_code(&self) -> Option<ResultCode> {
        self.rhs.result_code()
    }

    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.rhs.result()
    }

    #[must_use]
    pub fn status(&self) -> &RhsStatus {
        &self.status
    }

    /// Status written by the ordinary `then` branch.
    #[must_use]
    pub fn default_then_status(&self) -> Option<&str> {
        self.status.default_then()
    }

    /// Status written by the `then[match]` branch.
    #[must_use]
    pub fn break_match_status(&self) -> Option<&str> {
        self.status.break_match()
    }

    /// Number of constraint groups present, membership groups included.
    #[must_use]
    pub fn constraint_group_count(&self) -> usize {
        [
            self.and_constraints.is_some(),
            self.or_constraints.is_some(),
            self.xor_constraints.is_some(),
            self.not_constraints.is_some(),
            self.in_constraints.is_some(),
            self.not_in_constraints.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.node_kind {
            NodeKind::Leaf => "leaf",
            NodeKind::NonLeaf => "non-leaf",
        };
        write!(
            f,
            "RuleDescriptor({}, {kind}, {} constraint groups, break: {})",
            self.name,
            self.constraint_group_count(),
            if self.if_break.is_some() { "yes" } else { "no" },
        )
    }
}
