use tracing::debug;

use super::constraint::{ConstraintGroup, GroupKind, MembershipGroup};
use super::descriptor::RuleDescriptor;
use super::error::RuleError;
use super::predicate::{BreakClause, CompareOp, FieldPredicate};
use super::rhs::{NodeKind, OutputField, ResultCode, RhsAction};
use super::value::Value;
use crate::resolve::resolve_status;

/// Staged constructor for a [`RuleDescriptor`].
///
/// Setters never validate and always replace what was there before; every
/// check happens in [`build()`](Self::build), which consumes the builder.
///
/// # Example
///
/// ```
/// use pathrule::{field, CompareOp, NodeKind, RuleBuilder};
///
/// let rule = RuleBuilder::new("TempRule", "CONTINUE", vec![])
///     .unwrap()
///     .with_and_constraints(vec![field("OUTLOOK").eq("sunny")])
///     .with_if_break("TEMPERATURE", CompareOp::Gte, 90_i64)
///     .build(NodeKind::NonLeaf)
///     .unwrap();
///
/// assert_eq!(rule.default_then_status(), Some("DONE"));
/// assert_eq!(rule.break_match_status(), Some("CONTINUE"));
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct RuleBuilder {
    name: Option<String>,
    status_to_set: Option<String>,
    output_fields: Vec<OutputField>,
    agenda_group: Option<String>,
    activation_group: Option<String>,
    focused_agenda_group: Option<String>,
    status_constraint: Option<String>,
    and_constraints: Option<Vec<FieldPredicate>>,
    or_constraints: Option<Vec<FieldPredicate>>,
    xor_constraints: Option<Vec<FieldPredicate>>,
    not_constraints: Option<Vec<FieldPredicate>>,
    in_constraints: Option<MembershipGroup>,
    not_in_constraints: Option<MembershipGroup>,
    if_break: Option<FieldPredicate>,
    result_code: Option<ResultCode>,
    result: Option<Value>,
}

impl RuleBuilder {
    /// Start a rule with its mandatory parts.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidArgument`] if `name` or `status_to_set`
    /// is empty.
    pub fn new(
        name: impl Into<String>,
        status_to_set: impl Into<String>,
        output_fields: Vec<OutputField>,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let status_to_set = status_to_set.into();
        require_non_empty("name", &name)?;
        require_non_empty("status_to_set", &status_to_set)?;
        Ok(Self {
            name: Some(name),
            status_to_set: Some(status_to_set),
            output_fields,
            ..Self::default()
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status_to_set(mut self, status: impl Into<String>) -> Self {
        self.status_to_set = Some(status.into());
        self
    }

    pub fn with_output_fields(mut self, fields: impl IntoIterator<Item = OutputField>) -> Self {
        self.output_fields = fields.into_iter().collect();
        self
    }

    /// Predicates that must all hold. Predicates on the same field form one
    /// pattern, e.g. `TEMPERATURE < 90` and `TEMPERATURE > 50`.
    pub fn with_and_constraints(
        mut self,
        predicates: impl IntoIterator<Item = FieldPredicate>,
    ) -> Self {
        let predicates = predicates.into_iter().collect();
        self.replace_group(GroupKind::AllOf, predicates);
        self
    }

    pub fn with_or_constraints(
        mut self,
        predicates: impl IntoIterator<Item = FieldPredicate>,
    ) -> Self {
        let predicates = predicates.into_iter().collect();
        self.replace_group(GroupKind::AnyOf, predicates);
        self
    }

    /// Predicates emitted as independent patterns, in the order given.
    pub fn with_xor_constraints(
        mut self,
        predicates: impl IntoIterator<Item = FieldPredicate>,
    ) -> Self {
        let predicates = predicates.into_iter().collect();
        self.replace_group(GroupKind::OneOf, predicates);
        self
    }

    pub fn with_not_constraints(
        mut self,
        predicates: impl IntoIterator<Item = FieldPredicate>,
    ) -> Self {
        let predicates = predicates.into_iter().collect();
        self.replace_group(GroupKind::NoneOf, predicates);
        self
    }

    /// Field-to-values pairs tested with `IN (...)`.
    pub fn with_in_constraints<K, I, V>(mut self, entries: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let group = MembershipGroup::new(GroupKind::MemberOf, entries);
        if self.in_constraints.replace(group).is_some() {
            self.log_replaced("IN constraints");
        }
        self
    }

    /// Field-to-values pairs tested with `NOT IN (...)`.
    pub fn with_not_in_constraints<K, I, V>(
        mut self,
        entries: impl IntoIterator<Item = (K, I)>,
    ) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let group = MembershipGroup::new(GroupKind::NotMemberOf, entries);
        if self.not_in_constraints.replace(group).is_some() {
            self.log_replaced("NOT IN constraints");
        }
        self
    }

    /// Add a break statement to the LHS. A rule has at most one; a later
    /// call replaces the earlier clause.
    pub fn with_if_break(
        mut self,
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<Value>,
    ) -> Self {
        let predicate = FieldPredicate::unchecked(field.into(), op, value.into());
        if self.if_break.replace(predicate).is_some() {
            self.log_replaced("break clause");
        }
        self
    }

    pub fn with_status_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.status_constraint = Some(constraint.into());
        self
    }

    pub fn with_agenda_group(mut self, group: impl Into<String>) -> Self {
        self.agenda_group = Some(group.into());
        self
    }

    pub fn with_activation_group(mut self, group: impl Into<String>) -> Self {
        self.activation_group = Some(group.into());
        self
    }

    pub fn with_focused_agenda_group(mut self, group: impl Into<String>) -> Self {
        self.focused_agenda_group = Some(group.into());
        self
    }

    pub fn with_result_code(mut self, code: ResultCode) -> Self {
        self.result_code = Some(code);
        self
    }

    pub fn with_result(mut self, result: impl Into<Value>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Validate and freeze the rule for a node of the given kind.
    ///
    /// # Errors
    ///
    /// - [`RuleError::IncompleteRule`] if the name or status is unset or empty.
    /// - [`RuleError::ConflictingConstraint`] if a constraint group was
    ///   supplied without predicates, or a membership field without values.
    /// - [`RuleError::InvalidArgument`] if a predicate or the break clause
    ///   has an empty field name or pairs an ordering operator with a boolean.
    pub fn build(self, kind: NodeKind) -> Result<RuleDescriptor, RuleError> {
        let name = require_set("name", self.name)?;
        let status_to_set = require_set("status_to_set", self.status_to_set)?;

        let and_constraints = checked_group(GroupKind::AllOf, self.and_constraints)?;
        let or_constraints = checked_group(GroupKind::AnyOf, self.or_constraints)?;
        let xor_constraints = checked_group(GroupKind::OneOf, self.xor_constraints)?;
        let not_constraints = checked_group(GroupKind::NoneOf, self.not_constraints)?;
        let in_constraints = checked_membership(self.in_constraints)?;
        let not_in_constraints = checked_membership(self.not_in_constraints)?;

        let if_break = match self.if_break {
            Some(predicate) => {
                predicate.check("break clause")?;
                Some(BreakClause::new(predicate))
            }
            None => None,
        };

        let status = resolve_status(kind, if_break.is_some().into(), &status_to_set);
        debug!(
            rule = %name,
            ?kind,
            then = ?status.default_then(),
            then_match = ?status.break_match(),
            "resolved rule status"
        );

        Ok(RuleDescriptor {
            name,
            node_kind: kind,
            agenda_group: self.agenda_group,
            activation_group: self.activation_group,
            focused_agenda_group: self.focused_agenda_group,
            status_constraint: self.status_constraint,
            and_constraints,
            or_constraints,
            xor_constraints,
            not_constraints,
            in_constraints,
            not_in_constraints,
            if_break,
            rhs: RhsAction {
                status_to_set,
                result_code: self.result_code,
                result: self.result,
                output_fields: self.output_fields.into(),
            },
            status,
        })
    }

    fn replace_group(&mut self, kind: GroupKind, predicates: Vec<FieldPredicate>) {
        let slot = match kind {
            GroupKind::AllOf => &mut self.and_constraints,
            GroupKind::AnyOf => &mut self.or_constraints,
            GroupKind::OneOf => &mut self.xor_constraints,
            GroupKind::NoneOf => &mut self.not_constraints,
            GroupKind::MemberOf | GroupKind::NotMemberOf => return,
        };
        if slot.replace(predicates).is_some() {
            self.log_replaced(&format!("{kind} constraints"));
        }
    }

    fn log_replaced(&self, what: &str) {
        debug!(
            rule = self.name.as_deref().unwrap_or("<unnamed>"),
            what, "replacing previously supplied value"
        );
    }
}

fn require_non_empty(argument: &str, value: &str) -> Result<(), RuleError> {
    if value.trim().is_empty() {
        return Err(RuleError::InvalidArgument {
            argument: argument.to_owned(),
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(())
}

fn require_set(field: &str, value: Option<String>) -> Result<String, RuleError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RuleError::IncompleteRule {
            missing: field.to_owned(),
        }),
    }
}

fn checked_group(
    kind: GroupKind,
    predicates: Option<Vec<FieldPredicate>>,
) -> Result<Option<ConstraintGroup>, RuleError> {
    predicates
        .map(|predicates| ConstraintGroup::checked(kind, predicates))
        .transpose()
}

fn checked_membership(
    group: Option<MembershipGroup>,
) -> Result<Option<MembershipGroup>, RuleError> {
    if let Some(group) = &group {
        group.check()?;
    }
    Ok(group)
}
