//! Deserialization shapes for the `serde` feature.
//!
//! Incoming data lands in these raw structs first and is then rebuilt
//! through the same checks as [`RuleBuilder::build`], so a decoded value is
//! never one the builder would have refused.

use serde::Deserialize;

use super::builder::RuleBuilder;
use super::constraint::{ConstraintGroup, GroupKind, MembershipEntry, MembershipGroup};
use super::descriptor::RuleDescriptor;
use super::error::RuleError;
use super::predicate::{BreakClause, CompareOp, FieldPredicate};
use super::rhs::{NodeKind, RhsAction, RhsStatus};
use super::value::Value;

#[derive(Deserialize)]
pub(crate) struct RawFieldPredicate {
    field: String,
    op: CompareOp,
    value: Value,
}

impl TryFrom<RawFieldPredicate> for FieldPredicate {
    type Error = RuleError;

    fn try_from(raw: RawFieldPredicate) -> Result<Self, RuleError> {
        FieldPredicate::new(raw.field, raw.op, raw.value)
    }
}

#[derive(Deserialize)]
pub(crate) struct RawConstraintGroup {
    kind: GroupKind,
    predicates: Vec<FieldPredicate>,
}

impl TryFrom<RawConstraintGroup> for ConstraintGroup {
    type Error = RuleError;

    fn try_from(raw: RawConstraintGroup) -> Result<Self, RuleError> {
        ConstraintGroup::checked(raw.kind, raw.predicates)
    }
}

#[derive(Deserialize)]
pub(crate) struct RawMembershipGroup {
    kind: GroupKind,
    entries: Vec<MembershipEntry>,
}

impl TryFrom<RawMembershipGroup> for MembershipGroup {
    type Error = RuleError;

    fn try_from(raw: RawMembershipGroup) -> Result<Self, RuleError> {
        if !raw.kind.is_membership() {
            return Err(RuleError::InvalidArgument {
                argument: format!("{} constraint", raw.kind),
                reason: "expected an IN or NOT IN group".to_owned(),
            });
        }
        let group = MembershipGroup::new(
            raw.kind,
            raw.entries
                .iter()
                .map(|e| (e.field().to_owned(), e.values().to_vec())),
        );
        group.check()?;
        Ok(group)
    }
}

#[derive(Deserialize)]
pub(crate) struct RawRuleDescriptor {
    name: String,
    node_kind: NodeKind,
    agenda_group: Option<String>,
    activation_group: Option<String>,
    focused_agenda_group: Option<String>,
    status_constraint: Option<String>,
    and_constraints: Option<ConstraintGroup>,
    or_constraints: Option<ConstraintGroup>,
    xor_constraints: Option<ConstraintGroup>,
    not_constraints: Option<ConstraintGroup>,
    in_constraints: Option<MembershipGroup>,
    not_in_constraints: Option<MembershipGroup>,
    if_break: Option<BreakClause>,
    rhs: RhsAction,
    status: RhsStatus,
}

/// The group stored under `slot` must be of that slot's kind.
fn expect_kind(slot: GroupKind, found: Option<GroupKind>) -> Result<(), RuleError> {
    match found {
        Some(kind) if kind != slot => Err(RuleError::InvalidArgument {
            argument: format!("{slot} constraint"),
            reason: format!("holds a {kind} group"),
        }),
        _ => Ok(()),
    }
}

impl TryFrom<RawRuleDescriptor> for RuleDescriptor {
    type Error = RuleError;

    fn try_from(raw: RawRuleDescriptor) -> Result<Self, RuleError> {
        expect_kind(GroupKind::AllOf, raw.and_constraints.as_ref().map(ConstraintGroup::kind))?;
        expect_kind(GroupKind::AnyOf, raw.or_constraints.as_ref().map(ConstraintGroup::kind))?;
        expect_kind(GroupKind::OneOf, raw.xor_constraints.as_ref().map(ConstraintGroup::kind))?;
        expect_kind(GroupKind::NoneOf, raw.not_constraints.as_ref().map(ConstraintGroup::kind))?;
        expect_kind(GroupKind::MemberOf, raw.in_constraints.as_ref().map(MembershipGroup::kind))?;
        expect_kind(
            GroupKind::NotMemberOf,
            raw.not_in_constraints.as_ref().map(MembershipGroup::kind),
        )?;

        let rhs = raw.rhs;
        let mut builder = RuleBuilder::default()
            .with_name(raw.name)
            .with_status_to_set(rhs.status_to_set)
            .with_output_fields(rhs.output_fields.iter().cloned());

        let groups = [
            raw.and_constraints,
            raw.or_constraints,
            raw.xor_constraints,
            raw.not_constraints,
        ];
        for group in groups.into_iter().flatten() {
            let predicates = group.predicates().to_vec();
            builder = match group.kind() {
                GroupKind::AllOf => builder.with_and_constraints(predicates),
                GroupKind::AnyOf => builder.with_or_constraints(predicates),
                GroupKind::OneOf => builder.with_xor_constraints(predicates),
                GroupKind::NoneOf => builder.with_not_constraints(predicates),
                GroupKind::MemberOf | GroupKind::NotMemberOf => builder,
            };
        }
        if let Some(group) = raw.in_constraints {
            builder = builder.with_in_constraints(membership_pairs(&group));
        }
        if let Some(group) = raw.not_in_constraints {
            builder = builder.with_not_in_constraints(membership_pairs(&group));
        }
        if let Some(clause) = raw.if_break {
            builder = builder.with_if_break(clause.field(), clause.op(), clause.value().clone());
        }
        if let Some(group) = raw.agenda_group {
            builder = builder.with_agenda_group(group);
        }
        if let Some(group) = raw.activation_group {
            builder = builder.with_activation_group(group);
        }
        if let Some(group) = raw.focused_agenda_group {
            builder = builder.with_focused_agenda_group(group);
        }
        if let Some(constraint) = raw.status_constraint {
            builder = builder.with_status_constraint(constraint);
        }
        if let Some(code) = rhs.result_code {
            builder = builder.with_result_code(code);
        }
        if let Some(result) = rhs.result {
            builder = builder.with_result(result);
        }

        let rule = builder.build(raw.node_kind)?;
        if rule.status != raw.status {
            return Err(RuleError::InvalidArgument {
                argument: "status".to_owned(),
                reason: format!(
                    "then={:?}, then[match]={:?} does not match a {:?} rule {} a break clause",
                    raw.status.default_then(),
                    raw.status.break_match(),
                    rule.node_kind,
                    if rule.if_break.is_some() { "with" } else { "without" },
                ),
            });
        }
        Ok(rule)
    }
}

fn membership_pairs(group: &MembershipGroup) -> Vec<(String, Vec<Value>)> {
    group
        .entries()
        .iter()
        .map(|e| (e.field().to_owned(), e.values().to_vec()))
        .collect()
}
