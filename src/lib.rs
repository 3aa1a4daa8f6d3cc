//! Compile a decision path of a predictive model (scorecard, tree or rule-set
//! node) into an immutable production-rule descriptor.
//!
//! A [`RuleBuilder`] collects the LHS constraint groups and RHS parameters of
//! one path; [`RuleBuilder::build`] resolves which activation branch carries
//! the path's status (see [`resolve_status`]) and returns a [`RuleDescriptor`]
//! ready for a rule-text emitter.

pub mod parse;
mod resolve;
mod types;

pub use resolve::{DONE_STATUS, resolve_status};
pub use types::{
    BreakClause, BreakPresence, CompareOp, ConstraintGroup, FieldExpr, FieldPredicate, GroupKind,
    Joiner, MembershipEntry, MembershipGroup, NodeKind, OutputField, Pattern, ResultCode,
    RhsAction, RhsStatus, RuleBuilder, RuleDescriptor, RuleError, Value, field,
};
