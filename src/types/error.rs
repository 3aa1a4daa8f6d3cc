use thiserror::Error;

use super::constraint::GroupKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("incomplete rule: {missing} is not set")]
    IncompleteRule { missing: String },

    #[error("conflicting {kind} constraint: {reason}")]
    ConflictingConstraint { kind: GroupKind, reason: String },
}
