use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::value::Value;

/// Outcome classification attached to a rule result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResultCode {
    Ok,
    Fail,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::Ok => f.write_str("OK"),
            ResultCode::Fail => f.write_str("FAIL"),
        }
    }
}

/// An output assignment applied every time the rule fires.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputField {
    name: String,
    value: Value,
}

impl OutputField {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// The effect side of a rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RhsAction {
    pub(crate) status_to_set: String,
    pub(crate) result_code: Option<ResultCode>,
    pub(crate) result: Option<Value>,
    pub(crate) output_fields: Arc<[OutputField]>,
}

impl RhsAction {
    /// The status the decision path propagates. Where it ends up (default
    /// branch, match branch or nowhere) is decided by [`RhsStatus`].
    #[must_use]
    pub fn status_to_set(&self) -> &str {
        &self.status_to_set
    }

    #[must_use]
    pub fn result_code(&self) -> Option<ResultCode> {
        self.result_code
    }

    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn output_fields(&self) -> &[OutputField] {
        &self.output_fields
    }
}

/// Whether the node a rule is compiled from is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Leaf,
    NonLeaf,
}

/// Whether the rule carries a break clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BreakPresence {
    Present,
    Absent,
}

impl From<bool> for BreakPresence {
    fn from(present: bool) -> Self {
        if present {
            BreakPresence::Present
        } else {
            BreakPresence::Absent
        }
    }
}

/// The statuses written by the two activation branches of a rule.
///
/// `None` means the branch sets no status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RhsStatus {
    pub(crate) default_then: Option<String>,
    pub(crate) break_match: Option<String>,
}

impl RhsStatus {
    /// Status set by the ordinary `then` branch.
    #[must_use]
    pub fn default_then(&self) -> Option<&str> {
        self.default_then.as_deref()
    }

    /// Status set by the `then[match]` branch, fired by the break clause.
    #[must_use]
    pub fn break_match(&self) -> Option<&str> {
        self.break_match.as_deref()
    }

    /// `true` when neither branch sets a status.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.default_then.is_none() && self.break_match.is_none()
    }
}
