use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::RuleError;
use super::value::{write_quoted, Value};
use crate::parse::{is_bare_name, ParseError};

/// Comparison operators supported in field predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Neq,
        CompareOp::Gt,
        CompareOp::Gte,
        CompareOp::Lt,
        CompareOp::Lte,
    ];

    /// `true` for `<`, `<=`, `>`, `>=`.
    #[must_use]
    pub fn is_ordering(self) -> bool {
        !matches!(self, CompareOp::Eq | CompareOp::Neq)
    }

    /// Whether this operator can be applied to `value`.
    ///
    /// Booleans only support equality; numbers and strings support everything.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        !(self.is_ordering() && matches!(value, Value::Bool(_)))
    }

    /// The symbolic form, e.g. `">="`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Accepts both the symbolic form (`>=`) and the operator names used by
/// predictive-model documents (`greaterOrEqual`).
impl FromStr for CompareOp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" | "equal" => Ok(CompareOp::Eq),
            "!=" | "notEqual" => Ok(CompareOp::Neq),
            ">" | "greaterThan" => Ok(CompareOp::Gt),
            ">=" | "greaterOrEqual" => Ok(CompareOp::Gte),
            "<" | "lessThan" => Ok(CompareOp::Lt),
            "<=" | "lessOrEqual" => Ok(CompareOp::Lte),
            other => Err(ParseError::new(format!("unknown operator '{other}'"))),
        }
    }
}

/// One atomic test: `field op value`.
///
/// `Display` writes the predicate notation and [`FromStr`] reads it, so a
/// checked predicate survives `to_string().parse()` unchanged. Field names
/// outside the bare identifier set are written quoted (`"SEPAL WIDTH" >= 5.45`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "super::wire::RawFieldPredicate")
)]
pub struct FieldPredicate {
    field: String,
    op: CompareOp,
    value: Value,
}

impl FieldPredicate {
    /// Create a predicate, checking that the field is named and that the
    /// operator can be applied to the value.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidArgument`] on an empty field name, a NaN
    /// or infinite float, or an ordering operator paired with a boolean.
    pub fn new(
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<Value>,
    ) -> Result<Self, RuleError> {
        let predicate = Self::unchecked(field.into(), op, value.into());
        predicate.check("predicate")?;
        Ok(predicate)
    }

    pub(crate) fn unchecked(field: String, op: CompareOp, value: Value) -> Self {
        Self { field, op, value }
    }

    pub(crate) fn check(&self, argument: &str) -> Result<(), RuleError> {
        if self.field.trim().is_empty() {
            return Err(RuleError::InvalidArgument {
                argument: argument.to_owned(),
                reason: "field name is empty".to_owned(),
            });
        }
        if matches!(self.value, Value::Float(v) if !v.is_finite()) {
            return Err(RuleError::InvalidArgument {
                argument: argument.to_owned(),
                reason: format!("field '{}' is compared with a non-finite float", self.field),
            });
        }
        if !self.op.accepts(&self.value) {
            return Err(RuleError::InvalidArgument {
                argument: argument.to_owned(),
                reason: format!(
                    "operator '{}' cannot compare field '{}' with a {} value",
                    self.op,
                    self.field,
                    self.value.type_name()
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.op
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for FieldPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_bare_name(&self.field) {
            f.write_str(&self.field)?;
        } else {
            write_quoted(f, &self.field)?;
        }
        write!(f, " {} {}", self.op, self.value)
    }
}

impl FromStr for FieldPredicate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_predicate(s)
    }
}

/// Intermediate builder for field predicates.
/// Created by [`field()`]; requires a comparison method to produce a [`FieldPredicate`].
///
/// Unlike [`FieldPredicate::new`], these helpers do not validate; the check
/// happens in [`RuleBuilder::build`](crate::RuleBuilder::build).
#[derive(Debug, Clone)]
pub struct FieldExpr {
    name: String,
}

impl FieldExpr {
    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> FieldPredicate {
        self.compare(CompareOp::Lte, value)
    }

    #[must_use]
    pub fn compare(self, op: CompareOp, value: impl Into<Value>) -> FieldPredicate {
        FieldPredicate::unchecked(self.name, op, value.into())
    }
}

#[must_use]
pub fn field(name: &str) -> FieldExpr {
    FieldExpr {
        name: name.to_owned(),
    }
}

/// Short-circuit condition on a compound predicate. When satisfied, the
/// rule fires its `then[match]` branch instead of the default one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreakClause {
    predicate: FieldPredicate,
}

impl BreakClause {
    pub(crate) fn new(predicate: FieldPredicate) -> Self {
        Self { predicate }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        self.predicate.field()
    }

    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.predicate.op()
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        self.predicate.value()
    }

    #[must_use]
    pub fn predicate(&self) -> &FieldPredicate {
        &self.predicate
    }
}

impl fmt::Display for BreakClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "break when {}", self.predicate)
    }
}
