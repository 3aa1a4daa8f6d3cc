//! A compact text notation for field predicates and membership lists.
//!
//! ```text
//! OUTLOOK == "sunny", TEMPERATURE < 90, TEMPERATURE greaterThan 50
//! INPUT1 in (-5, 0.5, 1, 10), INPUT2 in (3, 8.5)
//! ```
//!
//! Operators may be written as symbols or by their model-document names
//! (`equal`, `notEqual`, `lessThan`, `lessOrEqual`, `greaterThan`,
//! `greaterOrEqual`). `#` starts a comment that runs to the end of the line.
//!
//! Numbers with a fraction or exponent (`90.0`, `1e20`) are floats, the rest
//! are integers. Strings are double-quoted with `\"`, `\\`, `\n` and `\t`
//! escapes. A field name that is not a bare identifier (letters, digits, `_`
//! and `.`, not starting with a digit) is written as a quoted string:
//!
//! ```text
//! "SEPAL WIDTH" >= 5.45
//! ```

mod error;
mod grammar;

pub use error::ParseError;
pub(crate) use grammar::is_bare_name;

use crate::{FieldPredicate, Value};

/// Parse a single predicate such as `TEMPERATURE >= 90`.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not exactly one predicate.
pub fn parse_predicate(input: &str) -> Result<FieldPredicate, ParseError> {
    use winnow::Parser;
    grammar::single_predicate
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

/// Parse a comma-separated list of predicates, keeping their order.
///
/// Operator/value compatibility is not checked here; it is checked when the
/// predicates reach [`RuleBuilder::build`](crate::RuleBuilder::build).
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid notation.
pub fn parse_predicates(input: &str) -> Result<Vec<FieldPredicate>, ParseError> {
    use winnow::Parser;
    grammar::predicate_list
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

/// Parse a comma-separated list of `FIELD in (v1, v2, ...)` entries.
///
/// The result feeds either
/// [`with_in_constraints`](crate::RuleBuilder::with_in_constraints) or
/// [`with_not_in_constraints`](crate::RuleBuilder::with_not_in_constraints).
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid notation.
pub fn parse_membership(input: &str) -> Result<Vec<(String, Vec<Value>)>, ParseError> {
    use winnow::Parser;
    grammar::membership_list
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
