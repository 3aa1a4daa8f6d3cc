use winnow::ascii::{digit1, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_while};

use crate::{CompareOp, FieldPredicate, Value};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    repeat(
        0..,
        alt((
            take_while(1.., char::is_whitespace).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)
}

// -- Quoted text ------------------------------------------------------------

fn escaped_char(input: &mut &str) -> ModalResult<char> {
    preceded(
        '\\',
        cut_err(alt((
            '"'.value('"'),
            '\\'.value('\\'),
            'n'.value('\n'),
            't'.value('\t'),
        )))
        .context(StrContext::Expected(StrContextValue::Description(
            "escape sequence",
        ))),
    )
    .parse_next(input)
}

/// `"..."` with `\"`, `\\`, `\n` and `\t` escapes. Used for string values and
/// for field names that are not bare identifiers.
fn quoted_text(input: &mut &str) -> ModalResult<String> {
    delimited(
        '"',
        repeat(0.., alt((escaped_char, none_of(['"', '\\'])))).fold(
            String::new,
            |mut text, c| {
                text.push(c);
                text
            },
        ),
        cut_err('"').context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
    )
    .parse_next(input)
}

// -- Field names ------------------------------------------------------------

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Whether `name` can be written without quotes.
pub(crate) fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

fn field_name(input: &mut &str) -> ModalResult<String> {
    alt((
        (one_of(is_name_start), take_while(0.., is_name_char))
            .take()
            .map(str::to_owned),
        quoted_text,
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "field name",
    )))
    .parse_next(input)
}

// -- Values -----------------------------------------------------------------

/// `-12`, `90.0`, `1e20`, `-1.5E-7`. A fraction or exponent makes a float.
fn number(input: &mut &str) -> ModalResult<Value> {
    let text = (
        opt('-'),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;
    let parsed = if text.contains(['.', 'e', 'E']) {
        text.parse().map(Value::Float).ok()
    } else {
        text.parse().map(Value::Int).ok()
    };
    parsed.ok_or_else(|| ErrMode::from_input(input).cut())
}

fn value(input: &mut &str) -> ModalResult<Value> {
    ws.parse_next(input)?;
    alt((
        quoted_text.map(Value::String),
        "true".value(Value::Bool(true)),
        "false".value(Value::Bool(false)),
        number,
    ))
    .context(StrContext::Expected(StrContextValue::Description("value")))
    .parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        ">=".value(CompareOp::Gte),
        ">".value(CompareOp::Gt),
        "<=".value(CompareOp::Lte),
        "<".value(CompareOp::Lt),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
        "greaterOrEqual".value(CompareOp::Gte),
        "greaterThan".value(CompareOp::Gt),
        "lessOrEqual".value(CompareOp::Lte),
        "lessThan".value(CompareOp::Lt),
        "notEqual".value(CompareOp::Neq),
        "equal".value(CompareOp::Eq),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "comparison operator",
    )))
    .parse_next(input)
}

// -- Predicates -------------------------------------------------------------

fn predicate(input: &mut &str) -> ModalResult<FieldPredicate> {
    ws.parse_next(input)?;
    let name = field_name.parse_next(input)?;
    let op = cut_err(compare_op).parse_next(input)?;
    let val = cut_err(value).parse_next(input)?;
    Ok(FieldPredicate::unchecked(name, op, val))
}

pub(super) fn single_predicate(input: &mut &str) -> ModalResult<FieldPredicate> {
    let p = predicate(input)?;
    ws.parse_next(input)?;
    Ok(p)
}

pub(super) fn predicate_list(input: &mut &str) -> ModalResult<Vec<FieldPredicate>> {
    let list: Vec<FieldPredicate> = separated(0.., predicate, (ws, ',')).parse_next(input)?;
    opt((ws, ',')).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(list)
}

// -- Membership -------------------------------------------------------------

fn value_list(input: &mut &str) -> ModalResult<Vec<Value>> {
    delimited(
        (ws, '('),
        separated(0.., value, (ws, ',')),
        (ws, cut_err(')')),
    )
    .parse_next(input)
}

fn membership_entry(input: &mut &str) -> ModalResult<(String, Vec<Value>)> {
    ws.parse_next(input)?;
    let name = field_name.parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(alt(("isIn", "in")))
        .context(StrContext::Expected(StrContextValue::StringLiteral("in")))
        .parse_next(input)?;
    let values = cut_err(value_list)
        .context(StrContext::Expected(StrContextValue::Description(
            "parenthesized value list",
        )))
        .parse_next(input)?;
    Ok((name, values))
}

pub(super) fn membership_list(input: &mut &str) -> ModalResult<Vec<(String, Vec<Value>)>> {
    let list: Vec<(String, Vec<Value>)> =
        separated(0.., membership_entry, (ws, ',')).parse_next(input)?;
    opt((ws, ',')).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(list)
}
