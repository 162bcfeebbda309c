//! WHERE-clause compiler
//!
//! A condition is exactly one `column operator literal` comparison; there is
//! no AND/OR composition.

use crate::{
    config::Config,
    error::{Error, Result},
    sql::types::Row,
};

/// Row test produced by [`compile`]
pub type Predicate = Box<dyn Fn(&Row) -> bool + Send + Sync>;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Equal,
    Greater,
    Less,
}

/// Predicate matching every row, used when a statement has no WHERE clause
pub fn always() -> Predicate {
    Box::new(|_: &Row| true)
}

/// Compiles an optional WHERE fragment; `None` matches every row
pub fn compile_optional(fragment: Option<&str>, config: &Config) -> Result<Predicate> {
    fragment.map_or_else(|| Ok(always()), |f| compile(f, config))
}

/// Compiles a `column operator literal` fragment into a row test
///
/// `=` compares the value's text with the literal text exactly. With literal
/// coercion enabled, stored strings have lost their quotes, so a quoted
/// literal is then compared by its content instead.
pub fn compile(fragment: &str, config: &Config) -> Result<Predicate> {
    let (column, operator, literal) = split_condition(fragment)?;

    let operator = match operator {
        "=" => Operator::Equal,
        ">" => Operator::Greater,
        "<" => Operator::Less,
        op => {
            return Err(Error::InvalidCondition(format!(
                "unsupported operator {} in {}",
                op, fragment
            )));
        }
    };

    let column = column.to_string();
    match operator {
        Operator::Equal => {
            let expected = match unquote(literal) {
                Some(content) if config.coerce_literals => content.to_string(),
                _ => literal.to_string(),
            };
            Ok(Box::new(move |row: &Row| {
                row.get(&column)
                    .is_some_and(|value| value.to_string() == expected)
            }))
        }
        Operator::Greater | Operator::Less => {
            let threshold: f64 = literal.parse()?;
            Ok(Box::new(move |row: &Row| {
                match row.get(&column).and_then(|v| v.as_f64()) {
                    Some(n) if operator == Operator::Greater => n > threshold,
                    Some(n) => n < threshold,
                    None => false,
                }
            }))
        }
    }
}

/// Splits a fragment into its three parts; only a single quoted span may contain whitespace
fn split_condition(fragment: &str) -> Result<(&str, &str, &str)> {
    let invalid = || {
        Error::InvalidCondition(format!(
            "expected 'column operator value', got '{}'",
            fragment
        ))
    };

    let (column, rest) = fragment
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(invalid)?;
    let (operator, literal) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(invalid)?;
    let literal = literal.trim();
    let single_span = unquote(literal).is_some_and(|content| !content.contains('\''));
    if literal.is_empty() || (literal.contains(char::is_whitespace) && !single_span) {
        return Err(invalid());
    }
    Ok((column, operator, literal))
}

fn unquote(literal: &str) -> Option<&str> {
    literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
}
