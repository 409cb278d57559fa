//! Literal rendering for the query dialect.
//!
//! - strings (and anything declared with a string type) are double-quoted
//! - collections render as `(a, b, c)`; all elements are quoted as soon as one of
//!   them is a string or the declared type is a string type
//! - instants are encoded as integers according to their declared type:
//!   `timestamp` as microseconds, `datetime` as seconds since the unix epoch
//!
//! Instants are converted by [`resolve`] when a condition is created, so the
//! renderer itself never fails.

use crate::condition::Operator;
use crate::error::{QueryError, QueryResult};
use crate::value::{TypeTag, Value};
use chrono::{DateTime, Utc};

const MICROS_PER_SECOND: i64 = 1_000_000;
const NANOS_PER_MICRO: u32 = 1_000;

/// Microseconds since the unix epoch. Sub-microsecond precision is floored.
pub fn to_epoch_micros(at: &DateTime<Utc>) -> i64 {
    at.timestamp() * MICROS_PER_SECOND + i64::from(at.timestamp_subsec_nanos() / NANOS_PER_MICRO)
}

/// Seconds since the unix epoch. The fractional part is discarded.
pub fn to_epoch_seconds(at: &DateTime<Utc>) -> i64 {
    at.timestamp()
}

/// Inverse of [`to_epoch_micros`], for values read back from `timestamp` columns.
pub fn instant_from_micros(micros: i64) -> QueryResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| QueryError::validation(format!("timestamp out of range: {micros}")))
}

/// Inverse of [`to_epoch_seconds`], for values read back from `datetime` columns.
pub fn instant_from_seconds(seconds: i64) -> QueryResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| QueryError::validation(format!("datetime out of range: {seconds}")))
}

/// Check a value against its declared type and encode instants as integers.
pub(crate) fn resolve(
    column: &str,
    operator: Operator,
    value: Value,
    declared: Option<&TypeTag>,
) -> QueryResult<Value> {
    match value {
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::List(_) => Err(QueryError::type_mismatch(
                    column,
                    "nested collections are not supported",
                )),
                item => resolve_scalar(column, operator, item, declared),
            })
            .collect::<QueryResult<Vec<_>>>()
            .map(Value::List),
        scalar => resolve_scalar(column, operator, scalar, declared),
    }
}

fn resolve_scalar(
    column: &str,
    operator: Operator,
    value: Value,
    declared: Option<&TypeTag>,
) -> QueryResult<Value> {
    if let Value::Float(n) = value
        && !n.is_finite()
    {
        return Err(QueryError::type_mismatch(
            column,
            format!("{n} has no literal form"),
        ));
    }

    let Some(declared) = declared else {
        return match value {
            Value::Instant(_) => Err(QueryError::MissingDeclaredType {
                column: column.to_string(),
                operator,
            }),
            value => Ok(value),
        };
    };

    if let Value::Instant(at) = value {
        return match declared.base() {
            TypeTag::Timestamp => Ok(Value::Int(to_epoch_micros(&at))),
            TypeTag::Datetime => Ok(Value::Int(to_epoch_seconds(&at))),
            _ => Err(QueryError::UnsupportedTemporalType {
                column: column.to_string(),
                declared: declared.clone(),
            }),
        };
    }

    if !declared.accepts(&value) {
        return Err(QueryError::type_mismatch(
            column,
            format!("{} value is not compatible with declared type {declared}", value.kind()),
        ));
    }
    Ok(value)
}

/// Render a value as a literal.
pub fn render(value: &Value, declared: Option<&TypeTag>) -> String {
    let mut out = String::new();
    write_literal(&mut out, value, declared);
    out
}

pub(crate) fn write_literal(out: &mut String, value: &Value, declared: Option<&TypeTag>) {
    let quote = declared.is_some_and(TypeTag::is_string);
    match value {
        Value::List(items) => {
            let quote = quote || items.iter().any(Value::is_string);
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_scalar(out, item, quote);
            }
            out.push(')');
        }
        scalar => write_scalar(out, scalar, quote),
    }
}

fn write_scalar(out: &mut String, value: &Value, quote: bool) {
    match value {
        Value::String(s) => write_quoted(out, s),
        other if quote => write_quoted(out, &other.to_string()),
        other => out.push_str(&other.to_string()),
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}
