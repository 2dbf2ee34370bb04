// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value coercion from raw source values into declared field types.
//!
//! | raw \ declared | integer            | text        | boolean                       |
//! |----------------|--------------------|-------------|-------------------------------|
//! | text           | base-10 `i64`      | verbatim    | `true/false/1/0/t/f`, any case |
//! | integer        | as is              | decimal     | `0` or `1` only               |
//! | boolean        | error              | `true/false`| as is                         |
//!
//! Empty text is handled by the resolution pass, not here: it either leaves the
//! staged value alone or, for the defaults source, stages [`zero_value`].

use crate::domain::errors::{BindError, Result};
use crate::domain::value::{FieldKind, FieldValue, RawValue};

/// Converts `raw` into a value of the declared `kind`.
///
/// `field` is only used to label errors.
///
/// # Examples
///
/// ```
/// use propbind::domain::{coerce, FieldKind, FieldValue, RawValue};
///
/// let value = coerce(&RawValue::from("T"), FieldKind::Boolean, "verbose").unwrap();
/// assert_eq!(value, FieldValue::Boolean(true));
///
/// assert!(coerce(&RawValue::from("maybe"), FieldKind::Boolean, "verbose").is_err());
/// ```
pub fn coerce(raw: &RawValue, kind: FieldKind, field: &str) -> Result<FieldValue> {
    match (kind, raw) {
        (FieldKind::Unsupported(type_name), _) => Err(BindError::UnsupportedType {
            field: field.to_string(),
            type_name,
        }),

        (FieldKind::Text, RawValue::Text(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldKind::Text, other) => Ok(FieldValue::Text(other.to_string())),

        (FieldKind::Integer, RawValue::Text(s)) => s
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| mismatch(raw, kind, field)),
        (FieldKind::Integer, RawValue::Integer(n)) => Ok(FieldValue::Integer(*n)),
        (FieldKind::Integer, RawValue::Boolean(_)) => Err(mismatch(raw, kind, field)),

        (FieldKind::Boolean, RawValue::Text(s)) => parse_bool(s)
            .map(FieldValue::Boolean)
            .ok_or_else(|| mismatch(raw, kind, field)),
        (FieldKind::Boolean, RawValue::Integer(0)) => Ok(FieldValue::Boolean(false)),
        (FieldKind::Boolean, RawValue::Integer(1)) => Ok(FieldValue::Boolean(true)),
        (FieldKind::Boolean, RawValue::Integer(_)) => Err(mismatch(raw, kind, field)),
        (FieldKind::Boolean, RawValue::Boolean(b)) => Ok(FieldValue::Boolean(*b)),
    }
}

/// Returns the value an empty defaults literal stands for.
///
/// An empty default means "intentionally unset", so the field is reset to
/// `0`, `""` or `false`.
pub fn zero_value(kind: FieldKind, field: &str) -> Result<FieldValue> {
    match kind {
        FieldKind::Integer => Ok(FieldValue::Integer(0)),
        FieldKind::Text => Ok(FieldValue::Text(String::new())),
        FieldKind::Boolean => Ok(FieldValue::Boolean(false)),
        FieldKind::Unsupported(type_name) => Err(BindError::UnsupportedType {
            field: field.to_string(),
            type_name,
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

fn mismatch(raw: &RawValue, kind: FieldKind, field: &str) -> BindError {
    BindError::TypeCoercion {
        field: field.to_string(),
        value: raw.to_string(),
        target: kind.name(),
    }
}
