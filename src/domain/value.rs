// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw and staged value types.
//!
//! Sources surface [`RawValue`]s: text from the environment and arguments, or
//! native scalars from YAML documents and callbacks. The coercer turns a raw
//! value into a [`FieldValue`] whose variant always matches the field's
//! declared [`FieldKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a bindable field.
///
/// # Examples
///
/// ```
/// use propbind::domain::FieldKind;
///
/// assert_eq!(FieldKind::Integer.name(), "integer");
/// assert!(!FieldKind::Unsupported("f64").is_supported());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed 64-bit integer
    Integer,
    /// UTF-8 text
    Text,
    /// Boolean flag
    Boolean,
    /// Any other declared type, named for error reporting
    Unsupported(&'static str),
}

impl FieldKind {
    /// Returns the name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::Unsupported(name) => *name,
        }
    }

    /// Returns `true` for integer, text and boolean.
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldKind::Unsupported(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value as surfaced by a source, before coercion.
///
/// # Examples
///
/// ```
/// use propbind::domain::RawValue;
///
/// assert_eq!(RawValue::from("8888"), RawValue::Text("8888".to_string()));
/// assert_eq!(RawValue::from(8888i64).to_string(), "8888");
/// assert!(RawValue::from("").is_empty_text());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Native boolean
    Boolean(bool),
    /// Native integer
    Integer(i64),
    /// Text, to be parsed according to the field's kind
    Text(String),
}

impl RawValue {
    /// Returns `true` when this is a text value with no characters.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.is_empty())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Integer(n)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

/// A coerced value waiting in a field's staging slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Staged integer
    Integer(i64),
    /// Staged text
    Text(String),
    /// Staged boolean
    Boolean(bool),
}

impl FieldValue {
    /// Returns the kind this value was coerced to.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Returns the integer, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}
