// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which turns the text of a
//! structured configuration file into a flat map of native-typed raw values.

use crate::domain::{RawValue, Result};
use std::collections::HashMap;

/// A trait for parsing structured key-value documents.
///
/// # Key Format
///
/// Parsers should flatten nested mappings using dot notation, so that
///
/// ```yaml
/// database:
///   port: 5432
/// ```
///
/// is reported as `database.port` -> `RawValue::Integer(5432)`. Scalars keep
/// their native type where the format has one.
///
/// # Examples
///
/// ```rust
/// use propbind::domain::{RawValue, Result};
/// use propbind::ports::DocumentParser;
/// use std::collections::HashMap;
///
/// struct KeyEqualsValue;
///
/// impl DocumentParser for KeyEqualsValue {
///     fn parse(&self, content: &str) -> Result<HashMap<String, RawValue>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), RawValue::from(v)))
///             .collect())
///     }
/// }
///
/// let parsed = KeyEqualsValue.parse("opt_a=filled").unwrap();
/// assert_eq!(parsed.get("opt_a"), Some(&RawValue::from("filled")));
/// ```
pub trait DocumentParser {
    /// Parses document content into a flat key to raw-value map.
    ///
    /// Failures are reported as
    /// [`BindError::FileParse`](crate::domain::BindError::FileParse); the
    /// caller fills in the path.
    fn parse(&self, content: &str) -> Result<HashMap<String, RawValue>>;
}
