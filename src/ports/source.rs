// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property source trait definition.
//!
//! This module defines the `PropertySource` trait, the port every adapter
//! (defaults, environment, arguments, files, callbacks) implements. A source
//! looks at the catalog's field descriptors and produces a transient
//! [`SourceRecord`] for one resolution pass.

use crate::domain::{FieldDescriptor, RawValue, Result};
use std::collections::HashMap;

/// Whether a record entry is a genuine value or a fallback to the field's
/// default literal.
///
/// Fallback entries never overwrite a field that an earlier round already
/// committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The source supplied this value
    Value,
    /// The source fell back to the default literal
    Default,
}

/// One candidate value in a [`SourceRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    /// The raw value as surfaced by the source
    pub value: RawValue,
    /// Where the value came from
    pub origin: Origin,
}

/// Candidate values produced by one source for one pass, keyed by the field's
/// source key exactly as declared in the catalog.
///
/// # Examples
///
/// ```
/// use propbind::ports::{Origin, SourceRecord};
///
/// let mut record = SourceRecord::new();
/// record.insert_value("OPT_B", "8888");
/// record.insert_default("OPT_C", "false");
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("OPT_C").unwrap().origin, Origin::Default);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRecord {
    entries: HashMap<String, SourceEntry>,
}

impl SourceRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a genuine value for `key`, replacing any earlier entry.
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.insert(key, value, Origin::Value);
    }

    /// Adds a default-literal fallback for `key`, replacing any earlier entry.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.insert(key, value, Origin::Default);
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>, origin: Origin) {
        self.entries.insert(
            key.into(),
            SourceEntry {
                value: value.into(),
                origin,
            },
        );
    }

    /// Returns the entry for `key`, if the source yielded one.
    pub fn get(&self, key: &str) -> Option<&SourceEntry> {
        self.entries.get(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the source yielded nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A trait for property sources.
///
/// Sources are pure producers: they read their input (environment, argument
/// list, file, callback) and report candidate values for the fields they know
/// about. Staging, skipping and coercion happen in the catalog.
///
/// # Examples
///
/// ```rust
/// use propbind::domain::{FieldDescriptor, Result};
/// use propbind::ports::{PropertySource, SourceRecord};
///
/// struct Fixed;
///
/// impl PropertySource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
///         let mut record = SourceRecord::new();
///         for field in fields {
///             record.insert_value(field.key(), "42");
///         }
///         Ok(record)
///     }
/// }
/// ```
pub trait PropertySource {
    /// Returns the name of this source, used in logs.
    fn name(&self) -> &str;

    /// Returns `true` if an empty text value from this source should be staged
    /// as the field's zero value rather than ignored.
    ///
    /// Only the defaults source treats an empty literal as authoritative.
    fn stages_empty(&self) -> bool {
        false
    }

    /// Produces candidate values for `fields`.
    ///
    /// Called once per resolution pass.
    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord>;
}
