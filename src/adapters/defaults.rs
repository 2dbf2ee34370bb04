// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default literal source adapter.

use crate::domain::{FieldDescriptor, Result};
use crate::ports::{PropertySource, SourceRecord};

/// Yields every field's default literal.
///
/// Literals are yielded even when empty: an empty default means
/// "intentionally unset" and stages the field's zero value. All entries carry
/// [`Origin::Default`](crate::ports::Origin::Default), so fields committed in
/// an earlier round are skipped rather than reset.
///
/// # Examples
///
/// ```rust
/// use propbind::adapters::DefaultsSource;
/// use propbind::domain::{FieldDescriptor, FieldKind, RawValue};
/// use propbind::ports::PropertySource;
///
/// let port = FieldDescriptor::new("port", FieldKind::Integer, "PORT", "8080");
/// let record = DefaultsSource::new().collect(&[&port]).unwrap();
/// assert_eq!(record.get("PORT").unwrap().value, RawValue::from("8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultsSource;

impl DefaultsSource {
    /// Creates a new defaults source.
    pub fn new() -> Self {
        DefaultsSource
    }
}

impl PropertySource for DefaultsSource {
    fn name(&self) -> &str {
        "defaults"
    }

    fn stages_empty(&self) -> bool {
        true
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        let mut record = SourceRecord::new();
        for field in fields {
            record.insert_default(field.key(), field.default_literal());
        }
        Ok(record)
    }
}
