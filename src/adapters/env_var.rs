// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable source adapter.
//!
//! This module provides a source that looks up each field's source key in the
//! process environment, falling back to the field's default literal.

use crate::domain::{FieldDescriptor, Result};
use crate::ports::{PropertySource, SourceRecord};
use std::collections::HashMap;
use std::env;
use std::fmt;

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Property source for environment variables.
///
/// For each field the source key (with the optional prefix prepended) is
/// looked up exactly as written. A present, non-empty variable is yielded as a
/// genuine value; an absent or empty one falls back to the field's default
/// literal, tagged as a default so it never clobbers a field committed in an
/// earlier round.
///
/// # Examples
///
/// ```rust
/// use propbind::adapters::EnvVarSource;
///
/// // Read the process environment
/// let source = EnvVarSource::new();
///
/// // Look up APP_PORT for a field keyed PORT
/// let source = EnvVarSource::with_prefix("APP_");
/// ```
pub struct EnvVarSource {
    /// Optional prefix prepended to every source key
    prefix: Option<String>,
    /// Variable lookup, the process environment unless injected
    lookup: Lookup,
}

impl EnvVarSource {
    /// Creates a source that reads the process environment.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lookup: Box::new(|name: &str| env::var(name).ok()),
        }
    }

    /// Creates a source that reads the process environment, prepending
    /// `prefix` to each source key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propbind::adapters::EnvVarSource;
    ///
    /// let source = EnvVarSource::with_prefix("MYAPP_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new().prefix(prefix)
    }

    /// Creates a source with an injected lookup function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propbind::adapters::EnvVarSource;
    ///
    /// let source = EnvVarSource::with_lookup(|name| match name {
    ///     "OPT_A" => Some("filled".to_string()),
    ///     _ => None,
    /// });
    /// ```
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            prefix: None,
            lookup: Box::new(lookup),
        }
    }

    /// Creates a source backed by a fixed map of variables.
    ///
    /// Useful in tests that should not touch the process environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propbind::adapters::EnvVarSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("OPT_B".to_string(), "8888".to_string());
    ///
    /// let source = EnvVarSource::with_values(values);
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self::with_lookup(move |name| values.get(name).cloned())
    }

    /// Sets the prefix prepended to every source key.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn variable_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Looks up a variable, treating an empty value as absent.
    fn read_var(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.is_empty())
    }
}

impl Default for EnvVarSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvVarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarSource")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl PropertySource for EnvVarSource {
    fn name(&self) -> &str {
        "env"
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        let mut record = SourceRecord::new();
        let mut found = 0usize;
        for field in fields {
            let name = self.variable_name(field.key());
            match self.read_var(&name) {
                Some(value) => {
                    record.insert_value(field.key(), value);
                    found += 1;
                }
                None => record.insert_default(field.key(), field.default_literal()),
            }
        }

        tracing::debug!(
            "Found {} of {} environment variables (prefix={:?})",
            found,
            fields.len(),
            self.prefix
        );
        Ok(record)
    }
}
