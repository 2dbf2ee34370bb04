// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument source adapter.
//!
//! This module provides a source that reads `key=value` tokens from an
//! argument list.

use crate::domain::{FieldDescriptor, Result};
use crate::ports::{PropertySource, SourceRecord};
use std::collections::HashMap;

/// Property source for command-line arguments.
///
/// Recognized token shapes:
/// - `key=value`: split at the first `=`, so the value may itself contain `=`
/// - `key`: a bare key, yielding an empty value (which stages nothing)
///
/// Leading dashes are stripped from keys, so `--port=80` and `port=80` are
/// equivalent. Keys are matched case-insensitively against source keys and the
/// last occurrence of a key wins. Only fields whose key appears are yielded.
///
/// # Examples
///
/// ```rust
/// use propbind::adapters::ArgsSource;
///
/// let source = ArgsSource::from_args(vec!["opt_a=filled", "--opt_b=8888", "verbose"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgsSource {
    /// Parsed arguments, keyed by lower-cased key
    values: HashMap<String, String>,
}

impl ArgsSource {
    /// Creates a source with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from an argument list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propbind::adapters::ArgsSource;
    ///
    /// let source = ArgsSource::from_args(vec!["opt_c=true"]);
    /// assert_eq!(source.len(), 1);
    /// ```
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new();
        for arg in args {
            source.parse_token(arg.as_ref());
        }
        source
    }

    /// Creates a source from the process's command-line arguments.
    ///
    /// This skips the first argument (the program name).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use propbind::adapters::ArgsSource;
    ///
    /// let source = ArgsSource::from_env_args();
    /// ```
    pub fn from_env_args() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Returns the number of distinct keys parsed.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no keys were parsed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn parse_token(&mut self, token: &str) {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, value),
            None => (token, ""),
        };
        let key = key.trim_start_matches('-');
        if key.is_empty() {
            tracing::trace!("Ignoring argument without a key: {:?}", token);
            return;
        }
        self.values.insert(key.to_lowercase(), value.to_string());
    }
}

impl PropertySource for ArgsSource {
    fn name(&self) -> &str {
        "args"
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        let mut record = SourceRecord::new();
        for field in fields {
            if let Some(value) = self.values.get(&field.key().to_lowercase()) {
                record.insert_value(field.key(), value.as_str());
            }
        }
        Ok(record)
    }
}
