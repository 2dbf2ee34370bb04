// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use propbind::domain::{FieldDescriptor, Result};
use propbind::ports::{PropertySource, SourceRecord};
use std::collections::HashMap;
use std::env;

/// The three-field record used across the integration tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub option_a: String,
    pub option_b: i64,
    pub option_c: bool,
}

propbind::bindable!(Configuration {
    option_a: text = ("OPT_A", "unfilled"),
    option_b: integer = ("OPT_B", "4444"),
    option_c: boolean = ("OPT_C", "false"),
});

/// The record expected after binding `filled`, `8888` and `true`.
pub fn filled() -> Configuration {
    Configuration {
        option_a: "filled".to_string(),
        option_b: 8888,
        option_c: true,
    }
}

/// A source with predefined values, keyed by source key.
///
/// Entries added with [`MockSource::with_default`] are tagged as default
/// fallbacks, the way the environment source tags missing variables.
#[derive(Debug, Clone)]
pub struct MockSource {
    name: String,
    values: HashMap<String, String>,
    defaults: HashMap<String, String>,
    calls: usize,
}

impl MockSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
            defaults: HashMap::new(),
            calls: 0,
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl PropertySource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        self.calls += 1;
        let mut record = SourceRecord::new();
        for field in fields {
            if let Some(value) = self.values.get(field.key()) {
                record.insert_value(field.key(), value.as_str());
            } else if let Some(value) = self.defaults.get(field.key()) {
                record.insert_default(field.key(), value.as_str());
            }
        }
        Ok(record)
    }
}

/// Sets environment variables and removes them on drop.
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Environment values for the filled scenario, without touching the process.
pub fn filled_env() -> HashMap<String, String> {
    let mut values = HashMap::new();
    values.insert("OPT_A".to_string(), "filled".to_string());
    values.insert("OPT_B".to_string(), "8888".to_string());
    values.insert("OPT_C".to_string(), "true".to_string());
    values
}
