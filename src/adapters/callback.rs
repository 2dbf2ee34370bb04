// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback source adapter.
//!
//! This module provides a source backed by a caller-supplied function, which
//! can fetch values from anywhere (a secrets store, an HTTP API, a test
//! fixture).

use crate::adapters::lookup_key;
use crate::domain::{BindError, BoxError, FieldDescriptor, RawValue, Result};
use crate::ports::{PropertySource, SourceRecord};
use std::collections::HashMap;
use std::fmt;

type Callback = Box<dyn FnMut() -> std::result::Result<HashMap<String, RawValue>, BoxError>>;

/// Property source for a caller-supplied function.
///
/// The function is invoked exactly once per resolution pass. Returned keys are
/// matched case-insensitively against source keys, with an exact-case key
/// taking precedence. Values keep the native type they were returned with.
///
/// # Examples
///
/// ```rust
/// use propbind::adapters::CallbackSource;
/// use std::collections::HashMap;
///
/// let source = CallbackSource::new(|| {
///     let mut values = HashMap::new();
///     values.insert("opt_a".to_string(), "filled".to_string());
///     Ok::<_, std::io::Error>(values)
/// });
/// ```
pub struct CallbackSource {
    callback: Option<Callback>,
}

impl CallbackSource {
    /// Creates a source from a function returning a key to value map.
    ///
    /// Values may be anything convertible to a [`RawValue`]: `String`,
    /// `&str`, `i64`, `bool` or `RawValue` itself.
    pub fn new<F, V, E>(mut callback: F) -> Self
    where
        F: FnMut() -> std::result::Result<HashMap<String, V>, E> + 'static,
        V: Into<RawValue>,
        E: Into<BoxError>,
    {
        Self {
            callback: Some(Box::new(
                move || -> std::result::Result<HashMap<String, RawValue>, BoxError> {
                    callback()
                        .map(|values| {
                            values
                                .into_iter()
                                .map(|(key, value)| (key, value.into()))
                                .collect()
                        })
                        .map_err(Into::into)
                },
            )),
        }
    }

    /// Creates a source with no function. Every pass using it fails with
    /// [`BindError::Callback`].
    pub fn unset() -> Self {
        Self { callback: None }
    }

    /// Creates a source from an optional function.
    pub fn from_option<F, V, E>(callback: Option<F>) -> Self
    where
        F: FnMut() -> std::result::Result<HashMap<String, V>, E> + 'static,
        V: Into<RawValue>,
        E: Into<BoxError>,
    {
        match callback {
            Some(callback) => Self::new(callback),
            None => Self::unset(),
        }
    }
}

impl fmt::Debug for CallbackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSource")
            .field("set", &self.callback.is_some())
            .finish()
    }
}

impl PropertySource for CallbackSource {
    fn name(&self) -> &str {
        "callback"
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        let callback = self.callback.as_mut().ok_or_else(|| BindError::Callback {
            message: "no callback provided".to_string(),
            source: None,
        })?;

        let values = callback().map_err(|e| BindError::Callback {
            message: e.to_string(),
            source: Some(e),
        })?;

        let mut record = SourceRecord::new();
        for field in fields {
            if let Some(value) = lookup_key(&values, field.key()) {
                record.insert_value(field.key(), value.clone());
            }
        }

        tracing::debug!(
            "Callback returned {} values, {} matched",
            values.len(),
            record.len()
        );
        Ok(record)
    }
}
