// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file source adapter.
//!
//! This module provides a source that reads native-typed values from a YAML
//! document.

use crate::adapters::lookup_key;
use crate::domain::{BindError, FieldDescriptor, RawValue, Result};
use crate::ports::{DocumentParser, PropertySource, SourceRecord};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// YAML parser implementation.
///
/// Nested mappings are flattened with dot notation and keys are lower-cased,
/// so when keys differ only in case the last one in the document wins.
/// Integer and boolean keys are rendered as text. Strings, integers and
/// booleans keep their native type; floats and integers outside `i64` are
/// surfaced as text; `null` is surfaced as empty text. Sequences are ignored.
///
/// # Examples
///
/// ```rust
/// use propbind::adapters::YamlParser;
/// use propbind::domain::RawValue;
/// use propbind::ports::DocumentParser;
///
/// let parser = YamlParser::new();
/// let result = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// assert_eq!(result.get("database.host"), Some(&RawValue::from("localhost")));
/// assert_eq!(result.get("database.port"), Some(&RawValue::Integer(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Flattens a YAML value into a flat map with dot notation keys.
    fn flatten_yaml(
        value: &serde_yaml::Value,
        prefix: &str,
        result: &mut HashMap<String, RawValue>,
    ) {
        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    let key_str = match key {
                        serde_yaml::Value::String(s) => s.to_lowercase(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => {
                            tracing::debug!("Ignoring non-scalar key {:?} at '{}'", other, prefix);
                            continue;
                        }
                    };
                    let new_prefix = if prefix.is_empty() {
                        key_str
                    } else {
                        format!("{}.{}", prefix, key_str)
                    };
                    Self::flatten_yaml(val, &new_prefix, result);
                }
            }
            serde_yaml::Value::Sequence(_) => {
                tracing::debug!("Ignoring sequence at '{}'", prefix);
            }
            serde_yaml::Value::String(s) => {
                result.insert(prefix.to_string(), RawValue::Text(s.clone()));
            }
            serde_yaml::Value::Number(n) => {
                let raw = match n.as_i64() {
                    Some(i) => RawValue::Integer(i),
                    None => RawValue::Text(n.to_string()),
                };
                result.insert(prefix.to_string(), raw);
            }
            serde_yaml::Value::Bool(b) => {
                result.insert(prefix.to_string(), RawValue::Boolean(*b));
            }
            serde_yaml::Value::Null => {
                result.insert(prefix.to_string(), RawValue::Text(String::new()));
            }
            serde_yaml::Value::Tagged(tagged) => {
                Self::flatten_yaml(&tagged.value, prefix, result);
            }
        }
    }
}

impl DocumentParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, RawValue>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| BindError::FileParse {
                path: PathBuf::new(),
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        match value {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(_) => Self::flatten_yaml(&value, "", &mut result),
            _ => {
                return Err(BindError::FileParse {
                    path: PathBuf::new(),
                    message: "Expected a mapping at the top level".to_string(),
                    source: None,
                })
            }
        }
        Ok(result)
    }
}

/// Property source for YAML files.
///
/// The file is read and parsed on every resolution pass. Keys are matched
/// case-insensitively against source keys, an exact-case key taking
/// precedence, and only fields whose key is present in the document are
/// yielded.
///
/// # Examples
///
/// ```rust,no_run
/// use propbind::adapters::YamlFileSource;
///
/// // Read a specific file
/// let source = YamlFileSource::new("/etc/myapp/config.yaml");
///
/// // Read config.yaml from the OS configuration directory
/// let source = YamlFileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
pub struct YamlFileSource {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Document parser
    parser: Box<dyn DocumentParser>,
}

impl YamlFileSource {
    /// Creates a source for the file at `path`.
    ///
    /// Nothing is read until the first resolution pass.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_parser(path, YamlParser::new())
    }

    /// Creates a source that reads `path` with a custom document parser.
    pub fn with_parser<P>(path: impl AsRef<Path>, parser: P) -> Self
    where
        P: DocumentParser + 'static,
    {
        Self {
            file_path: path.as_ref().to_path_buf(),
            parser: Box::new(parser),
        }
    }

    /// Creates a source for `config.yaml` in the OS-appropriate configuration
    /// directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Creates a source for `filename` in the OS-appropriate configuration
    /// directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| BindError::FileRead {
                path: PathBuf::from(filename),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Reads and parses the file.
    fn load(&self) -> Result<HashMap<String, RawValue>> {
        if self.file_path.as_os_str().is_empty() {
            return Err(BindError::MissingPath);
        }

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&self.file_path).map_err(|e| BindError::FileRead {
            path: self.file_path.clone(),
            message: format!("Failed to read file metadata: {}", e),
            source: Some(e),
        })?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(BindError::FileRead {
                path: self.file_path.clone(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| BindError::FileRead {
            path: self.file_path.clone(),
            message: format!("Failed to read configuration file: {}", e),
            source: Some(e),
        })?;

        let values = self
            .parser
            .parse(&content)
            .map_err(|e| e.at_path(&self.file_path))?;

        tracing::debug!(
            "Loaded {} keys from {}",
            values.len(),
            self.file_path.display()
        );

        Ok(values)
    }
}

impl fmt::Debug for YamlFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlFileSource")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl PropertySource for YamlFileSource {
    fn name(&self) -> &str {
        "yaml-file"
    }

    fn collect(&mut self, fields: &[&FieldDescriptor]) -> Result<SourceRecord> {
        let values = self.load()?;
        let mut record = SourceRecord::new();
        for field in fields {
            if let Some(value) = lookup_key(&values, field.key()) {
                record.insert_value(field.key(), value.clone());
            }
        }
        Ok(record)
    }
}
