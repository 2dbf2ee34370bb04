// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the binding engine.
//!
//! Every error is returned synchronously from the catalog build or from the
//! resolution pass that failed. Nothing is retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type accepted from external collaborators such as callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for binding operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use propbind::domain::errors::BindError;
///
/// let err = BindError::MissingPath;
/// assert_eq!(err.to_string(), "No file path was provided");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// The destination record's field table could not be turned into a catalog.
    #[error("Invalid destination record: {reason}")]
    InvalidDestination {
        /// Why the field table was rejected
        reason: String,
    },

    /// A raw value is incompatible with the field's declared type.
    #[error("Cannot convert value '{value}' to type {target} for field '{field}'")]
    TypeCoercion {
        /// The field being staged
        field: String,
        /// The offending raw value, rendered as text
        value: String,
        /// The declared type name
        target: &'static str,
    },

    /// The field's declared type is outside {integer, text, boolean}.
    #[error("Unsupported type {type_name} for field '{field}'")]
    UnsupportedType {
        /// The field being staged
        field: String,
        /// The declared type name
        type_name: &'static str,
    },

    /// A file source was given an empty path.
    #[error("No file path was provided")]
    MissingPath,

    /// The file could not be read.
    #[error("Cannot read file {}: {message}", .path.display())]
    FileRead {
        /// The path that was requested
        path: PathBuf,
        /// The error message
        message: String,
        /// The underlying I/O error, if any
        #[source]
        source: Option<std::io::Error>,
    },

    /// The file was read but is not a valid key-value document.
    #[error("Cannot parse file {}: {message}", .path.display())]
    FileParse {
        /// The path that was parsed
        path: PathBuf,
        /// The error message
        message: String,
        /// The underlying parsing error, if any
        #[source]
        source: Option<BoxError>,
    },

    /// The callback source was unset or returned an error.
    #[error("Callback source failed: {message}")]
    Callback {
        /// The error message
        message: String,
        /// The error returned by the callback, if any
        #[source]
        source: Option<BoxError>,
    },
}

impl BindError {
    /// Creates an `InvalidDestination` error.
    pub fn invalid_destination(reason: impl Into<String>) -> Self {
        BindError::InvalidDestination {
            reason: reason.into(),
        }
    }

    /// Re-labels a parse failure with the path of the file it came from.
    pub(crate) fn at_path(self, path: &std::path::Path) -> Self {
        match self {
            BindError::FileParse {
                message, source, ..
            } => BindError::FileParse {
                path: path.to_path_buf(),
                message,
                source,
            },
            other => other,
        }
    }
}

/// A specialized Result type for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_destination_error() {
        let error = BindError::invalid_destination("duplicate field 'port'");
        assert_eq!(
            error.to_string(),
            "Invalid destination record: duplicate field 'port'"
        );
    }

    #[test]
    fn test_type_coercion_error() {
        let error = BindError::TypeCoercion {
            field: "port".to_string(),
            value: "eighty".to_string(),
            target: "integer",
        };
        assert_eq!(
            error.to_string(),
            "Cannot convert value 'eighty' to type integer for field 'port'"
        );
    }

    #[test]
    fn test_unsupported_type_error() {
        let error = BindError::UnsupportedType {
            field: "ratio".to_string(),
            type_name: "f64",
        };
        assert!(error.to_string().contains("f64"));
        assert!(error.to_string().contains("ratio"));
    }

    #[test]
    fn test_file_read_error_keeps_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = BindError::FileRead {
            path: PathBuf::from("/etc/app.yaml"),
            message: "file not found".to_string(),
            source: Some(io_error),
        };
        assert!(error.to_string().contains("/etc/app.yaml"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_at_path_relabels_parse_error() {
        let error = BindError::FileParse {
            path: PathBuf::new(),
            message: "bad indent".to_string(),
            source: None,
        }
        .at_path(std::path::Path::new("conf.yaml"));
        assert!(matches!(error, BindError::FileParse { ref path, .. } if path == std::path::Path::new("conf.yaml")));
    }

    #[test]
    fn test_callback_error() {
        let error = BindError::Callback {
            message: "no callback provided".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Callback source failed: no callback provided"
        );
    }
}
