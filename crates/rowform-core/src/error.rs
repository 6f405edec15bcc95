//! Error types for the Rowform core library
//!
//! Row processing knows two error layers: [`TransformError`] is raised by a
//! single transformation step, and [`Error`] is what the public API returns,
//! carrying the field (and row) the failing step belonged to.

use thiserror::Error;

/// Errors raised by a transformation step.
///
/// These are the hard failures of a chain. Malformed data never ends up here;
/// handlers turn it into sentinel values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A parameter the step needs in order to run was not configured
    #[error("Invalid {transformation} transformation config: missing '{parameter}'")]
    MissingParameter {
        transformation: &'static str,
        parameter: &'static str,
    },

    /// The configured behavior exists by name only
    #[error("{feature} not implemented")]
    NotImplemented { feature: String },

    /// The find pattern could not be compiled
    #[error("Invalid find pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl TransformError {
    /// Create a missing parameter error
    pub fn missing(transformation: &'static str, parameter: &'static str) -> Self {
        Self::MissingParameter {
            transformation,
            parameter,
        }
    }

    /// Create a not-implemented error
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }
}

/// Main error type for Rowform operations
#[derive(Error, Debug)]
pub enum Error {
    /// The field template could not be loaded
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A transformation step failed for a field
    #[error("Transformation of field '{field}'{} failed: {source}", row_suffix(.row))]
    Transform {
        field: String,
        row: Option<usize>,
        #[source]
        source: TransformError,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" in row {}", r)).unwrap_or_default()
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Attach a row index to a transform error
    pub fn at_row(self, index: usize) -> Self {
        match self {
            Self::Transform { field, source, .. } => Self::Transform {
                field,
                row: Some(index),
                source,
            },
            other => other,
        }
    }

    /// The underlying step error, if this is a transform failure
    pub fn transform_error(&self) -> Option<&TransformError> {
        match self {
            Self::Transform { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
