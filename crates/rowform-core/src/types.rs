//! Core types for rows and field templates
//!
//! Rows and values are plain `serde_json` structures. A field template is a
//! list of [`FieldConfig`] entries, usually deserialized straight from JSON or
//! YAML.

use crate::error::{Error, Result};
use crate::transform::Transformation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single input or output row, keyed by column name
pub type Row = Map<String, Value>;

/// Binds one input column to one output column and its transformation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Input key looked up in each row
    pub field: String,

    /// Output key written to each transformed row
    pub name: String,

    /// Steps applied left to right to the field's value
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

impl FieldConfig {
    /// Create a field binding with no transformations
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
            transformations: Vec::new(),
        }
    }

    /// Append a step to the chain
    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }
}

/// Parse a field template from a JSON document
pub fn template_from_json(json: &str) -> Result<Vec<FieldConfig>> {
    serde_json::from_str(json).map_err(|e| Error::Configuration {
        message: format!("Invalid field template: {}", e),
        source: Some(e.into()),
    })
}

/// Parse a field template from an already decoded JSON value
pub fn template_from_value(value: Value) -> Result<Vec<FieldConfig>> {
    serde_json::from_value(value).map_err(|e| Error::Configuration {
        message: format!("Invalid field template: {}", e),
        source: Some(e.into()),
    })
}

/// Whether a value counts as empty for the steps that short-circuit on it.
///
/// `null`, `false`, numeric zero and the empty string are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a value as text for the string based steps.
///
/// Integral floats lose their fractional part (`1.0` renders as `1`) and
/// `null` renders as the empty string.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    if f.fract() == 0.0 && f.abs() < 1e21 {
                        return format!("{:.0}", f);
                    }
                }
            }
            n.to_string()
        }
        other => other.to_string(),
    }
}
