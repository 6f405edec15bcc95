//! Row assembly: template driven reshaping of whole rows

use crate::error::{Error, Result};
use crate::providers::IdentifierGenerator;
use crate::registry::FieldConfigRegistry;
use crate::transform::TransformationDispatcher;
use crate::types::{FieldConfig, Row};
use serde_json::Value;
use std::sync::Arc;

/// Applies a field template to rows.
///
/// Output rows contain exactly the configured fields, in template order.
/// Unconfigured input columns are dropped and configured columns missing
/// from a row start their chain from `null`.
#[derive(Debug, Clone)]
pub struct RowTransformer {
    registry: FieldConfigRegistry,
    dispatcher: TransformationDispatcher,
}

impl RowTransformer {
    /// Create a transformer for a template
    pub fn new(configs: impl IntoIterator<Item = FieldConfig>) -> Self {
        Self::from_registry(FieldConfigRegistry::new(configs))
    }

    /// Create a transformer from an already built registry
    pub fn from_registry(registry: FieldConfigRegistry) -> Self {
        Self {
            registry,
            dispatcher: TransformationDispatcher::new(),
        }
    }

    /// Replace the identifier source used by generate-identifier steps
    pub fn with_generator(mut self, generator: Arc<dyn IdentifierGenerator>) -> Self {
        self.dispatcher = TransformationDispatcher::with_generator(generator);
        self
    }

    /// The registry backing this transformer
    pub fn registry(&self) -> &FieldConfigRegistry {
        &self.registry
    }

    /// Output names in template order
    pub fn field_names(&self) -> &[String] {
        self.registry.output_names()
    }

    /// Transform one row
    pub fn transform_row(&self, row: &Row) -> Result<Row> {
        let mut out = Row::new();

        for (input_key, output_key, pipeline) in self.registry.iter() {
            let raw = row.get(input_key).cloned().unwrap_or(Value::Null);
            let value = pipeline
                .apply(raw, &self.dispatcher)
                .map_err(|source| Error::Transform {
                    field: input_key.to_string(),
                    row: None,
                    source,
                })?;
            out.insert(output_key.to_string(), value);
        }

        Ok(out)
    }

    /// Transform rows one to one, stopping at the first hard failure
    pub fn transform(&self, rows: &[Row]) -> Result<Vec<Row>> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.transform_row(row).map_err(|e| e.at_row(index)))
            .collect()
    }

    /// Transform rows one to one, keeping every row's own outcome
    pub fn transform_each<'a>(
        &'a self,
        rows: &'a [Row],
    ) -> impl Iterator<Item = Result<Row>> + 'a {
        rows.iter()
            .enumerate()
            .map(move |(index, row)| self.transform_row(row).map_err(|e| e.at_row(index)))
    }

    /// Transform a JSON array of row objects.
    ///
    /// Non-object array elements are treated as empty rows.
    pub fn transform_value(&self, rows: &Value) -> Result<Value> {
        let rows = rows
            .as_array()
            .ok_or_else(|| Error::configuration("Expected a JSON array of rows"))?;

        let empty = Row::new();
        let out = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let row = row.as_object().unwrap_or(&empty);
                self.transform_row(row)
                    .map(Value::Object)
                    .map_err(|e| e.at_row(index))
            })
            .collect::<Result<Vec<Value>>>()?;

        Ok(Value::Array(out))
    }
}
