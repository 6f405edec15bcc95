//! Lookup structure built once from a field template

use crate::transform::{FieldPipeline, Transformation};
use crate::types::FieldConfig;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct FieldBinding {
    output_key: String,
    pipeline: FieldPipeline,
}

/// Input key to output key and chain mappings for a template.
///
/// Built once and read-only afterwards. When two entries share an input key
/// the last one wins, but the key keeps the position of its first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConfigRegistry {
    output_names: Vec<String>,
    input_keys: Vec<String>,
    bindings: HashMap<String, FieldBinding>,
}

impl FieldConfigRegistry {
    /// Build the registry from an ordered template
    pub fn new(configs: impl IntoIterator<Item = FieldConfig>) -> Self {
        let mut registry = Self::default();

        for config in configs {
            registry.output_names.push(config.name.clone());

            if !registry.bindings.contains_key(&config.field) {
                registry.input_keys.push(config.field.clone());
            } else {
                tracing::debug!(field = %config.field, "Duplicate input key, last entry wins");
            }

            registry.bindings.insert(
                config.field,
                FieldBinding {
                    output_key: config.name,
                    pipeline: FieldPipeline::new(config.transformations),
                },
            );
        }

        tracing::debug!(
            fields = registry.input_keys.len(),
            entries = registry.output_names.len(),
            "Field registry built"
        );

        registry
    }

    /// Output names in template order, one per entry
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// Distinct input keys in first-occurrence order
    pub fn input_keys(&self) -> &[String] {
        &self.input_keys
    }

    /// The chain configured for an input key
    pub fn chain_for(&self, input_key: &str) -> Option<&[Transformation]> {
        self.bindings
            .get(input_key)
            .map(|binding| binding.pipeline.steps())
    }

    /// The pipeline configured for an input key
    pub fn pipeline_for(&self, input_key: &str) -> Option<&FieldPipeline> {
        self.bindings.get(input_key).map(|binding| &binding.pipeline)
    }

    /// The output key configured for an input key
    pub fn output_key_for(&self, input_key: &str) -> Option<&str> {
        self.bindings
            .get(input_key)
            .map(|binding| binding.output_key.as_str())
    }

    /// Iterate `(input key, output key, pipeline)` in row assembly order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &FieldPipeline)> {
        self.input_keys.iter().filter_map(move |key| {
            self.bindings
                .get(key)
                .map(|binding| (key.as_str(), binding.output_key.as_str(), &binding.pipeline))
        })
    }

    /// Number of template entries
    pub fn len(&self) -> usize {
        self.output_names.len()
    }

    /// Check if the template had no entries
    pub fn is_empty(&self) -> bool {
        self.output_names.is_empty()
    }
}

impl FromIterator<FieldConfig> for FieldConfigRegistry {
    fn from_iter<I: IntoIterator<Item = FieldConfig>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{OverwriteParams, Transformation};
    use serde_json::json;

    fn overwrite(value: &str) -> Transformation {
        Transformation::Overwrite(OverwriteParams {
            value: Some(json!(value)),
        })
    }

    #[test]
    fn test_output_names_follow_template_order() {
        let registry = FieldConfigRegistry::new(vec![
            FieldConfig::new("b", "B"),
            FieldConfig::new("a", "A"),
            FieldConfig::new("c", "A"),
        ]);

        assert_eq!(registry.output_names(), ["B", "A", "A"]);
        assert_eq!(registry.input_keys(), ["b", "a", "c"]);
        assert_eq!(registry.output_key_for("c"), Some("A"));
        assert_eq!(registry.output_key_for("missing"), None);
        assert!(registry.chain_for("missing").is_none());
    }

    #[test]
    fn test_duplicate_input_key_last_wins() {
        let registry = FieldConfigRegistry::new(vec![
            FieldConfig::new("id", "First").with_transformation(overwrite("one")),
            FieldConfig::new("other", "Other"),
            FieldConfig::new("id", "Second").with_transformation(overwrite("two")),
        ]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.output_names(), ["First", "Other", "Second"]);
        assert_eq!(registry.input_keys(), ["id", "other"]);
        assert_eq!(registry.output_key_for("id"), Some("Second"));
        assert_eq!(registry.chain_for("id"), Some(&[overwrite("two")][..]));

        let order: Vec<&str> = registry.iter().map(|(input, _, _)| input).collect();
        assert_eq!(order, ["id", "other"]);
    }

    #[test]
    fn test_rebuilding_is_idempotent() {
        let template = vec![
            FieldConfig::new("x", "X").with_transformation(overwrite("1")),
            FieldConfig::new("x", "Y"),
        ];

        let first: FieldConfigRegistry = template.clone().into_iter().collect();
        let second = FieldConfigRegistry::new(template);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_template() {
        let registry = FieldConfigRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
