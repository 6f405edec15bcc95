//! Property-based tests for the row transformer
//!
//! These tests verify invariants that should hold for every template and
//! every row, independent of the concrete transformations configured.

use proptest::prelude::*;
use rowform_core::transform::{apply_chain, FieldPipeline, FindReplaceParams, OverwriteParams, StringFormatParams};
use rowform_core::{FieldConfig, FieldConfigRegistry, Row, RowTransformer, Transformation, TransformationDispatcher};
use serde_json::{json, Value};

// Strategy functions for property testing

/// Strategy for generating column names from a small alphabet so duplicates occur
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Strategy for generating scalar cell values
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 -]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for generating infallible transformation steps
fn step_strategy() -> impl Strategy<Value = Transformation> {
    prop_oneof![
        (
            proptest::option::of("[a-z]{0,3}"),
            proptest::option::of("[a-z]{0,3}")
        )
            .prop_map(|(prepend, append)| {
                Transformation::StringFormat(StringFormatParams {
                    prepend,
                    append,
                    change_case: None,
                })
            }),
        "[a-z]{1,2}".prop_map(|find| {
            Transformation::FindReplace(FindReplaceParams {
                find: Some(find),
                replace: Some("_".to_string()),
            })
        }),
        value_strategy().prop_map(|value| {
            Transformation::Overwrite(OverwriteParams { value: Some(value) })
        }),
    ]
}

/// Strategy for generating templates
fn template_strategy() -> impl Strategy<Value = Vec<FieldConfig>> {
    prop::collection::vec(
        (
            key_strategy(),
            "[A-Z][a-z]{0,6}",
            prop::collection::vec(step_strategy(), 0..3),
        )
            .prop_map(|(field, name, transformations)| FieldConfig {
                field,
                name,
                transformations,
            }),
        0..8,
    )
}

/// Strategy for generating rows
fn row_strategy() -> impl Strategy<Value = Row> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_output_names_match_template(template in template_strategy()) {
        let registry = FieldConfigRegistry::new(template.clone());
        let names: Vec<String> = template.iter().map(|c| c.name.clone()).collect();

        prop_assert_eq!(registry.len(), template.len());
        prop_assert_eq!(registry.output_names(), names.as_slice());
    }

    #[test]
    fn prop_output_row_has_one_key_per_distinct_field(
        template in template_strategy(),
        row in row_strategy(),
    ) {
        let transformer = RowTransformer::new(template.clone());
        let out = transformer.transform_row(&row).unwrap();

        let mut fields: Vec<&str> = template.iter().map(|c| c.field.as_str()).collect();
        fields.sort_unstable();
        fields.dedup();

        // distinct output names can still collide, so the row is at most that wide
        prop_assert!(out.len() <= fields.len());
        for key in out.keys() {
            prop_assert!(template.iter().any(|c| &c.name == key));
        }
    }

    #[test]
    fn prop_empty_chain_is_identity(value in value_strategy()) {
        let dispatcher = TransformationDispatcher::new();
        let out = FieldPipeline::default().apply(value.clone(), &dispatcher).unwrap();
        prop_assert_eq!(out, value);
    }

    #[test]
    fn prop_chain_is_nested_dispatch(
        first in prop::collection::vec(step_strategy(), 0..4),
        second in prop::collection::vec(step_strategy(), 0..4),
        value in value_strategy(),
    ) {
        let dispatcher = TransformationDispatcher::new();
        let whole: Vec<Transformation> = first.iter().chain(second.iter()).cloned().collect();

        let direct = apply_chain(&whole, value.clone(), &dispatcher).unwrap();
        let staged = apply_chain(
            &second,
            apply_chain(&first, value, &dispatcher).unwrap(),
            &dispatcher,
        )
        .unwrap();

        prop_assert_eq!(direct, staged);
    }

    #[test]
    fn prop_transform_is_one_to_one(
        template in template_strategy(),
        rows in prop::collection::vec(row_strategy(), 0..5),
    ) {
        let transformer = RowTransformer::new(template);
        let before = rows.clone();
        let out = transformer.transform(&rows).unwrap();

        prop_assert_eq!(out.len(), rows.len());
        prop_assert_eq!(rows, before);
    }
}
