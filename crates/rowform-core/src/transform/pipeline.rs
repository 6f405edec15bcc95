//! Fold of a field's transformation chain
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use super::dispatch::TransformationDispatcher;
use super::types::Transformation;
use crate::error::TransformError;
use serde_json::Value;

/// The ordered chain configured for one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPipeline {
    chain: Vec<Transformation>,
}

impl FieldPipeline {
    /// Create a pipeline from an ordered chain
    pub fn new(chain: Vec<Transformation>) -> Self {
        Self { chain }
    }

    /// The configured steps, in application order
    pub fn steps(&self) -> &[Transformation] {
        &self.chain
    }

    /// Number of steps in the chain
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Check if the chain has no steps
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Run the chain over a value
    pub fn apply(
        &self,
        value: Value,
        dispatcher: &TransformationDispatcher,
    ) -> Result<Value, TransformError> {
        apply_chain(&self.chain, value, dispatcher)
    }
}

impl From<Vec<Transformation>> for FieldPipeline {
    fn from(chain: Vec<Transformation>) -> Self {
        Self::new(chain)
    }
}

/// Left fold of `chain` starting from `initial`.
///
/// Each step sees the previous step's output. An empty chain returns
/// `initial` unchanged, `null` included.
pub fn apply_chain(
    chain: &[Transformation],
    initial: Value,
    dispatcher: &TransformationDispatcher,
) -> Result<Value, TransformError> {
    chain
        .iter()
        .try_fold(initial, |value, step| dispatcher.dispatch(step, value))
}
