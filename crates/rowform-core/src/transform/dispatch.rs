//! Selection of the handler for a transformation step
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use super::handlers;
use super::types::Transformation;
use crate::error::TransformError;
use crate::providers::{IdentifierGenerator, UuidGenerator};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Routes each step to its handler.
///
/// The dispatcher owns the identifier source so that every step of every
/// row draws from the same generator.
#[derive(Clone)]
pub struct TransformationDispatcher {
    generator: Arc<dyn IdentifierGenerator>,
}

impl TransformationDispatcher {
    /// Create a dispatcher backed by UUIDs
    pub fn new() -> Self {
        Self::with_generator(Arc::new(UuidGenerator))
    }

    /// Create a dispatcher with a custom identifier source
    pub fn with_generator(generator: Arc<dyn IdentifierGenerator>) -> Self {
        Self { generator }
    }

    /// Apply one step to the incoming value.
    ///
    /// Unknown steps return the incoming value untouched.
    pub fn dispatch(
        &self,
        transformation: &Transformation,
        value: Value,
    ) -> Result<Value, TransformError> {
        tracing::trace!(step = transformation.name(), "Dispatching transformation step");

        match transformation {
            Transformation::GenerateIdentifier(params) => {
                Ok(handlers::generate_identifier(params, self.generator.as_ref()))
            }
            Transformation::StringFormat(params) => Ok(handlers::string_format(params, &value)),
            Transformation::Substitution(params) => handlers::substitution(params, value),
            Transformation::FindReplace(params) => handlers::find_replace(params, &value),
            Transformation::Overwrite(params) => Ok(handlers::overwrite(params)),
            Transformation::DateReformat(params) => handlers::date_reformat(params, &value),
            Transformation::PhoneReformat(params) => handlers::phone_reformat(params, &value),
            Transformation::ApiLookup => handlers::api_lookup(),
            Transformation::Unknown { .. } => Ok(value),
        }
    }
}

impl Default for TransformationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransformationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationDispatcher").finish_non_exhaustive()
    }
}
