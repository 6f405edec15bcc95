//! Field transformation system
//!
//! A field's value runs through an ordered chain of [`Transformation`]
//! steps. The chain is a left fold: each step receives the previous step's
//! output, and the last output lands in the row.
//!
//! # Module Organization
//!
//! - [`types`] - transformation variants, their parameters and tag resolution
//! - [`handlers`] - one function per variant
//! - [`dispatch`] - variant to handler routing
//! - [`pipeline`] - the chain fold
//!
//! # Example
//!
//! ```
//! use rowform_core::transform::{FieldPipeline, Transformation, TransformationDispatcher};
//! use serde_json::json;
//!
//! let chain: Vec<Transformation> = serde_json::from_value(json!([
//!     { "type": "findreplace", "find": "-", "replace": "" },
//!     { "type": "string", "prepend": "#" }
//! ]))
//! .unwrap();
//!
//! let pipeline = FieldPipeline::new(chain);
//! let out = pipeline
//!     .apply(json!("123-456"), &TransformationDispatcher::new())
//!     .unwrap();
//! assert_eq!(out, json!("#123456"));
//! ```
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

pub mod dispatch;
pub mod handlers;
pub mod pipeline;
pub mod types;


pub use dispatch::TransformationDispatcher;
pub use handlers::{IDENTIFIER_SENTINEL, INVALID_SENTINEL};
pub use pipeline::{apply_chain, FieldPipeline};
pub use types::{
    DateParams, FindReplaceParams, IdentifierParams, OverwriteParams, PhoneParams,
    RawTransformation, StringFormatParams, SubstitutionParams, Transformation, TransformationKind,
};
