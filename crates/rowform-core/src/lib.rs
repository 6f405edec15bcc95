//! Rowform Core - declarative reshaping of tabular rows
//!
//! This crate renames the columns of row data according to a field template
//! and runs every configured field through an ordered chain of value
//! transformations (casing, find/replace, substitution maps, date and phone
//! number reformatting, identifier generation).
//!
//! # Main Components
//!
//! - **Types**: rows, field configurations and value coercion helpers
//! - **Transform**: transformation variants, handlers, dispatch and the chain fold
//! - **Registry**: the lookup structure built once from a template
//! - **Row**: the [`RowTransformer`] assembling output rows
//! - **Providers**: case, date, phone number and identifier capabilities
//!
//! # Example
//!
//! ```
//! use rowform_core::{template_from_json, RowTransformer};
//! use serde_json::json;
//!
//! let template = template_from_json(r#"[
//!     {"field": "id", "name": "ID", "transformations": []},
//!     {"field": "name", "name": "Name", "transformations": [
//!         {"type": "string", "changeCase": "capitalCase"}
//!     ]}
//! ]"#).unwrap();
//!
//! let transformer = RowTransformer::new(template);
//! let rows = transformer
//!     .transform_value(&json!([{"id": "1", "name": "john"}]))
//!     .unwrap();
//! assert_eq!(rows, json!([{"ID": "1", "Name": "John"}]));
//! ```

pub mod error;
pub mod providers;
pub mod registry;
pub mod row;
pub mod transform;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result, TransformError};
pub use registry::FieldConfigRegistry;
pub use row::RowTransformer;
pub use transform::{
    FieldPipeline, Transformation, TransformationDispatcher, TransformationKind,
    IDENTIFIER_SENTINEL, INVALID_SENTINEL,
};
pub use types::{is_falsy, template_from_json, template_from_value, value_to_text, FieldConfig, Row};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
