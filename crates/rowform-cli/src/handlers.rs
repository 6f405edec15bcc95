//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod fields;
mod transform;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use fields::handle_fields;
pub use transform::handle_transform;
pub use validate::handle_validate;
