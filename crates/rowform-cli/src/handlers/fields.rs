//! Fields command handler

use super::utils::load_template;
use crate::cli::{FieldsArgs, OutputFormat};
use crate::error::Result;
use crate::output::{format_csv_header, OutputWriter};
use rowform_core::FieldConfigRegistry;
use tracing::instrument;

/// Handle the fields command
#[instrument(skip(output), fields(template = %args.template.display()))]
pub fn handle_fields(args: FieldsArgs, output: &mut OutputWriter) -> Result<()> {
    let registry = FieldConfigRegistry::new(load_template(&args.template)?);
    let names = registry.output_names();

    match output.format() {
        OutputFormat::Human => {
            for name in names {
                output.writeln(name)?;
            }
            Ok(())
        }
        OutputFormat::Csv => output.writeln(format_csv_header(names)?.trim_end()),
        _ => output.data(&names),
    }
}
