//! Validate command handler

use super::utils::load_template;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use rowform_core::{FieldConfig, Transformation};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Summary of one template entry
#[derive(Debug, Serialize, PartialEq)]
struct FieldReport {
    field: String,
    name: String,
    chain: Vec<String>,
    unknown: Vec<String>,
}

impl From<&FieldConfig> for FieldReport {
    fn from(config: &FieldConfig) -> Self {
        let unknown = config
            .transformations
            .iter()
            .filter(|t| t.kind().is_none())
            .map(|t| t.name().to_string())
            .collect();

        Self {
            field: config.field.clone(),
            name: config.name.clone(),
            chain: config
                .transformations
                .iter()
                .map(Transformation::name)
                .map(str::to_string)
                .collect(),
            unknown,
        }
    }
}

/// Handle the validate command
#[instrument(skip(output), fields(template = %args.template.display(), strict = args.strict))]
pub fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.template.display().to_string());
    output.info(&format!("Validating template: {}", args.template.display()))?;

    let template = load_template(&args.template)?;
    let reports: Vec<FieldReport> = template.iter().map(FieldReport::from).collect();
    let unknown_steps: usize = reports.iter().map(|r| r.unknown.len()).sum();
    info!(fields = reports.len(), unknown_steps, "Template loaded");

    if output.format() == OutputFormat::Human {
        output.section("Fields")?;
        for report in &reports {
            let chain = if report.chain.is_empty() {
                "(no transformations)".to_string()
            } else {
                report.chain.join(" → ")
            };
            output.writeln(&format!("{} → {}: {}", report.field, report.name, chain))?;
        }
    } else {
        output.data(&reports)?;
    }

    for report in reports.iter().filter(|r| !r.unknown.is_empty()) {
        warn!(field = %report.field, unknown = ?report.unknown, "Unknown transformation types");
        output.warning(&format!(
            "Field '{}' has unknown transformation type(s) {}; they leave values unchanged",
            report.field,
            report.unknown.join(", ")
        ))?;
    }

    if args.strict && unknown_steps > 0 {
        return Err(Error::other(format!(
            "Template has {} unknown transformation step(s)",
            unknown_steps
        )));
    }

    output.success("✓ Template is valid")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn template_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_report_uses_canonical_names() {
        let template = rowform_core::template_from_json(
            r#"[{"field": "a", "name": "A", "transformations": [
                {"type": "findreplace@v1", "find": "x", "replace": "y"},
                {"type": "generate-uuid"},
                {"type": "shout"}
            ]}]"#,
        )
        .unwrap();

        let report = FieldReport::from(&template[0]);
        assert_eq!(report.chain, ["find-replace", "generate-identifier", "shout"]);
        assert_eq!(report.unknown, ["shout"]);
    }

    #[test]
    fn test_strict_rejects_unknown_types() {
        let file = template_file(r#"[{"field": "a", "name": "A", "transformations": [{"type": "shout"}]}]"#);
        let args = |strict| ValidateArgs {
            template: file.path().to_path_buf(),
            strict,
        };

        let mut output = OutputWriter::with_writer(OutputFormat::Json, true, Box::new(std::io::sink()));
        assert!(handle_validate(args(false), &mut output).is_ok());
        assert!(handle_validate(args(true), &mut output).is_err());
    }

    #[test]
    fn test_load_errors_fail_validation() {
        let file = template_file(r#"[{"field": "a", "name": "A", "transformations": [{"type": "substitution", "mapping": 3}]}]"#);
        let mut output = OutputWriter::with_writer(OutputFormat::Human, true, Box::new(std::io::sink()));

        let err = handle_validate(
            ValidateArgs {
                template: file.path().to_path_buf(),
                strict: false,
            },
            &mut output,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
