//! Transform command handler

use super::utils::{load_rows, load_template};
use crate::cli::{OutputFormat, TransformArgs};
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{unique_columns, OutputFormatter, OutputWriter};
use rowform_core::{Row, RowTransformer};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the transform command
#[instrument(skip(output), fields(template = %args.template.display(), input = %args.input.display()))]
pub fn handle_transform(args: TransformArgs, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("transform_command", &args.input.display().to_string());

    let template = load_template(&args.template)?;
    let transformer = RowTransformer::new(template);
    let columns = unique_columns(transformer.field_names());
    info!(fields = columns.len(), "Template loaded");

    let rows = load_rows(&args.input)?;
    info!(rows = rows.len(), "Input rows loaded");
    output.info(&format!(
        "Transforming {} row(s) from {}",
        rows.len(),
        args.input.display()
    ))?;

    let pb = output.progress_bar(rows.len() as u64, "Transforming rows");
    let mut transformed = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for outcome in transformer.transform_each(&rows) {
        match outcome {
            Ok(row) => transformed.push(row),
            Err(e) if args.skip_failed_rows => {
                warn!(error = %e, "Skipping row");
                skipped += 1;
            }
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.abandon();
                }
                return Err(e.into());
            }
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    debug!(
        transformed = transformed.len(),
        skipped,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Rows transformed"
    );

    if skipped > 0 {
        output.warning(&format!("Skipped {} row(s) that failed to transform", skipped))?;
    }

    let format = rows_format(output.format(), args.pretty, args.save_to.as_deref());

    match &args.save_to {
        Some(path) => {
            let content = format.format_rows(&transformed, &columns)?;
            debug!(path = %path.display(), "Writing transformed rows");
            fs::write(path, content)?;
            output.success(&format!(
                "✓ {} row(s) saved to {}",
                transformed.len(),
                path.display()
            ))?;
        }
        None => {
            output.section("Rows")?;
            write_rows(output, format, &transformed, &columns)?;
        }
    }

    Ok(())
}

/// Format used for the rows themselves.
///
/// A `.csv` destination forces CSV, `--pretty` upgrades JSON, and files
/// never get the human table.
fn rows_format(global: OutputFormat, pretty: bool, save_to: Option<&Path>) -> OutputFormat {
    let to_csv_file = save_to
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    match global {
        _ if to_csv_file => OutputFormat::Csv,
        OutputFormat::Human if save_to.is_some() => {
            if pretty {
                OutputFormat::JsonPretty
            } else {
                OutputFormat::Json
            }
        }
        OutputFormat::Json if pretty => OutputFormat::JsonPretty,
        other => other,
    }
}

fn write_rows(
    output: &mut OutputWriter,
    format: OutputFormat,
    rows: &[Row],
    columns: &[String],
) -> Result<()> {
    if format == output.format() {
        output.rows(rows, columns)
    } else {
        let content = format.format_rows(rows, columns)?;
        output.writeln(content.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const TEMPLATE: &str = r##"[
        {"field": "id", "name": "ID"},
        {"field": "gender", "name": "Gender", "transformations": [
            {"type": "substitution", "mapping": {"M": "Male", "F": "Female"}}
        ]},
        {"field": "code", "name": "Code", "transformations": [
            {"type": "findreplace", "find": "-", "replace": ""},
            {"type": "string", "prepend": "#"}
        ]}
    ]"##;

    #[test]
    fn test_rows_format_selection() {
        assert_eq!(
            rows_format(OutputFormat::Human, false, Some(Path::new("out.csv"))),
            OutputFormat::Csv
        );
        assert_eq!(
            rows_format(OutputFormat::Human, true, Some(Path::new("out.json"))),
            OutputFormat::JsonPretty
        );
        assert_eq!(rows_format(OutputFormat::Json, true, None), OutputFormat::JsonPretty);
        assert_eq!(rows_format(OutputFormat::Yaml, true, None), OutputFormat::Yaml);
        assert_eq!(rows_format(OutputFormat::Human, false, None), OutputFormat::Human);
    }

    #[test]
    fn test_transform_csv_to_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_file(dir.path(), "template.json", TEMPLATE);
        let input = write_file(
            dir.path(),
            "rows.csv",
            "id,gender,code,extra\n1,M,12-34,x\n2,X,,y\n",
        );
        let save_to = dir.path().join("out.csv");

        let mut output = OutputWriter::with_writer(OutputFormat::Human, true, Box::new(std::io::sink()));
        handle_transform(
            TransformArgs {
                template,
                input,
                save_to: Some(save_to.clone()),
                skip_failed_rows: false,
                pretty: false,
            },
            &mut output,
        )
        .unwrap();

        let written = fs::read_to_string(save_to).unwrap();
        assert_eq!(written, "ID,Gender,Code\n1,Male,#1234\n2,X,#\n");
    }

    #[test]
    fn test_transform_json_with_failed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_file(
            dir.path(),
            "template.yaml",
            "- field: id\n  name: ID\n- field: lookup\n  name: Lookup\n  transformations:\n    - type: api-lookup\n",
        );
        let input = write_file(dir.path(), "rows.json", r#"[{"id": 1}, {"id": 2}]"#);
        let save_to = dir.path().join("out.json");

        let args = |skip| TransformArgs {
            template: template.clone(),
            input: input.clone(),
            save_to: Some(save_to.clone()),
            skip_failed_rows: skip,
            pretty: false,
        };

        let mut output = OutputWriter::with_writer(OutputFormat::Json, true, Box::new(std::io::sink()));
        let err = handle_transform(args(false), &mut output).unwrap_err();
        assert!(matches!(err, Error::Core(_)));
        assert!(err.to_string().contains("lookup"));
        assert!(!save_to.exists());

        handle_transform(args(true), &mut output).unwrap();
        assert_eq!(fs::read_to_string(&save_to).unwrap(), "[]");
    }
}
