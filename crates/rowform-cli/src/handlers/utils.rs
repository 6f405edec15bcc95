//! Shared utilities for command handlers

use crate::config::is_yaml;
use crate::error::{Error, Result};
use rowform_core::{template_from_value, FieldConfig, Row};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Input layouts for row files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// A JSON array of objects
    Json,
    /// One JSON object per line
    Ndjson,
    /// Comma separated values with a header line
    Csv,
}

impl RowFormat {
    /// Pick the layout from the file extension, JSON by default
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("ndjson") | Some("jsonl") => RowFormat::Ndjson,
            Some("csv") => RowFormat::Csv,
            _ => RowFormat::Json,
        }
    }
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "File read");
    Ok(content)
}

/// Load a field template from a JSON or YAML file
pub fn load_template(path: &Path) -> Result<Vec<FieldConfig>> {
    let content = read_existing(path)?;

    let value: Value = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("YAML ({})", e),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("JSON ({})", e),
        })?
    };

    Ok(template_from_value(value)?)
}

/// Load rows from a JSON array, NDJSON or CSV file
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let content = read_existing(path)?;
    let format = RowFormat::from_path(path);
    debug!(?format, "Parsing rows");

    match format {
        RowFormat::Json => {
            let value: Value = serde_json::from_str(&content)?;
            match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| into_row(item, path))
                    .collect(),
                _ => Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "a JSON array of objects".to_string(),
                }),
            }
        }
        RowFormat::Ndjson => content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| into_row(serde_json::from_str(line)?, path))
            .collect(),
        RowFormat::Csv => parse_csv_rows(&content),
    }
}

fn into_row(value: Value, path: &Path) -> Result<Row> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "row objects".to_string(),
        }),
    }
}

/// Parse CSV text into rows keyed by the header line.
///
/// Cells are kept as strings; a byte order mark on the first header is dropped.
pub fn parse_csv_rows(content: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.clone(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_row_format_from_extension() {
        assert_eq!(RowFormat::from_path(Path::new("a.csv")), RowFormat::Csv);
        assert_eq!(RowFormat::from_path(Path::new("a.JSONL")), RowFormat::Ndjson);
        assert_eq!(RowFormat::from_path(Path::new("a.ndjson")), RowFormat::Ndjson);
        assert_eq!(RowFormat::from_path(Path::new("a.json")), RowFormat::Json);
        assert_eq!(RowFormat::from_path(Path::new("rows")), RowFormat::Json);
    }

    #[test]
    fn test_parse_csv_rows() {
        let rows = parse_csv_rows("\u{feff}id,name\n1,\"Smith, J\"\n2,\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!("1"));
        assert_eq!(rows[0]["name"], json!("Smith, J"));
        assert_eq!(rows[1]["name"], json!(""));
    }

    #[test]
    fn test_load_ndjson_rows() {
        let mut file = tempfile::Builder::new().suffix(".ndjson").tempfile().unwrap();
        writeln!(file, "{{\"a\": 1}}\n\n{{\"a\": 2}}").unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["a"], json!(2));
    }

    #[test]
    fn test_load_rows_rejects_non_objects() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(matches!(
            load_rows(file.path()),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_yaml_template() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(
            file,
            "- field: gender\n  name: Gender\n  transformations:\n    - type: substitution\n      mapping:\n        M: Male"
        )
        .unwrap();

        let template = load_template(file.path()).unwrap();
        assert_eq!(template.len(), 1);
        assert_eq!(template[0].name, "Gender");
        assert_eq!(template[0].transformations[0].name(), "substitution");
    }

    #[test]
    fn test_load_template_reports_parse_location() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[\n  {{\"field\": \"a\",\n  }}\n]").unwrap();

        let err = load_template(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
        let message = err.to_string();
        assert!(message.contains("expected JSON ("), "{}", message);
        assert!(message.contains("line 3"), "{}", message);
    }

    #[test]
    fn test_load_template_missing_file() {
        assert!(matches!(
            load_template(Path::new("/nonexistent/template.json")),
            Err(Error::FileNotFound { .. })
        ));
    }
}
