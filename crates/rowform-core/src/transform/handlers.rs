//! One handler per transformation variant
//!
//! Every handler maps the incoming value to an outgoing one. Hard failures
//! come back as [`TransformError`]; data the providers cannot make sense of
//! becomes a sentinel string instead.
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use super::types::{
    DateParams, FindReplaceParams, IdentifierParams, OverwriteParams, PhoneParams,
    StringFormatParams, SubstitutionParams,
};
use crate::error::TransformError;
use crate::providers::{date, phone, IdentifierGenerator, PhoneFormat};
use crate::types::{is_falsy, value_to_text};
use regex::Regex;
use serde_json::Value;

/// Returned when a date or phone number cannot be parsed or rendered
pub const INVALID_SENTINEL: &str = "Invalid";

/// Returned when no identifier could be generated
pub const IDENTIFIER_SENTINEL: &str = "-";

/// Produce a fresh identifier; the incoming value is ignored
pub fn generate_identifier(params: &IdentifierParams, generator: &dyn IdentifierGenerator) -> Value {
    match generator.generate(params.version.unwrap_or_default()) {
        Ok(id) => Value::String(id),
        Err(e) => {
            tracing::warn!(error = %e, "Identifier generation failed, using sentinel");
            Value::String(IDENTIFIER_SENTINEL.to_string())
        }
    }
}

/// Prepend, then append, then re-case
pub fn string_format(params: &StringFormatParams, value: &Value) -> Value {
    let mut text = value_to_text(value);

    if let Some(prepend) = &params.prepend {
        text.insert_str(0, prepend);
    }
    if let Some(append) = &params.append {
        text.push_str(append);
    }
    if let Some(style) = params.change_case {
        text = style.apply(&text);
    }

    Value::String(text)
}

/// Look the value up in the mapping, keeping it when there is no entry
pub fn substitution(params: &SubstitutionParams, value: Value) -> Result<Value, TransformError> {
    if params.case_sensitive.unwrap_or(false) {
        return Err(TransformError::not_implemented(
            "Substitution transformation - caseSensitive=true -",
        ));
    }

    if value.is_null() {
        return Ok(value);
    }

    let mapped = params
        .mapping
        .as_ref()
        .and_then(|mapping| mapping.get(&value_to_text(&value)))
        .cloned();

    Ok(mapped.unwrap_or(value))
}

/// Replace every match of `find` with `replace`
pub fn find_replace(params: &FindReplaceParams, value: &Value) -> Result<Value, TransformError> {
    if is_falsy(value) {
        return Ok(Value::String(String::new()));
    }

    let find = params
        .find
        .as_deref()
        .ok_or_else(|| TransformError::missing("find-replace", "find"))?;
    let replace = params
        .replace
        .as_deref()
        .ok_or_else(|| TransformError::missing("find-replace", "replace"))?;

    let pattern = Regex::new(find).map_err(|e| TransformError::InvalidPattern {
        pattern: find.to_string(),
        message: e.to_string(),
    })?;

    let text = value_to_text(value);
    Ok(Value::String(pattern.replace_all(&text, replace).into_owned()))
}

/// The configured constant, or null
pub fn overwrite(params: &OverwriteParams) -> Value {
    params.value.clone().unwrap_or(Value::Null)
}

/// Parse with the input format in the configured zone, render with the output format
pub fn date_reformat(params: &DateParams, value: &Value) -> Result<Value, TransformError> {
    if is_falsy(value) {
        return Ok(Value::String(String::new()));
    }

    let input_format = params
        .input_format
        .as_deref()
        .ok_or_else(|| TransformError::missing("date", "inputFormat"))?;
    let output_format = params
        .output_format
        .as_deref()
        .ok_or_else(|| TransformError::missing("date", "outputFormat"))?;

    let text = value_to_text(value);
    match date::reformat(&text, input_format, output_format, params.effective_zone()) {
        Ok(formatted) => Ok(Value::String(formatted)),
        Err(e) => {
            tracing::debug!(error = %e, "Date reformat failed, using sentinel");
            Ok(Value::String(INVALID_SENTINEL.to_string()))
        }
    }
}

/// Parse as a phone number and render it in the configured layout
pub fn phone_reformat(params: &PhoneParams, value: &Value) -> Result<Value, TransformError> {
    if is_falsy(value) {
        return Ok(Value::String(String::new()));
    }

    let format: PhoneFormat = params
        .output_format
        .ok_or_else(|| TransformError::missing("phone number", "outputFormat"))?;

    let text = value_to_text(value);
    match phone::reformat(&text, params.country_code.as_deref(), format) {
        Ok(formatted) => Ok(Value::String(formatted)),
        Err(e) => {
            tracing::debug!(error = %e, "Phone reformat failed, using sentinel");
            Ok(Value::String(INVALID_SENTINEL.to_string()))
        }
    }
}

/// Lookups against external APIs exist by name only
pub fn api_lookup() -> Result<Value, TransformError> {
    Err(TransformError::not_implemented("Api Lookup transformation"))
}
