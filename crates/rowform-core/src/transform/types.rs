//! Core types for the transformation chain
//!
//! A [`Transformation`] is a closed set of variants plus an `Unknown`
//! fallback. Tags and their legacy spellings are resolved once, when the
//! template is deserialized; per-row dispatch only ever sees variants.
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use crate::providers::{CaseStyle, IdentifierVersion, PhoneFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every variant a tag can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationKind {
    GenerateIdentifier,
    StringFormat,
    Substitution,
    FindReplace,
    Overwrite,
    DateReformat,
    PhoneReformat,
    ApiLookup,
}

impl TransformationKind {
    /// Resolve a configured `type` tag, including legacy spellings.
    ///
    /// Matching is case sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "generate-uuid" | "generate-uuid@v1" | "generate-identifier"
            | "generate-identifier@v1" => Self::GenerateIdentifier,
            "string" | "string@v1" | "string-format" | "string-format@v1" => Self::StringFormat,
            "substitution" | "substitution@v1" => Self::Substitution,
            "find-replace" | "findreplace" | "find-replace@v1" | "findreplace@v1" => {
                Self::FindReplace
            }
            "overwrite" | "overwrite@v1" => Self::Overwrite,
            "date" | "date@v1" | "date-reformat" | "date-reformat@v1" => Self::DateReformat,
            "phone-number" | "phone-number@v1" | "phone-reformat" | "phone-reformat@v1" => {
                Self::PhoneReformat
            }
            "api-lookup" | "api-lookup@v1" => Self::ApiLookup,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical name, used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            Self::GenerateIdentifier => "generate-identifier",
            Self::StringFormat => "string-format",
            Self::Substitution => "substitution",
            Self::FindReplace => "find-replace",
            Self::Overwrite => "overwrite",
            Self::DateReformat => "date-reformat",
            Self::PhoneReformat => "phone-reformat",
            Self::ApiLookup => "api-lookup",
        }
    }

    /// Tag written back when a template is serialized
    fn tag(self) -> &'static str {
        match self {
            Self::GenerateIdentifier => "generate-uuid",
            Self::StringFormat => "string",
            Self::Substitution => "substitution",
            Self::FindReplace => "find-replace",
            Self::Overwrite => "overwrite",
            Self::DateReformat => "date",
            Self::PhoneReformat => "phone-number",
            Self::ApiLookup => "api-lookup",
        }
    }
}

/// Parameters of generate-identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifierParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<IdentifierVersion>,
}

/// Parameters of string-format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFormatParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_case: Option<CaseStyle>,
}

/// Parameters of substitution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

/// Parameters of find-replace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindReplaceParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub find: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<String>,
}

/// Parameters of overwrite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverwriteParams {
    #[serde(default)]
    pub value: Option<Value>,
}

/// Parameters of date-reformat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl DateParams {
    /// Effective zone: `zone`, then `timezone`, then UTC
    pub fn effective_zone(&self) -> &str {
        self.zone
            .as_deref()
            .or(self.timezone.as_deref())
            .unwrap_or("UTC")
    }
}

/// Parameters of phone-reformat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<PhoneFormat>,
}

/// One step of a field's transformation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransformation", into = "RawTransformation")]
pub enum Transformation {
    GenerateIdentifier(IdentifierParams),
    StringFormat(StringFormatParams),
    Substitution(SubstitutionParams),
    FindReplace(FindReplaceParams),
    Overwrite(OverwriteParams),
    DateReformat(DateParams),
    PhoneReformat(PhoneParams),
    ApiLookup,
    /// A tag with no known meaning; the step passes its input through
    Unknown { tag: String, params: Map<String, Value> },
}

impl Transformation {
    /// Resolved variant, `None` for unknown tags
    pub fn kind(&self) -> Option<TransformationKind> {
        let kind = match self {
            Self::GenerateIdentifier(_) => TransformationKind::GenerateIdentifier,
            Self::StringFormat(_) => TransformationKind::StringFormat,
            Self::Substitution(_) => TransformationKind::Substitution,
            Self::FindReplace(_) => TransformationKind::FindReplace,
            Self::Overwrite(_) => TransformationKind::Overwrite,
            Self::DateReformat(_) => TransformationKind::DateReformat,
            Self::PhoneReformat(_) => TransformationKind::PhoneReformat,
            Self::ApiLookup => TransformationKind::ApiLookup,
            Self::Unknown { .. } => return None,
        };
        Some(kind)
    }

    /// Canonical variant name, or the raw tag for unknown steps
    pub fn name(&self) -> &str {
        match self {
            Self::Unknown { tag, .. } => tag,
            other => other.kind().map_or("unknown", TransformationKind::name),
        }
    }
}

/// Wire form of a transformation: the tag plus whatever parameters sit next to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransformation {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

fn params<T: DeserializeOwned>(
    kind: TransformationKind,
    params: Map<String, Value>,
) -> Result<T, String> {
    serde_json::from_value(Value::Object(params))
        .map_err(|e| format!("invalid parameters for {} transformation: {}", kind.name(), e))
}

impl TryFrom<RawTransformation> for Transformation {
    type Error = String;

    fn try_from(raw: RawTransformation) -> Result<Self, Self::Error> {
        let Some(kind) = TransformationKind::from_tag(&raw.tag) else {
            tracing::warn!(tag = %raw.tag, "Unknown transformation type, step will pass values through");
            return Ok(Self::Unknown {
                tag: raw.tag,
                params: raw.params,
            });
        };

        let transformation = match kind {
            TransformationKind::GenerateIdentifier => {
                Self::GenerateIdentifier(params(kind, raw.params)?)
            }
            TransformationKind::StringFormat => {
                let format: StringFormatParams = params(kind, raw.params)?;
                if format.change_case == Some(CaseStyle::Unrecognized) {
                    tracing::warn!("Unrecognized changeCase style, case will be left unchanged");
                }
                Self::StringFormat(format)
            }
            TransformationKind::Substitution => Self::Substitution(params(kind, raw.params)?),
            TransformationKind::FindReplace => Self::FindReplace(params(kind, raw.params)?),
            TransformationKind::Overwrite => Self::Overwrite(params(kind, raw.params)?),
            TransformationKind::DateReformat => Self::DateReformat(params(kind, raw.params)?),
            TransformationKind::PhoneReformat => Self::PhoneReformat(params(kind, raw.params)?),
            TransformationKind::ApiLookup => Self::ApiLookup,
        };

        Ok(transformation)
    }
}

fn to_params<T: Serialize>(params: &T) -> Map<String, Value> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl From<Transformation> for RawTransformation {
    fn from(transformation: Transformation) -> Self {
        let tag = |kind: TransformationKind| kind.tag().to_string();
        match transformation {
            Transformation::GenerateIdentifier(p) => RawTransformation {
                tag: tag(TransformationKind::GenerateIdentifier),
                params: to_params(&p),
            },
            Transformation::StringFormat(p) => RawTransformation {
                tag: tag(TransformationKind::StringFormat),
                params: to_params(&p),
            },
            Transformation::Substitution(p) => RawTransformation {
                tag: tag(TransformationKind::Substitution),
                params: to_params(&p),
            },
            Transformation::FindReplace(p) => RawTransformation {
                tag: tag(TransformationKind::FindReplace),
                params: to_params(&p),
            },
            Transformation::Overwrite(p) => RawTransformation {
                tag: tag(TransformationKind::Overwrite),
                params: to_params(&p),
            },
            Transformation::DateReformat(p) => RawTransformation {
                tag: tag(TransformationKind::DateReformat),
                params: to_params(&p),
            },
            Transformation::PhoneReformat(p) => RawTransformation {
                tag: tag(TransformationKind::PhoneReformat),
                params: to_params(&p),
            },
            Transformation::ApiLookup => RawTransformation {
                tag: tag(TransformationKind::ApiLookup),
                params: Map::new(),
            },
            Transformation::Unknown { tag, params } => RawTransformation { tag, params },
        }
    }
}
