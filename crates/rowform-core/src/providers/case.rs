//! Case conversion for the string-format step
//!
//! Word splitting is delegated to `heck`; the dotted, slashed and spaced
//! styles reuse its snake case output and swap the separator.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase, ToTrainCase,
    ToUpperCamelCase,
};
use serde::{Deserialize, Serialize};

/// Casing styles accepted by `changeCase`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseStyle {
    LowerCase,
    UpperCase,
    CamelCase,
    CapitalCase,
    ConstantCase,
    DotCase,
    HeaderCase,
    NoCase,
    ParamCase,
    PascalCase,
    PathCase,
    SentenceCase,
    SnakeCase,
    /// Any style name not listed above; converting leaves the text untouched
    #[serde(other)]
    Unrecognized,
}

impl CaseStyle {
    /// Convert `text` to this style
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseStyle::LowerCase => text.to_lowercase(),
            CaseStyle::UpperCase => text.to_uppercase(),
            CaseStyle::CamelCase => text.to_lower_camel_case(),
            CaseStyle::CapitalCase => text.to_title_case(),
            CaseStyle::ConstantCase => text.to_shouty_snake_case(),
            CaseStyle::DotCase => joined(text, "."),
            CaseStyle::HeaderCase => text.to_train_case(),
            CaseStyle::NoCase => joined(text, " "),
            CaseStyle::ParamCase => text.to_kebab_case(),
            CaseStyle::PascalCase => text.to_upper_camel_case(),
            CaseStyle::PathCase => joined(text, "/"),
            CaseStyle::SentenceCase => capitalize_first(&joined(text, " ")),
            CaseStyle::SnakeCase => text.to_snake_case(),
            CaseStyle::Unrecognized => text.to_string(),
        }
    }
}

// snake case output only contains underscores as word separators
fn joined(text: &str, separator: &str) -> String {
    text.to_snake_case().replace('_', separator)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
