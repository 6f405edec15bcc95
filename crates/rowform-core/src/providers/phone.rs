//! Phone number rendering for the phone-reformat step, backed by `phonenumber`

use phonenumber::{country, Mode, PhoneNumber};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a phone number could not be reformatted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The default country is not an ISO 3166 alpha-2 code
    #[error("unknown country code '{0}'")]
    UnknownCountry(String),

    /// The text is not a phone number
    #[error("cannot parse '{text}' as a phone number: {message}")]
    Unparseable { text: String, message: String },

    /// The number parsed but is not assigned in its numbering plan
    #[error("'{0}' is not a valid phone number")]
    Invalid(String),
}

/// Output layouts for a phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhoneFormat {
    National,
    NationalNoSpaces,
    International,
    InternationalNoSpaces,
}

impl PhoneFormat {
    /// Configuration name of the layout
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneFormat::National => "national",
            PhoneFormat::NationalNoSpaces => "national-no-spaces",
            PhoneFormat::International => "international",
            PhoneFormat::InternationalNoSpaces => "international-no-spaces",
        }
    }

    fn mode(self) -> Mode {
        match self {
            PhoneFormat::National | PhoneFormat::NationalNoSpaces => Mode::National,
            PhoneFormat::International | PhoneFormat::InternationalNoSpaces => Mode::International,
        }
    }

    fn strips_spaces(self) -> bool {
        matches!(
            self,
            PhoneFormat::NationalNoSpaces | PhoneFormat::InternationalNoSpaces
        )
    }
}

// Unknown layout names render internationally.
impl From<String> for PhoneFormat {
    fn from(name: String) -> Self {
        match name.as_str() {
            "national" => PhoneFormat::National,
            "national-no-spaces" => PhoneFormat::NationalNoSpaces,
            "international-no-spaces" => PhoneFormat::InternationalNoSpaces,
            _ => PhoneFormat::International,
        }
    }
}

impl From<PhoneFormat> for String {
    fn from(format: PhoneFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Parse `text`, falling back to `country_code` for numbers without a prefix
pub fn parse_number(text: &str, country_code: Option<&str>) -> Result<PhoneNumber, PhoneError> {
    let country = country_code
        .map(|code| {
            code.trim()
                .to_ascii_uppercase()
                .parse::<country::Id>()
                .map_err(|_| PhoneError::UnknownCountry(code.to_string()))
        })
        .transpose()?;

    phonenumber::parse(country, text).map_err(|e| PhoneError::Unparseable {
        text: text.to_string(),
        message: e.to_string(),
    })
}

/// Parse, validate and render a number in one go
pub fn reformat(
    text: &str,
    country_code: Option<&str>,
    format: PhoneFormat,
) -> Result<String, PhoneError> {
    let number = parse_number(text, country_code)?;
    if !phonenumber::is_valid(&number) {
        return Err(PhoneError::Invalid(text.to_string()));
    }

    let rendered = number.format().mode(format.mode()).to_string();
    if format.strips_spaces() {
        Ok(rendered.chars().filter(|c| !c.is_whitespace()).collect())
    } else {
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_no_spaces() {
        let out = reformat("213-373-4253", Some("US"), PhoneFormat::NationalNoSpaces).unwrap();
        assert!(!out.contains(' '));
        let digits: String = out.chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(digits, "2133734253");
    }

    #[test]
    fn test_international() {
        let out = reformat("(213) 373-4253", Some("us"), PhoneFormat::International).unwrap();
        assert!(out.starts_with("+1"));
        assert!(out.contains(' '));

        let out = reformat("+1 213 373 4253", None, PhoneFormat::InternationalNoSpaces).unwrap();
        assert_eq!(out.chars().filter(|c| c.is_ascii_digit()).count(), 11);
        assert!(!out.contains(' '));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            reformat("123", Some("US"), PhoneFormat::National),
            Err(PhoneError::Invalid(_)) | Err(PhoneError::Unparseable { .. })
        ));
        assert!(reformat("not a phone", Some("US"), PhoneFormat::National).is_err());
        assert_eq!(
            reformat("2133734253", Some("XX"), PhoneFormat::National),
            Err(PhoneError::UnknownCountry("XX".to_string()))
        );
    }

    #[test]
    fn test_format_names() {
        assert_eq!(
            PhoneFormat::from("national-no-spaces".to_string()),
            PhoneFormat::NationalNoSpaces
        );
        assert_eq!(
            PhoneFormat::from("e164".to_string()),
            PhoneFormat::International
        );
        assert_eq!(String::from(PhoneFormat::National), "national");
    }
}
