//! Date parsing and rendering for the date-reformat step
//!
//! Templates describe dates with Luxon style tokens (`yyyy-MM-dd`,
//! `MM/dd/yyyy HH:mm`). Those are translated into `chrono` strftime
//! specifiers; zones are resolved through `chrono-tz`.
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use std::fmt::Write;
use thiserror::Error;

/// Reasons a date could not be reformatted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The zone name is not a known IANA zone
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),

    /// The text did not match the input format
    #[error("'{text}' does not match format '{format}': {message}")]
    Unparseable {
        text: String,
        format: String,
        message: String,
    },

    /// The local time does not exist in the zone
    #[error("'{0}' does not exist in the configured zone")]
    NonexistentTime(String),

    /// The output format could not be rendered
    #[error("cannot render format '{0}'")]
    Render(String),
}

/// Resolve a zone name, accepting `utc` in any casing
pub fn resolve_zone(zone: &str) -> Result<Tz, DateError> {
    if zone.eq_ignore_ascii_case("utc") || zone.eq_ignore_ascii_case("z") {
        return Ok(Tz::UTC);
    }
    zone.parse::<Tz>()
        .map_err(|_| DateError::UnknownZone(zone.to_string()))
}

/// Parse `text` laid out as `format` in `zone`.
///
/// Units missing from the format take their defaults (first month, first
/// day, midnight). When the text carries its own offset the instant is
/// converted into `zone`.
pub fn parse_in_zone(text: &str, format: &str, zone: &str) -> Result<DateTime<Tz>, DateError> {
    let tz = resolve_zone(zone)?;
    let spec = to_strftime(format);

    let unparseable = |message: String| DateError::Unparseable {
        text: text.to_string(),
        format: format.to_string(),
        message,
    };

    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(&spec)).map_err(|e| unparseable(e.to_string()))?;

    fill_missing_units(&mut parsed);

    let date = parsed
        .to_naive_date()
        .map_err(|e| unparseable(e.to_string()))?;
    let time = parsed
        .to_naive_time()
        .map_err(|e| unparseable(e.to_string()))?;
    let naive = date.and_time(time);

    match parsed.to_fixed_offset() {
        Ok(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&tz))
            .ok_or_else(|| DateError::NonexistentTime(text.to_string())),
        Err(_) => tz
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| DateError::NonexistentTime(text.to_string())),
    }
}

/// Default the units the format did not mention.
///
/// Month and day default to 1, the time of day to midnight and an hour
/// without a meridiem to AM. Setters refuse to overwrite a parsed value, so
/// only the gaps are filled.
fn fill_missing_units(parsed: &mut Parsed) {
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    let _ = parsed.set_ampm(false);
    let _ = parsed.set_hour12(12);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);
    let _ = parsed.set_nanosecond(0);
}

/// Render an instant with a Luxon style format
pub fn render(instant: &DateTime<Tz>, format: &str) -> Result<String, DateError> {
    let spec = to_strftime(format);
    let mut out = String::new();
    write!(out, "{}", instant.format_with_items(StrftimeItems::new(&spec)))
        .map_err(|_| DateError::Render(format.to_string()))?;
    Ok(out)
}

/// Parse and re-render in one go
pub fn reformat(
    text: &str,
    input_format: &str,
    output_format: &str,
    zone: &str,
) -> Result<String, DateError> {
    let instant = parse_in_zone(text, input_format, zone)?;
    render(&instant, output_format)
}

/// Translate Luxon format tokens into a strftime specification.
///
/// Runs of the same letter form one token. Text in single quotes is literal
/// and `''` is an escaped quote. Letters without a known meaning are kept as
/// literals.
pub fn to_strftime(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match token_spec(c, run) {
            Some(spec) => out.push_str(spec),
            None => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn token_spec(letter: char, run: usize) -> Option<&'static str> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M' | 'L', 1) => "%-m",
        ('M' | 'L', 2) => "%m",
        ('M' | 'L', 3) => "%b",
        ('M' | 'L', 4) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('E' | 'c', 3) => "%a",
        ('E' | 'c', 4) => "%A",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('a', 1) => "%p",
        ('Z', 1 | 2) => "%:z",
        ('Z', 3) => "%z",
        ('Z', 4) => "%Z",
        _ => return None,
    };
    Some(spec)
}
