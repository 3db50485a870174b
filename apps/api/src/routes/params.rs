//! Query-string parsing for the upload endpoints.
//!
//! Query structs take every field as `Option<String>` and convert here, so a
//! bad value is reported as a `VALIDATION_ERROR` body like every other 400.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::errors::AppError;

pub fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("'{name}' is required")))
}

/// Parses a `FromStr` value, using `default` when the parameter is absent.
pub fn parse_or<T>(name: &str, value: Option<&str>, default: T) -> Result<T, AppError>
where
    T: FromStr,
{
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Validation(format!("'{name}' has an invalid value '{raw}'"))),
    }
}

pub fn parse_in_range(
    name: &str,
    value: Option<&str>,
    default: u32,
    range: RangeInclusive<u32>,
) -> Result<u32, AppError> {
    let n = parse_or(name, value, default)?;
    if !range.contains(&n) {
        return Err(AppError::Validation(format!(
            "'{name}' must be between {} and {}",
            range.start(),
            range.end()
        )));
    }
    Ok(n)
}

/// Accepts the usual form spellings: true/false, 1/0, yes/no, on/off.
pub fn parse_flag(name: &str, value: Option<&str>) -> Result<bool, AppError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::Validation(format!(
            "'{name}' must be a boolean, got '{other}'"
        ))),
    }
}
