//! SI-unit parsing for numeric settings values.
//!
//! Values are written as `<number><unit>`, for example `200kHz`, `30.0 us`
//! or `1.5M`. Spaces anywhere in the input are ignored. A value without a
//! unit is read as a plain number.

use crate::ParseError;

/// Scale factors for every recognised unit and prefix suffix.
///
/// Lookups are case-sensitive: `m` is milli and `M` is mega.
pub const SI_UNITS: &[(&str, f64)] = &[
    ("ps", 1e-12),
    ("ns", 1e-9),
    ("us", 1e-6),
    ("ms", 1e-3),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("Hz", 1.0),
    ("hz", 1.0),
    ("s", 1.0),
    ("THz", 1e12),
    ("GHz", 1e9),
    ("MHz", 1e6),
    ("kHz", 1e3),
    ("khz", 1e3),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
];

/// Returns the scale factor for a unit suffix, if it is known.
///
/// # Examples
///
/// ```
/// use sigtoy::units::scale_of;
///
/// assert_eq!(scale_of("kHz"), Some(1e3));
/// assert_eq!(scale_of("furlong"), None);
/// ```
pub fn scale_of(unit: &str) -> Option<f64> {
    SI_UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|&(_, scale)| scale)
}

/// Parses a string with an optional SI-unit suffix into a scaled float.
///
/// Syntax: `<value>[.<decimals>]<unit>`. All whitespace is removed before
/// parsing, so `"200 kHz"` and `"200kHz"` are equivalent. Strings that are
/// already plain numbers (including exponent notation such as `"1e3"`) are
/// returned unchanged.
///
/// # Errors
///
/// * [`ParseError::Empty`] if nothing remains after removing whitespace
/// * [`ParseError::InvalidNumber`] if the numeric part is missing or malformed
/// * [`ParseError::UnknownUnit`] if the suffix is not in [`SI_UNITS`]
///
/// # Examples
///
/// ```
/// use sigtoy::parse_si;
///
/// assert_eq!(parse_si("200 kHz").unwrap(), 200_000.0);
/// assert!((parse_si("30.0us").unwrap() - 30e-6).abs() < 1e-18);
/// assert_eq!(parse_si("12").unwrap(), 12.0);
/// ```
pub fn parse_si(input: &str) -> Result<f64, ParseError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ParseError::Empty);
    }

    // Plain numbers need no unit lookup
    if let Ok(value) = compact.parse::<f64>() {
        return finite(value, &compact);
    }

    let unit_start = compact
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| ParseError::InvalidNumber(compact.clone()))?;
    let (number, unit) = compact.split_at(unit_start);

    let numeric = |c: char| c.is_ascii_digit() || matches!(c, '.' | '+' | '-');
    if number.is_empty() || !number.chars().all(numeric) {
        return Err(ParseError::InvalidNumber(compact.clone()));
    }
    let value = number
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(number.to_string()))?;
    let scale = scale_of(unit).ok_or_else(|| ParseError::UnknownUnit(unit.to_string()))?;

    log::trace!("parsed '{}' as {} x {} ({})", input, value, scale, unit);
    finite(value * scale, &compact)
}

fn finite(value: f64, source: &str) -> Result<f64, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidNumber(source.to_string()))
    }
}
