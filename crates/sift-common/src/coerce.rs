//! Value coercion for rule evaluation.
//!
//! Spreadsheet exports mix native numbers, text with locale decimal commas,
//! and blanks in the same column. Everything a rule needs to know about a
//! cell goes through the functions here.

use polars::prelude::AnyValue;

use crate::polars::{any_to_f64, any_to_string};

/// Reserved operand meaning "test for a missing or blank cell".
pub const EMPTY_SENTINEL: &str = "empty";

/// Returns true if the operand is the reserved `"empty"` token.
///
/// ```
/// use sift_common::is_empty_sentinel;
///
/// assert!(is_empty_sentinel("  EMPTY "));
/// assert!(!is_empty_sentinel(""));
/// assert!(!is_empty_sentinel("emptyish"));
/// ```
pub fn is_empty_sentinel(literal: &str) -> bool {
    literal.trim().eq_ignore_ascii_case(EMPTY_SENTINEL)
}

/// Parses a literal as a number, accepting a single decimal comma.
///
/// Returns `None` for blank text, unparseable text, and NaN. Text with more
/// than one comma is not reinterpreted and therefore fails.
///
/// ```
/// use sift_common::parse_number;
///
/// assert_eq!(parse_number("7,0"), Some(7.0));
/// assert_eq!(parse_number(" 0.01 "), Some(0.01));
/// assert_eq!(parse_number("1,234,5"), None);
/// assert_eq!(parse_number("abc"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = if trimmed.matches(',').count() == 1 {
        trimmed.replacen(',', ".", 1).parse::<f64>()
    } else {
        trimmed.parse::<f64>()
    };

    parsed.ok().filter(|v| !v.is_nan())
}

/// Coerces a cell to a number, or `None` when it has no numeric reading.
pub fn to_number(value: AnyValue<'_>) -> Option<f64> {
    any_to_f64(value)
}

/// Canonical string form of a cell for case-insensitive equality.
pub fn normalize_text(value: AnyValue<'_>) -> String {
    normalize_literal(&any_to_string(value))
}

/// Canonical string form of an operand literal.
pub fn normalize_literal(literal: &str) -> String {
    literal.trim().to_lowercase()
}

/// A cell is missing when it is null, NaN, or blank after trimming.
pub fn is_missing(value: AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_case_insensitive_and_trimmed() {
        assert!(is_empty_sentinel("empty"));
        assert!(is_empty_sentinel("Empty"));
        assert!(is_empty_sentinel("\tempty  "));
        assert!(!is_empty_sentinel("not empty"));
    }

    #[test]
    fn parse_number_handles_decimal_comma() {
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number("-0,25"), Some(-0.25));
        assert_eq!(parse_number("11000"), Some(11000.0));
    }

    #[test]
    fn parse_number_rejects_blank_and_nan() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("empty"), None);
    }

    #[test]
    fn parse_number_rejects_mixed_separators() {
        assert_eq!(parse_number("1.234,5"), None);
        assert_eq!(parse_number("12.34.56"), None);
    }

    #[test]
    fn to_number_passes_native_numbers_through() {
        assert_eq!(to_number(AnyValue::Int64(75)), Some(75.0));
        assert_eq!(to_number(AnyValue::Float32(0.5)), Some(0.5));
        assert_eq!(to_number(AnyValue::String("6,5")), Some(6.5));
        assert_eq!(to_number(AnyValue::Boolean(true)), None);
    }

    #[test]
    fn normalize_text_trims_and_lowercases() {
        assert_eq!(normalize_text(AnyValue::String("  Female ")), "female");
        assert_eq!(normalize_text(AnyValue::Int32(1)), "1");
        assert_eq!(normalize_text(AnyValue::Null), "");
    }

    #[test]
    fn missing_covers_null_nan_and_blank_text() {
        assert!(is_missing(AnyValue::Null));
        assert!(is_missing(AnyValue::Float64(f64::NAN)));
        assert!(is_missing(AnyValue::String("   ")));
        assert!(!is_missing(AnyValue::String("x")));
        assert!(!is_missing(AnyValue::Int32(0)));
    }
}
