//! Cell type inference.
//!
//! Cells are stored as text; their semantic type is re-derived on demand. The
//! probe order is load-bearing: many strings parse as more than one type
//! ("true" is not a decimal, but "1" is both a decimal and a plausible boolean
//! in other grammars), so the first match wins and ambiguity never surfaces.

use chrono::{NaiveDate, NaiveDateTime};

/// Semantic type of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Boolean,
    Date,
    Decimal,
    Text,
}

/// Date and date-time layouts accepted by the classifier.
///
/// A fixed grammar rather than a locale lookup keeps classification
/// deterministic across hosts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Classify a textual cell value.
///
/// Probes in strict priority order: boolean literal, calendar date, decimal
/// number, then text. Pure and deterministic.
#[must_use]
pub fn classify(value: &str) -> CellKind {
    let v = value.trim();
    if parse_boolean(v).is_some() {
        CellKind::Boolean
    } else if parse_date(v).is_some() {
        CellKind::Date
    } else if parse_decimal(v).is_some() {
        CellKind::Decimal
    } else {
        CellKind::Text
    }
}

/// Parse a boolean literal ("true"/"false", case-insensitive).
#[must_use]
pub fn parse_boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a calendar date or date-time under the supported grammar.
///
/// Shared with the serializer, which uses the parse to pick the date style.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse a decimal number.
///
/// Rejects the non-finite spellings `f64` would otherwise accept ("inf",
/// "NaN"); those are text in a report.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn priority_boolean_before_text() {
        assert_eq!(classify("true"), CellKind::Boolean);
        assert_eq!(classify("FALSE"), CellKind::Boolean);
    }

    #[test]
    fn priority_date_before_decimal() {
        assert_eq!(classify("2024-01-05"), CellKind::Date);
        assert_eq!(classify("2024-01-05 13:45"), CellKind::Date);
    }

    #[test]
    fn decimal_and_text() {
        assert_eq!(classify("42.50"), CellKind::Decimal);
        assert_eq!(classify("-0.5"), CellKind::Decimal);
        assert_eq!(classify("hello"), CellKind::Text);
        assert_eq!(classify(""), CellKind::Text);
    }

    #[test]
    fn non_finite_is_text() {
        assert_eq!(classify("inf"), CellKind::Text);
        assert_eq!(classify("NaN"), CellKind::Text);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(classify("  17 "), CellKind::Decimal);
    }

    #[test]
    fn date_parse_normalizes_to_midnight() {
        let dt = parse_date("2023-12-31").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-12-31 00:00:00");
    }
}
