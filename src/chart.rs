//! Pie chart data preparation.
//!
//! The renderer's optional chart block is driven by pure arithmetic over the
//! first two table columns: column 0 labels the slice, column 1 carries the
//! value. Everything here is deterministic — including slice colors, which are
//! seeded by the slice index so a report renders identically on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classify::parse_decimal;

/// Label applied to the aggregate slice when a table is folded.
pub const OTHER_LABEL: &str = "Other";

/// Maximum number of rows rendered as individual slices.
const MAX_SLICES: usize = 10;

/// Number of rows kept verbatim when folding; the rest aggregate into one
/// "Other" slice.
const KEPT_SLICES: usize = 8;

/// One pie slice: label plus raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Extract slices from table rows, folding long tables.
///
/// Tables of up to ten rows map one row to one slice. Longer tables keep the
/// first eight rows and aggregate every remaining value into a trailing
/// "Other" slice. Values that do not parse as decimals count as zero.
#[must_use]
pub fn fold_slices(rows: &[Vec<String>]) -> Vec<Slice> {
    let slice_of = |row: &Vec<String>| Slice {
        label: row.first().cloned().unwrap_or_default(),
        value: row
            .get(1)
            .and_then(|v| parse_decimal(v.trim()))
            .unwrap_or(0.0),
    };

    if rows.len() <= MAX_SLICES {
        return rows.iter().map(slice_of).collect();
    }

    let mut slices: Vec<Slice> = rows.iter().take(KEPT_SLICES).map(slice_of).collect();
    let rest: f64 = rows
        .iter()
        .skip(KEPT_SLICES)
        .map(|row| slice_of(row).value)
        .sum();
    slices.push(Slice {
        label: OTHER_LABEL.to_string(),
        value: rest,
    });
    slices
}

/// Per-slice fraction of the total.
///
/// A non-positive total yields all-zero fractions rather than NaN.
#[must_use]
pub fn slice_fractions(slices: &[Slice]) -> Vec<f64> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        return vec![0.0; slices.len()];
    }
    slices.iter().map(|s| s.value / total).collect()
}

/// Whole-degree sweep angle per slice.
#[must_use]
pub fn slice_angles(fractions: &[f64]) -> Vec<i32> {
    fractions
        .iter()
        .map(|f| {
            #[allow(clippy::cast_possible_truncation)]
            let deg = (360.0 * f).round() as i32;
            deg
        })
        .collect()
}

/// Deterministic color for a slice, seeded by its index.
#[must_use]
pub fn slice_color(index: usize) -> Rgb {
    let mut rng = StdRng::seed_from_u64(index as u64);
    Rgb {
        r: rng.gen_range(0..230),
        g: rng.gen_range(0..230),
        b: rng.gen_range(0..235),
    }
}
