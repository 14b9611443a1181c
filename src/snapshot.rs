//! Immutable table snapshot.
//!
//! A snapshot captures one table — header labels, data rows, optional title and
//! footer captions — for the duration of one render session or export call.
//! All shape validation happens here, at construction, so both the renderer and
//! the serializer can assume a well-formed table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::classify::{parse_date, parse_decimal};
use crate::error::{ReportError, Result};

/// Header label used for the leading serial-number column when headers are
/// derived from column names.
pub const SERIAL_LABEL: &str = "No.";

/// Caller-supplied report parameters.
///
/// Every field is optional; omitted fields fall back to table-derived defaults
/// (see [`TableSnapshot::new`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportParams {
    /// Report title, rendered centered and merged across the header columns.
    pub title: Option<String>,
    /// Caption for the auxiliary chart block.
    pub chart_title: Option<String>,
    /// Explicit header labels; length must be `column_count` or
    /// `column_count + 1` (extra leading serial-number label).
    pub column_headers: Option<Vec<String>>,
    /// Footer captions, rendered as a final row.
    pub footer_captions: Option<Vec<String>>,
}

/// Sort direction for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
    None,
}

/// An immutable view over one table plus its report decorations.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    name: String,
    title: Option<String>,
    chart_title: Option<String>,
    column_headers: Vec<String>,
    rows: Vec<Vec<String>>,
    footer_captions: Option<Vec<String>>,
    column_count: usize,
}

impl TableSnapshot {
    /// Build a snapshot from a named table and optional report parameters.
    ///
    /// Defaults when a parameter is omitted: headers are the column names
    /// prefixed with [`SERIAL_LABEL`]; title and chart title are the table
    /// name; no footer.
    ///
    /// # Errors
    /// `Validation` if the header count is outside
    /// `{column_count, column_count + 1}` or any row is ragged.
    pub fn new(
        name: &str,
        column_names: &[String],
        rows: Vec<Vec<String>>,
        params: Option<ReportParams>,
    ) -> Result<Self> {
        let column_count = column_names.len();
        let params = params.unwrap_or_default();

        let column_headers = params.column_headers.unwrap_or_else(|| {
            let mut headers = Vec::with_capacity(column_count + 1);
            headers.push(SERIAL_LABEL.to_string());
            headers.extend(column_names.iter().cloned());
            headers
        });

        if column_headers.len() < column_count || column_headers.len() > column_count + 1 {
            return Err(ReportError::Validation(format!(
                "header count {} does not match column count {} (expected {} or {})",
                column_headers.len(),
                column_count,
                column_count,
                column_count + 1
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != column_count {
                return Err(ReportError::Validation(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    column_count
                )));
            }
        }

        let title = params.title.or_else(|| non_empty(name));
        let chart_title = params.chart_title.or_else(|| non_empty(name));

        Ok(Self {
            name: name.to_string(),
            title,
            chart_title,
            column_headers,
            rows,
            footer_captions: params.footer_captions,
            column_count,
        })
    }

    /// Table name (may be empty; export falls back to a literal name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Report title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Chart block caption, if any.
    #[must_use]
    pub fn chart_title(&self) -> Option<&str> {
        self.chart_title.as_deref()
    }

    /// Header labels; one per column, plus an optional leading serial label.
    #[must_use]
    pub fn column_headers(&self) -> &[String] {
        &self.column_headers
    }

    /// True when the header labels carry a leading serial-number entry.
    #[must_use]
    pub fn has_serial_header(&self) -> bool {
        self.column_headers.len() == self.column_count + 1
    }

    /// Data rows; every row has exactly `column_count` cells.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Footer captions, if any.
    #[must_use]
    pub fn footer_captions(&self) -> Option<&[String]> {
        self.footer_captions.as_deref()
    }

    /// Header label for a data column (skipping the serial entry if present).
    #[must_use]
    pub fn data_header(&self, col: usize) -> &str {
        let offset = usize::from(self.has_serial_header());
        self.column_headers
            .get(col + offset)
            .map_or("", String::as_str)
    }

    /// Return a copy of this snapshot with rows sorted by the given keys.
    ///
    /// Keys with [`SortOrder::None`] are skipped; the remaining keys apply in
    /// the order given. Cells that both parse as decimals compare numerically,
    /// both as dates chronologically, otherwise lexicographically. The sort is
    /// stable, so an all-`None` key set returns the rows unchanged.
    ///
    /// # Errors
    /// `Validation` if a key names a column outside the table.
    pub fn sorted(&self, keys: &[(usize, SortOrder)]) -> Result<TableSnapshot> {
        let active: Vec<(usize, SortOrder)> = keys
            .iter()
            .filter(|(_, order)| *order != SortOrder::None)
            .copied()
            .collect();

        for &(col, _) in &active {
            if col >= self.column_count {
                return Err(ReportError::Validation(format!(
                    "sort column {} out of range (table has {} columns)",
                    col, self.column_count
                )));
            }
        }

        let mut sorted = self.clone();
        if active.is_empty() {
            return Ok(sorted);
        }

        sorted.rows.sort_by(|a, b| {
            for &(col, order) in &active {
                let left = a.get(col).map_or("", String::as_str);
                let right = b.get(col).map_or("", String::as_str);
                let mut cmp = compare_cells(left, right);
                if order == SortOrder::Descending {
                    cmp = cmp.reverse();
                }
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });
        Ok(sorted)
    }
}

/// Compare two cell values by their classified meaning.
fn compare_cells(left: &str, right: &str) -> Ordering {
    if let (Some(l), Some(r)) = (parse_decimal(left.trim()), parse_decimal(right.trim())) {
        return l.partial_cmp(&r).unwrap_or(Ordering::Equal);
    }
    if let (Some(l), Some(r)) = (parse_date(left.trim()), parse_date(right.trim())) {
        return l.cmp(&r);
    }
    left.cmp(right)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
