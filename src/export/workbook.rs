//! In-memory workbook model.
//!
//! Built in one pass from a [`TableSnapshot`]: optional merged title row,
//! header row, serial-numbered data rows with per-cell classification, and an
//! optional footer row. The model is container-agnostic; `xlsx_writer` turns
//! it into OOXML parts.

use crate::classify::{classify, parse_boolean, parse_decimal, CellKind};
use crate::snapshot::TableSnapshot;
use crate::styles::StyleTag;

/// Fallback sheet/report name when the table name is empty.
pub const DEFAULT_REPORT_NAME: &str = "Report";

/// Column width in characters for the serial-number column.
const SERIAL_COL_CHARS: f64 = 10.0;

/// Column width in characters for data columns.
const DATA_COL_CHARS: f64 = 15.0;

/// Style slot of a workbook cell. Tags map onto `styles.xml` cell formats;
/// `FooterUnderline` is the one extra format with only a bottom border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellStyleId {
    Tag(StyleTag),
    FooterUnderline,
}

/// Typed cell content; decides the OOXML cell type attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellContent {
    Inline(String),
    Number(f64),
    Bool(bool),
    Blank,
}

#[derive(Debug, Clone)]
pub(crate) struct WbCell {
    pub col: usize,
    pub content: CellContent,
    pub style: CellStyleId,
}

#[derive(Debug, Clone)]
pub(crate) struct WbRow {
    pub cells: Vec<WbCell>,
    /// Explicit row height in points.
    pub height_pt: f32,
}

/// A merged region on the single sheet: (row, first col, last col).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MergeSpan {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Workbook {
    pub sheet_name: String,
    pub rows: Vec<WbRow>,
    pub merge: Option<MergeSpan>,
    /// Per-column width in Excel character units.
    pub col_widths: Vec<f64>,
}

/// Build the workbook model from a snapshot.
///
/// `show_footer_underline` interleaves an empty bottom-bordered cell after
/// each footer caption.
pub(crate) fn build_workbook(snapshot: &TableSnapshot, show_footer_underline: bool) -> Workbook {
    let sheet_name = if snapshot.name().is_empty() {
        DEFAULT_REPORT_NAME.to_string()
    } else {
        snapshot.name().to_string()
    };

    let header_count = snapshot.column_headers().len();
    let mut rows = Vec::with_capacity(snapshot.row_count() + 3);
    let mut merge = None;

    if let Some(title) = snapshot.title() {
        rows.push(WbRow {
            cells: vec![WbCell {
                col: 0,
                content: CellContent::Inline(title.to_string()),
                style: CellStyleId::Tag(StyleTag::Title),
            }],
            height_pt: 30.0,
        });
        merge = Some(MergeSpan {
            row: 0,
            col_start: 0,
            col_end: header_count.saturating_sub(1),
        });
    }

    rows.push(WbRow {
        cells: snapshot
            .column_headers()
            .iter()
            .enumerate()
            .map(|(col, label)| WbCell {
                col,
                content: CellContent::Inline(label.clone()),
                style: CellStyleId::Tag(StyleTag::Header),
            })
            .collect(),
        height_pt: 20.0,
    });

    for (i, row) in snapshot.rows().iter().enumerate() {
        let mut cells = Vec::with_capacity(row.len() + 1);
        #[allow(clippy::cast_precision_loss)]
        cells.push(WbCell {
            col: 0,
            content: CellContent::Number((i + 1) as f64),
            style: CellStyleId::Tag(StyleTag::SerialNumber),
        });
        for (j, value) in row.iter().enumerate() {
            cells.push(data_cell(j + 1, value));
        }
        rows.push(WbRow {
            cells,
            height_pt: 18.0,
        });
    }

    if let Some(captions) = snapshot.footer_captions() {
        let mut cells = Vec::with_capacity(captions.len() * 2);
        for (i, caption) in captions.iter().enumerate() {
            cells.push(WbCell {
                col: i * 2,
                content: CellContent::Inline(caption.clone()),
                style: CellStyleId::Tag(StyleTag::Bottom),
            });
            if show_footer_underline {
                cells.push(WbCell {
                    col: i * 2 + 1,
                    content: CellContent::Blank,
                    style: CellStyleId::FooterUnderline,
                });
            }
        }
        rows.push(WbRow {
            cells,
            height_pt: 20.0,
        });
    }

    let col_widths = (0..header_count)
        .map(|col| {
            if col == 0 && snapshot.has_serial_header() {
                SERIAL_COL_CHARS
            } else {
                DATA_COL_CHARS
            }
        })
        .collect();

    Workbook {
        sheet_name,
        rows,
        merge,
        col_widths,
    }
}

/// Classify one data cell and pick its content representation and style.
///
/// Decimals become true numeric cells; dates stay textual but carry the date
/// format style; booleans become native boolean cells with the default style
/// (there is no boolean style tag).
fn data_cell(col: usize, value: &str) -> WbCell {
    let trimmed = value.trim();
    match classify(trimmed) {
        CellKind::Decimal => WbCell {
            col,
            content: CellContent::Number(parse_decimal(trimmed).unwrap_or(0.0)),
            style: CellStyleId::Tag(StyleTag::Decimal),
        },
        CellKind::Date => WbCell {
            col,
            content: CellContent::Inline(value.to_string()),
            style: CellStyleId::Tag(StyleTag::Date),
        },
        CellKind::Boolean => WbCell {
            col,
            content: CellContent::Bool(parse_boolean(trimmed).unwrap_or(false)),
            style: CellStyleId::Tag(StyleTag::Default),
        },
        CellKind::Text => WbCell {
            col,
            content: CellContent::Inline(value.to_string()),
            style: CellStyleId::Tag(StyleTag::Default),
        },
    }
}
