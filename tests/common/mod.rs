//! Shared test helpers: a recording draw surface and XLSX read-back utilities.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_precision_loss
)]

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use tabreport::styles::FontSpec;
use tabreport::{DrawSurface, Rgb};

// ============================================================================
// Recording surface
// ============================================================================

/// A draw call recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { text: String, x: f32, y: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Pie { start: i32, sweep: i32, color: Rgb },
}

/// Surface that records every draw call for later assertions.
///
/// Text metrics are synthetic but monotone in string length and font size, so
/// centering math stays exercised.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_count(&self, needle: &str) -> usize {
        self.texts().iter().filter(|t| **t == needle).count()
    }

    /// X positions of vertical lines, in draw order.
    pub fn vertical_line_xs(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, x2, .. } if (x1 - x2).abs() < f32::EPSILON => Some(*x1),
                _ => None,
            })
            .collect()
    }

    pub fn pie_slices(&self) -> Vec<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Pie { start, sweep, .. } => Some((*start, *sweep)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn measure_text(&self, text: &str, font: &FontSpec) -> (f32, f32) {
        (
            text.chars().count() as f32 * font.size_pt * 0.6,
            font.size_pt * 1.4,
        )
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font: &FontSpec) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _width: f32) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Rgb) {
        self.ops.push(DrawOp::Rect { x, y, w, h });
    }

    fn fill_pie_slice(
        &mut self,
        _x: f32,
        _y: f32,
        _w: f32,
        _h: f32,
        start_deg: i32,
        sweep_deg: i32,
        color: Rgb,
    ) {
        self.ops.push(DrawOp::Pie {
            start: start_deg,
            sweep: sweep_deg,
            color,
        });
    }
}

// ============================================================================
// Workbook read-back
// ============================================================================

/// Read one entry of an in-memory ZIP archive as UTF-8.
pub fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// List the entry names of an in-memory ZIP archive.
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(ToString::to_string).collect()
}

/// A cell read back from worksheet XML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadCell {
    /// A1-style reference.
    pub cell_ref: String,
    /// Style index attribute, if present.
    pub style: Option<u32>,
    /// Type attribute (`inlineStr`, `b`, ...), if present.
    pub cell_type: Option<String>,
    /// Text content of `<v>` or `<is><t>`.
    pub value: Option<String>,
}

/// Parse the rows of a worksheet XML document.
pub fn parse_sheet_rows(xml: &str) -> Vec<Vec<ReadCell>> {
    let mut reader = Reader::from_str(xml);
    let mut rows: Vec<Vec<ReadCell>> = Vec::new();
    let mut current: Option<ReadCell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => rows.push(Vec::new()),
                b"c" => current = Some(cell_from_attrs(&e)),
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"c" {
                    if let Some(row) = rows.last_mut() {
                        row.push(cell_from_attrs(&e));
                    }
                }
            }
            Event::Text(t) => {
                if in_value {
                    if let Some(cell) = current.as_mut() {
                        cell.value = Some(t.unescape().unwrap().into_owned());
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"c" => {
                    if let (Some(cell), Some(row)) = (current.take(), rows.last_mut()) {
                        row.push(cell);
                    }
                }
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    rows
}

fn cell_from_attrs(e: &quick_xml::events::BytesStart<'_>) -> ReadCell {
    let mut cell = ReadCell::default();
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.as_ref() {
            b"r" => cell.cell_ref = value,
            b"s" => cell.style = value.parse().ok(),
            b"t" => cell.cell_type = Some(value),
            _ => {}
        }
    }
    cell
}
