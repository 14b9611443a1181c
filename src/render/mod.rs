//! Per-page canvas rendering.
//!
//! Draws one page of the report onto a [`DrawSurface`]: title and chart block
//! on page 1, then the header grid, the data grid for the session's row range,
//! and the footer. Column widths derive only from the immutable geometry, so
//! they are identical on every page.

mod surface;

pub use surface::DrawSurface;

use crate::chart::{fold_slices, slice_angles, slice_color, slice_fractions};
use crate::classify::parse_decimal;
use crate::error::Result;
use crate::layout::{PageGeometry, RenderSession, RowRange};
use crate::snapshot::{TableSnapshot, SERIAL_LABEL};
use crate::styles::StyleCatalog;

/// Width reserved for the "Page X of Y" marker in the footer.
const PAGE_MARKER_WIDTH: f32 = 70.0;

/// Extra length added to the title underline beyond the measured text width.
const TITLE_RULE_EXTRA: f32 = 100.0;

/// Gap between the two lines of the double title rule.
const TITLE_RULE_GAP: f32 = 3.0;

/// Vertical gap after the title block and after the chart block.
const BLOCK_GAP: f32 = 50.0;

/// Grid line width.
const GRID_LINE: f32 = 1.0;

/// Render the next page of a session.
///
/// Advances the session's page index and row cursor; returns the row range
/// emitted on this page.
pub(crate) fn render_page(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    session: &mut RenderSession,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
) -> Result<RowRange> {
    let page = session.begin_page();
    let mut cursor_y = geometry.top_margin;

    if page == 1 {
        cursor_y = draw_title(surface, snapshot, geometry, catalog, cursor_y);
        if chart_applies(snapshot) {
            cursor_y = draw_chart_block(surface, snapshot, geometry, catalog, cursor_y);
        }
    }

    draw_header_grid(surface, snapshot, geometry, catalog, cursor_y);
    cursor_y += geometry.row_height;

    let capacity = geometry.rows_fitting(geometry.usable_height(cursor_y));
    let range = session.take_rows(capacity);
    draw_data_grid(surface, snapshot, geometry, catalog, cursor_y, range);

    draw_footer(surface, snapshot, geometry, catalog, page, session.page_count());

    log::debug!(
        "rendered page {page}/{}: rows {}..{}",
        session.page_count(),
        range.start,
        range.end
    );
    Ok(range)
}

/// Chart block applies when the table has at least two columns and the first
/// data row's second cell parses as a number.
fn chart_applies(snapshot: &TableSnapshot) -> bool {
    snapshot.column_count() >= 2
        && snapshot
            .rows()
            .first()
            .and_then(|row| row.get(1))
            .and_then(|v| parse_decimal(v.trim()))
            .is_some()
}

/// Centered title text plus a double underline rule; returns the new cursor.
fn draw_title(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    mut cursor_y: f32,
) -> f32 {
    let Some(title) = snapshot.title() else {
        return cursor_y;
    };

    let (text_w, text_h) = surface.measure_text(title, &catalog.title_font);
    let x = geometry.page_width / 2.0 - text_w / 2.0;
    surface.draw_text(title, x, cursor_y, &catalog.title_font);
    cursor_y += text_h;

    let rule_len = text_w + TITLE_RULE_EXTRA;
    let rule_x = geometry.page_width / 2.0 - rule_len / 2.0;
    surface.draw_line(rule_x, cursor_y, rule_x + rule_len, cursor_y, GRID_LINE);
    cursor_y += TITLE_RULE_GAP;
    surface.draw_line(rule_x, cursor_y, rule_x + rule_len, cursor_y, GRID_LINE);

    cursor_y + BLOCK_GAP
}

/// Pie chart block, centered horizontally; returns the new cursor.
fn draw_chart_block(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    cursor_y: f32,
) -> f32 {
    let origin_x = geometry.page_width / 2.0 - geometry.chart_width / 2.0;
    let origin_y = cursor_y;

    // Block frame.
    draw_rect_outline(
        surface,
        origin_x,
        origin_y,
        geometry.chart_width,
        geometry.chart_height,
    );

    // Caption with a single underline rule.
    if let Some(caption) = snapshot.chart_title() {
        let (w, h) = surface.measure_text(caption, &catalog.header_font);
        surface.draw_text(caption, origin_x + 30.0, origin_y + 20.0, &catalog.header_font);
        surface.draw_line(
            origin_x + 20.0,
            origin_y + 20.0 + h,
            origin_x + 20.0 + w + 20.0,
            origin_y + 20.0 + h,
            GRID_LINE,
        );
    }

    // Pie body occupies the left ~2/3 of the block, legend the rest.
    let pie_x = origin_x + 35.0;
    let pie_y = origin_y + 70.0;
    let pie_w = geometry.chart_width * 0.63;
    let pie_h = geometry.chart_height - 120.0;

    let slices = fold_slices(snapshot.rows());
    let fractions = slice_fractions(&slices);
    let angles = slice_angles(&fractions);

    let legend_x = origin_x + geometry.chart_width * 0.74;
    let mut legend_y = origin_y + 90.0;
    let mut start = 0;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = angles.get(i).copied().unwrap_or(0);
        let color = slice_color(i);
        surface.fill_pie_slice(pie_x, pie_y, pie_w, pie_h, start, sweep, color);
        start += sweep;

        let pct = fractions.get(i).copied().unwrap_or(0.0) * 100.0;
        let label = format!("{} ({pct:.2}%)", slice.label);
        surface.fill_rect(legend_x, legend_y, 10.0, 10.0, color);
        surface.draw_text(&label, legend_x + 12.0, legend_y, &catalog.content_font);
        legend_y += 25.0;
    }

    origin_y + geometry.chart_height + BLOCK_GAP
}

/// One header row: serial column plus equal-width data columns, framed.
fn draw_header_grid(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    cursor_y: f32,
) {
    let col_width = geometry.data_col_width(snapshot.column_count());
    draw_grid_lines(surface, snapshot, geometry, cursor_y, 1);

    let serial_label = if snapshot.has_serial_header() {
        snapshot
            .column_headers()
            .first()
            .map_or(SERIAL_LABEL, String::as_str)
    } else {
        SERIAL_LABEL
    };
    draw_cell_text(
        surface,
        serial_label,
        geometry.left_margin,
        cursor_y,
        geometry.serial_col_width,
        geometry,
        catalog,
        true,
    );

    let mut x = geometry.left_margin + geometry.serial_col_width;
    for col in 0..snapshot.column_count() {
        draw_cell_text(
            surface,
            snapshot.data_header(col),
            x,
            cursor_y,
            col_width,
            geometry,
            catalog,
            true,
        );
        x += col_width;
    }
}

/// Data grid for the page's row range: serial numbers, cell text, rules.
fn draw_data_grid(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    cursor_y: f32,
    range: RowRange,
) {
    draw_grid_lines(surface, snapshot, geometry, cursor_y, range.len());

    let col_width = geometry.data_col_width(snapshot.column_count());
    let mut y = cursor_y;
    for (offset, row) in snapshot
        .rows()
        .iter()
        .skip(range.start)
        .take(range.len())
        .enumerate()
    {
        let serial = (range.start + offset + 1).to_string();
        draw_cell_text(
            surface,
            &serial,
            geometry.left_margin,
            y,
            geometry.serial_col_width,
            geometry,
            catalog,
            false,
        );
        let mut x = geometry.left_margin + geometry.serial_col_width;
        for cell in row {
            draw_cell_text(surface, cell, x, y, col_width, geometry, catalog, false);
            x += col_width;
        }
        y += geometry.row_height;
    }
}

/// Horizontal rules for `rows` grid rows starting at `top`, plus the vertical
/// frame and column separators.
fn draw_grid_lines(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    top: f32,
    rows: usize,
) {
    #[allow(clippy::cast_precision_loss)]
    let height = rows as f32 * geometry.row_height;
    let right = geometry.right_edge();

    for i in 0..=rows {
        #[allow(clippy::cast_precision_loss)]
        let y = top + i as f32 * geometry.row_height;
        surface.draw_line(geometry.left_margin, y, right, y, GRID_LINE);
    }

    let col_width = geometry.data_col_width(snapshot.column_count());
    let mut x = geometry.left_margin;
    surface.draw_line(x, top, x, top + height, GRID_LINE);
    x += geometry.serial_col_width;
    surface.draw_line(x, top, x, top + height, GRID_LINE);
    for _ in 1..snapshot.column_count() {
        x += col_width;
        surface.draw_line(x, top, x, top + height, GRID_LINE);
    }
    surface.draw_line(right, top, right, top + height, GRID_LINE);
}

/// Footer rule, captions in equal-width slots, and the page marker.
fn draw_footer(
    surface: &mut dyn DrawSurface,
    snapshot: &TableSnapshot,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    page: u32,
    pages: u32,
) {
    let mut y = geometry.page_height - geometry.bottom_margin + 5.0;
    surface.draw_line(geometry.left_margin, y, geometry.right_edge(), y, GRID_LINE);
    y += 5.0;

    if let Some(captions) = snapshot.footer_captions() {
        #[allow(clippy::cast_precision_loss)]
        let slots = (captions.len() + 1) as f32;
        let slot_width =
            (geometry.page_width - geometry.left_margin - geometry.right_margin - PAGE_MARKER_WIDTH)
                / slots;
        let mut x = geometry.left_margin;
        for (i, caption) in captions.iter().enumerate() {
            if i > 0 {
                x += slot_width;
            }
            surface.draw_text(caption, x, y, &catalog.content_font);
        }
    }

    let marker = format!("Page {page} of {pages}");
    let x = geometry.right_edge() - PAGE_MARKER_WIDTH;
    surface.draw_text(&marker, x, y, &catalog.content_font);
}

/// Draw text centered within a cell box of the given width and one row height.
#[allow(clippy::too_many_arguments)]
fn draw_cell_text(
    surface: &mut dyn DrawSurface,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    geometry: &PageGeometry,
    catalog: &StyleCatalog,
    header: bool,
) {
    let font = if header {
        &catalog.header_font
    } else {
        &catalog.content_font
    };
    let (text_w, text_h) = surface.measure_text(text, font);
    let cx = x + (width - text_w) / 2.0;
    let cy = y + (geometry.row_height - text_h) / 2.0;
    surface.draw_text(text, cx, cy, font);
}

/// Rectangle outline from four lines.
fn draw_rect_outline(surface: &mut dyn DrawSurface, x: f32, y: f32, w: f32, h: f32) {
    surface.draw_line(x, y, x + w, y, GRID_LINE);
    surface.draw_line(x, y + h, x + w, y + h, GRID_LINE);
    surface.draw_line(x, y, x, y + h, GRID_LINE);
    surface.draw_line(x + w, y, x + w, y + h, GRID_LINE);
}
