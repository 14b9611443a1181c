//! Page geometry and the page-count formula.
//!
//! All lengths are in abstract page units (the original device used 1/100
//! inch; any uniform unit works because widths are only ever divided and
//! compared). Geometry is immutable for the life of a session, so column
//! widths computed from it are identical on every page.

use crate::error::{ReportError, Result};

/// Default cap on data rows per page, caller-configurable.
pub const DEFAULT_MAX_ROWS_PER_PAGE: u32 = 35;

/// Fixed row allowance added to the total before dividing into pages.
///
/// Stands in for title/header/footer vertical space. Deliberately a constant,
/// not a measured layout; it must not scale with geometry.
pub const PAGE_ROW_ALLOWANCE: u32 = 20;

/// Fixed-size page geometry: outer size, margins, and grid metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub bottom_margin: f32,
    /// Height of one grid row (header and data alike).
    pub row_height: f32,
    /// Fixed width of the leading serial-number column.
    pub serial_col_width: f32,
    /// Size of the optional page-1 chart block.
    pub chart_width: f32,
    pub chart_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 850.0,
            page_height: 1100.0,
            top_margin: 50.0,
            left_margin: 60.0,
            right_margin: 50.0,
            bottom_margin: 60.0,
            row_height: 30.0,
            serial_col_width: 60.0,
            chart_width: 600.0,
            chart_height: 420.0,
        }
    }
}

impl PageGeometry {
    /// Reject degenerate geometry before a session starts.
    ///
    /// # Errors
    /// `Layout` if the grid would have non-positive usable width or height, or
    /// a non-positive row height.
    pub fn validate(&self) -> Result<()> {
        if self.row_height <= 0.0 {
            return Err(ReportError::Layout(format!(
                "non-positive row height {}",
                self.row_height
            )));
        }
        if self.grid_width() <= 0.0 {
            return Err(ReportError::Layout(format!(
                "non-positive usable width {} (page {} minus margins and serial column)",
                self.grid_width(),
                self.page_width
            )));
        }
        // The tightest page is a non-first page: header row plus at least one
        // data row must fit above the bottom margin.
        let min_height = self.top_margin + self.bottom_margin + 2.0 * self.row_height;
        if self.page_height < min_height {
            return Err(ReportError::Layout(format!(
                "usable height {} cannot hold a header and one data row",
                self.page_height - self.top_margin - self.bottom_margin
            )));
        }
        Ok(())
    }

    /// Width available to the grid, serial column excluded.
    #[must_use]
    pub fn grid_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin - self.serial_col_width
    }

    /// Equal width of each data column.
    #[must_use]
    pub fn data_col_width(&self, data_columns: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let n = data_columns.max(1) as f32;
        self.grid_width() / n
    }

    /// Right edge of the grid.
    #[must_use]
    pub fn right_edge(&self) -> f32 {
        self.page_width - self.right_margin
    }

    /// Vertical space left for data rows below the given cursor.
    #[must_use]
    pub fn usable_height(&self, cursor_y: f32) -> f32 {
        self.page_height - cursor_y - self.bottom_margin
    }

    /// Whole data rows fitting in the given vertical space; never a partial
    /// row, never negative.
    #[must_use]
    pub fn rows_fitting(&self, usable_height: f32) -> usize {
        if usable_height <= 0.0 || self.row_height <= 0.0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rows = (usable_height / self.row_height).floor() as usize;
        rows
    }
}

/// Number of pages for a table of `total_rows` data rows.
///
/// `ceil((total_rows + PAGE_ROW_ALLOWANCE) / max_rows_per_page)`; the fixed
/// allowance reserves space for title, header, and footer. Callers needing
/// pixel-exact pagination must derive row capacity from real geometry instead.
#[must_use]
pub fn page_count(total_rows: usize, max_rows_per_page: u32) -> u32 {
    let per_page = u64::from(max_rows_per_page.max(1));
    let effective = total_rows as u64 + u64::from(PAGE_ROW_ALLOWANCE);
    #[allow(clippy::cast_possible_truncation)]
    let pages = effective.div_ceil(per_page) as u32;
    pages
}
