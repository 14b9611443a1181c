//! Render session state.
//!
//! The pagination cursor is mutable shared state across the per-page render
//! calls of one print session. It lives in an explicit session object rather
//! than in fields mutated by event callbacks, so exclusive ownership is
//! enforced by the borrow checker: one session per snapshot at a time.

use super::page::page_count;

/// Half-open range of data row indices emitted on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One pagination-and-render pass over a snapshot, first page to last.
///
/// The cursor advances monotonically by exactly the rows emitted per page and
/// never resets. Discard the session when the pass completes or is abandoned.
#[derive(Debug)]
pub struct RenderSession {
    total_rows: usize,
    page_count: u32,
    /// 1-based index of the page currently being rendered; 0 before the first.
    page_index: u32,
    row_cursor: usize,
}

impl RenderSession {
    /// Start a session over `total_rows` data rows.
    #[must_use]
    pub fn new(total_rows: usize, max_rows_per_page: u32) -> Self {
        let pages = page_count(total_rows, max_rows_per_page);
        log::debug!("render session: {total_rows} rows across {pages} pages");
        Self {
            total_rows,
            page_count: pages,
            page_index: 0,
            row_cursor: 0,
        }
    }

    /// Precomputed page count for the whole session.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// 1-based index of the page most recently begun (0 before the first).
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Index of the next unemitted data row.
    #[must_use]
    pub fn row_cursor(&self) -> usize {
        self.row_cursor
    }

    #[must_use]
    pub fn remaining_rows(&self) -> usize {
        self.total_rows - self.row_cursor
    }

    /// True while the first page has not been rendered.
    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.page_index <= 1
    }

    /// Advance to the next page; returns its 1-based index.
    pub fn begin_page(&mut self) -> u32 {
        self.page_index += 1;
        self.page_index
    }

    /// Emit up to `capacity` rows on the current page and advance the cursor.
    ///
    /// Emits `min(remaining, capacity)` whole rows; the cursor moves by exactly
    /// that amount.
    pub fn take_rows(&mut self, capacity: usize) -> RowRange {
        let count = self.remaining_rows().min(capacity);
        let range = RowRange {
            start: self.row_cursor,
            end: self.row_cursor + count,
        };
        self.row_cursor = range.end;
        range
    }

    /// Whether another page should be rendered after the current one.
    ///
    /// True while pages remain under the computed count (the allowance can
    /// overshoot, producing trailing pages with header and footer only) or
    /// rows remain unemitted (geometry can undershoot; rows are never
    /// dropped).
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page_index < self.page_count || self.row_cursor < self.total_rows
    }
}
