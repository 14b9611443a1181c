//! Top-level report façade.
//!
//! Ties one snapshot to a page geometry and style catalog, and runs render
//! sessions and exports over it. The snapshot is immutable for the life of
//! the report; a session borrows the report, so a second concurrent session
//! over the same report is a compile error, not a runtime hazard.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export;
use crate::layout::{page_count, PageGeometry, RenderSession, RowRange, DEFAULT_MAX_ROWS_PER_PAGE};
use crate::render::{render_page, DrawSurface};
use crate::snapshot::TableSnapshot;
use crate::styles::StyleCatalog;

/// A report over one table snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    snapshot: TableSnapshot,
    geometry: PageGeometry,
    catalog: StyleCatalog,
    max_rows_per_page: u32,
}

impl Report {
    /// Build a report with default geometry, styles, and page cap.
    #[must_use]
    pub fn new(snapshot: TableSnapshot) -> Self {
        Self {
            snapshot,
            geometry: PageGeometry::default(),
            catalog: StyleCatalog::default(),
            max_rows_per_page: DEFAULT_MAX_ROWS_PER_PAGE,
        }
    }

    /// Replace the page geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replace the style catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: StyleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Cap on data rows per page (default 35).
    #[must_use]
    pub fn with_max_rows_per_page(mut self, max_rows_per_page: u32) -> Self {
        self.max_rows_per_page = max_rows_per_page;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> &TableSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Number of pages a render session will produce.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        page_count(self.snapshot.row_count(), self.max_rows_per_page)
    }

    /// Start a render session.
    ///
    /// # Errors
    /// `Layout` if the page geometry is degenerate; nothing is drawn in that
    /// case.
    pub fn begin_session(&self) -> Result<RenderSession> {
        self.geometry.validate()?;
        Ok(RenderSession::new(
            self.snapshot.row_count(),
            self.max_rows_per_page,
        ))
    }

    /// Render the next page of `session` onto `surface`.
    ///
    /// Returns `true` while more pages remain after this one. The session's
    /// cursor advances by exactly the rows drawn.
    pub fn render_next_page(
        &self,
        session: &mut RenderSession,
        surface: &mut dyn DrawSurface,
    ) -> Result<bool> {
        render_page(surface, &self.snapshot, session, &self.geometry, &self.catalog)?;
        Ok(session.has_more())
    }

    /// Render every page onto `surface`; returns the row ranges per page.
    ///
    /// Convenience wrapper over [`begin_session`](Self::begin_session) and
    /// [`render_next_page`](Self::render_next_page) for hosts without an
    /// incremental page loop.
    pub fn render_all(&self, surface: &mut dyn DrawSurface) -> Result<Vec<RowRange>> {
        let mut session = self.begin_session()?;
        let mut ranges = Vec::new();
        loop {
            let range = render_page(
                surface,
                &self.snapshot,
                &mut session,
                &self.geometry,
                &self.catalog,
            )?;
            ranges.push(range);
            if !session.has_more() {
                return Ok(ranges);
            }
        }
    }

    /// Serialize the snapshot into XLSX container bytes without touching disk.
    pub fn serialize(&self, show_footer_underline: bool) -> Result<Vec<u8>> {
        export::serialize(&self.snapshot, &self.catalog, show_footer_underline)
    }

    /// Export the snapshot as a spreadsheet file; see [`export::save_as_excel`].
    pub fn save_as_excel(
        &self,
        path: Option<&Path>,
        show_footer_underline: bool,
    ) -> Result<PathBuf> {
        export::save_as_excel(&self.snapshot, &self.catalog, path, show_footer_underline)
    }
}
