//! tabreport - tabular report layout and export engine
//!
//! Takes an immutable table of string cells and:
//! - paginates it across fixed-size pages, drawing title, header grid, data
//!   grid, optional pie-chart block, and footer onto an abstract surface;
//! - exports it as a styled XLSX workbook with per-cell type inference
//!   (boolean, date, decimal, text) driving format selection.
//!
//! Both faces share one data model ([`TableSnapshot`]), one classifier, and
//! one style catalog.
//!
//! # Usage
//!
//! ```no_run
//! use tabreport::{Report, TableSnapshot};
//!
//! let columns = vec!["item".to_string(), "amount".to_string()];
//! let rows = vec![vec!["widget".to_string(), "42.50".to_string()]];
//! let snapshot = TableSnapshot::new("sales", &columns, rows, None)?;
//! let report = Report::new(snapshot);
//! report.save_as_excel(None, true)?;
//! # Ok::<(), tabreport::ReportError>(())
//! ```

pub mod chart;
pub mod classify;
pub mod error;
pub mod export;
pub mod layout;
pub mod render;
pub mod report;
pub mod snapshot;
pub mod styles;

pub use chart::Rgb;
pub use classify::{classify, CellKind};
pub use error::{ReportError, Result};
pub use export::{save_as_excel, serialize, ContainerFormat};
pub use layout::{page_count, PageGeometry, RenderSession, RowRange};
pub use render::DrawSurface;
pub use report::Report;
pub use snapshot::{ReportParams, SortOrder, TableSnapshot};
pub use styles::{CellStyleSpec, FontSpec, StyleCatalog, StyleTag};

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
