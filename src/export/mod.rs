//! Spreadsheet export.
//!
//! One pass over the snapshot: build the workbook model, serialize the OOXML
//! container, write it to disk. All failures come back as `Result` values;
//! there is no partial file on validation failure because validation happens
//! before any byte is produced.

mod workbook;
mod xlsx_writer;

pub use workbook::DEFAULT_REPORT_NAME;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};
use crate::snapshot::TableSnapshot;
use crate::styles::StyleCatalog;

/// Relative directory for auto-generated output paths.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Spreadsheet container format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Modern OOXML container (`.xlsx`).
    Xlsx,
    /// Legacy binary container (`.xls`); recognized but not writable.
    Xls,
}

impl ContainerFormat {
    /// Select the container from a path's extension (case-insensitive).
    ///
    /// # Errors
    /// `Export` for a missing or unrecognized extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx") => Ok(ContainerFormat::Xlsx),
            Some("xls") => Ok(ContainerFormat::Xls),
            Some(other) => Err(ReportError::Export(format!(
                "unrecognized spreadsheet extension `.{other}`"
            ))),
            None => Err(ReportError::Export(format!(
                "output path {} has no extension",
                path.display()
            ))),
        }
    }
}

/// Serialize the snapshot into XLSX container bytes.
///
/// `show_footer_underline` interleaves an empty bottom-bordered cell after
/// each footer caption.
pub fn serialize(
    snapshot: &TableSnapshot,
    catalog: &StyleCatalog,
    show_footer_underline: bool,
) -> Result<Vec<u8>> {
    let model = workbook::build_workbook(snapshot, show_footer_underline);
    xlsx_writer::write_container(&model, catalog)
}

/// Export the snapshot as a spreadsheet file.
///
/// With `path = None` the output lands at
/// `reports/{name}_{timestamp}.xlsx`, creating the directory if absent.
/// Returns the path written.
///
/// # Errors
/// `Export` for an unsupported container or extension; `Io` for directory
/// creation or write failures. A failed call leaves no partial file behind
/// beyond what the failed write itself produced.
pub fn save_as_excel(
    snapshot: &TableSnapshot,
    catalog: &StyleCatalog,
    path: Option<&Path>,
    show_footer_underline: bool,
) -> Result<PathBuf> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => {
            fs::create_dir_all(DEFAULT_OUTPUT_DIR)?;
            default_output_path(snapshot.name())
        }
    };

    match ContainerFormat::from_path(&target)? {
        ContainerFormat::Xlsx => {}
        ContainerFormat::Xls => {
            return Err(ReportError::Export(
                "legacy .xls (BIFF) output is not supported; use .xlsx".to_string(),
            ));
        }
    }

    let bytes = serialize(snapshot, catalog, show_footer_underline)?;
    fs::write(&target, bytes)?;
    log::debug!("exported workbook to {}", target.display());
    Ok(target)
}

/// Timestamped default output path under [`DEFAULT_OUTPUT_DIR`].
fn default_output_path(name: &str) -> PathBuf {
    let name = if name.is_empty() {
        DEFAULT_REPORT_NAME
    } else {
        name
    };
    let stamp = chrono::Local::now().format("%Y_%m_%d_%H_%M_%S");
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(format!("{name}_{stamp}.xlsx"))
}
