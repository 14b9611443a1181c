//! Structured error types for tabreport.
//!
//! Validation and export failures are returned as values from the public API;
//! nothing in this crate panics on malformed input.

/// All errors that can occur while laying out or exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Snapshot construction failure: header/column count mismatch, ragged rows,
    /// out-of-range sort column.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Degenerate page geometry (non-positive usable width or height).
    #[error("Layout error: {0}")]
    Layout(String),

    /// Export failure: unsupported container format or workbook construction.
    #[error("Export error: {0}")]
    Export(String),

    /// ZIP container error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error during directory creation or file write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;
