use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning a corpus or generating the report.
///
/// Only [`ReporteError::DirectoryNotFound`] and export failures abort a
/// batch; per-document XML and read errors are absorbed by the scanner and
/// reported as skips.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReporteError {
    /// The input root does not exist or is not a directory.
    #[error("input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Malformed XML or a document with no usable root element.
    #[error("XML error: {0}")]
    Xml(String),

    /// Failed to read one source file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the Excel workbook.
    #[error("report export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}
