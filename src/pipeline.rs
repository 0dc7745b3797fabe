//! End-to-end pipeline: scan, assemble, export.

use std::path::Path;

use tracing::info;

use crate::error::ReporteError;
use crate::report::{build_table, write_xlsx};
use crate::scan::scan_directory;

/// Run the whole pipeline over `root` and write the report to `output`.
///
/// Returns the number of successfully extracted records. An empty corpus
/// still produces a header-only workbook and returns zero. Only the
/// missing-directory precondition and a failure to write the workbook
/// propagate; per-document failures are logged and skipped.
pub fn run_pipeline(root: &Path, output: &Path) -> Result<usize, ReporteError> {
    let outcome = scan_directory(root)?;
    if !outcome.skipped.is_empty() {
        info!(omitidos = outcome.skipped.len(), "documents skipped");
    }

    let table = build_table(&outcome.records);
    write_xlsx(&table, output)?;
    info!(
        procesados = outcome.records.len(),
        reporte = %output.display(),
        "report written"
    );
    Ok(outcome.records.len())
}
