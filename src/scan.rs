//! Corpus discovery and per-document isolation.
//!
//! One malformed file must never abort a batch: every per-document failure
//! is logged, recorded as a skip and processing continues with the next
//! path. The only fatal precondition is a missing input directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::cfdi::{CfdiRecord, extract_record};
use crate::error::ReporteError;

/// Outcome of scanning one directory tree, in file-discovery order.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Records that extracted successfully.
    pub records: Vec<CfdiRecord>,
    /// Documents dropped from the batch, with the reason.
    pub skipped: Vec<SkippedDocument>,
}

/// One document dropped from the batch.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: ReporteError,
}

/// Recursively enumerate every regular file under `root` whose name ends
/// in `.xml` (case-insensitive), in lexicographically sorted order.
///
/// Fails with [`ReporteError::DirectoryNotFound`] when `root` does not
/// exist or is not a directory. Unreadable entries inside the tree are
/// skipped with a warning.
pub fn discover_xml_files(root: &Path) -> Result<Vec<PathBuf>, ReporteError> {
    if !root.is_dir() {
        return Err(ReporteError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
    {
        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Scan `root` and extract one record per parseable document.
///
/// Per-document failures (unreadable file, malformed XML) are absorbed
/// into [`ScanOutcome::skipped`]; they never alter the batch outcome.
pub fn scan_directory(root: &Path) -> Result<ScanOutcome, ReporteError> {
    let files = discover_xml_files(root)?;
    info!(carpeta = %root.display(), archivos = files.len(), "XML files discovered");
    for path in &files {
        debug!(archivo = %path.display(), "discovered");
    }

    let mut outcome = ScanOutcome::default();
    for path in files {
        match process_file(&path) {
            Ok(record) => outcome.records.push(record),
            Err(reason) => {
                warn!(archivo = %path.display(), error = %reason, "skipping document");
                outcome.skipped.push(SkippedDocument { path, reason });
            }
        }
    }
    Ok(outcome)
}

fn process_file(path: &Path) -> Result<CfdiRecord, ReporteError> {
    let contents = fs::read_to_string(path).map_err(|source| ReporteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_record(&contents)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_extension_is_case_insensitive() {
        assert!(has_xml_extension(Path::new("a/factura.xml")));
        assert!(has_xml_extension(Path::new("a/FACTURA.XML")));
        assert!(has_xml_extension(Path::new("a/mixta.Xml")));
        assert!(!has_xml_extension(Path::new("a/reporte.xlsx")));
        assert!(!has_xml_extension(Path::new("a/xml")));
    }

    #[test]
    fn missing_root_is_fatal() {
        let err = discover_xml_files(Path::new("/no/existe/esta/carpeta")).unwrap_err();
        assert!(matches!(err, ReporteError::DirectoryNotFound(_)));
    }
}
