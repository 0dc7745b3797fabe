//! # cfdi-reporte
//!
//! Batch extraction of Mexican CFDI (3.3/4.0) electronic invoices from a
//! directory tree into a single consolidated Excel report.
//!
//! The host-document namespace is resolved per file from the root element,
//! so 3.3 and 4.0 corpora mix freely. All monetary values use
//! [`rust_decimal::Decimal`] — never floating point — until the Excel cell
//! boundary. One malformed document never aborts a batch: it is logged,
//! counted as a skip and the scan continues.
//!
//! ## Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), cfdi_reporte::ReporteError> {
//! let total = cfdi_reporte::run_pipeline("xmls".as_ref(), "reporte_cfdi.xlsx".as_ref())?;
//! println!("XML procesados: {total}");
//! # Ok(())
//! # }
//! ```

pub mod cfdi;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scan;

pub use crate::cfdi::{CfdiRecord, extract_record};
pub use crate::error::ReporteError;
pub use crate::pipeline::run_pipeline;
pub use crate::report::{ReportTable, build_table, write_xlsx};
pub use crate::scan::{ScanOutcome, SkippedDocument, discover_xml_files, scan_directory};
