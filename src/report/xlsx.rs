//! Excel workbook writer for the assembled report.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

use super::{Cell, ReportTable};
use crate::error::ReporteError;

const SHEET_NAME: &str = "Reporte CFDI";

/// Write the report as a single-sheet `.xlsx` workbook.
///
/// Header row first, then one row per record in scan order. Numeric cells
/// are written as numbers; column widths come from the table's hints.
pub fn write_xlsx(table: &ReportTable, path: &Path) -> Result<(), ReporteError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, spec) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, spec.header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(excel_row, col as u16, s)?;
                }
                Cell::Number(d) => {
                    worksheet.write_number(excel_row, col as u16, d.to_f64().unwrap_or(0.0))?;
                }
            }
        }
    }

    for (col, width) in table.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    workbook.save(path)?;
    Ok(())
}
