//! Tabular assembly of extracted records.
//!
//! Projects records onto a canonical column order, applies the display
//! rename map and computes per-column width hints for the Excel writer.
//! Column identity for testing purposes is the pre-rename field name.

mod xlsx;

pub use xlsx::write_xlsx;

use std::fmt;

use rust_decimal::Decimal;

use crate::cfdi::CfdiRecord;

/// Fixed padding added to every column-width hint, in characters.
pub const WIDTH_PADDING: usize = 2;

/// A single report cell. Numbers stay typed so the Excel writer can emit
/// numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(d) => write!(f, "{d}"),
        }
    }
}

/// One report column: field identity, display header and accessor.
pub struct ColumnSpec {
    /// Pre-rename field name.
    pub field: &'static str,
    /// Header as shown in the exported sheet.
    pub header: &'static str,
    accessor: fn(&CfdiRecord) -> Cell,
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

/// Canonical column order of the report.
///
/// The headers differing from their field name are the display renames
/// (presentation only). `nombre_receptor` and `moneda` are extracted but
/// intentionally not projected.
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: "RFC_EMISOR",
        header: "RFC EMISOR",
        accessor: |r| text(&r.rfc_emisor),
    },
    ColumnSpec {
        field: "RFC_RECEPTOR",
        header: "RFC RECEPTOR",
        accessor: |r| text(&r.rfc_receptor),
    },
    ColumnSpec {
        field: "NOMBRE_EMISOR",
        header: "NOMBRE",
        accessor: |r| text(&r.nombre_emisor),
    },
    ColumnSpec {
        field: "FECHA",
        header: "FECHA",
        accessor: |r| text(&r.fecha),
    },
    ColumnSpec {
        field: "N.FACTURA",
        header: "N.FACTURA",
        accessor: |r| text(&r.n_factura),
    },
    ColumnSpec {
        field: "SUBTOTAL",
        header: "SUBTOTAL",
        accessor: |r| Cell::Number(r.subtotal),
    },
    ColumnSpec {
        field: "IVA",
        header: "IVA",
        accessor: |r| Cell::Number(r.iva),
    },
    ColumnSpec {
        field: "RISR",
        header: "RISR",
        accessor: |r| Cell::Number(r.risr),
    },
    ColumnSpec {
        field: "RIVA",
        header: "RIVA",
        accessor: |r| Cell::Number(r.riva),
    },
    ColumnSpec {
        field: "T.FACTURA",
        header: "T.FACTURA",
        accessor: |r| Cell::Number(r.total),
    },
    ColumnSpec {
        field: "M",
        header: "M",
        accessor: |r| text(&r.mes),
    },
    ColumnSpec {
        field: "UUID",
        header: "UUID",
        accessor: |r| text(&r.uuid),
    },
    ColumnSpec {
        field: "IEPS",
        header: "IEPS",
        accessor: |r| Cell::Number(r.ieps),
    },
    ColumnSpec {
        field: "P-Monto",
        header: "P-Monto",
        accessor: |r| Cell::Number(r.pago_monto),
    },
    ColumnSpec {
        field: "MetodoPago",
        header: "MetodoP",
        accessor: |r| text(&r.metodo_pago),
    },
    ColumnSpec {
        field: "TipoDeComprobante",
        header: "TipoCFDI",
        accessor: |r| text(&r.tipo_de_comprobante),
    },
    ColumnSpec {
        field: "FormaPago",
        header: "FPago",
        accessor: |r| text(&r.forma_pago),
    },
    ColumnSpec {
        field: "UsoCFDI",
        header: "UsoCFDI",
        accessor: |r| text(&r.uso_cfdi),
    },
    ColumnSpec {
        field: "TipoCambio",
        header: "Tcambio",
        accessor: |r| text(&r.tipo_cambio),
    },
];

/// The assembled report: canonical columns plus one row of typed cells per
/// record, in scan order.
pub struct ReportTable {
    pub columns: &'static [ColumnSpec],
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Width hint per column: longest stringified value (header included)
    /// plus [`WIDTH_PADDING`]. A formatting hint only.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let cells = self
                    .rows
                    .iter()
                    .map(|row| row[idx].to_string().chars().count())
                    .max()
                    .unwrap_or(0);
                spec.header.chars().count().max(cells) + WIDTH_PADDING
            })
            .collect()
    }
}

/// Project records onto the canonical column set.
///
/// An empty record slice still yields the full column list, so an empty
/// corpus exports a header-only sheet.
pub fn build_table(records: &[CfdiRecord]) -> ReportTable {
    let rows = records
        .iter()
        .map(|record| COLUMNS.iter().map(|c| (c.accessor)(record)).collect())
        .collect();
    ReportTable {
        columns: COLUMNS,
        rows,
    }
}
