use rust_decimal::Decimal;
use serde::Serialize;

use super::coerce::parse_iso_date;

/// One extracted invoice, with the full field vocabulary always present.
///
/// Missing source data never removes a field: strings default to `""` and
/// amounts to zero. Records are built once by the extractor and consumed
/// by the report assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CfdiRecord {
    pub rfc_emisor: String,
    pub nombre_emisor: String,
    pub rfc_receptor: String,
    pub nombre_receptor: String,
    /// Raw `Fecha` attribute exactly as written in the document.
    pub fecha: String,
    pub serie: String,
    pub folio: String,
    /// `Serie-Folio`, with the separator trimmed when either part is empty.
    pub n_factura: String,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub moneda: String,
    pub tipo_de_comprobante: String,
    pub metodo_pago: String,
    pub forma_pago: String,
    pub uso_cfdi: String,
    /// `"1"` when the document carries no exchange rate.
    pub tipo_cambio: String,
    /// Transferred VAT total (Impuesto code 002).
    pub iva: Decimal,
    /// Transferred IEPS total (Impuesto code 003).
    pub ieps: Decimal,
    /// Withheld ISR total (Impuesto code 001).
    pub risr: Decimal,
    /// Withheld VAT total (Impuesto code 002).
    pub riva: Decimal,
    /// Stamp UUID from the Timbre Fiscal Digital complement.
    pub uuid: String,
    /// Amount of the first `Pago` entry of the Pagos 2.0 complement.
    pub pago_monto: Decimal,
    /// `YYYY-MM` of the issue date, empty when the date does not parse.
    pub mes: String,
}

/// Derived invoice number: series and folio joined with `-`, leading and
/// trailing separators stripped when either part is empty.
pub fn invoice_number(serie: &str, folio: &str) -> String {
    format!("{serie}-{folio}").trim_matches('-').to_string()
}

/// Derived `YYYY-MM` string, empty unless the issue date parses.
pub fn year_month(fecha: &str) -> String {
    parse_iso_date(fecha)
        .map(|dt| dt.format("%Y-%m").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_joins_and_trims() {
        assert_eq!(invoice_number("A", "100"), "A-100");
        assert_eq!(invoice_number("", "100"), "100");
        assert_eq!(invoice_number("A", ""), "A");
        assert_eq!(invoice_number("", ""), "");
    }

    #[test]
    fn year_month_is_the_seven_char_prefix() {
        assert_eq!(year_month("2024-03-15T10:00:00Z"), "2024-03");
        assert_eq!(year_month("2023-12-31T23:59:59"), "2023-12");
    }

    #[test]
    fn year_month_empty_for_unparsable_dates() {
        assert_eq!(year_month(""), "");
        assert_eq!(year_month("pronto"), "");
        assert_eq!(year_month("2024-03"), "");
    }
}
