//! Streaming extraction of one [`CfdiRecord`] per document.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use rust_decimal::Decimal;

use super::coerce::parse_amount;
use super::record::{CfdiRecord, invoice_number, year_month};
use super::{ns, resolve_namespace};
use crate::error::ReporteError;

/// Extract one record from CFDI XML text.
///
/// Handles 3.3 and 4.0 documents alike: the host namespace is taken from
/// the root element, with [`ns::CFD_40`] as the fallback for an unqualified
/// root. Every attribute is read defensively — an absent element or
/// attribute yields the field default, never an error. Only malformed XML
/// (or a document with no root element) fails.
///
/// The stamp UUID comes from the first `TimbreFiscalDigital` element found
/// anywhere; for the Pagos 2.0 complement only the first `Pago` entry's
/// `Monto` is captured — additional payment entries are not aggregated.
pub fn extract_record(xml: &str) -> Result<CfdiRecord, ReporteError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = ParsedDocument::default();
    let mut depth = 0usize;

    loop {
        match reader.read_resolved_event() {
            Ok((resolution, Event::Start(e))) => {
                doc.handle_element(&resolution, &e, depth, false);
                depth += 1;
            }
            Ok((resolution, Event::Empty(e))) => {
                doc.handle_element(&resolution, &e, depth, true);
            }
            Ok((_, Event::End(_))) => {
                depth = depth.saturating_sub(1);
                doc.handle_close(depth);
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(ReporteError::Xml(format!("XML parse error: {e}"))),
        }
    }

    if !doc.seen_root {
        return Err(ReporteError::Xml("document has no root element".into()));
    }
    Ok(doc.into_record())
}

// ---------------------------------------------------------------------------
// Parsing state
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ParsedDocument {
    seen_root: bool,
    primary_ns: String,

    rfc_emisor: String,
    nombre_emisor: String,
    rfc_receptor: String,
    nombre_receptor: String,
    uso_cfdi: String,
    fecha: String,
    serie: String,
    folio: String,
    subtotal: Decimal,
    total: Decimal,
    moneda: String,
    tipo_de_comprobante: String,
    metodo_pago: String,
    forma_pago: String,
    tipo_cambio: String,
    iva: Decimal,
    ieps: Decimal,
    risr: Decimal,
    riva: Decimal,
    uuid: String,
    pago_monto: Decimal,

    emisor_seen: bool,
    receptor_seen: bool,
    timbre_seen: bool,
    in_impuestos: bool,
    impuestos_done: bool,
    impuestos_depth: usize,
    in_pagos: bool,
    pagos_done: bool,
    pagos_depth: usize,
    pago_seen: bool,
}

impl ParsedDocument {
    fn handle_element(
        &mut self,
        resolution: &ResolveResult<'_>,
        e: &BytesStart<'_>,
        depth: usize,
        is_empty: bool,
    ) {
        if !self.seen_root {
            self.seen_root = true;
            let uri = resolve_namespace(resolution);
            self.primary_ns = if uri.is_empty() {
                ns::CFD_40.to_string()
            } else {
                uri
            };
            self.read_root_attrs(e);
            return;
        }

        let uri = ns_bytes(resolution);
        let local = e.local_name();
        let local = local.as_ref();

        if uri == self.primary_ns.as_bytes() {
            match local {
                b"Emisor" if !self.emisor_seen => {
                    self.emisor_seen = true;
                    self.rfc_emisor = attr(e, b"Rfc");
                    self.nombre_emisor = attr(e, b"Nombre");
                }
                b"Receptor" if !self.receptor_seen => {
                    self.receptor_seen = true;
                    self.rfc_receptor = attr(e, b"Rfc");
                    self.nombre_receptor = attr(e, b"Nombre");
                    self.uso_cfdi = attr(e, b"UsoCFDI");
                }
                // The first Impuestos element in document order is the
                // container; later ones are not consulted.
                b"Impuestos" if !self.impuestos_done && !self.in_impuestos => {
                    if is_empty {
                        self.impuestos_done = true;
                    } else {
                        self.in_impuestos = true;
                        self.impuestos_depth = depth;
                    }
                }
                b"Traslado" if self.in_impuestos => {
                    let importe = parse_amount(attr_opt(e, b"Importe").as_deref(), Decimal::ZERO);
                    match attr(e, b"Impuesto").as_str() {
                        "002" => self.iva += importe,
                        "003" => self.ieps += importe,
                        _ => {}
                    }
                }
                b"Retencion" if self.in_impuestos => {
                    let importe = parse_amount(attr_opt(e, b"Importe").as_deref(), Decimal::ZERO);
                    match attr(e, b"Impuesto").as_str() {
                        "001" => self.risr += importe,
                        "002" => self.riva += importe,
                        _ => {}
                    }
                }
                _ => {}
            }
        } else if uri == ns::TIMBRE.as_bytes() {
            if local == b"TimbreFiscalDigital" && !self.timbre_seen {
                self.timbre_seen = true;
                self.uuid = attr(e, b"UUID");
            }
        } else if uri == ns::PAGOS20.as_bytes() {
            match local {
                b"Pagos" if !self.pagos_done && !self.in_pagos => {
                    if is_empty {
                        self.pagos_done = true;
                    } else {
                        self.in_pagos = true;
                        self.pagos_depth = depth;
                    }
                }
                // First payment entry only.
                b"Pago" if self.in_pagos && !self.pago_seen => {
                    self.pago_seen = true;
                    self.pago_monto = parse_amount(attr_opt(e, b"Monto").as_deref(), Decimal::ZERO);
                }
                _ => {}
            }
        }
    }

    fn handle_close(&mut self, depth: usize) {
        if self.in_impuestos && depth <= self.impuestos_depth {
            self.in_impuestos = false;
            self.impuestos_done = true;
        }
        if self.in_pagos && depth <= self.pagos_depth {
            self.in_pagos = false;
            self.pagos_done = true;
        }
    }

    fn read_root_attrs(&mut self, e: &BytesStart<'_>) {
        self.fecha = attr(e, b"Fecha");
        self.serie = attr(e, b"Serie");
        self.folio = attr(e, b"Folio");
        self.subtotal = parse_amount(attr_opt(e, b"SubTotal").as_deref(), Decimal::ZERO);
        self.total = parse_amount(attr_opt(e, b"Total").as_deref(), Decimal::ZERO);
        self.moneda = attr(e, b"Moneda");
        self.tipo_de_comprobante = attr(e, b"TipoDeComprobante");
        self.metodo_pago = attr(e, b"MetodoPago");
        self.forma_pago = attr(e, b"FormaPago");
        let tc = attr(e, b"TipoCambio");
        self.tipo_cambio = if tc.is_empty() { "1".to_string() } else { tc };
    }

    fn into_record(self) -> CfdiRecord {
        let n_factura = invoice_number(&self.serie, &self.folio);
        let mes = year_month(&self.fecha);
        CfdiRecord {
            rfc_emisor: self.rfc_emisor,
            nombre_emisor: self.nombre_emisor,
            rfc_receptor: self.rfc_receptor,
            nombre_receptor: self.nombre_receptor,
            fecha: self.fecha,
            serie: self.serie,
            folio: self.folio,
            n_factura,
            subtotal: self.subtotal,
            total: self.total,
            moneda: self.moneda,
            tipo_de_comprobante: self.tipo_de_comprobante,
            metodo_pago: self.metodo_pago,
            forma_pago: self.forma_pago,
            uso_cfdi: self.uso_cfdi,
            tipo_cambio: self.tipo_cambio,
            iva: self.iva,
            ieps: self.ieps,
            risr: self.risr,
            riva: self.riva,
            uuid: self.uuid,
            pago_monto: self.pago_monto,
            mes,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ns_bytes<'n>(resolution: &ResolveResult<'n>) -> &'n [u8] {
    match resolution {
        ResolveResult::Bound(namespace) => namespace.into_inner(),
        _ => b"",
    }
}

fn attr_opt(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| a.unescape_value().map(|v| v.into_owned()).unwrap_or_default())
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> String {
    attr_opt(e, name).unwrap_or_default()
}
