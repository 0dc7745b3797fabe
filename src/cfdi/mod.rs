//! CFDI document model: namespace resolution, scalar coercion, the record
//! type and the extractor itself.
//!
//! A CFDI ("Comprobante Fiscal Digital por Internet") is the Mexican SAT
//! electronic invoice. Versions 3.3 and 4.0 differ in their host-document
//! namespace, so the working namespace is resolved per document from the
//! root element instead of being hardcoded.

pub mod coerce;
mod extract;
mod record;

pub use extract::extract_record;
pub use record::{CfdiRecord, invoice_number, year_month};

use quick_xml::name::ResolveResult;

/// Namespace URIs of the supported schemas.
///
/// The complement URIs are fixed: stamp and Pagos 2.0 schemas do not vary
/// with the host-document version.
pub mod ns {
    /// CFDI 3.3 host-document namespace.
    pub const CFD_33: &str = "http://www.sat.gob.mx/cfd/3";
    /// CFDI 4.0 host-document namespace. Also the fallback when a root
    /// element carries no namespace at all.
    pub const CFD_40: &str = "http://www.sat.gob.mx/cfd/4";
    /// Timbre Fiscal Digital complement (stamp, carries the UUID).
    pub const TIMBRE: &str = "http://www.sat.gob.mx/TimbreFiscalDigital";
    /// Pagos 2.0 payments complement.
    pub const PAGOS20: &str = "http://www.sat.gob.mx/Pagos20";
}

/// Namespace URI of a resolved element name, or `""` when the element is
/// not namespace-qualified.
///
/// Callers fall back to [`ns::CFD_40`] on an empty result, which is how
/// both 3.3 and 4.0 documents are handled without pinning a version.
pub fn resolve_namespace(resolution: &ResolveResult<'_>) -> String {
    match resolution {
        ResolveResult::Bound(namespace) => {
            String::from_utf8_lossy(namespace.into_inner()).into_owned()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::name::Namespace;

    #[test]
    fn bound_namespace_yields_uri() {
        let resolution = ResolveResult::Bound(Namespace(ns::CFD_33.as_bytes()));
        assert_eq!(resolve_namespace(&resolution), "http://www.sat.gob.mx/cfd/3");
    }

    #[test]
    fn unbound_namespace_yields_empty_string() {
        assert_eq!(resolve_namespace(&ResolveResult::Unbound), "");
    }
}
