//! Scanner and end-to-end pipeline tests over on-disk corpora.

use std::fs;
use std::path::Path;

use cfdi_reporte::{
    ReporteError, build_table, discover_xml_files, run_pipeline, scan_directory,
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

const GOOD_40: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
    Serie="A" Folio="100" Fecha="2024-03-15T10:00:00"
    SubTotal="1000.00" Total="1160.00" TipoDeComprobante="I">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="EMPRESA EJEMPLO SA DE CV"/>
  <cfdi:Receptor Rfc="BBB020202BBB" Nombre="CLIENTE SA" UsoCFDI="G03"/>
  <cfdi:Complemento>
    <tfd:TimbreFiscalDigital xmlns:tfd="http://www.sat.gob.mx/TimbreFiscalDigital"
        UUID="11111111-2222-3333-4444-555555555555"/>
  </cfdi:Complemento>
</cfdi:Comprobante>"#;

// Mismatched closing tag.
const CORRUPT: &str = "<cfdi:Comprobante><cfdi:Emisor></cfdi:Comprobante>";

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn corrupt_nested_file_is_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("bueno.xml"), GOOD_40);
    write(&dir.path().join("sub/anidado/roto.xml"), CORRUPT);

    let outcome = scan_directory(dir.path()).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].uuid, "11111111-2222-3333-4444-555555555555");
    assert_eq!(outcome.records[0].total, dec!(1160.00));

    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].path.ends_with("sub/anidado/roto.xml"));
    assert!(matches!(outcome.skipped[0].reason, ReporteError::Xml(_)));
}

#[test]
fn end_to_end_writes_one_row_and_returns_the_count() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("bueno.xml"), GOOD_40);
    write(&dir.path().join("sub/roto.xml"), CORRUPT);
    let out = dir.path().join("reporte_cfdi.xlsx");

    let total = run_pipeline(dir.path(), &out).unwrap();
    assert_eq!(total, 1);
    assert!(out.is_file());
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn empty_corpus_yields_header_only_report_and_zero() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("notas.txt"), "no soy xml");
    let out = dir.path().join("reporte_cfdi.xlsx");

    let total = run_pipeline(dir.path(), &out).unwrap();
    assert_eq!(total, 0);
    assert!(out.is_file());
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn discovery_is_recursive_sorted_and_case_insensitive() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("b.XML"), GOOD_40);
    write(&dir.path().join("a.xml"), GOOD_40);
    write(&dir.path().join("c.txt"), "no");
    write(&dir.path().join("sub/d.xml"), GOOD_40);

    let files = discover_xml_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.xml", "b.XML", "sub/d.xml"]);
}

#[test]
fn missing_input_directory_is_the_one_fatal_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no_existe");
    let out = dir.path().join("reporte.xlsx");

    let err = run_pipeline(&missing, &out).unwrap_err();
    assert!(matches!(err, ReporteError::DirectoryNotFound(_)));
    assert!(!out.exists()); // no partial processing
}

#[test]
fn rescanning_an_unchanged_corpus_is_idempotent() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("uno.xml"), GOOD_40);
    write(&dir.path().join("dos/otro.xml"), GOOD_40);

    let first = scan_directory(dir.path()).unwrap();
    let second = scan_directory(dir.path()).unwrap();
    assert_eq!(first.records, second.records);

    let rows_a = build_table(&first.records).rows;
    let rows_b = build_table(&second.records).rows;
    assert_eq!(rows_a, rows_b);
}
