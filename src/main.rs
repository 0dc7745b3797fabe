//! Command-line front end: two positional arguments with usable defaults,
//! delegating to the core pipeline.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cfdi-reporte",
    about = "Lee XML CFDI (3.3/4.0) de una carpeta (recursivo) y genera un Excel resumido",
    version
)]
struct Cli {
    /// Directory scanned recursively for .xml files
    #[arg(default_value = ".")]
    carpeta_xml: PathBuf,

    /// Destination .xlsx report path
    #[arg(default_value = "reporte_cfdi.xlsx")]
    archivo_excel: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cfdi_reporte::run_pipeline(&cli.carpeta_xml, &cli.archivo_excel) {
        Ok(total) => {
            println!("Reporte generado: {}", cli.archivo_excel.display());
            println!("XML procesados: {total}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
