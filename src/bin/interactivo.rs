//! Interactive front end: behaves like the CLI when both paths are given,
//! otherwise prompts for them on the terminal. The core pipeline stays
//! free of any interactive concern.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args_os().skip(1);
    let (carpeta, salida) = match (args.next(), args.next()) {
        (Some(carpeta), Some(salida)) => (PathBuf::from(carpeta), PathBuf::from(salida)),
        _ => match prompt_paths() {
            Some(paths) => paths,
            // Selection cancelled; mirror a dismissed picker and exit quietly.
            None => return ExitCode::SUCCESS,
        },
    };

    match cfdi_reporte::run_pipeline(&carpeta, &salida) {
        Ok(total) => {
            println!("Reporte generado: {}", salida.display());
            println!("XML procesados: {total}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_paths() -> Option<(PathBuf, PathBuf)> {
    let carpeta = prompt("Carpeta de XML (búsqueda recursiva)")?;
    let salida = prompt_with_default("Archivo de salida", "reporte_cfdi.xlsx");
    Some((PathBuf::from(carpeta), PathBuf::from(salida)))
}

fn prompt(label: &str) -> Option<String> {
    let line = read_line(label)?;
    if line.is_empty() { None } else { Some(line) }
}

fn prompt_with_default(label: &str, default: &str) -> String {
    match read_line(&format!("{label} [{default}]")) {
        Some(line) if !line.is_empty() => line,
        _ => default.to_string(),
    }
}

fn read_line(label: &str) -> Option<String> {
    print!("{label}: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    Some(line.trim().to_string())
}
