//! Bill of Lading batch filler
//!
//! Fills one copy of the form template per spreadsheet row and writes
//! the results as a zip archive in the current directory.
//!
//! Usage:
//!   cargo run --example fill_batch -- <shipments.xlsx> [template.pdf]
//!
//! Without a template argument the default at
//! templates/bill-of-lading-01.pdf is used.

use batch::{load_template, run_batch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "batch=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <shipments.xlsx> [template.pdf]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cargo run --example fill_batch -- shipments.xlsx");
        eprintln!("  cargo run --example fill_batch -- shipments.xlsx custom-form.pdf");
        std::process::exit(1);
    }

    let workbook = std::fs::read(&args[1])
        .map_err(|e| format!("Failed to read spreadsheet '{}': {}", args[1], e))?;

    let upload = match args.get(2) {
        Some(path) => Some(
            std::fs::read(path).map_err(|e| format!("Failed to read template '{}': {}", path, e))?,
        ),
        None => None,
    };

    let template = match load_template(upload.as_deref()) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("{}", e.operator_message());
            return Err(e.into());
        }
    };

    let output = match run_batch(&template, &workbook) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}", e.operator_message());
            return Err(e.into());
        }
    };

    std::fs::write(&output.summary.archive_name, &output.archive)?;
    println!(
        "Generated {} documents -> {}",
        output.summary.rows, output.summary.archive_name
    );

    if !output.summary.unmatched_fields.is_empty() {
        println!("Fields with no widget on the template:");
        for field in &output.summary.unmatched_fields {
            println!("  {}", field);
        }
    }

    Ok(())
}
