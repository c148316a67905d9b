//! Template field inspector
//!
//! Prints the fillable field names found on the first page of a form
//! template.
//!
//! Usage:
//!   cargo run --example list_fields -- [template.pdf]
//!
//! Without an argument the default at templates/bill-of-lading-01.pdf
//! is inspected.

use batch::DEFAULT_TEMPLATE_PATH;
use pdf_form::FormDocument;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or(DEFAULT_TEMPLATE_PATH);

    let doc =
        FormDocument::open(path).map_err(|e| format!("Failed to open template '{}': {}", path, e))?;

    let names = doc.field_names();
    if names.is_empty() {
        println!("No fillable form fields detected on the first page.");
        println!("Check that the template is a fillable PDF.");
    } else {
        println!("{} fields on '{}':", names.len(), path);
        for name in &names {
            println!("  {}", name);
        }
    }

    Ok(())
}
