//! # Bolfill PDF Form
//!
//! AcroForm inspection and filling on top of `lopdf`:
//!
//! - Open a fillable template from a path or from bytes
//! - List the field names carried by the first page's widgets
//! - Write text field values (Unicode-safe) and checkbox states
//! - Flag the form so viewers regenerate field appearances
//!
//! # Example
//!
//! ```ignore
//! use pdf_form::FormDocument;
//!
//! let mut doc = FormDocument::open("templates/bill-of-lading-01.pdf")?;
//! doc.set_needs_appearances()?;
//! doc.set_text_field("FromName", "Acme Freight")?;
//! doc.set_checkbox("PrePaid", true)?;
//! let filled = doc.to_bytes()?;
//! ```

mod document;
mod strings;

pub use document::FormDocument;
pub use strings::{decode_text_string, encode_text_string};

use thiserror::Error;

/// Errors that can occur during PDF form operations
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF form operations
pub type Result<T> = std::result::Result<T, FormError>;
