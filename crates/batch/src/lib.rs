//! # Bolfill Batch
//!
//! Turns a spreadsheet of Bill of Lading rows into a zip archive of
//! filled PDF forms:
//!
//! - Parse the first worksheet of an xlsx workbook
//! - Map spreadsheet columns onto the standard form's field names
//! - Fill one copy of the template per row, skipping blank cells
//! - Pack the filled forms into a deterministic zip archive
//!
//! # Example
//!
//! ```ignore
//! use batch::{load_template, run_batch};
//!
//! let template = load_template(None)?;
//! let workbook = std::fs::read("shipments.xlsx")?;
//! let output = run_batch(&template, &workbook)?;
//! std::fs::write(&output.summary.archive_name, &output.archive)?;
//! ```

pub mod mapping;
pub mod spreadsheet;

mod filler;
mod loader;
mod runner;

pub use filler::{fill_row, FilledRow, RowFiller};
pub use loader::{load_template, DEFAULT_TEMPLATE_PATH};
pub use mapping::FieldMapping;
pub use runner::{archive_file_name, run_batch, BatchOutput, BatchSummary};
pub use spreadsheet::{CellValue, Row, Sheet};

use thiserror::Error;

/// Errors that can occur while running a batch
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Failed to read spreadsheet: {0}")]
    SpreadsheetError(String),

    #[error("PDF form error: {0}")]
    FormError(#[from] pdf_form::FormError),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BatchError {
    /// Short message suitable for showing to an operator
    ///
    /// The missing-template case includes the path; other failures get
    /// a generic hint about column and field names.
    pub fn operator_message(&self) -> String {
        match self {
            BatchError::TemplateNotFound(detail) => {
                format!("Default template not found: {detail}")
            }
            _ => "Processing failed. Check that the spreadsheet column names match the PDF form fields."
                .to_string(),
        }
    }
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_operator_message_names_the_path() {
        let err = BatchError::TemplateNotFound(
            "templates/bill-of-lading-01.pdf: no such file".to_string(),
        );
        assert_eq!(
            err.operator_message(),
            "Default template not found: templates/bill-of-lading-01.pdf: no such file"
        );
    }

    #[test]
    fn test_operator_message_keeps_detail_out() {
        let err = BatchError::SpreadsheetError("invalid zip archive".to_string());
        let message = err.operator_message();
        assert!(!message.contains("invalid zip"));
        assert!(message.contains("column names"));
    }
}
