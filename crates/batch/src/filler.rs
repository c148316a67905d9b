//! Filling one form per spreadsheet row

use crate::mapping::{is_truthy, FieldMapping};
use crate::spreadsheet::Row;
use crate::Result;
use pdf_form::FormDocument;

/// A filled form plus the mapped fields its template did not carry
#[derive(Debug)]
pub struct FilledRow {
    /// The filled PDF
    pub bytes: Vec<u8>,
    /// Mapped fields that matched no widget on the template
    pub unmatched_fields: Vec<String>,
}

/// Fills copies of one template from spreadsheet rows
pub struct RowFiller<'a> {
    mapping: &'a FieldMapping,
}

impl<'a> RowFiller<'a> {
    pub fn new(mapping: &'a FieldMapping) -> Self {
        Self { mapping }
    }

    /// Fill a fresh copy of the template from one row
    ///
    /// Blank cells leave their fields untouched. Checkbox fields get
    /// "Yes" or "Off" from the cell's truthiness; everything else is
    /// written as text.
    pub fn fill(&self, template: &[u8], row: &Row) -> Result<FilledRow> {
        let mut doc = FormDocument::open_from_bytes(template)?;
        doc.set_needs_appearances()?;

        let mut unmatched_fields = Vec::new();
        for (column, field) in self.mapping.entries() {
            let value = row.get(column).to_field_text();
            if value.is_empty() {
                continue;
            }
            let matched = if self.mapping.is_checkbox(field) {
                doc.set_checkbox(field, is_truthy(&value))?
            } else {
                doc.set_text_field(field, &value)?
            };
            if !matched {
                unmatched_fields.push(field.clone());
            }
        }

        Ok(FilledRow {
            bytes: doc.to_bytes()?,
            unmatched_fields,
        })
    }
}

/// Fill one form from one row using the standard mapping
pub fn fill_row(template: &[u8], row: &Row) -> Result<Vec<u8>> {
    let mapping = FieldMapping::standard();
    let filled = RowFiller::new(&mapping).fill(template, row)?;
    Ok(filled.bytes)
}
