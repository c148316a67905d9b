//! Spreadsheet parsing and cell value handling
//!
//! Only the first worksheet of a workbook is read. The first row is
//! the header; every later row becomes a [`Row`] keyed by those
//! headers.

use crate::{BatchError, Result};
use calamine::{Data, DataType, Reader, Xlsx};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::Cursor;

/// A single spreadsheet cell, typed
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Missing,
}

static MISSING: CellValue = CellValue::Missing;

impl CellValue {
    /// Whether the cell is empty or the column is absent
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Render the cell the way it should appear in a form field
    ///
    /// Text is trimmed; integral numbers drop the trailing `.0`;
    /// dates use `YYYY-MM-DD HH:MM:SS`; missing renders empty.
    pub fn to_field_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

/// One data row keyed by column header
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    /// Value under the header, or missing when the column is absent
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    /// Set the value under a header
    pub fn set(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }
}

/// First worksheet of an xlsx workbook
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Sheet {
    /// Parse the first worksheet from xlsx bytes
    ///
    /// Headers are trimmed; columns with a blank header are dropped.
    pub fn from_xlsx_bytes(data: &[u8]) -> Result<Self> {
        let mut workbook =
            Xlsx::new(Cursor::new(data)).map_err(|e| BatchError::SpreadsheetError(e.to_string()))?;

        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| BatchError::SpreadsheetError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| BatchError::SpreadsheetError(e.to_string()))?;

        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
                .collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for data_row in rows_iter {
            let mut row = Row::default();
            for (header, cell) in headers.iter().zip(data_row) {
                if header.is_empty() {
                    continue;
                }
                row.set(header, cell_value(cell));
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Trimmed header names in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in sheet order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Convert a calamine cell into a [`CellValue`]
///
/// Date cells only become dates when the workbook marks them as such;
/// plain floats stay numbers.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(parsed) => CellValue::Date(parsed),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_is_trimmed() {
        let cell = CellValue::Text("  Acme Freight  ".to_string());
        assert_eq!(cell.to_field_text(), "Acme Freight");
    }

    #[test]
    fn test_integral_numbers_drop_the_point() {
        assert_eq!(CellValue::Number(1001.0).to_field_text(), "1001");
        assert_eq!(CellValue::Number(12.5).to_field_text(), "12.5");
        assert_eq!(CellValue::Number(-3.0).to_field_text(), "-3");
    }

    #[test]
    fn test_dates_use_datetime_form() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::Date(dt).to_field_text(), "2024-03-01 00:00:00");
    }

    #[test]
    fn test_missing_reads_as_empty() {
        assert!(CellValue::Missing.is_missing());
        assert_eq!(CellValue::Missing.to_field_text(), "");
    }

    #[test]
    fn test_absent_column_is_missing() {
        let row = Row::default();
        assert!(row.get("BOLnum").is_missing());
    }

    #[test]
    fn test_row_set_and_get() {
        let mut row = Row::default();
        row.set("FromName", CellValue::Text("Acme".to_string()));
        assert_eq!(row.get("FromName").to_field_text(), "Acme");
        assert!(!row.get("FromName").is_missing());
    }
}
