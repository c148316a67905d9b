//! Batch orchestration: rows in, zip archive out

use crate::filler::RowFiller;
use crate::mapping::FieldMapping;
use crate::spreadsheet::{Row, Sheet};
use crate::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io::{Cursor, Write};
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Characters stripped from archive entry names
const INVALID_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// What a batch run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Rows processed, one form each
    pub rows: usize,
    /// Suggested file name for the archive
    pub archive_name: String,
    /// Mapped fields that matched no widget on the template, sorted
    pub unmatched_fields: Vec<String>,
}

/// Archive bytes plus the run summary
#[derive(Debug)]
pub struct BatchOutput {
    /// Zip archive of filled forms, one entry per row
    pub archive: Vec<u8>,
    pub summary: BatchSummary,
}

/// Fill one copy of the template per spreadsheet row and pack the
/// results into a zip archive
///
/// Entry names come from each row's `BOLnum` cell, falling back to
/// the row's position; colliding names get a numeric suffix. Entry
/// timestamps are constant, so the same inputs produce the same
/// archive bytes.
pub fn run_batch(template: &[u8], workbook: &[u8]) -> Result<BatchOutput> {
    let sheet = Sheet::from_xlsx_bytes(workbook)?;
    debug!(
        columns = sheet.headers().len(),
        rows = sheet.rows().len(),
        "parsed spreadsheet"
    );

    let mapping = FieldMapping::standard();
    let filler = RowFiller::new(&mapping);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut used_names = HashSet::new();
    let mut unmatched = BTreeSet::new();

    for (index, row) in sheet.rows().iter().enumerate() {
        let filled = filler.fill(template, row)?;
        unmatched.extend(filled.unmatched_fields);

        let name = entry_name(row, index, &mut used_names);
        debug!(row = index + 1, entry = %name, "filled form");
        writer.start_file(name.as_str(), options)?;
        writer.write_all(&filled.bytes)?;
    }

    let archive = writer.finish()?.into_inner();

    let summary = BatchSummary {
        rows: sheet.rows().len(),
        archive_name: archive_file_name(),
        unmatched_fields: unmatched.into_iter().collect(),
    };
    if !summary.unmatched_fields.is_empty() {
        warn!(
            fields = ?summary.unmatched_fields,
            "mapped fields matched no widget on the template"
        );
    }
    info!(rows = summary.rows, "batch complete");

    Ok(BatchOutput { archive, summary })
}

/// Name for a batch archive, stamped with the local time
pub fn archive_file_name() -> String {
    format!("BOL_PDFs_{}.zip", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Archive entry name for one row
///
/// `BOL_<BOLnum>.pdf` after sanitizing, `BOL_row<N>.pdf` when the
/// cell is blank, and a `_2`, `_3`, ... suffix on collisions.
fn entry_name(row: &Row, index: usize, used: &mut HashSet<String>) -> String {
    let raw = row.get("BOLnum").to_field_text();
    let base = match sanitize_name(&raw) {
        Some(name) => name,
        None => format!("row{}", index + 1),
    };

    let mut name = format!("BOL_{base}.pdf");
    let mut attempt = 2;
    while !used.insert(name.clone()) {
        name = format!("BOL_{base}_{attempt}.pdf");
        attempt += 1;
    }
    name
}

/// Strip zip-hostile characters and trim; `None` when nothing is left
fn sanitize_name(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !INVALID_NAME_CHARS.contains(c))
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
