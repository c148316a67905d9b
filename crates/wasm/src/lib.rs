//! WASM bindings for bolfill
//!
//! JavaScript-friendly API for the batch filler:
//! - Load (or replace) the Bill of Lading template
//! - List the template's fillable field names
//! - Run a spreadsheet batch and get the zip archive back
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { BolBatch } from 'bolfill-wasm';
//!
//! await init();
//!
//! const filler = new BolBatch();
//! filler.setTemplate(templateBytes);
//! console.log(filler.fieldNames());
//!
//! const archive = filler.run(workbookBytes);
//! const summary = filler.lastSummary();
//! ```

use batch::{run_batch, BatchSummary};
use pdf_form::FormDocument;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Batch filler for the Bill of Lading form
#[wasm_bindgen]
pub struct BolBatch {
    template: Option<Vec<u8>>,
    last_summary: Option<BatchSummary>,
}

#[wasm_bindgen]
impl BolBatch {
    /// Create a batch filler with no template loaded
    #[wasm_bindgen(constructor)]
    pub fn new() -> BolBatch {
        BolBatch {
            template: None,
            last_summary: None,
        }
    }

    /// Load the template to fill
    ///
    /// Rejects bytes that do not parse as a PDF.
    ///
    /// @param data - PDF file bytes (Uint8Array)
    #[wasm_bindgen(js_name = setTemplate)]
    pub fn set_template(&mut self, data: &[u8]) -> Result<(), JsValue> {
        FormDocument::open_from_bytes(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.template = Some(data.to_vec());
        Ok(())
    }

    /// Drop the loaded template
    #[wasm_bindgen(js_name = clearTemplate)]
    pub fn clear_template(&mut self) {
        self.template = None;
    }

    /// Field names on the loaded template's first page
    ///
    /// @returns Array of field names, sorted
    #[wasm_bindgen(js_name = fieldNames)]
    pub fn field_names(&self) -> Result<Vec<JsValue>, JsValue> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Template not loaded. Call setTemplate() first."))?;
        let doc = FormDocument::open_from_bytes(template)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(doc
            .field_names()
            .into_iter()
            .map(|name| JsValue::from_str(&name))
            .collect())
    }

    /// Fill one form per spreadsheet row and pack them into a zip
    ///
    /// @param workbook - xlsx file bytes (Uint8Array)
    /// @returns Zip archive bytes (Uint8Array)
    pub fn run(&mut self, workbook: &[u8]) -> Result<Vec<u8>, JsValue> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Template not loaded. Call setTemplate() first."))?;
        let output = run_batch(template, workbook).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.last_summary = Some(output.summary);
        Ok(output.archive)
    }

    /// Summary of the most recent run
    ///
    /// @returns { rows, archive_name, unmatched_fields } or null
    #[wasm_bindgen(js_name = lastSummary)]
    pub fn last_summary(&self) -> JsValue {
        match &self.last_summary {
            Some(summary) => serde_wasm_bindgen::to_value(summary).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
}

impl Default for BolBatch {
    fn default() -> Self {
        Self::new()
    }
}
