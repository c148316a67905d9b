//! Template loading

use crate::{BatchError, Result};
use std::fs;

/// Template used when no upload is provided
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/bill-of-lading-01.pdf";

/// Resolve the template to fill
///
/// A non-empty upload wins; otherwise the default template is read
/// from [`DEFAULT_TEMPLATE_PATH`] relative to the working directory.
pub fn load_template(upload: Option<&[u8]>) -> Result<Vec<u8>> {
    if let Some(data) = upload {
        if !data.is_empty() {
            return Ok(data.to_vec());
        }
    }
    fs::read(DEFAULT_TEMPLATE_PATH)
        .map_err(|e| BatchError::TemplateNotFound(format!("{DEFAULT_TEMPLATE_PATH}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_upload_wins_over_default() {
        let data = b"%PDF-1.5 upload".to_vec();
        let loaded = load_template(Some(&data)).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_empty_upload_falls_through_to_default() {
        // No template file ships with the crate, so the fall-through
        // surfaces as a missing default rather than an empty template.
        let result = load_template(Some(b""));
        assert!(matches!(result, Err(BatchError::TemplateNotFound(_))));
    }

    #[test]
    fn test_missing_default_is_reported_with_path() {
        let err = load_template(None).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_TEMPLATE_PATH));
        assert!(err.operator_message().contains(DEFAULT_TEMPLATE_PATH));
    }
}
