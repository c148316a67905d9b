//! Column-to-field mapping for the standard Bill of Lading form
//!
//! The form carries a block of header fields plus two repeating
//! tables of eight rows each. Spreadsheet columns are named after the
//! form fields, so the standard mapping is an identity over the full
//! field list.

use std::collections::HashSet;

/// Rows in each of the form's repeating tables
pub const GROUP_ROWS: usize = 8;

/// Header fields that map one-to-one
const BASE_FIELDS: [&str; 26] = [
    "BOLnum",
    "FromName",
    "FromAddr",
    "FromCityStateZip",
    "FromSIDNum",
    "FromFOB",
    "ToName",
    "ToAddress",
    "ToCityStateZip",
    "ToLocNum",
    "ToCID",
    "ToFOB",
    "CarrierName",
    "SCAC",
    "PRO",
    "TrailerNum",
    "SealNum",
    "BillName",
    "BillAddress",
    "BillCityStateZip",
    "BillInstructions",
    "PrePaid",
    "Collect",
    "3rdParty",
    "MasterBOL",
    "Date",
];

/// Per-row field prefixes of the customer order table
const ORDER_PREFIXES: [&str; 5] = ["OrderNum", "NumPkgs", "Weight", "Pallet", "AddInfo"];

/// Per-row field prefixes of the carrier freight table
const FREIGHT_PREFIXES: [&str; 9] = [
    "HU_QTY_", "HU_Type_", "Pkg_QTY_", "Pkg_Type_", "WT_", "HM_", "Desc_", "NMFC", "Class",
];

/// Fields filled as checkboxes rather than text
const CHECKBOX_FIELDS: [&str; 14] = [
    "FromFOB", "ToFOB", "PrePaid", "Collect", "3rdParty", "MasterBOL", "Pallet1", "Pallet2",
    "Pallet3", "Pallet4", "Pallet5", "Pallet6", "Pallet7", "Pallet8",
];

/// Cell values that tick a checkbox, compared case-insensitively
const TRUTHY_TOKENS: [&str; 6] = ["y", "yes", "true", "1", "\u{2714}", "\u{2713}"];

/// Ordered mapping from spreadsheet columns to form field names
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// `(column, field)` pairs in fill order
    entries: Vec<(String, String)>,
    /// Fields that take a checkbox state instead of text
    checkboxes: HashSet<String>,
}

impl FieldMapping {
    /// Mapping for the standard Bill of Lading form
    ///
    /// Header fields first, then the order table rows, then the
    /// freight table rows. Columns and fields share their names.
    pub fn standard() -> Self {
        let mut entries = Vec::new();

        for name in BASE_FIELDS {
            entries.push((name.to_string(), name.to_string()));
        }
        for i in 1..=GROUP_ROWS {
            for prefix in ORDER_PREFIXES {
                let name = format!("{prefix}{i}");
                entries.push((name.clone(), name));
            }
        }
        for i in 1..=GROUP_ROWS {
            for prefix in FREIGHT_PREFIXES {
                let name = format!("{prefix}{i}");
                entries.push((name.clone(), name));
            }
        }

        let checkboxes = CHECKBOX_FIELDS.iter().map(|s| s.to_string()).collect();
        Self {
            entries,
            checkboxes,
        }
    }

    /// `(column, field)` pairs in fill order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Whether the field is filled as a checkbox
    pub fn is_checkbox(&self, field: &str) -> bool {
        self.checkboxes.contains(field)
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a cell value ticks a checkbox
///
/// Matches `y`, `yes`, `true`, `1` and the check mark characters,
/// ignoring case and surrounding whitespace. Everything else,
/// including an empty value, leaves the box unticked.
pub fn is_truthy(value: &str) -> bool {
    let token = value.trim().to_lowercase();
    TRUTHY_TOKENS.contains(&token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_mapping_size() {
        let mapping = FieldMapping::standard();
        assert_eq!(mapping.len(), 138);
        assert!(!mapping.is_empty());
    }

    #[test]
    fn test_mapping_is_identity() {
        let mapping = FieldMapping::standard();
        for (column, field) in mapping.entries() {
            assert_eq!(column, field);
        }
    }

    #[test]
    fn test_numbered_groups_present() {
        let mapping = FieldMapping::standard();
        let fields: Vec<&str> = mapping
            .entries()
            .iter()
            .map(|(_, field)| field.as_str())
            .collect();

        assert!(fields.contains(&"OrderNum1"));
        assert!(fields.contains(&"AddInfo8"));
        assert!(fields.contains(&"Pallet4"));
        assert!(fields.contains(&"HU_QTY_3"));
        assert!(fields.contains(&"WT_1"));
        assert!(fields.contains(&"Desc_5"));
        assert!(fields.contains(&"NMFC8"));
        assert!(fields.contains(&"Class8"));
        assert!(!fields.contains(&"OrderNum9"));
        assert!(!fields.contains(&"OrderNum0"));
    }

    #[test]
    fn test_checkbox_membership() {
        let mapping = FieldMapping::standard();
        for field in [
            "FromFOB",
            "ToFOB",
            "PrePaid",
            "Collect",
            "3rdParty",
            "MasterBOL",
            "Pallet1",
            "Pallet8",
        ] {
            assert!(mapping.is_checkbox(field), "{field} should be a checkbox");
        }
        for field in ["BOLnum", "Date", "Weight3", "HM_2", "NumPkgs1"] {
            assert!(!mapping.is_checkbox(field), "{field} should be text");
        }
    }

    #[test]
    fn test_truthy_vocabulary() {
        for value in ["y", "Y", "yes", "YES", "true", "True", "1", "\u{2714}", "\u{2713}"] {
            assert!(is_truthy(value), "{value:?} should tick the box");
        }
        for value in ["", "n", "no", "false", "0", "2", "on", "checked"] {
            assert!(!is_truthy(value), "{value:?} should not tick the box");
        }
    }

    #[test]
    fn test_truthy_trims_whitespace() {
        assert!(is_truthy(" yes "));
        assert!(is_truthy("\t1\n"));
        assert!(!is_truthy("  "));
    }

    #[test]
    fn test_unique_columns() {
        let mapping = FieldMapping::standard();
        let unique: HashSet<&str> = mapping
            .entries()
            .iter()
            .map(|(column, _)| column.as_str())
            .collect();
        assert_eq!(unique.len(), mapping.len());
    }
}
