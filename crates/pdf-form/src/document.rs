//! PDF document wrapper and form field operations

use crate::strings::{decode_text_string, encode_text_string};
use crate::{FormError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::path::Path;

/// Where the first page keeps its annotation array
enum AnnotsSource {
    /// Stored directly in the page dictionary
    Page(ObjectId),
    /// Behind an indirect reference
    Indirect(ObjectId),
}

/// PDF document wrapper providing form field operations
///
/// The standard Bill of Lading is a one-page form, so all field
/// operations work on the first page's widget annotations.
pub struct FormDocument {
    /// The underlying lopdf document
    inner: Document,
}

impl FormDocument {
    /// Open a PDF document from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| FormError::OpenError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Open a PDF document from bytes
    ///
    /// # Arguments
    /// * `data` - PDF file bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| FormError::OpenError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Names of the fillable fields on the first page, sorted and
    /// deduplicated
    ///
    /// Widgets without a `/T` entry are skipped. A document without
    /// annotations yields an empty list.
    pub fn field_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();

        if let Ok(Some((_, entries))) = self.first_page_annots() {
            for entry in &entries {
                let dict = match self.resolve_annot_dict(entry) {
                    Some(dict) => dict,
                    None => continue,
                };
                if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
                    names.insert(decode_text_string(bytes));
                }
            }
        }

        names.into_iter().collect()
    }

    /// Current value (`/V`) of a named field, decoded
    ///
    /// Checkbox values come back as their state name ("Yes" or "Off").
    pub fn field_value(&self, name: &str) -> Option<String> {
        self.field_entry(name, b"V")
    }

    /// Current appearance state (`/AS`) of a named field
    pub fn field_appearance(&self, name: &str) -> Option<String> {
        self.field_entry(name, b"AS")
    }

    /// Set a text field's value
    ///
    /// Returns `Ok(false)` when no widget on the first page carries the
    /// name; unknown fields are not an error.
    pub fn set_text_field(&mut self, name: &str, value: &str) -> Result<bool> {
        self.set_field(name, encode_text_string(value), None)
    }

    /// Set a checkbox on or off
    ///
    /// Writes both the value (`/V`) and the appearance state (`/AS`).
    /// Returns `Ok(false)` when no widget carries the name.
    pub fn set_checkbox(&mut self, name: &str, checked: bool) -> Result<bool> {
        let state = if checked { "Yes" } else { "Off" };
        let state_name = Object::Name(state.as_bytes().to_vec());
        self.set_field(name, state_name.clone(), Some(state_name))
    }

    /// Ask viewers to regenerate field appearances on open
    ///
    /// Sets `NeedAppearances` on the document's AcroForm dictionary so
    /// filled values become visible without prebuilt appearance streams.
    /// Returns `Ok(false)` when the document has no AcroForm.
    pub fn set_needs_appearances(&mut self) -> Result<bool> {
        let catalog_id = self.catalog_id()?;
        let catalog_dict = self
            .inner
            .get_object(catalog_id)?
            .as_dict()
            .map_err(|_| FormError::ParseError("Catalog is not a dictionary".to_string()))?;

        match catalog_dict.get(b"AcroForm") {
            Ok(Object::Reference(form_id)) => {
                let form_id = *form_id;
                let form_dict = self
                    .inner
                    .get_object(form_id)?
                    .as_dict()
                    .map_err(|_| {
                        FormError::ParseError("AcroForm is not a dictionary".to_string())
                    })?;

                let mut new_form_dict = form_dict.clone();
                new_form_dict.set("NeedAppearances", Object::Boolean(true));
                self.inner.objects.insert(form_id, new_form_dict.into());
                Ok(true)
            }
            Ok(Object::Dictionary(form_dict)) => {
                let mut new_form_dict = form_dict.clone();
                new_form_dict.set("NeedAppearances", Object::Boolean(true));

                let mut new_catalog = catalog_dict.clone();
                new_catalog.set("AcroForm", Object::Dictionary(new_form_dict));
                self.inner.objects.insert(catalog_id, new_catalog.into());
                Ok(true)
            }
            Ok(_) => Err(FormError::ParseError(
                "AcroForm is not a dictionary".to_string(),
            )),
            Err(_) => Ok(false),
        }
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| FormError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Get a mutable reference to the underlying lopdf document
    pub fn inner_mut(&mut self) -> &mut Document {
        &mut self.inner
    }

    /// Catalog object id from the trailer
    fn catalog_id(&self) -> Result<ObjectId> {
        let root = self.inner.trailer.get(b"Root").map_err(|_| {
            FormError::ParseError("Document trailer missing Root entry".to_string())
        })?;
        root.as_reference()
            .map_err(|_| FormError::ParseError("Root is not a reference".to_string()))
    }

    /// Resolve the first page's annotation array, if any
    ///
    /// Handles both a direct array in the page dictionary and an
    /// indirect reference to one.
    fn first_page_annots(&self) -> Result<Option<(AnnotsSource, Vec<Object>)>> {
        let pages = self.inner.get_pages();
        let page_id = match pages.get(&1) {
            Some(id) => *id,
            None => return Ok(None),
        };

        let page_dict = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| FormError::ParseError("Page object is not a dictionary".to_string()))?;

        let annots = match page_dict.get(b"Annots") {
            Ok(annots) => annots,
            Err(_) => return Ok(None),
        };

        match annots {
            Object::Array(entries) => Ok(Some((AnnotsSource::Page(page_id), entries.clone()))),
            Object::Reference(ref_id) => {
                let entries = self
                    .inner
                    .get_object(*ref_id)?
                    .as_array()
                    .map_err(|_| {
                        FormError::ParseError("Annots reference is not an array".to_string())
                    })?
                    .clone();
                Ok(Some((AnnotsSource::Indirect(*ref_id), entries)))
            }
            _ => Err(FormError::ParseError("Annots is not an array".to_string())),
        }
    }

    /// Resolve one annotation entry to a dictionary
    fn resolve_annot_dict<'a>(&'a self, entry: &'a Object) -> Option<&'a Dictionary> {
        match entry {
            Object::Reference(id) => self
                .inner
                .get_object(*id)
                .and_then(|obj| obj.as_dict())
                .ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up an entry on the named field's widget dictionary
    fn field_entry(&self, name: &str, key: &[u8]) -> Option<String> {
        let (_, entries) = self.first_page_annots().ok()??;

        for entry in &entries {
            let dict = match self.resolve_annot_dict(entry) {
                Some(dict) => dict,
                None => continue,
            };
            if !annot_name_matches(dict, name) {
                continue;
            }
            return match dict.get(key) {
                Ok(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
                Ok(Object::Name(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            };
        }

        None
    }

    /// Write a value onto every first-page widget matching the name
    ///
    /// Referenced annotation dictionaries are replaced in the object
    /// table; inline dictionaries are rewritten within their array.
    /// Returns whether any widget matched.
    fn set_field(
        &mut self,
        name: &str,
        value: Object,
        appearance: Option<Object>,
    ) -> Result<bool> {
        let (source, entries) = match self.first_page_annots()? {
            Some(found) => found,
            None => return Ok(false),
        };

        let mut matched = false;
        let mut array_changed = false;
        let mut new_entries = Vec::with_capacity(entries.len());

        for entry in entries {
            match entry {
                Object::Reference(id) => {
                    let updated = match self.inner.get_object(id).and_then(|obj| obj.as_dict()) {
                        Ok(dict) if annot_name_matches(dict, name) => Some(dict.clone()),
                        _ => None,
                    };
                    if let Some(mut new_dict) = updated {
                        new_dict.set("V", value.clone());
                        if let Some(state) = &appearance {
                            new_dict.set("AS", state.clone());
                        }
                        self.inner.objects.insert(id, new_dict.into());
                        matched = true;
                    }
                    new_entries.push(Object::Reference(id));
                }
                Object::Dictionary(dict) => {
                    if annot_name_matches(&dict, name) {
                        let mut new_dict = dict;
                        new_dict.set("V", value.clone());
                        if let Some(state) = &appearance {
                            new_dict.set("AS", state.clone());
                        }
                        new_entries.push(Object::Dictionary(new_dict));
                        matched = true;
                        array_changed = true;
                    } else {
                        new_entries.push(Object::Dictionary(dict));
                    }
                }
                other => new_entries.push(other),
            }
        }

        if array_changed {
            match source {
                AnnotsSource::Page(page_id) => {
                    let mut new_page_dict = self
                        .inner
                        .get_object(page_id)?
                        .as_dict()
                        .map_err(|_| {
                            FormError::ParseError("Page object is not a dictionary".to_string())
                        })?
                        .clone();
                    new_page_dict.set("Annots", Object::Array(new_entries));
                    self.inner.objects.insert(page_id, new_page_dict.into());
                }
                AnnotsSource::Indirect(array_id) => {
                    self.inner.objects.insert(array_id, Object::Array(new_entries));
                }
            }
        }

        Ok(matched)
    }
}

/// Whether an annotation dictionary carries the given field name
fn annot_name_matches(dict: &Dictionary, name: &str) -> bool {
    matches!(dict.get(b"T"), Ok(Object::String(bytes, _)) if decode_text_string(bytes) == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    #[test]
    fn test_annot_name_matches() {
        let mut dict = Dictionary::new();
        dict.set(
            "T",
            Object::String(b"BOLnum".to_vec(), StringFormat::Literal),
        );
        assert!(annot_name_matches(&dict, "BOLnum"));
        assert!(!annot_name_matches(&dict, "FromName"));
    }

    #[test]
    fn test_annot_without_name_never_matches() {
        let dict = Dictionary::new();
        assert!(!annot_name_matches(&dict, "BOLnum"));
    }
}
