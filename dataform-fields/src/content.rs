//! Default content: form keys and the stored encoding.
//!
//! Each content slot of a field has a form element named by
//! [`content_form_key`]: `contentdefault` for the primary (empty-named) slot,
//! `contentdefault_<name>` for the others.
//!
//! The non-empty defaults are stored in the `defaultcontent` setting as:
//!
//! 1. a JSON object mapping content name to submitted value, keys in sorted
//!    order,
//! 2. encoded as UTF-8,
//! 3. then standard base64 with padding.
//!
//! Any implementation that can parse JSON and base64 can read it.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use dataform_forms::SubmittedData;
use serde_json::Value;

use crate::error::Result;
use crate::field::Field;

/// Form key of the primary content slot.
pub const CONTENT_DEFAULT_KEY: &str = "contentdefault";

/// Setting that carries the encoded default content.
pub const DEFAULT_CONTENT_SETTING: &str = "defaultcontent";

/// Default values keyed by content name. Sorted, so encodings are canonical.
pub type DefaultContent = BTreeMap<String, Value>;

/// Form key for a content slot.
pub fn content_form_key(name: &str) -> String {
    if name.is_empty() {
        CONTENT_DEFAULT_KEY.to_string()
    } else {
        format!("{CONTENT_DEFAULT_KEY}_{name}")
    }
}

/// Collect the non-empty submitted defaults of every content slot.
///
/// Emptiness is decided by the field itself.
pub fn collect_default_content(field: &dyn Field, data: &SubmittedData) -> DefaultContent {
    let mut content = DefaultContent::new();
    for name in field.content_names() {
        let key = content_form_key(&name);
        if let Some(value) = data.get(&key) {
            if !field.content_is_empty(&key, value) {
                content.insert(name, value.clone());
            }
        }
    }
    content
}

/// Encode default content for storage.
pub fn encode_default_content(content: &DefaultContent) -> Result<String> {
    let json = serde_json::to_vec(content)?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Decode stored default content.
pub fn decode_default_content(encoded: &str) -> Result<DefaultContent> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Spread decoded default content back onto form keys.
pub fn default_content_form_values(content: &DefaultContent) -> SubmittedData {
    content
        .iter()
        .map(|(name, value)| (content_form_key(name), value.clone()))
        .collect()
}
