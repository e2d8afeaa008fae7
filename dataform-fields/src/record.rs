//! A stored field definition.
//!
//! The record is what a settings form edits: [`FieldRecord::form_defaults`]
//! pre-populates the form, and [`FieldRecord::apply_form_data`] copies a
//! validated submission back. Saving the record is up to the caller.

use dataform_forms::SubmittedData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{
    decode_default_content, default_content_form_values, DefaultContent, DEFAULT_CONTENT_SETTING,
};
use crate::error::{FieldsError, Result};
use crate::field::{DataformId, DefaultContentMode, EditableOverride, Field, FieldId, Visibility};

/// Names of the type-specific settings columns.
pub const PARAM_KEYS: [&str; 3] = ["param1", "param2", "param3"];

/// A field definition as stored by the dataform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    pub dataid: DataformId,
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub visible: Visibility,
    #[serde(default)]
    pub editable: EditableOverride,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub default_content_mode: DefaultContentMode,
    /// Encoded default content, see [`crate::content`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_content: Option<String>,
    /// Content slot names; empty means the single primary slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param3: Option<String>,
}

impl FieldRecord {
    /// A new, unsaved field of the given type.
    pub fn new(dataid: DataformId, type_: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            dataid,
            type_: type_.into(),
            name: name.into(),
            description: None,
            visible: Visibility::default(),
            editable: EditableOverride::default(),
            label: None,
            default_content_mode: DefaultContentMode::default(),
            default_content: None,
            content_names: Vec::new(),
            param1: None,
            param2: None,
            param3: None,
        }
    }

    pub fn with_id(mut self, id: FieldId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_content_names(mut self, names: Vec<String>) -> Self {
        self.content_names = names;
        self
    }

    /// Decoded default content, if any is stored.
    pub fn default_content(&self) -> Result<Option<DefaultContent>> {
        self.default_content
            .as_deref()
            .map(decode_default_content)
            .transpose()
    }

    fn param(&self, index: usize) -> Option<&String> {
        match index {
            0 => self.param1.as_ref(),
            1 => self.param2.as_ref(),
            _ => self.param3.as_ref(),
        }
    }

    fn param_mut(&mut self, index: usize) -> &mut Option<String> {
        match index {
            0 => &mut self.param1,
            1 => &mut self.param2,
            _ => &mut self.param3,
        }
    }

    /// Values that pre-populate the settings form for this record, including
    /// the decoded default content spread over its form keys.
    pub fn form_defaults(&self) -> Result<SubmittedData> {
        let mut data = SubmittedData::new()
            .with("name", self.name.clone())
            .with("description", self.description.clone().unwrap_or_default())
            .with("visible", self.visible.form_value())
            .with("editable", self.editable.form_value())
            .with("label", self.label.clone().unwrap_or_default())
            .with("defaultcontentmode", self.default_content_mode.form_value());

        for (i, key) in PARAM_KEYS.iter().enumerate() {
            if let Some(value) = self.param(i) {
                data.set(*key, value.clone());
            }
        }

        if let Some(content) = self.default_content()? {
            for (key, value) in default_content_form_values(&content).iter() {
                data.set(key.clone(), value.clone());
            }
        }

        Ok(data)
    }

    /// Copy a validated submission into the record.
    ///
    /// Settings absent from the submission keep their current value, except
    /// `defaultcontent`, which a settings form always sets.
    pub fn apply_form_data(&mut self, data: &SubmittedData) -> Result<()> {
        if let Some(name) = data.get_str("name") {
            self.name = name.to_string();
        }
        if self.name.trim().is_empty() {
            return Err(FieldsError::MissingSetting {
                field: "name".into(),
            });
        }
        if data.contains_key("description") {
            self.description = non_empty(data.get_str("description"));
        }
        if data.contains_key("label") {
            self.label = non_empty(data.get_str("label"));
        }
        if let Some(v) = option_value(data, "visible")? {
            self.visible = Visibility::from_form_value(v).ok_or_else(|| invalid("visible", v))?;
        }
        if let Some(v) = option_value(data, "editable")? {
            self.editable =
                EditableOverride::from_form_value(v).ok_or_else(|| invalid("editable", v))?;
        }
        if let Some(v) = option_value(data, "defaultcontentmode")? {
            self.default_content_mode = DefaultContentMode::from_form_value(v)
                .ok_or_else(|| invalid("defaultcontentmode", v))?;
        }
        if data.contains_key(DEFAULT_CONTENT_SETTING) {
            self.default_content = data.get_str(DEFAULT_CONTENT_SETTING).map(str::to_string);
        }
        for (i, key) in PARAM_KEYS.iter().enumerate() {
            if let Some(value) = data.get(key) {
                *self.param_mut(i) = param_string(value);
            }
        }
        Ok(())
    }
}

impl Field for FieldRecord {
    fn id(&self) -> Option<FieldId> {
        self.id
    }

    fn dataid(&self) -> DataformId {
        self.dataid
    }

    fn content_names(&self) -> Vec<String> {
        if self.content_names.is_empty() {
            vec![String::new()]
        } else {
            self.content_names.clone()
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

fn invalid(field: &str, value: impl ToString) -> FieldsError {
    FieldsError::InvalidOption {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Integer value of a select, if submitted.
fn option_value(data: &SubmittedData, key: &str) -> Result<Option<i64>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => data
            .get_i64(key)
            .map(Some)
            .ok_or_else(|| invalid(key, value)),
    }
}

fn param_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
