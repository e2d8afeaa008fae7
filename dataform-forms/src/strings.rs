//! Translated string lookup.

use std::collections::HashMap;

/// Resolves user-facing strings by key and component.
///
/// `arg` replaces the `{$a}` placeholder when the string has one.
pub trait StringCatalog: Send + Sync {
    fn get_string(&self, key: &str, component: &str, arg: Option<&str>) -> String;
}

/// Built-in English strings for the settings forms.
///
/// Unknown keys render as `[[key]]` so missing translations are visible
/// without breaking the form.
#[derive(Debug, Clone)]
pub struct DefaultStrings {
    strings: HashMap<(String, String), String>,
}

const ENGLISH: &[(&str, &str, &str)] = &[
    ("core", "name", "Name"),
    ("core", "description", "Description"),
    ("core", "visible", "Visible"),
    ("core", "yes", "Yes"),
    ("core", "no", "No"),
    ("core", "settings", "Settings"),
    ("core", "savechanges", "Save changes"),
    ("core", "cancel", "Cancel"),
    ("core", "required", "Required"),
    ("form", "general", "General"),
    ("dataform", "field", "field"),
    ("dataform", "fieldvisiblenone", "Managers only"),
    ("dataform", "fieldvisibleowner", "Owner and managers"),
    ("dataform", "fieldvisibleall", "Everyone"),
    ("dataform", "fieldeditable", "Editable"),
    ("dataform", "fieldtemplate", "Template"),
    ("dataform", "fielddefaultcontent", "Default content"),
    ("dataform", "fieldapplydefault", "Apply default"),
    ("dataform", "fielddefaultnew", "New entries only"),
    ("dataform", "fielddefaultany", "Any empty content"),
    ("dataform", "savecont", "Save and continue"),
    ("dataform", "invalidname", "This {$a} name is already in use"),
    ("dataform", "defaultcontent", "Default content"),
    ("dataform", "width", "Width"),
    ("dataform", "height", "Height"),
    ("dataform", "decimals", "Decimals"),
    ("dataform", "err_numeric", "You must enter a number here"),
    ("dataform", "err_decimals", "Too many decimal places (max {$a})"),
];

impl DefaultStrings {
    pub fn new() -> Self {
        let strings = ENGLISH
            .iter()
            .map(|(component, key, text)| {
                ((component.to_string(), key.to_string()), text.to_string())
            })
            .collect();
        Self { strings }
    }

    /// Add or replace a string.
    pub fn with(mut self, component: &str, key: &str, text: &str) -> Self {
        self.strings
            .insert((component.to_string(), key.to_string()), text.to_string());
        self
    }
}

impl Default for DefaultStrings {
    fn default() -> Self {
        Self::new()
    }
}

impl StringCatalog for DefaultStrings {
    fn get_string(&self, key: &str, component: &str, arg: Option<&str>) -> String {
        let component = if component.is_empty() { "core" } else { component };
        match self.strings.get(&(component.to_string(), key.to_string())) {
            Some(text) => match arg {
                Some(a) => text.replace("{$a}", a),
                None => text.clone(),
            },
            None => {
                tracing::trace!(key, component, "missing string");
                format!("[[{key}]]")
            }
        }
    }
}
