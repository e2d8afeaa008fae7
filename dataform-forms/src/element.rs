//! Form elements.
//!
//! Elements describe what a form contains, not how it renders. A renderer (or
//! a test) walks the ordered element list of a [`crate::FormDefinition`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single option in a select element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The kind of an element, with the data each kind needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ElementKind {
    /// Opens a collapsible section.
    Header,
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    Select {
        options: Vec<SelectOption>,
    },
    Submit,
    Cancel,
    /// Several elements laid out on one line.
    Group {
        elements: Vec<Element>,
        separator: String,
    },
}

/// A form element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Presentation hints such as `size`, `cols` and `rows`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            attributes: IndexMap::new(),
        }
    }

    pub fn header(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(ElementKind::Header, name, label)
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(ElementKind::Text, name, label)
    }

    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(ElementKind::Textarea, name, label)
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(ElementKind::Select { options }, name, label)
    }

    pub fn submit(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(ElementKind::Submit, name, label)
    }

    /// The cancel button is always named `cancel`; its presence in a
    /// submission means the user abandoned the form.
    pub fn cancel(label: impl Into<String>) -> Self {
        Self::new(ElementKind::Cancel, "cancel", label)
    }

    /// Add a presentation attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Child elements of a group; empty for every other kind.
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Group { elements, .. } => elements,
            _ => &[],
        }
    }

    /// Option values of a select element.
    pub fn option_values(&self) -> Vec<&Value> {
        match &self.kind {
            ElementKind::Select { options } => options.iter().map(|o| &o.value).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_are_kept_in_order() {
        let el = Element::textarea("label", "Template")
            .attr("cols", 60)
            .attr("rows", 5);
        let keys: Vec<_> = el.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cols", "rows"]);
        assert_eq!(el.attributes["rows"], json!(5));
    }

    #[test]
    fn group_children() {
        let group = Element::new(
            ElementKind::Group {
                elements: vec![Element::submit("submitbutton", "Save"), Element::cancel("Cancel")],
                separator: " ".into(),
            },
            "buttonar",
            "",
        );
        assert_eq!(group.children().len(), 2);
        assert_eq!(group.children()[1].name, "cancel");
        assert!(Element::text("name", "Name").children().is_empty());
    }

    #[test]
    fn select_option_values() {
        let el = Element::select(
            "visible",
            "Visible",
            vec![SelectOption::new(0, "None"), SelectOption::new(2, "All")],
        );
        assert_eq!(el.option_values(), vec![&json!(0), &json!(2)]);
        assert!(Element::header("general", "General").option_values().is_empty());
    }

    #[test]
    fn element_serializes_with_flattened_kind() {
        let el = Element::header("general", "General");
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value, json!({"name": "general", "label": "General", "kind": "header"}));
    }
}
