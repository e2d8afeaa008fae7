//! The ordered description of a form.
//!
//! Forms populate a definition once per request by registering elements,
//! rules, sanitization directives and defaults. The runtime then uses it to
//! clean and check submissions.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::element::{Element, ElementKind};
use crate::sanitize::ParamType;

/// Kind of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// The element must carry a non-blank value.
    Required,
}

/// Where a rule is declared to run. Client rules are enforced on the server
/// as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSide {
    Client,
    Server,
}

/// A rule attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub element: String,
    pub kind: RuleKind,
    pub side: RuleSide,
    /// Custom message; the runtime falls back to its own when absent.
    pub message: Option<String>,
}

/// A contextual help reference attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpButton {
    pub identifier: String,
    pub component: String,
}

/// Ordered form description.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    elements: Vec<Element>,
    rules: Vec<Rule>,
    types: HashMap<String, ParamType>,
    defaults: HashMap<String, Value>,
    expanded: HashSet<String>,
    help: HashMap<String, HelpButton>,
    closed_headers: Vec<String>,
}

impl FormDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an element without registering it, e.g. as part of a group.
    pub fn create_element(
        &self,
        kind: ElementKind,
        name: impl Into<String>,
        label: impl Into<String>,
    ) -> Element {
        Element::new(kind, name, label)
    }

    /// Register an element at the end of the form.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Register several elements on one line under a group name.
    ///
    /// Registering the same group name more than once keeps every copy.
    pub fn add_group(
        &mut self,
        elements: Vec<Element>,
        name: impl Into<String>,
        label: impl Into<String>,
        separator: impl Into<String>,
    ) {
        self.elements.push(Element::new(
            ElementKind::Group {
                elements,
                separator: separator.into(),
            },
            name,
            label,
        ));
    }

    pub fn add_rule(&mut self, element: impl Into<String>, kind: RuleKind, side: RuleSide) {
        self.rules.push(Rule {
            element: element.into(),
            kind,
            side,
            message: None,
        });
    }

    /// Register a rule with its own message.
    pub fn add_rule_with_message(
        &mut self,
        element: impl Into<String>,
        kind: RuleKind,
        side: RuleSide,
        message: impl Into<String>,
    ) {
        self.rules.push(Rule {
            element: element.into(),
            kind,
            side,
            message: Some(message.into()),
        });
    }

    pub fn set_type(&mut self, element: impl Into<String>, param: ParamType) {
        self.types.insert(element.into(), param);
    }

    pub fn set_default(&mut self, element: impl Into<String>, value: impl Into<Value>) {
        self.defaults.insert(element.into(), value.into());
    }

    /// Mark a header as expanded when the form first renders.
    pub fn set_expanded(&mut self, header: impl Into<String>) {
        self.expanded.insert(header.into());
    }

    pub fn add_help_button(
        &mut self,
        element: impl Into<String>,
        identifier: impl Into<String>,
        component: impl Into<String>,
    ) {
        self.help.insert(
            element.into(),
            HelpButton {
                identifier: identifier.into(),
                component: component.into(),
            },
        );
    }

    /// Suppress the header separator that would precede `element`.
    pub fn close_header_before(&mut self, element: impl Into<String>) {
        let element = element.into();
        if !self.closed_headers.contains(&element) {
            self.closed_headers.push(element);
        }
    }

    // --- Lookup ---

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First top-level element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Every top-level element with the given name, in form order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.name == name)
    }

    /// Whether an element of this name exists at the top level or inside a group.
    pub fn contains(&self, name: &str) -> bool {
        self.elements
            .iter()
            .any(|e| e.name == name || e.children().iter().any(|c| c.name == name))
    }

    /// Option values of a top-level select, or `None` when `element` is not
    /// a select.
    pub fn select_values(&self, element: &str) -> Option<Vec<&Value>> {
        self.element(element)
            .filter(|e| matches!(e.kind, ElementKind::Select { .. }))
            .map(Element::option_values)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_for<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.element == element)
    }

    pub fn param_type(&self, element: &str) -> Option<ParamType> {
        self.types.get(element).copied()
    }

    pub fn default_value(&self, element: &str) -> Option<&Value> {
        self.defaults.get(element)
    }

    pub fn is_expanded(&self, header: &str) -> bool {
        self.expanded.contains(header)
    }

    pub fn help_button(&self, element: &str) -> Option<&HelpButton> {
        self.help.get(element)
    }

    pub fn is_header_closed_before(&self, element: &str) -> bool {
        self.closed_headers.iter().any(|e| e == element)
    }

    /// Names of the header elements in form order.
    pub fn headers(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Header))
            .map(|e| e.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::SelectOption;
    use serde_json::json;

    #[test]
    fn elements_keep_registration_order() {
        let mut def = FormDefinition::new();
        def.add_element(Element::header("general", "General"));
        def.add_element(Element::text("name", "Name"));
        def.add_element(Element::header("settingshdr", "Settings"));

        let names: Vec<_> = def.elements().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["general", "name", "settingshdr"]);
        assert_eq!(def.headers(), vec!["general", "settingshdr"]);
    }

    #[test]
    fn duplicate_group_names_are_kept() {
        let mut def = FormDefinition::new();
        for _ in 0..2 {
            let buttons = vec![def.create_element(ElementKind::Submit, "submitbutton", "Save")];
            def.add_group(buttons, "buttonar", "", " ");
        }
        assert_eq!(def.elements_named("buttonar").count(), 2);
        assert!(def.contains("submitbutton"));
    }

    #[test]
    fn rules_types_and_defaults() {
        let mut def = FormDefinition::new();
        def.add_element(Element::text("name", "Name"));
        def.add_rule("name", RuleKind::Required, RuleSide::Client);
        def.set_type("name", ParamType::Text);
        def.set_default("visible", 2);

        assert_eq!(def.rules_for("name").count(), 1);
        assert_eq!(def.rules_for("description").count(), 0);
        assert_eq!(def.param_type("name"), Some(ParamType::Text));
        assert_eq!(def.param_type("label"), None);
        assert_eq!(def.default_value("visible"), Some(&json!(2)));
    }

    #[test]
    fn select_values_only_for_selects() {
        let mut def = FormDefinition::new();
        def.add_element(Element::text("name", "Name"));
        def.add_element(Element::select(
            "editable",
            "Editable",
            vec![SelectOption::new(-1, "Yes"), SelectOption::new(0, "No")],
        ));

        assert_eq!(def.select_values("editable"), Some(vec![&json!(-1), &json!(0)]));
        assert_eq!(def.select_values("name"), None);
        assert_eq!(def.select_values("missing"), None);
    }

    #[test]
    fn expanded_help_and_closed_headers() {
        let mut def = FormDefinition::new();
        def.set_expanded("settingshdr");
        def.add_help_button("label", "fieldtemplate", "dataform");
        def.close_header_before("buttonar");
        def.close_header_before("buttonar");

        assert!(def.is_expanded("settingshdr"));
        assert!(!def.is_expanded("general"));
        assert_eq!(
            def.help_button("label").map(|h| h.identifier.as_str()),
            Some("fieldtemplate")
        );
        assert!(def.is_header_closed_before("buttonar"));
        assert!(!def.is_header_closed_before("name"));
    }
}
