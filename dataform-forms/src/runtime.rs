//! Per-request form state and the submit/validate cycle.
//!
//! A runtime is created for one request, receives its definition once, may
//! receive a submission, and then evaluates it:
//!
//! ```text
//! unsubmitted ──submit──▶ submitted ──evaluate──▶ Invalid(errors) | Valid(data)
//!                             └──── cancel key ──▶ Cancelled
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::data::{SubmittedData, UploadedFiles, ValidationErrors};
use crate::definition::{FormDefinition, RuleKind};

/// HTTP method the form submits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Post,
    Get,
}

/// Construction options shared by every form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOptions {
    pub action: Option<String>,
    pub custom_data: Option<Value>,
    pub method: Method,
    pub target: String,
    pub attributes: Vec<(String, String)>,
    pub editable: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            action: None,
            custom_data: None,
            method: Method::Post,
            target: String::new(),
            attributes: Vec::new(),
            editable: true,
        }
    }
}

impl FormOptions {
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn custom_data(mut self, data: Value) -> Self {
        self.custom_data = Some(data);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

/// Result of evaluating a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    NotSubmitted,
    Cancelled,
    Invalid(ValidationErrors),
    Valid(SubmittedData),
}

/// Per-request form state.
#[derive(Debug, Default)]
pub struct FormRuntime {
    options: FormOptions,
    definition: Option<FormDefinition>,
    submitted: Option<SubmittedData>,
    files: UploadedFiles,
    errors: ValidationErrors,
}

impl FormRuntime {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    // --- Definition ---

    pub fn set_definition(&mut self, definition: FormDefinition) {
        debug!(elements = definition.elements().len(), "form defined");
        self.definition = Some(definition);
    }

    pub fn is_defined(&self) -> bool {
        self.definition.is_some()
    }

    pub fn definition(&self) -> Option<&FormDefinition> {
        self.definition.as_ref()
    }

    // --- Submission ---

    /// Record submitted values. Ignored when the form is not editable.
    pub fn submit(&mut self, data: SubmittedData) {
        self.submit_with_files(data, UploadedFiles::new());
    }

    /// Record submitted values together with the files posted with them.
    pub fn submit_with_files(&mut self, data: SubmittedData, files: UploadedFiles) {
        if !self.options.editable {
            debug!("ignoring submission to read-only form");
            return;
        }
        self.submitted = Some(data);
        self.files = files;
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.submitted
            .as_ref()
            .is_some_and(|d| d.contains_key("cancel"))
    }

    pub fn files(&self) -> &UploadedFiles {
        &self.files
    }

    /// Errors from the last recorded evaluation, for redisplay.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Values to show when the form is (re)displayed: definition defaults
    /// overlaid with submitted values.
    pub fn display_values(&self) -> SubmittedData {
        let mut values = SubmittedData::new();
        if let Some(def) = &self.definition {
            for element in def.elements() {
                if let Some(default) = def.default_value(&element.name) {
                    values.set(element.name.clone(), default.clone());
                }
            }
        }
        if let Some(submitted) = &self.submitted {
            for (k, v) in submitted.iter() {
                values.set(k.clone(), v.clone());
            }
        }
        values
    }

    // --- Validation ---

    /// Structural validation: every required element must carry a
    /// non-blank value. Returns an empty mapping when nothing fails.
    pub fn validation(&self, data: &SubmittedData, _files: &UploadedFiles) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let Some(def) = &self.definition else {
            return errors;
        };
        for rule in def.rules() {
            match rule.kind {
                RuleKind::Required => {
                    if is_blank(data.get(&rule.element)) && !errors.contains(&rule.element) {
                        let message = rule.message.clone().unwrap_or_else(|| "Required".into());
                        errors.insert(rule.element.clone(), message);
                    }
                }
            }
        }
        errors
    }

    /// Clean the submission and run `validator` over it.
    ///
    /// The validator receives the cleaned data and the uploaded files and
    /// returns the complete error mapping for the submission.
    pub fn evaluate<F>(&self, validator: F) -> FormOutcome
    where
        F: FnOnce(&SubmittedData, &UploadedFiles) -> ValidationErrors,
    {
        let Some(submitted) = &self.submitted else {
            return FormOutcome::NotSubmitted;
        };
        if self.is_cancelled() {
            return FormOutcome::Cancelled;
        }

        let data = self.clean(submitted);
        let errors = validator(&data, &self.files);
        if errors.is_empty() {
            FormOutcome::Valid(data)
        } else {
            debug!(errors = errors.len(), "submission rejected");
            FormOutcome::Invalid(errors)
        }
    }

    /// Store the outcome's errors and hand back the data when valid.
    pub fn record(&mut self, outcome: FormOutcome) -> Option<SubmittedData> {
        match outcome {
            FormOutcome::Valid(data) => {
                self.errors = ValidationErrors::new();
                Some(data)
            }
            FormOutcome::Invalid(errors) => {
                self.errors = errors;
                None
            }
            FormOutcome::NotSubmitted | FormOutcome::Cancelled => {
                self.errors = ValidationErrors::new();
                None
            }
        }
    }

    /// Apply declared parameter types. A select value that is not one of
    /// its options is dropped, as if it had never been submitted. Keys the
    /// definition does not know are kept as submitted.
    fn clean(&self, submitted: &SubmittedData) -> SubmittedData {
        let Some(def) = &self.definition else {
            return submitted.clone();
        };
        submitted
            .iter()
            .filter_map(|(k, v)| {
                let value = match def.select_values(k) {
                    Some(options) => match selected(&options, v) {
                        Some(value) => value,
                        None => {
                            debug!(element = %k, value = %v, "value is not a select option");
                            return None;
                        }
                    },
                    None => v.clone(),
                };
                let cleaned = match def.param_type(k) {
                    Some(param) => param.clean(&value),
                    None => value,
                };
                Some((k.clone(), cleaned))
            })
            .collect()
    }
}

/// The submitted select value restricted to the declared options. For a
/// multi-value submission only the matching entries are kept.
fn selected(options: &[&Value], value: &Value) -> Option<Value> {
    let is_option = |v: &Value| match option_key(v) {
        Some(key) => options
            .iter()
            .any(|o| option_key(o).as_deref() == Some(key.as_str())),
        None => false,
    };
    match value {
        Value::Array(items) => Some(Value::Array(
            items.iter().filter(|v| is_option(*v)).cloned().collect(),
        )),
        other if is_option(other) => Some(other.clone()),
        _ => None,
    }
}

/// Browsers post option values as strings; compare on their text form.
fn option_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        _ => false,
    }
}
