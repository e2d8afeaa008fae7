//! The settings form shared by every field type.
//!
//! The form is assembled from four sections in a fixed order, framed by a
//! button row at the top and the bottom:
//!
//! ```text
//! buttons | general | settings (field_definition) |
//!         defaults (definition_default_settings, definition_default_content) | buttons
//! ```
//!
//! Field types implement [`FieldSettingsForm`] and override the hook methods
//! they need. The provided methods carry the shared behavior: building the
//! definition, encoding default content into submitted data, and checking
//! name uniqueness within the dataform.

use std::sync::Arc;

use dataform_forms::{
    Element, ElementKind, FormDefinition, FormOptions, FormRuntime, FormsConfig, ParamType,
    RuleKind, RuleSide, SanitizeMode, SelectOption, StringCatalog, SubmittedData, UploadedFiles,
    ValidationErrors,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::{collect_default_content, encode_default_content, DEFAULT_CONTENT_SETTING};
use crate::dataform::{DataformRegistry, ItemScope};
use crate::field::{DefaultContentMode, EditableOverride, Field, Visibility};

/// Name of the button row group.
pub const BUTTON_GROUP: &str = "buttonar";

/// Services a settings form depends on, injected at construction.
#[derive(Clone)]
pub struct FieldFormServices {
    pub strings: Arc<dyn StringCatalog>,
    pub dataforms: Arc<dyn DataformRegistry>,
    /// Cleaning applied to name, description and label.
    pub sanitize: SanitizeMode,
}

impl FieldFormServices {
    /// Services with the built-in English strings.
    pub fn new(dataforms: Arc<dyn DataformRegistry>, sanitize: SanitizeMode) -> Self {
        Self {
            strings: Arc::new(dataform_forms::DefaultStrings::new()),
            dataforms,
            sanitize,
        }
    }

    /// Services whose sanitize mode comes from site configuration.
    pub fn from_config(dataforms: Arc<dyn DataformRegistry>, config: &FormsConfig) -> Self {
        Self::new(dataforms, config.sanitize_mode())
    }

    pub fn with_strings(mut self, strings: Arc<dyn StringCatalog>) -> Self {
        self.strings = strings;
        self
    }
}

/// State every settings form owns: the field being configured, the
/// injected services and the per-request form runtime.
pub struct FieldFormBase {
    field: Arc<dyn Field>,
    services: FieldFormServices,
    runtime: FormRuntime,
}

impl FieldFormBase {
    pub fn new(field: Arc<dyn Field>, services: FieldFormServices, options: FormOptions) -> Self {
        Self {
            field,
            services,
            runtime: FormRuntime::new(options),
        }
    }

    pub fn field(&self) -> &dyn Field {
        self.field.as_ref()
    }

    pub fn services(&self) -> &FieldFormServices {
        &self.services
    }

    pub fn runtime(&self) -> &FormRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut FormRuntime {
        &mut self.runtime
    }

    /// Look up a translated string.
    pub fn string(&self, key: &str, component: &str) -> String {
        self.services.strings.get_string(key, component, None)
    }

    /// Look up a translated string with a `{$a}` argument.
    pub fn string_with(&self, key: &str, component: &str, arg: &str) -> String {
        self.services.strings.get_string(key, component, Some(arg))
    }
}

/// A field type's settings form.
///
/// Implementors provide access to their [`FieldFormBase`] and override hooks:
///
/// - [`field_definition`](Self::field_definition): type-specific settings
/// - [`definition_default_settings`](Self::definition_default_settings):
///   default-content mode selector
/// - [`definition_default_content`](Self::definition_default_content):
///   default-content inputs
/// - [`validation_default_content`](Self::validation_default_content):
///   checks on submitted defaults
pub trait FieldSettingsForm {
    fn base(&self) -> &FieldFormBase;

    fn base_mut(&mut self) -> &mut FieldFormBase;

    /// Build the whole form.
    fn definition(&self, mform: &mut FormDefinition) {
        // The button row is repeated at the bottom for long forms.
        self.add_action_buttons(mform, true, None);
        self.definition_general(mform);
        self.definition_settings(mform);
        self.definition_defaults(mform);
        self.add_action_buttons(mform, true, None);
    }

    /// General section: name, description, visibility, editability, template.
    fn definition_general(&self, mform: &mut FormDefinition) {
        let base = self.base();

        mform.add_element(Element::header("general", base.string("general", "form")));

        mform.add_element(Element::text("name", base.string("name", "core")).attr("size", "32"));
        mform.add_rule_with_message(
            "name",
            RuleKind::Required,
            RuleSide::Client,
            base.string("required", "core"),
        );

        mform.add_element(
            Element::text("description", base.string("description", "core")).attr("size", "64"),
        );

        let options = Visibility::ALL
            .into_iter()
            .map(|v| SelectOption::new(v.form_value(), base.string(v.label_key(), "dataform")))
            .collect();
        mform.add_element(Element::select(
            "visible",
            base.string("visible", "core"),
            options,
        ));
        mform.set_default("visible", Visibility::All.form_value());
        mform.set_type("visible", ParamType::Int);

        let options = vec![
            SelectOption::new(
                EditableOverride::Inherit.form_value(),
                base.string("yes", "core"),
            ),
            SelectOption::new(EditableOverride::No.form_value(), base.string("no", "core")),
        ];
        mform.add_element(Element::select(
            "editable",
            base.string("fieldeditable", "dataform"),
            options,
        ));
        mform.set_default("editable", EditableOverride::Inherit.form_value());
        mform.set_type("editable", ParamType::Int);

        mform.add_element(
            Element::textarea("label", base.string("fieldtemplate", "dataform"))
                .attr("cols", 60)
                .attr("rows", 5),
        );
        mform.add_help_button("label", "fieldtemplate", "dataform");

        let text_type = base.services().sanitize.param_type();
        for name in ["name", "description", "label"] {
            mform.set_type(name, text_type);
        }
    }

    /// Settings section: a header followed by [`field_definition`](Self::field_definition).
    fn definition_settings(&self, mform: &mut FormDefinition) {
        mform.add_element(Element::header(
            "settingshdr",
            self.base().string("settings", "core"),
        ));
        mform.set_expanded("settingshdr");
        self.field_definition(mform);
    }

    /// Type-specific settings. Runs inside the settings section, so it
    /// should not open a header of its own.
    fn field_definition(&self, _mform: &mut FormDefinition) {}

    /// Default content section: a header, then the mode selector and the
    /// default-content inputs.
    fn definition_defaults(&self, mform: &mut FormDefinition) {
        mform.add_element(Element::header(
            "defaultcontenthdr",
            self.base().string("fielddefaultcontent", "dataform"),
        ));
        mform.set_expanded("defaultcontenthdr");
        self.definition_default_settings(mform);
        self.definition_default_content(mform);
    }

    /// Default-content mode: new entries only, or any empty content.
    fn definition_default_settings(&self, mform: &mut FormDefinition) {
        let base = self.base();
        let options = [DefaultContentMode::NewOnly, DefaultContentMode::AnyEmpty]
            .into_iter()
            .map(|m| SelectOption::new(m.form_value(), base.string(m.label_key(), "dataform")))
            .collect();
        mform.add_element(Element::select(
            "defaultcontentmode",
            base.string("fieldapplydefault", "dataform"),
            options,
        ));
        mform.set_type("defaultcontentmode", ParamType::Int);
    }

    /// Default-content inputs, named by [`crate::content_form_key`]. Field
    /// types whose entries have editable content override this.
    fn definition_default_content(&self, _mform: &mut FormDefinition) {}

    /// The button row: save and display, save and continue, cancel.
    ///
    /// Always the same three buttons; `cancel` and `submit` are accepted for
    /// signature compatibility and ignored.
    fn add_action_buttons(&self, mform: &mut FormDefinition, _cancel: bool, _submit: Option<&str>) {
        let base = self.base();
        let buttons = vec![
            mform.create_element(
                ElementKind::Submit,
                "submitbutton",
                base.string("savechanges", "core"),
            ),
            mform.create_element(
                ElementKind::Submit,
                "submitbutton",
                base.string("savecont", "dataform"),
            ),
            Element::cancel(base.string("cancel", "core")),
        ];
        mform.add_group(buttons, BUTTON_GROUP, "", " ");
        mform.close_header_before(BUTTON_GROUP);
    }

    /// Build the definition and hand it to the runtime.
    fn define(&mut self) {
        let mut mform = FormDefinition::new();
        self.definition(&mut mform);
        debug!(
            field = ?self.base().field().id(),
            elements = mform.elements().len(),
            "field settings form defined"
        );
        self.base_mut().runtime_mut().set_definition(mform);
    }

    /// Record a submission, defining the form first if needed.
    fn submit(&mut self, data: SubmittedData) {
        if !self.base().runtime().is_defined() {
            self.define();
        }
        self.base_mut().runtime_mut().submit(data);
    }

    /// Validated submission with default content encoded, or `None` when the
    /// form was not submitted, was cancelled or failed validation.
    fn get_data(&mut self) -> Option<SubmittedData> {
        if !self.base().runtime().is_defined() {
            self.define();
        }
        let outcome = self
            .base()
            .runtime()
            .evaluate(|data, files| self.validation(data, files));
        let data = self.base_mut().runtime_mut().record(outcome)?;
        Some(self.get_data_default_content(data))
    }

    /// Fold the submitted `contentdefault*` values into the encoded
    /// `defaultcontent` setting. Null when no slot has a default.
    fn get_data_default_content(&self, mut data: SubmittedData) -> SubmittedData {
        let content = collect_default_content(self.base().field(), &data);
        if content.is_empty() {
            data.set(DEFAULT_CONTENT_SETTING, Value::Null);
            return data;
        }
        match encode_default_content(&content) {
            Ok(encoded) => {
                debug!(slots = content.len(), "encoded default content");
                data.set(DEFAULT_CONTENT_SETTING, encoded);
            }
            Err(e) => {
                warn!(%e, "could not encode default content");
                data.set(DEFAULT_CONTENT_SETTING, Value::Null);
            }
        }
        data
    }

    /// Checks on submitted default content. Add messages to `errors` keyed
    /// by element name.
    fn validation_default_content(&self, _data: &SubmittedData, _errors: &mut ValidationErrors) {}

    /// Structural checks, name uniqueness, then default-content checks.
    fn validation(&self, data: &SubmittedData, files: &UploadedFiles) -> ValidationErrors {
        let base = self.base();
        let mut errors = base.runtime().validation(data, files);
        let field = base.field();

        if let Some(name) = data.get_str("name") {
            match base.services().dataforms.instance(field.dataid()) {
                Some(df) => {
                    if df.name_exists(ItemScope::Fields, name, field.id()) {
                        let what = base.string("field", "dataform");
                        errors.insert("name", base.string_with("invalidname", "dataform", &what));
                    }
                }
                None => {
                    warn!(
                        dataform = field.dataid(),
                        "dataform not found, skipping name check"
                    );
                }
            }
        }

        self.validation_default_content(data, &mut errors);

        errors
    }
}

/// Settings form with no type-specific settings or default content inputs.
pub struct StandardFieldForm {
    base: FieldFormBase,
}

impl StandardFieldForm {
    pub fn new(field: Arc<dyn Field>, services: FieldFormServices, options: FormOptions) -> Self {
        Self {
            base: FieldFormBase::new(field, services, options),
        }
    }
}

impl FieldSettingsForm for StandardFieldForm {
    fn base(&self) -> &FieldFormBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldFormBase {
        &mut self.base
    }
}
