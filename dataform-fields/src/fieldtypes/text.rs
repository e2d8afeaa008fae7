//! Text field: a single-line input with optional width and height.

use std::sync::Arc;

use dataform_forms::{Element, FormDefinition, FormOptions, ParamType};

use crate::content::CONTENT_DEFAULT_KEY;
use crate::field::Field;
use crate::form::{FieldFormBase, FieldFormServices, FieldSettingsForm};

pub struct TextFieldForm {
    base: FieldFormBase,
}

impl TextFieldForm {
    pub fn new(field: Arc<dyn Field>, services: FieldFormServices, options: FormOptions) -> Self {
        Self {
            base: FieldFormBase::new(field, services, options),
        }
    }
}

impl FieldSettingsForm for TextFieldForm {
    fn base(&self) -> &FieldFormBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldFormBase {
        &mut self.base
    }

    fn field_definition(&self, mform: &mut FormDefinition) {
        // Width
        mform.add_element(
            Element::text("param1", self.base.string("width", "dataform")).attr("size", "8"),
        );
        mform.set_type("param1", ParamType::Int);

        // Height
        mform.add_element(
            Element::text("param2", self.base.string("height", "dataform")).attr("size", "8"),
        );
        mform.set_type("param2", ParamType::Int);
    }

    fn definition_default_content(&self, mform: &mut FormDefinition) {
        mform.add_element(Element::text(
            CONTENT_DEFAULT_KEY,
            self.base.string("defaultcontent", "dataform"),
        ));
        mform.set_type(CONTENT_DEFAULT_KEY, self.base.services().sanitize.param_type());
    }
}
