//! Number field: numeric content with a configurable number of decimals.

use std::sync::Arc;

use dataform_forms::{
    Element, FormDefinition, FormOptions, ParamType, SelectOption, SubmittedData,
    ValidationErrors,
};

use crate::content::CONTENT_DEFAULT_KEY;
use crate::field::Field;
use crate::form::{FieldFormBase, FieldFormServices, FieldSettingsForm};

/// Largest selectable number of decimal places.
pub const MAX_DECIMALS: i64 = 6;

pub struct NumberFieldForm {
    base: FieldFormBase,
}

impl NumberFieldForm {
    pub fn new(field: Arc<dyn Field>, services: FieldFormServices, options: FormOptions) -> Self {
        Self {
            base: FieldFormBase::new(field, services, options),
        }
    }
}

impl FieldSettingsForm for NumberFieldForm {
    fn base(&self) -> &FieldFormBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldFormBase {
        &mut self.base
    }

    fn field_definition(&self, mform: &mut FormDefinition) {
        let options = (0..=MAX_DECIMALS)
            .map(|n| SelectOption::new(n, n.to_string()))
            .collect();
        mform.add_element(Element::select(
            "param1",
            self.base.string("decimals", "dataform"),
            options,
        ));
        mform.set_default("param1", 0);
        mform.set_type("param1", ParamType::Int);
    }

    fn definition_default_content(&self, mform: &mut FormDefinition) {
        mform.add_element(
            Element::text(CONTENT_DEFAULT_KEY, self.base.string("defaultcontent", "dataform"))
                .attr("size", "16"),
        );
        mform.set_type(CONTENT_DEFAULT_KEY, ParamType::Text);
    }

    fn validation_default_content(&self, data: &SubmittedData, errors: &mut ValidationErrors) {
        let Some(value) = data.get_str(CONTENT_DEFAULT_KEY).map(str::trim) else {
            return;
        };
        if value.is_empty() {
            return;
        }
        if value.parse::<f64>().map_or(true, |n| !n.is_finite()) {
            errors.insert(
                CONTENT_DEFAULT_KEY,
                self.base.string("err_numeric", "dataform"),
            );
            return;
        }
        let decimals = data.get_i64("param1").unwrap_or(0).clamp(0, MAX_DECIMALS);
        if decimal_places(value) > decimals as usize {
            errors.insert(
                CONTENT_DEFAULT_KEY,
                self.base
                    .string_with("err_decimals", "dataform", &decimals.to_string()),
            );
        }
    }
}

/// Number of significant digits after the decimal point of a numeric
/// literal, with any exponent applied: `1.50` has one, `1.5e3` none and
/// `1e-7` seven.
fn decimal_places(value: &str) -> usize {
    let (mantissa, exponent) = match value.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().unwrap_or(0)),
        None => (value, 0),
    };
    let mantissa = mantissa.trim_start_matches(['+', '-']);
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{int}{frac}");

    let mut scale = frac.len() as i64 - exponent;
    for c in digits.chars().rev() {
        if c != '0' || scale <= 0 {
            break;
        }
        scale -= 1;
    }
    scale.max(0) as usize
}
