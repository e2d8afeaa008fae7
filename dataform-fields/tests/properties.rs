//! Property-based tests for default-content encoding and name uniqueness.

use std::collections::BTreeMap;
use std::sync::Arc;

use dataform_fields::{
    content_form_key, decode_default_content, FieldFormServices, FieldId, FieldRecord,
    FieldSettingsForm, InMemoryDataform, InMemoryRegistry, ItemScope, StandardFieldForm,
};
use dataform_forms::{FormOptions, SanitizeMode, SubmittedData, UploadedFiles};
use proptest::prelude::*;
use serde_json::{json, Value};

fn settings_form(dataform: InMemoryDataform, field: FieldRecord) -> StandardFieldForm {
    let services = FieldFormServices::new(
        Arc::new(InMemoryRegistry::new().with(dataform)),
        SanitizeMode::CleanHtml,
    );
    StandardFieldForm::new(Arc::new(field), services, FormOptions::default())
}

/// Content slot names mapped to the submitted default, `None` when the key
/// is not submitted at all. Values may be blank.
fn slots_strategy() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    prop::collection::btree_map(
        "[a-z]{0,6}",
        prop::option::of("[ a-zA-Z0-9]{0,8}"),
        1..6,
    )
}

/// Sibling field names keyed by id. A small alphabet makes collisions likely.
fn siblings_strategy() -> impl Strategy<Value = BTreeMap<FieldId, String>> {
    prop::collection::btree_map(1..20i64, "[AB][ab]{0,1}", 0..8)
}

proptest! {
    #[test]
    fn default_content_holds_exactly_the_non_empty_slots(slots in slots_strategy()) {
        let field = FieldRecord::new(1, "text", "Score")
            .with_id(5)
            .with_content_names(slots.keys().cloned().collect());
        let mut data = SubmittedData::new().with("name", "Score");
        for (name, value) in &slots {
            if let Some(value) = value {
                data.set(content_form_key(name), value.clone());
            }
        }

        let mut form = settings_form(InMemoryDataform::new(1), field);
        form.submit(data);
        let data = form.get_data().expect("valid submission");

        let expected: BTreeMap<String, Value> = slots
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name.clone(), json!(v)))
            })
            .collect();

        match data.get("defaultcontent") {
            Some(Value::String(encoded)) => {
                prop_assert!(!expected.is_empty());
                prop_assert_eq!(decode_default_content(encoded).unwrap(), expected);
            }
            Some(Value::Null) => prop_assert!(expected.is_empty()),
            other => prop_assert!(false, "unexpected defaultcontent {:?}", other),
        }
    }

    #[test]
    fn name_error_iff_a_sibling_uses_the_name(
        siblings in siblings_strategy(),
        own in prop::option::of(1..20i64),
        candidate in "[AB][ab]{0,1}",
    ) {
        let mut dataform = InMemoryDataform::new(1);
        for (id, name) in &siblings {
            dataform.insert(ItemScope::Fields, *id, name.clone());
        }
        let mut field = FieldRecord::new(1, "text", candidate.clone());
        field.id = own;

        let form = settings_form(dataform, field);
        let data = SubmittedData::new().with("name", candidate.clone());
        let errors = form.validation(&data, &UploadedFiles::new());

        let collides = siblings
            .iter()
            .any(|(id, name)| Some(*id) != own && *name == candidate);
        prop_assert_eq!(errors.contains("name"), collides);
    }
}
