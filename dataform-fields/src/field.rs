//! The field seam and the fixed option sets of the general settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a field definition.
pub type FieldId = i64;

/// Identifier of the dataform (container) owning a field.
pub type DataformId = i64;

/// A field definition as seen by its settings form.
///
/// The form only reads from the field; persistence happens elsewhere after a
/// successful submission.
pub trait Field: Send + Sync {
    /// Identifier, or `None` when the field has not been saved yet.
    fn id(&self) -> Option<FieldId>;

    /// The dataform this field belongs to.
    fn dataid(&self) -> DataformId;

    /// Names of the content slots of this field, in order. The empty name is
    /// the field's primary slot.
    fn content_names(&self) -> Vec<String> {
        vec![String::new()]
    }

    /// Whether a submitted value for the content key `key` counts as empty.
    fn content_is_empty(&self, _key: &str, value: &Value) -> bool {
        is_empty_value(value)
    }
}

/// Null, blank strings, empty collections and `false` are empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

/// Who can see a field's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Managers only.
    None,
    /// The entry owner and managers.
    Owner,
    #[default]
    All,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::None, Visibility::Owner, Visibility::All];

    /// Value used by the `visible` select.
    pub fn form_value(self) -> i64 {
        match self {
            Visibility::None => 0,
            Visibility::Owner => 1,
            Visibility::All => 2,
        }
    }

    pub fn from_form_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.form_value() == value)
    }

    /// String key of the option label.
    pub fn label_key(self) -> &'static str {
        match self {
            Visibility::None => "fieldvisiblenone",
            Visibility::Owner => "fieldvisibleowner",
            Visibility::All => "fieldvisibleall",
        }
    }
}

/// Per-field override of entry editability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditableOverride {
    /// Follow the entry's own editability.
    #[default]
    Inherit,
    /// Never editable.
    No,
}

impl EditableOverride {
    /// Value used by the `editable` select.
    pub fn form_value(self) -> i64 {
        match self {
            EditableOverride::Inherit => -1,
            EditableOverride::No => 0,
        }
    }

    pub fn from_form_value(value: i64) -> Option<Self> {
        match value {
            -1 => Some(EditableOverride::Inherit),
            0 => Some(EditableOverride::No),
            _ => None,
        }
    }
}

/// When stored default content is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultContentMode {
    /// Only when an entry is created.
    #[default]
    NewOnly,
    /// Whenever the content is empty.
    AnyEmpty,
}

impl DefaultContentMode {
    /// Value used by the `defaultcontentmode` select.
    pub fn form_value(self) -> i64 {
        match self {
            DefaultContentMode::NewOnly => 0,
            DefaultContentMode::AnyEmpty => 1,
        }
    }

    pub fn from_form_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(DefaultContentMode::NewOnly),
            1 => Some(DefaultContentMode::AnyEmpty),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            DefaultContentMode::NewOnly => "fielddefaultnew",
            DefaultContentMode::AnyEmpty => "fielddefaultany",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    struct Bare;

    impl Field for Bare {
        fn id(&self) -> Option<FieldId> {
            None
        }
        fn dataid(&self) -> DataformId {
            1
        }
    }

    #[test]
    fn default_content_names_is_primary_slot() {
        assert_eq!(Bare.content_names(), vec![String::new()]);
    }

    #[rstest]
    #[case(json!(null), true)]
    #[case(json!(""), true)]
    #[case(json!("  "), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    #[case(json!(false), true)]
    #[case(json!("0"), false)]
    #[case(json!(0), false)]
    #[case(json!("hello"), false)]
    #[case(json!(["a"]), false)]
    fn default_emptiness(#[case] value: Value, #[case] empty: bool) {
        assert_eq!(Bare.content_is_empty("contentdefault", &value), empty);
    }

    #[test]
    fn visibility_form_values_round_trip() {
        for v in Visibility::ALL {
            assert_eq!(Visibility::from_form_value(v.form_value()), Some(v));
        }
        assert_eq!(Visibility::from_form_value(3), None);
        assert_eq!(Visibility::default(), Visibility::All);
    }

    #[test]
    fn editable_override_values() {
        assert_eq!(EditableOverride::default().form_value(), -1);
        assert_eq!(EditableOverride::from_form_value(0), Some(EditableOverride::No));
        assert_eq!(EditableOverride::from_form_value(1), None);
    }

    #[test]
    fn default_content_mode_values() {
        assert_eq!(
            DefaultContentMode::from_form_value(1),
            Some(DefaultContentMode::AnyEmpty)
        );
        assert_eq!(DefaultContentMode::NewOnly.label_key(), "fielddefaultnew");
        assert_eq!(DefaultContentMode::from_form_value(2), None);
    }
}
