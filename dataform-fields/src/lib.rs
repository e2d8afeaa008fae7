//! Field settings forms for Dataform field types
//!
//! `dataform-fields` builds and validates the settings form every field type
//! shares, and lets each type extend it through hook methods.
//!
//! # Architecture
//!
//! - **Template form**: [`FieldSettingsForm`] assembles general, settings and
//!   default-content sections in a fixed order; field types override hooks
//! - **Read-only field**: the form reads a [`Field`] and never saves it;
//!   callers apply the returned data (e.g. with [`FieldRecord::apply_form_data`])
//! - **Name scoping**: names are unique among the fields of one dataform,
//!   resolved through a [`DataformRegistry`]
//! - **Portable defaults**: default content is stored as base64 of a
//!   key-sorted JSON object (see [`content`])

pub mod content;
pub mod dataform;
pub mod error;
pub mod field;
pub mod fieldtypes;
pub mod form;
pub mod record;

pub use content::{
    collect_default_content, content_form_key, decode_default_content, encode_default_content,
    DefaultContent, CONTENT_DEFAULT_KEY, DEFAULT_CONTENT_SETTING,
};
pub use dataform::{Dataform, DataformRegistry, InMemoryDataform, InMemoryRegistry, ItemScope};
pub use error::{FieldsError, Result};
pub use field::{
    is_empty_value, DataformId, DefaultContentMode, EditableOverride, Field, FieldId, Visibility,
};
pub use fieldtypes::{NumberFieldForm, TextFieldForm};
pub use form::{
    FieldFormBase, FieldFormServices, FieldSettingsForm, StandardFieldForm, BUTTON_GROUP,
};
pub use record::FieldRecord;
