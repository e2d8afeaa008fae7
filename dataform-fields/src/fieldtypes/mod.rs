//! Settings forms of the built-in field types.

pub mod number;
pub mod text;

pub use number::NumberFieldForm;
pub use text::TextFieldForm;
