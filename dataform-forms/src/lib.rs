//! Form definition model and submit/validate runtime
//!
//! `dataform-forms` is the small form engine the Dataform settings forms are
//! written against. It knows nothing about fields or dataforms; it only
//! describes forms and processes their submissions.
//!
//! # Architecture
//!
//! - **Definition**: [`FormDefinition`] is an ordered list of [`Element`]s plus
//!   rules, parameter types, defaults and presentation flags
//! - **Runtime**: [`FormRuntime`] holds one request's submission and runs the
//!   clean-then-validate cycle, yielding a [`FormOutcome`]
//! - **No rendering**: consumers walk the definition to produce markup
//! - **Injected configuration**: [`FormsConfig`] is loaded once and passed in,
//!   never read from ambient state

pub mod config;
pub mod data;
pub mod definition;
pub mod element;
pub mod error;
pub mod runtime;
pub mod sanitize;
pub mod strings;

pub use config::FormsConfig;
pub use data::{SubmittedData, UploadedFile, UploadedFiles, ValidationErrors};
pub use definition::{FormDefinition, HelpButton, Rule, RuleKind, RuleSide};
pub use element::{Element, ElementKind, SelectOption};
pub use error::{FormsError, Result};
pub use runtime::{FormOptions, FormOutcome, FormRuntime, Method};
pub use sanitize::{ParamType, SanitizeMode};
pub use strings::{DefaultStrings, StringCatalog};
