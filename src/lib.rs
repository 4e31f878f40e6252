//! Declarative form fields and form assembly for server-rendered HTML
//!
//! This crate provides:
//! - Fields configured through fluent builders, with lazily evaluated labels,
//!   hints, defaults and options
//! - Capability traits shared across fields: options, min/max bounds, steps
//!   and inline layout
//! - Container fields (repeaters and key/value lists) that clone their schema
//!   into indexed rows
//! - Forms that aggregate fields into validation rules, default data,
//!   upload detection and mass-assignment guarding
//!
//! Markup is produced by a [`ViewRenderer`](renderer::ViewRenderer); the crate
//! ships view names and contexts, not templates.
//!
//! ```
//! use formwork::prelude::*;
//!
//! let form = Form::new()
//!     .with_action("/profile")
//!     .with_field(TextInput::new("name").required().with_max_length(120))
//!     .with_field(FileUpload::new("avatar").image());
//!
//! assert!(form.has_files());
//! assert_eq!(form.validation_rules()["name"], vec!["required", "max:120"]);
//! ```

pub mod bound_field;
pub mod error;
pub mod evaluable;
pub mod field;
pub mod fields;
pub mod form;
pub mod guard;
pub mod i18n;
pub mod metadata;
pub mod prelude;
pub mod renderer;
pub mod request;
pub mod rules;
pub mod settings;
pub mod text;
pub mod wrapper;

#[cfg(test)]
mod test_support;

pub use bound_field::BoundField;
pub use error::{FormError, FormResult};
pub use evaluable::Evaluable;
pub use form::{Form, FormFactory};
pub use guard::Unguarded;
pub use request::{ErrorBag, NoOldInput, OldInput};
pub use rules::Rule;
pub use settings::{FormConfig, FormSettings};
