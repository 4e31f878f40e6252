//! Serializable form and field metadata
//!
//! A [`Form`] holds trait objects and closures that cannot cross a wire or
//! reach a template directly. The structures here are plain data extracted
//! from a form at render time: labels evaluated, defaults resolved, rules
//! flattened to tokens and behavior texts translated.
//!
//! ## Example
//!
//! ```
//! use formwork::prelude::*;
//! use formwork::metadata::{FormExt, FormMetadata};
//! use formwork::renderer::{RenderContext, TeraRenderer};
//!
//! let form = Form::new()
//!     .with_id("signup")
//!     .with_field(TextInput::new("username").required());
//! let ctx = RenderContext::new(TeraRenderer::new(tera::Tera::default()));
//!
//! let metadata: FormMetadata = form.to_metadata(&ctx);
//! let json = serde_json::to_string(&metadata).unwrap();
//! assert!(json.contains("\"username\""));
//! ```

use crate::field::Field;
use crate::form::{Form, Method, SubmitOnChange};
use crate::guard::Unguarded;
use crate::renderer::RenderContext;
use crate::rules;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plain-data view of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
	/// Submitted name
	pub name: String,

	/// Element id
	pub id: String,

	/// Field kind, e.g. `text-input`
	pub kind: String,

	/// Evaluated label
	pub label: Option<String>,

	pub required: bool,
	pub hidden: bool,
	pub disabled: bool,
	pub readonly: bool,

	/// Rule tokens
	pub rules: Vec<String>,

	/// Current value (old input, then model, then default)
	pub value: Option<Value>,

	/// Schema of container fields
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<FieldMetadata>,
}

impl FieldMetadata {
	pub fn from_field(field: &dyn Field, ctx: &RenderContext) -> Self {
		Self {
			name: field.name().to_string(),
			id: field.id().to_string(),
			kind: field.kind().to_string(),
			label: field.base().label_for(ctx.record()),
			required: field.is_required(),
			hidden: field.is_hidden(),
			disabled: field.is_disabled(),
			readonly: field.is_readonly(),
			rules: rules::tokens(&field.rules()),
			value: field.value(ctx),
			children: field
				.children()
				.iter()
				.map(|child| Self::from_field(child.as_ref(), ctx))
				.collect(),
		}
	}
}

/// Confirmation dialog texts, with defaults already translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationMetadata {
	pub text: String,
	pub confirm_button: String,
	pub cancel_button: String,
	pub danger: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordGateMetadata {
	pub prompt: String,
	pub once: bool,
}

/// Client-side submission behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorMetadata {
	pub confirmation: Option<ConfirmationMetadata>,
	pub password: Option<PasswordGateMetadata>,
	pub background: bool,
	pub debounce_ms: Option<u64>,
	pub stay: bool,
	pub reset_on_success: bool,
	pub restore_on_success: bool,
	pub submit_on_change: SubmitOnChange,
	pub scroll_on_error: bool,
	pub preserve_scroll: bool,
}

/// Plain-data view of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
	pub id: Option<String>,
	pub action: Option<String>,
	pub method: Method,
	pub class: Option<String>,

	/// Whether the form must be submitted as multipart
	pub has_files: bool,

	/// Top-level fields in schema order, hidden ones included
	pub fields: Vec<FieldMetadata>,

	/// Rule tokens keyed by field name, nested children as `parent.*.child`
	pub validation_rules: IndexMap<String, Vec<String>>,

	pub behaviors: BehaviorMetadata,

	/// Effective unguarded setting
	pub unguarded: Unguarded,
}

/// Metadata extraction for forms
pub trait FormExt {
	fn to_metadata(&self, ctx: &RenderContext) -> FormMetadata;
}

impl FormExt for Form {
	fn to_metadata(&self, ctx: &RenderContext) -> FormMetadata {
		let behaviors = self.behaviors();
		let confirmation = behaviors.confirmation.as_ref().map(|c| ConfirmationMetadata {
			text: c
				.text
				.clone()
				.unwrap_or_else(|| ctx.translate("Are you sure you want to continue?")),
			confirm_button: c
				.confirm_button
				.clone()
				.unwrap_or_else(|| ctx.translate("Confirm")),
			cancel_button: c
				.cancel_button
				.clone()
				.unwrap_or_else(|| ctx.translate("Cancel")),
			danger: c.danger,
		});
		let password = behaviors.password_gate.as_ref().map(|gate| PasswordGateMetadata {
			prompt: gate.prompt.clone().unwrap_or_else(|| {
				ctx.translate("Please confirm your password before continuing.")
			}),
			once: gate.once,
		});

		FormMetadata {
			id: self.id().map(str::to_string),
			action: self.action().map(str::to_string),
			method: self.method(),
			class: self.class().map(str::to_string),
			has_files: self.has_files(),
			fields: self
				.fields()
				.iter()
				.map(|field| FieldMetadata::from_field(field.as_ref(), ctx))
				.collect(),
			validation_rules: self.all_validation_rules(),
			behaviors: BehaviorMetadata {
				confirmation,
				password,
				background: behaviors.background,
				debounce_ms: behaviors.debounce_ms,
				stay: behaviors.stay,
				reset_on_success: behaviors.reset_on_success,
				restore_on_success: behaviors.restore_on_success,
				submit_on_change: behaviors.submit_on_change.clone(),
				scroll_on_error: behaviors.scroll_on_error,
				preserve_scroll: behaviors.preserve_scroll,
			},
			unguarded: self.resolve_unguarded(),
		}
	}
}
