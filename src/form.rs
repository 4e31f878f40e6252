//! Forms: an ordered schema of fields plus submission behavior
//!
//! A form owns its fields. Passing the same field to two forms requires an
//! explicit `clone()`, which deep-copies it; there is no shared mutable field
//! state between forms.

use crate::bound_field::BoundField;
use crate::error::FormResult;
use crate::field::Field;
use crate::guard::{Unguarded, resolve_unguarded};
use crate::metadata::FormExt;
use crate::renderer::RenderContext;
use crate::rules;
use crate::settings::FormConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// View used to render the form element around its fields
pub const FORM_VIEW: &str = "formwork/form.html";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	#[default]
	Post,
	Put,
	Patch,
	Delete,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}

/// Confirmation dialog shown before submitting
///
/// Unset texts fall back to translated defaults when the form renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Confirmation {
	pub text: Option<String>,
	pub confirm_button: Option<String>,
	pub cancel_button: Option<String>,
	pub danger: bool,
}

impl Confirmation {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn with_confirm_button(mut self, label: impl Into<String>) -> Self {
		self.confirm_button = Some(label.into());
		self
	}

	pub fn with_cancel_button(mut self, label: impl Into<String>) -> Self {
		self.cancel_button = Some(label.into());
		self
	}

	pub fn danger(mut self) -> Self {
		self.danger = true;
		self
	}
}

/// Password re-entry required before submitting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordGate {
	pub prompt: Option<String>,
	/// Ask only once per session instead of on every submission
	pub once: bool,
}

/// Which changes submit the form automatically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOnChange {
	#[default]
	Never,
	All,
	Fields(Vec<String>),
}

/// Client-side submission behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behaviors {
	pub confirmation: Option<Confirmation>,
	pub password_gate: Option<PasswordGate>,
	/// Submit without a full page load
	pub background: bool,
	pub debounce_ms: Option<u64>,
	/// Stay on the page after a successful submission
	pub stay: bool,
	pub reset_on_success: bool,
	pub restore_on_success: bool,
	pub submit_on_change: SubmitOnChange,
	pub scroll_on_error: bool,
	pub preserve_scroll: bool,
}

impl Default for Behaviors {
	fn default() -> Self {
		Self {
			confirmation: None,
			password_gate: None,
			background: false,
			debounce_ms: None,
			stay: false,
			reset_on_success: false,
			restore_on_success: false,
			submit_on_change: SubmitOnChange::Never,
			scroll_on_error: true,
			preserve_scroll: false,
		}
	}
}

/// Creates forms that share one injected configuration
///
/// # Examples
///
/// ```
/// use formwork::{FormConfig, FormFactory, FormSettings};
///
/// let factory = FormFactory::new(FormConfig::new(FormSettings::default()).with_default_unguarded(true));
/// let form = factory.make();
///
/// assert!(form.is_field_unguarded("anything"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormFactory {
	config: Arc<FormConfig>,
}

impl FormFactory {
	pub fn new(config: FormConfig) -> Self {
		Self {
			config: Arc::new(config),
		}
	}

	pub fn make(&self) -> Form {
		Form::with_config(Arc::clone(&self.config))
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}
}

/// A submittable form
#[derive(Debug, Clone)]
pub struct Form {
	config: Arc<FormConfig>,
	id: Option<String>,
	action: Option<String>,
	method: Method,
	class: Option<String>,
	schema: Vec<Box<dyn Field>>,
	force_files: bool,
	model: Option<Value>,
	unguarded: Option<Unguarded>,
	behaviors: Behaviors,
}

impl Form {
	/// Create an empty form with the default configuration
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	///
	/// let form = Form::new();
	/// assert!(form.fields().is_empty());
	/// assert!(!form.has_files());
	/// ```
	pub fn new() -> Self {
		Self::with_config(Arc::new(FormConfig::default()))
	}

	pub fn with_config(config: Arc<FormConfig>) -> Self {
		Self {
			config,
			id: None,
			action: None,
			method: Method::Post,
			class: None,
			schema: Vec::new(),
			force_files: false,
			model: None,
			unguarded: None,
			behaviors: Behaviors::default(),
		}
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	pub fn action(&self) -> Option<&str> {
		self.action.as_deref()
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn method(&self) -> Method {
		self.method
	}

	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	pub fn class(&self) -> Option<&str> {
		self.class.as_deref()
	}

	/// Replace the schema
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let form = Form::new().with_schema(vec![
	///     Box::new(TextInput::new("name").required()),
	///     Box::new(TextInput::new("email").email()),
	/// ]);
	///
	/// assert_eq!(form.field_count(), 2);
	/// ```
	pub fn with_schema(mut self, schema: Vec<Box<dyn Field>>) -> Self {
		self.schema = schema;
		self
	}

	pub fn with_field(mut self, field: impl Field + 'static) -> Self {
		self.schema.push(Box::new(field));
		self
	}

	pub fn add_field(&mut self, field: Box<dyn Field>) {
		self.schema.push(field);
	}

	pub fn fields(&self) -> &[Box<dyn Field>] {
		&self.schema
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn Field> {
		self.schema
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Box<dyn Field>> {
		self.schema.iter_mut().find(|f| f.name() == name)
	}

	pub fn remove_field(&mut self, name: &str) -> Option<Box<dyn Field>> {
		let pos = self.schema.iter().position(|f| f.name() == name)?;
		Some(self.schema.remove(pos))
	}

	pub fn field_count(&self) -> usize {
		self.schema.len()
	}

	/// Fields that are not hidden, in schema order
	///
	/// The returned list is freshly built; changing it leaves the schema alone.
	pub fn visible_schema(&self) -> Vec<&dyn Field> {
		self.schema
			.iter()
			.filter(|f| !f.is_hidden())
			.map(|f| f.as_ref())
			.collect()
	}

	/// Force a multipart form even without upload fields
	pub fn with_files(mut self) -> Self {
		self.force_files = true;
		self
	}

	/// Whether any field (at any nesting depth) uploads files, or files were forced
	pub fn has_files(&self) -> bool {
		fn any_upload(fields: &[Box<dyn Field>]) -> bool {
			fields
				.iter()
				.any(|f| f.has_file_upload() || any_upload(f.children()))
		}
		self.force_files || any_upload(&self.schema)
	}

	/// Bind a model; its attributes seed field values and guard decisions
	pub fn with_model(mut self, model: Value) -> Self {
		self.model = Some(model);
		self
	}

	pub fn model(&self) -> Option<&Value> {
		self.model.as_ref()
	}

	pub fn with_unguarded(mut self, unguarded: impl Into<Unguarded>) -> Self {
		self.unguarded = Some(unguarded.into());
		self
	}

	pub fn unguard_fields<I, S>(self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.with_unguarded(Unguarded::fields(names))
	}

	/// Effective unguarded setting for this form
	///
	/// The instance setting wins outright, then the configured default, then
	/// the configured guard predicate applied to the bound model.
	pub fn resolve_unguarded(&self) -> Unguarded {
		resolve_unguarded(
			self.unguarded.as_ref(),
			self.config.settings().default_unguarded.as_ref(),
			self.config.guard_when(),
			self.model.as_ref(),
		)
	}

	/// # Examples
	///
	/// ```
	/// use formwork::{Form, FormConfig, FormFactory};
	///
	/// let factory = FormFactory::new(FormConfig::default().with_default_unguarded(true));
	/// let form = factory.make().unguard_fields(["email"]);
	///
	/// assert!(form.is_field_unguarded("email"));
	/// assert!(!form.is_field_unguarded("name"));
	/// ```
	pub fn is_field_unguarded(&self, name: &str) -> bool {
		self.resolve_unguarded().allows(name)
	}

	/// Rules per top-level field name, skipping fields without rules
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let form = Form::new()
	///     .with_field(TextInput::new("name").required())
	///     .with_field(TextInput::new("nickname"));
	///
	/// let rules = form.validation_rules();
	/// assert_eq!(rules["name"], vec!["required"]);
	/// assert!(!rules.contains_key("nickname"));
	/// ```
	pub fn validation_rules(&self) -> IndexMap<String, Vec<String>> {
		self.schema
			.iter()
			.filter(|f| !f.name().is_empty())
			.filter_map(|f| {
				let rules = f.rules();
				(!rules.is_empty()).then(|| (f.name().to_string(), rules::tokens(&rules)))
			})
			.collect()
	}

	/// Like [`Form::validation_rules`], plus `parent.*.child` entries for the
	/// children of container fields
	pub fn all_validation_rules(&self) -> IndexMap<String, Vec<String>> {
		fn collect(
			fields: &[Box<dyn Field>],
			parent: Option<&str>,
			out: &mut IndexMap<String, Vec<String>>,
		) {
			for field in fields.iter().filter(|f| !f.name().is_empty()) {
				let key = match parent {
					Some(parent) => format!("{}.*.{}", parent, field.name()),
					None => field.name().to_string(),
				};
				let rules = field.rules();
				if !rules.is_empty() {
					out.insert(key.clone(), rules::tokens(&rules));
				}
				collect(field.children(), Some(&key), out);
			}
		}
		let mut out = IndexMap::new();
		collect(&self.schema, None, &mut out);
		out
	}

	pub fn confirm(self) -> Self {
		self.with_confirmation(Confirmation::new())
	}

	pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
		self.behaviors.confirmation = Some(confirmation);
		self
	}

	/// Ask for the user's password before every submission
	pub fn require_password(mut self) -> Self {
		let prompt = self.behaviors.password_gate.take().and_then(|g| g.prompt);
		self.behaviors.password_gate = Some(PasswordGate { prompt, once: false });
		self
	}

	/// Ask for the password only once per session
	pub fn require_password_once(mut self) -> Self {
		let prompt = self.behaviors.password_gate.take().and_then(|g| g.prompt);
		self.behaviors.password_gate = Some(PasswordGate { prompt, once: true });
		self
	}

	pub fn with_password_prompt(mut self, prompt: impl Into<String>) -> Self {
		let gate = self.behaviors.password_gate.get_or_insert_with(PasswordGate::default);
		gate.prompt = Some(prompt.into());
		self
	}

	pub fn background(mut self) -> Self {
		self.behaviors.background = true;
		self
	}

	pub fn with_debounce(mut self, milliseconds: u64) -> Self {
		self.behaviors.debounce_ms = Some(milliseconds);
		self
	}

	pub fn stay(mut self) -> Self {
		self.behaviors.stay = true;
		self
	}

	pub fn reset_on_success(mut self) -> Self {
		self.behaviors.reset_on_success = true;
		self
	}

	pub fn restore_on_success(mut self) -> Self {
		self.behaviors.restore_on_success = true;
		self
	}

	/// Submit whenever any field changes
	pub fn submit_on_change(mut self) -> Self {
		self.behaviors.submit_on_change = SubmitOnChange::All;
		self
	}

	/// Submit whenever one of the named fields changes
	pub fn submit_on_change_of<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.behaviors.submit_on_change =
			SubmitOnChange::Fields(names.into_iter().map(Into::into).collect());
		self
	}

	pub fn without_scroll_on_error(mut self) -> Self {
		self.behaviors.scroll_on_error = false;
		self
	}

	pub fn preserve_scroll(mut self) -> Self {
		self.behaviors.preserve_scroll = true;
		self
	}

	pub fn behaviors(&self) -> &Behaviors {
		&self.behaviors
	}

	/// The caller's context with this form's settings, translator and model
	pub fn scoped_context(&self, ctx: &RenderContext) -> RenderContext {
		let scoped = ctx
			.clone()
			.with_settings(self.config.settings_arc())
			.with_translator(self.config.translator());
		match &self.model {
			Some(model) => scoped.with_record(model.clone()),
			None => scoped,
		}
	}

	/// Current value of every named top-level field
	pub fn default_data(&self, ctx: &RenderContext) -> Map<String, Value> {
		let ctx = self.scoped_context(ctx);
		self.schema
			.iter()
			.filter(|f| !f.name().is_empty())
			.map(|f| (f.name().to_string(), f.value(&ctx).unwrap_or(Value::Null)))
			.collect()
	}

	/// Visible fields paired with the scoped context
	pub fn bound_fields(&self, ctx: &RenderContext) -> Vec<BoundField<'_>> {
		let ctx = self.scoped_context(ctx);
		self.visible_schema()
			.into_iter()
			.map(|field| BoundField::new(field, ctx.clone()))
			.collect()
	}

	/// Render every visible field, then the form view around them
	pub fn render(&self, ctx: &RenderContext) -> FormResult<String> {
		let ctx = self.scoped_context(ctx);
		let fields = self
			.visible_schema()
			.into_iter()
			.map(|field| field.render(&ctx))
			.collect::<FormResult<Vec<String>>>()?;
		tracing::debug!(form = ?self.id, fields = fields.len(), "rendering form");
		let metadata = self.to_metadata(&ctx);
		ctx.renderer()
			.render(FORM_VIEW, &json!({ "form": metadata, "fields": fields }))
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}
