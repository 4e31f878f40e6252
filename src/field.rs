//! The field base contract
//!
//! Every concrete field embeds a [`FieldBase`] holding identity, presentation
//! metadata, state flags and rules, and implements [`Field`] on top of it. The
//! fluent setters live on [`FieldBuilder`], which every sized field gets for
//! free.
//!
//! ```
//! use formwork::prelude::*;
//!
//! let field = TextInput::new("email_address")
//!     .with_placeholder("you@example.com")
//!     .required()
//!     .with_rule("email");
//!
//! assert_eq!(field.id(), "email-address");
//! assert_eq!(field.label().as_deref(), Some("Email Address"));
//! assert_eq!(formwork::rules::tokens(&field.rules()), vec!["required", "email"]);
//! ```

use crate::evaluable::Evaluable;
use crate::error::FormResult;
use crate::renderer::RenderContext;
use crate::rules::{self, Rule};
use crate::text::{data_get, headline, slugify};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::any::Any;
use std::fmt;

/// Value of a passthrough HTML attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
	Text(String),
	Flag(bool),
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		Self::Flag(value)
	}
}

/// State shared by every field type
#[derive(Debug, Clone)]
pub struct FieldBase {
	name: String,
	id: String,
	label: Option<Evaluable<String>>,
	label_hidden: bool,
	label_stripped: bool,
	placeholder: Option<Evaluable<String>>,
	hint: Option<Evaluable<String>>,
	prefix: Option<Evaluable<String>>,
	suffix: Option<Evaluable<String>>,
	default: Option<Evaluable<Value>>,
	required: bool,
	disabled: bool,
	readonly: bool,
	hidden: bool,
	autofocus: bool,
	rules: Vec<Rule>,
	attributes: IndexMap<String, AttributeValue>,
}

impl FieldBase {
	/// Create the base for a field named `name`, deriving its id
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		if name.is_empty() {
			tracing::warn!("field constructed with an empty name");
		}
		Self {
			id: derive_id(&name),
			name,
			label: None,
			label_hidden: false,
			label_stripped: false,
			placeholder: None,
			hint: None,
			prefix: None,
			suffix: None,
			default: None,
			required: false,
			disabled: false,
			readonly: false,
			hidden: false,
			autofocus: false,
			rules: Vec::new(),
			attributes: IndexMap::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	/// Rename without touching the id; callers that clone fields set both
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	pub fn set_id(&mut self, id: impl Into<String>) {
		let id = id.into();
		self.id = if id.is_empty() { derive_id(&self.name) } else { id };
	}

	pub fn has_explicit_label(&self) -> bool {
		self.label.is_some() || self.label_stripped
	}

	/// Explicit label, or the headline of the name when none was set
	///
	/// A cleared label yields `None`.
	pub fn label_for(&self, record: Option<&Value>) -> Option<String> {
		match &self.label {
			Some(label) => label.evaluate_with(record),
			None if self.label_stripped => None,
			None => Some(headline(&self.name)),
		}
	}

	/// Remove the label, including the headline fallback
	pub fn clear_label(&mut self) {
		self.label = None;
		self.label_stripped = true;
	}

	pub fn set_label(&mut self, label: Evaluable<String>) {
		self.label = Some(label);
		self.label_stripped = false;
	}

	pub fn is_label_hidden(&self) -> bool {
		self.label_hidden
	}

	pub fn set_label_hidden(&mut self, hidden: bool) {
		self.label_hidden = hidden;
	}

	pub fn placeholder_for(&self, record: Option<&Value>) -> Option<String> {
		self.placeholder.as_ref()?.evaluate_with(record)
	}

	pub fn set_placeholder(&mut self, placeholder: Evaluable<String>) {
		self.placeholder = Some(placeholder);
	}

	pub fn has_placeholder(&self) -> bool {
		self.placeholder.is_some()
	}

	pub fn hint_for(&self, record: Option<&Value>) -> Option<String> {
		self.hint.as_ref()?.evaluate_with(record)
	}

	pub fn set_hint(&mut self, hint: Evaluable<String>) {
		self.hint = Some(hint);
	}

	pub fn prefix_for(&self, record: Option<&Value>) -> Option<String> {
		self.prefix.as_ref()?.evaluate_with(record)
	}

	pub fn set_prefix(&mut self, prefix: Evaluable<String>) {
		self.prefix = Some(prefix);
	}

	pub fn suffix_for(&self, record: Option<&Value>) -> Option<String> {
		self.suffix.as_ref()?.evaluate_with(record)
	}

	pub fn set_suffix(&mut self, suffix: Evaluable<String>) {
		self.suffix = Some(suffix);
	}

	/// Default value resolved without a record
	pub fn default_value(&self) -> Option<Value> {
		self.default.as_ref()?.evaluate()
	}

	/// Default value resolved against a bound record
	pub fn default_with_record(&self, record: &Value) -> Option<Value> {
		self.default.as_ref()?.evaluate_with(Some(record))
	}

	pub fn set_default(&mut self, default: Evaluable<Value>) {
		self.default = Some(default);
	}

	pub fn clear_default(&mut self) {
		self.default = None;
	}

	pub fn is_required(&self) -> bool {
		self.required || self.rules.iter().any(Rule::is_required)
	}

	pub fn set_required(&mut self, required: bool) {
		self.required = required;
		if !required {
			self.rules.retain(|rule| !rule.is_required());
		}
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	pub fn set_disabled(&mut self, disabled: bool) {
		self.disabled = disabled;
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	pub fn set_readonly(&mut self, readonly: bool) {
		self.readonly = readonly;
	}

	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	pub fn set_hidden(&mut self, hidden: bool) {
		self.hidden = hidden;
	}

	pub fn is_autofocus(&self) -> bool {
		self.autofocus
	}

	pub fn set_autofocus(&mut self, autofocus: bool) {
		self.autofocus = autofocus;
	}

	/// Configured rules with `required` moved to the front exactly once
	///
	/// # Examples
	///
	/// ```
	/// use formwork::field::FieldBase;
	/// use formwork::rules::tokens;
	///
	/// let mut base = FieldBase::new("email");
	/// base.push_rule("email".into());
	/// base.push_rule("required".into());
	///
	/// assert_eq!(tokens(&base.rules()), vec!["required", "email"]);
	/// ```
	pub fn rules(&self) -> Vec<Rule> {
		let mut rules: Vec<Rule> = self
			.rules
			.iter()
			.filter(|rule| !rule.is_required())
			.cloned()
			.collect();
		if self.is_required() {
			rules.insert(0, Rule::Required);
		}
		rules
	}

	pub fn set_rules(&mut self, rules: Vec<Rule>) {
		self.rules = rules;
	}

	pub fn push_rule(&mut self, rule: Rule) {
		self.rules.push(rule);
	}

	pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
		&self.attributes
	}

	pub fn set_attribute(&mut self, key: impl Into<String>, value: AttributeValue) {
		self.attributes.insert(key.into(), value);
	}

	/// Current value: old input, then the bound record, then the default
	pub fn value(&self, ctx: &RenderContext) -> Option<Value> {
		if let Some(old) = ctx.old(&self.name) {
			return Some(old);
		}
		if let Some(record) = ctx.record() {
			if let Some(value) = data_get(record, &self.name) {
				return Some(value.clone());
			}
			return self.default_with_record(record);
		}
		self.default_value()
	}

	/// View context common to all fields
	pub fn context(&self, ctx: &RenderContext, rules: &[Rule], value: Option<Value>) -> Map<String, Value> {
		let record = ctx.record();
		let errors = ctx.errors().get(&self.name);
		let mut context = Map::new();
		context.insert("name".into(), json!(self.name));
		context.insert("id".into(), json!(self.id));
		context.insert("label".into(), json!(self.label_for(record)));
		context.insert("label_hidden".into(), json!(self.label_hidden));
		context.insert("placeholder".into(), json!(self.placeholder_for(record)));
		context.insert("hint".into(), json!(self.hint_for(record)));
		context.insert("prefix".into(), json!(self.prefix_for(record)));
		context.insert("suffix".into(), json!(self.suffix_for(record)));
		context.insert("value".into(), value.unwrap_or(Value::Null));
		context.insert("required".into(), json!(rules.iter().any(Rule::is_required)));
		context.insert("disabled".into(), json!(self.disabled));
		context.insert("readonly".into(), json!(self.readonly));
		context.insert("autofocus".into(), json!(self.autofocus));
		context.insert("attributes".into(), json!(self.attributes));
		context.insert("rules".into(), json!(rules::tokens(rules)));
		context.insert("errors".into(), json!(errors));
		context.insert("has_errors".into(), json!(!errors.is_empty()));
		context
	}
}

fn derive_id(name: &str) -> String {
	let slug = slugify(name);
	if slug.is_empty() {
		"field".to_string()
	} else {
		slug
	}
}

/// Object plumbing every field gets from its `Clone` impl
pub trait FieldObject {
	fn clone_box(&self) -> Box<dyn Field>;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> FieldObject for T
where
	T: Field + Clone + 'static,
{
	fn clone_box(&self) -> Box<dyn Field> {
		Box::new(self.clone())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

impl Clone for Box<dyn Field> {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

/// A configurable, renderable form input
pub trait Field: FieldObject + fmt::Debug + Send + Sync {
	fn base(&self) -> &FieldBase;

	fn base_mut(&mut self) -> &mut FieldBase;

	/// Short type name, also the view name stem (`text-input`, `select`)
	fn kind(&self) -> &'static str;

	fn view(&self) -> String {
		format!("formwork/{}.html", self.kind())
	}

	fn name(&self) -> &str {
		self.base().name()
	}

	fn id(&self) -> &str {
		self.base().id()
	}

	fn label(&self) -> Option<String> {
		self.base().label_for(None)
	}

	fn placeholder(&self) -> Option<String> {
		self.base().placeholder_for(None)
	}

	fn hint(&self) -> Option<String> {
		self.base().hint_for(None)
	}

	fn default_value(&self) -> Option<Value> {
		self.base().default_value()
	}

	fn is_required(&self) -> bool {
		self.rules().iter().any(Rule::is_required)
	}

	fn is_disabled(&self) -> bool {
		self.base().is_disabled()
	}

	fn is_readonly(&self) -> bool {
		self.base().is_readonly()
	}

	fn is_hidden(&self) -> bool {
		self.base().is_hidden()
	}

	fn is_autofocus(&self) -> bool {
		self.base().is_autofocus()
	}

	/// Validation rules, including those the field type derives from its
	/// configuration
	fn rules(&self) -> Vec<Rule> {
		self.base().rules()
	}

	/// Whether submitting this field needs a multipart form
	fn has_file_upload(&self) -> bool {
		false
	}

	/// Nested schema, for container fields
	fn children(&self) -> &[Box<dyn Field>] {
		&[]
	}

	fn value(&self, ctx: &RenderContext) -> Option<Value> {
		self.base().value(ctx)
	}

	/// Add type-specific entries to the view context
	fn extend_context(&self, _ctx: &RenderContext, _context: &mut Map<String, Value>) {}

	fn context(&self, ctx: &RenderContext) -> Map<String, Value> {
		let rules = self.rules();
		let mut context = self.base().context(ctx, &rules, self.value(ctx));
		context.insert("kind".into(), json!(self.kind()));
		self.extend_context(ctx, &mut context);
		context
	}

	fn view_data(&self, ctx: &RenderContext) -> FormResult<Value> {
		Ok(json!({ "field": self.context(ctx) }))
	}

	/// Render through the context's view renderer; hidden fields render nothing
	fn render(&self, ctx: &RenderContext) -> FormResult<String> {
		if self.is_hidden() {
			return Ok(String::new());
		}
		tracing::debug!(kind = self.kind(), name = %self.name(), "rendering field");
		let data = self.view_data(ctx)?;
		ctx.renderer().render(&self.view(), &data)
	}
}

impl dyn Field + '_ {
	pub fn downcast_ref<T: Field + 'static>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	pub fn downcast_mut<T: Field + 'static>(&mut self) -> Option<&mut T> {
		self.as_any_mut().downcast_mut::<T>()
	}
}

/// Fluent configuration shared by every field type
pub trait FieldBuilder: Field + Sized {
	fn with_label(mut self, label: impl Into<Evaluable<String>>) -> Self {
		self.base_mut().set_label(label.into());
		self
	}

	/// Keep the label for accessibility but do not show it
	fn without_label(mut self) -> Self {
		self.base_mut().set_label_hidden(true);
		self
	}

	fn with_placeholder(mut self, placeholder: impl Into<Evaluable<String>>) -> Self {
		self.base_mut().set_placeholder(placeholder.into());
		self
	}

	fn with_hint(mut self, hint: impl Into<Evaluable<String>>) -> Self {
		self.base_mut().set_hint(hint.into());
		self
	}

	fn with_prefix(mut self, prefix: impl Into<Evaluable<String>>) -> Self {
		self.base_mut().set_prefix(prefix.into());
		self
	}

	fn prepend(self, prefix: impl Into<Evaluable<String>>) -> Self {
		self.with_prefix(prefix)
	}

	fn with_suffix(mut self, suffix: impl Into<Evaluable<String>>) -> Self {
		self.base_mut().set_suffix(suffix.into());
		self
	}

	fn append(self, suffix: impl Into<Evaluable<String>>) -> Self {
		self.with_suffix(suffix)
	}

	fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.base_mut().set_default(Evaluable::Value(default.into()));
		self
	}

	/// Default computed each time it is read
	fn with_default_using<F>(mut self, f: F) -> Self
	where
		F: Fn() -> anyhow::Result<Value> + Send + Sync + 'static,
	{
		self.base_mut().set_default(Evaluable::try_from_fn(f));
		self
	}

	/// Default computed from the bound record; absent without one
	fn with_default_for_record<F>(mut self, f: F) -> Self
	where
		F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
	{
		self.base_mut().set_default(Evaluable::try_contextual(f));
		self
	}

	fn required(self) -> Self {
		self.with_required(true)
	}

	fn with_required(mut self, required: bool) -> Self {
		self.base_mut().set_required(required);
		self
	}

	fn disabled(mut self) -> Self {
		self.base_mut().set_disabled(true);
		self
	}

	fn readonly(mut self) -> Self {
		self.base_mut().set_readonly(true);
		self
	}

	fn hidden(mut self) -> Self {
		self.base_mut().set_hidden(true);
		self
	}

	fn visible(mut self, visible: bool) -> Self {
		self.base_mut().set_hidden(!visible);
		self
	}

	fn autofocus(mut self) -> Self {
		self.base_mut().set_autofocus(true);
		self
	}

	/// Replace the configured rules
	fn with_rules<I, R>(mut self, rules: I) -> Self
	where
		I: IntoIterator<Item = R>,
		R: Into<Rule>,
	{
		self.base_mut()
			.set_rules(rules.into_iter().map(Into::into).collect());
		self
	}

	fn with_rule(mut self, rule: impl Into<Rule>) -> Self {
		self.base_mut().push_rule(rule.into());
		self
	}

	fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
		self.base_mut().set_attribute(key, value.into());
		self
	}

	fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<AttributeValue>,
	{
		for (key, value) in attributes {
			self.base_mut().set_attribute(key, value.into());
		}
		self
	}

	fn with_id(mut self, id: impl Into<String>) -> Self {
		self.base_mut().set_id(id);
		self
	}
}

impl<T: Field + Sized> FieldBuilder for T {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::TextInput;
	use crate::test_support::recording_context;
	use rstest::rstest;

	#[rstest]
	#[case("email_address", "email-address", "Email Address")]
	#[case("first_name", "first-name", "First Name")]
	#[case("!!!", "field", "!!!")]
	fn test_identity_defaults(#[case] name: &str, #[case] id: &str, #[case] label: &str) {
		// Arrange
		let field = TextInput::new(name);

		// Act & Assert
		assert_eq!(field.id(), id);
		assert_eq!(field.label().as_deref(), Some(label));
	}

	#[rstest]
	fn test_explicit_label_and_id_win() {
		let field = TextInput::new("email").with_label("E-mail").with_id("contact-email");

		assert_eq!(field.label().as_deref(), Some("E-mail"));
		assert_eq!(field.id(), "contact-email");
	}

	#[rstest]
	fn test_cleared_label_has_no_headline_fallback() {
		// Arrange
		let mut field = TextInput::new("tag").with_label("Tag");

		// Act
		field.base_mut().clear_label();

		// Assert
		assert_eq!(field.label(), None);
		assert!(field.base().has_explicit_label());
		field.base_mut().set_label(Evaluable::Value("Topic".into()));
		assert_eq!(field.label().as_deref(), Some("Topic"));
	}

	#[rstest]
	fn test_required_twice_is_not_duplicated() {
		// Arrange
		let field = TextInput::new("name")
			.with_rule("string")
			.required()
			.required()
			.with_rule("required");

		// Act
		let tokens = rules::tokens(&field.rules());

		// Assert
		assert_eq!(tokens, vec!["required", "string"]);
		assert!(field.is_required());
	}

	#[rstest]
	fn test_not_required_strips_required_rule() {
		let field = TextInput::new("name")
			.with_rules(["required", "max:10"])
			.with_required(false);

		assert!(!field.is_required());
		assert_eq!(rules::tokens(&field.rules()), vec!["max:10"]);
	}

	#[rstest]
	fn test_value_prefers_old_input_then_record_then_default() {
		// Arrange
		let (_, ctx) = recording_context();
		let field = TextInput::new("city").with_default("Utrecht");

		// Act & Assert
		assert_eq!(field.value(&ctx), Some(json!("Utrecht")));
		let bound = ctx.clone().with_record(json!({"city": "Delft"}));
		assert_eq!(field.value(&bound), Some(json!("Delft")));
		let redisplay = bound.with_old_input(json!({"city": "Leiden"}));
		assert_eq!(field.value(&redisplay), Some(json!("Leiden")));
	}

	#[rstest]
	fn test_contextual_default_needs_record() {
		// Arrange
		let (_, ctx) = recording_context();
		let field = TextInput::new("slug")
			.with_default_for_record(|record| Ok(json!(format!("{}-copy", record["slug"].as_str().unwrap_or("")))));

		// Act & Assert
		assert_eq!(field.default_value(), None);
		assert_eq!(field.value(&ctx), None);
		assert_eq!(
			field.base().default_with_record(&json!({"slug": "post"})),
			Some(json!("post-copy"))
		);
	}

	#[rstest]
	fn test_failing_default_degrades_to_none() {
		let field = TextInput::new("price").with_default_using(|| anyhow::bail!("rates unavailable"));

		assert_eq!(field.default_value(), None);
	}

	#[rstest]
	fn test_hidden_field_renders_nothing() {
		// Arrange
		let (recorder, ctx) = recording_context();
		let field = TextInput::new("secret").hidden();

		// Act
		let html = field.render(&ctx).unwrap();

		// Assert
		assert_eq!(html, "");
		assert!(recorder.calls.lock().unwrap().is_empty());
	}

	#[rstest]
	fn test_render_passes_field_context() {
		// Arrange
		let (recorder, ctx) = recording_context();
		let field = TextInput::new("email")
			.with_hint("We never share it")
			.with_attribute("data-test", "email")
			.with_attribute("spellcheck", false);

		// Act
		let html = field.render(&ctx).unwrap();

		// Assert
		assert_eq!(html, "<formwork/text-input.html>");
		let calls = recorder.calls.lock().unwrap();
		let (view, data) = &calls[0];
		assert_eq!(view, "formwork/text-input.html");
		assert_eq!(data["field"]["name"], json!("email"));
		assert_eq!(data["field"]["hint"], json!("We never share it"));
		assert_eq!(data["field"]["attributes"], json!({"data-test": "email", "spellcheck": false}));
		assert_eq!(data["field"]["kind"], json!("text-input"));
	}

	#[rstest]
	fn test_boxed_clone_is_independent() {
		// Arrange
		let original: Box<dyn Field> = Box::new(TextInput::new("title"));

		// Act
		let mut copy = original.clone();
		copy.base_mut().set_name("copy");

		// Assert
		assert_eq!(original.name(), "title");
		assert_eq!(copy.name(), "copy");
		assert!(copy.downcast_ref::<TextInput>().is_some());
	}
}
