//! Editable key/value pairs
//!
//! Stored as a map; each entry is materialized as a row of two text inputs,
//! `parent[index][key]` and `parent[index][value]`, following the same cloning
//! rules as [`Repeater`](crate::fields::Repeater) rows.

use crate::error::FormResult;
use crate::evaluable::Evaluable;
use crate::field::{Field, FieldBase};
use crate::fields::TextInput;
use crate::fields::repeater::{INDEX_PLACEHOLDER, clone_child, render_fields};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct KeyValue {
	base: FieldBase,
	schema: Vec<Box<dyn Field>>,
	key_label: Option<String>,
	value_label: Option<String>,
	editable_keys: bool,
	addable: bool,
	deletable: bool,
	reorderable: bool,
}

impl KeyValue {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			schema: vec![
				Box::new(TextInput::new("key")),
				Box::new(TextInput::new("value")),
			],
			key_label: None,
			value_label: None,
			editable_keys: true,
			addable: true,
			deletable: true,
			reorderable: false,
		}
	}

	pub fn with_key_label(mut self, label: impl Into<String>) -> Self {
		self.key_label = Some(label.into());
		self
	}

	pub fn with_value_label(mut self, label: impl Into<String>) -> Self {
		self.value_label = Some(label.into());
		self
	}

	/// Render keys read-only; existing entries can still change their values
	pub fn with_editable_keys(mut self, editable: bool) -> Self {
		self.editable_keys = editable;
		self
	}

	pub fn addable(mut self, addable: bool) -> Self {
		self.addable = addable;
		self
	}

	pub fn deletable(mut self, deletable: bool) -> Self {
		self.deletable = deletable;
		self
	}

	pub fn reorderable(mut self) -> Self {
		self.reorderable = true;
		self
	}

	/// Stored entries as `{key, value}` items, in stored order
	///
	/// A map is split into its entries; an array (as redisplayed from old input)
	/// is taken as already being a list of items.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	/// use formwork::renderer::{RenderContext, TeraRenderer};
	/// use serde_json::json;
	///
	/// let ctx = RenderContext::new(TeraRenderer::new(tera::Tera::default()));
	/// let meta = KeyValue::new("meta").with_default(json!({"lang": "en", "theme": "dark"}));
	///
	/// assert_eq!(meta.items(&ctx)[1], json!({"key": "theme", "value": "dark"}));
	/// ```
	pub fn items(&self, ctx: &RenderContext) -> Vec<Value> {
		match self.value(ctx) {
			Some(Value::Object(entries)) => entries
				.into_iter()
				.map(|(key, value)| json!({ "key": key, "value": value }))
				.collect(),
			Some(Value::Array(items)) => items,
			_ => Vec::new(),
		}
	}

	/// Key and value inputs for one entry
	pub fn materialize(&self, ctx: &RenderContext, index: &str, item: Option<&Value>) -> Vec<Box<dyn Field>> {
		let labels = [
			self.key_label
				.clone()
				.unwrap_or_else(|| ctx.translate("Key")),
			self.value_label
				.clone()
				.unwrap_or_else(|| ctx.translate("Value")),
		];
		self.schema
			.iter()
			.zip(labels)
			.map(|(child, label)| {
				let seed = item.and_then(|item| item.get(child.name())).cloned();
				let mut clone = clone_child(child.as_ref(), &self.base, index, seed);
				let base = clone.base_mut();
				base.set_label(Evaluable::Value(label));
				if child.name() == "key" && !self.editable_keys && index != INDEX_PLACEHOLDER {
					base.set_readonly(true);
				}
				clone
			})
			.collect()
	}

	pub fn item_fields(&self, ctx: &RenderContext) -> Vec<Vec<Box<dyn Field>>> {
		self.items(ctx)
			.iter()
			.enumerate()
			.map(|(index, item)| self.materialize(ctx, &index.to_string(), Some(item)))
			.collect()
	}

	pub fn template_fields(&self, ctx: &RenderContext) -> Vec<Box<dyn Field>> {
		self.materialize(ctx, INDEX_PLACEHOLDER, None)
	}
}

impl Field for KeyValue {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"key-value"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		if !rules.is_empty() {
			rules.push(Rule::Array);
		}
		rules
	}

	fn children(&self) -> &[Box<dyn Field>] {
		&self.schema
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("editable_keys".into(), json!(self.editable_keys));
		context.insert("addable".into(), json!(self.addable));
		context.insert("deletable".into(), json!(self.deletable));
		context.insert("reorderable".into(), json!(self.reorderable));
		context.insert("add_label".into(), json!(ctx.translate("Add item")));
		context.insert("remove_label".into(), json!(ctx.translate("Remove item")));
		context.insert("index_placeholder".into(), json!(INDEX_PLACEHOLDER));
	}

	fn view_data(&self, ctx: &RenderContext) -> FormResult<Value> {
		let mut context = self.context(ctx);
		let rows = self
			.item_fields(ctx)
			.iter()
			.enumerate()
			.map(|(index, fields)| Ok(json!({ "index": index, "fields": render_fields(fields, ctx)? })))
			.collect::<FormResult<Vec<Value>>>()?;
		tracing::debug!(name = %self.name(), items = rows.len(), "materializing key-value items");
		context.insert("rows".into(), Value::Array(rows));
		context.insert(
			"template".into(),
			json!(render_fields(&self.template_fields(ctx), ctx)?),
		);
		Ok(json!({ "field": context }))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::i18n::MessageCatalog;
	use crate::prelude::*;
	use crate::test_support::silent_context;
	use rstest::rstest;
	use std::sync::Arc;

	#[rstest]
	fn test_entries_become_rows() {
		// Arrange
		let ctx = silent_context();
		let meta = KeyValue::new("meta").with_default(json!({"lang": "en", "theme": "dark"}));

		// Act
		let rows = meta.item_fields(&ctx);

		// Assert
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0][0].name(), "meta[0][key]");
		assert_eq!(rows[0][1].name(), "meta[0][value]");
		assert_eq!(rows[1][0].default_value(), Some(json!("theme")));
		assert_eq!(rows[1][1].default_value(), Some(json!("dark")));
		assert_eq!(rows[1][1].id(), "meta_1_value");
	}

	#[rstest]
	fn test_row_ids_use_the_field_name() {
		let ctx = silent_context();
		let headers = KeyValue::new("http_headers").with_default(json!({"accept": "text/html"}));

		let rows = headers.item_fields(&ctx);

		assert_eq!(rows[0][0].id(), "http_headers_0_key");
		assert_eq!(rows[0][1].id(), "http_headers_0_value");
		assert_eq!(headers.template_fields(&ctx)[1].id(), "http_headers___INDEX___value");
	}

	#[rstest]
	fn test_labels_are_translated() {
		// Arrange
		let catalog = MessageCatalog::with_messages("de", [("Key", "Schlüssel"), ("Value", "Wert")]);
		let ctx = silent_context().with_translator(Arc::new(catalog));
		let meta = KeyValue::new("meta").with_value_label("Setting");

		// Act
		let template = meta.template_fields(&ctx);

		// Assert
		assert_eq!(template[0].label().as_deref(), Some("Schlüssel"));
		assert_eq!(template[1].label().as_deref(), Some("Setting"));
		assert_eq!(template[0].name(), "meta[__INDEX__][key]");
		assert_eq!(template[0].default_value(), None);
	}

	#[rstest]
	fn test_locked_keys_are_readonly_except_in_template() {
		let ctx = silent_context();
		let meta = KeyValue::new("meta")
			.with_editable_keys(false)
			.with_default(json!({"lang": "en"}));

		let rows = meta.item_fields(&ctx);

		assert!(rows[0][0].is_readonly());
		assert!(!rows[0][1].is_readonly());
		assert!(!meta.template_fields(&ctx)[0].is_readonly());
	}

	#[rstest]
	fn test_rules_only_when_configured() {
		assert!(KeyValue::new("meta").rules().is_empty());
		assert_eq!(
			crate::rules::tokens(&KeyValue::new("meta").required().rules()),
			vec!["required", "array"]
		);
	}
}
