//! Repeatable groups of fields
//!
//! A repeater holds a child schema that acts as a template. At render time
//! every stored item gets its own copy of the schema: each child is cloned,
//! renamed to `parent[index][child]`, re-identified as `parent_index_child` and
//! seeded with the item's value for that child. One more copy, indexed with
//! [`INDEX_PLACEHOLDER`] and never seeded, is rendered for client-side
//! addition of rows. Clones are independent; the template schema is never
//! mutated.

use crate::error::FormResult;
use crate::evaluable::Evaluable;
use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use crate::text::headline;
use serde_json::{Map, Value, json};

/// Index used by the template row
pub const INDEX_PLACEHOLDER: &str = "__INDEX__";

/// Copy `child` into row `index` of the container `parent`
///
/// The clone gets a bracketed name, the id `parent_index_child` and the
/// headline of the child's original name as label (unless one was set
/// explicitly). A `seed` replaces the default; without one, item rows keep
/// the child's own default while the template row is left unseeded.
pub(crate) fn clone_child(
	child: &dyn Field,
	parent: &FieldBase,
	index: &str,
	seed: Option<Value>,
) -> Box<dyn Field> {
	let mut clone = child.clone_box();
	let child_name = child.name().to_string();
	let base = clone.base_mut();
	if !base.has_explicit_label() {
		base.set_label(Evaluable::Value(headline(&child_name)));
	}
	base.set_name(format!("{}[{}][{}]", parent.name(), index, child_name));
	base.set_id(format!("{}_{}_{}", row_id_prefix(parent), index, child_name));
	match seed {
		Some(value) => base.set_default(Evaluable::Value(value)),
		None if index == INDEX_PLACEHOLDER => base.clear_default(),
		None => {}
	}
	clone
}

/// Id prefix for rows of `parent`
///
/// A container that is itself a row clone already carries a rewritten id;
/// top-level containers use their name as is.
fn row_id_prefix(parent: &FieldBase) -> &str {
	if parent.name().contains('[') {
		parent.id()
	} else {
		parent.name()
	}
}

pub(crate) fn render_fields(fields: &[Box<dyn Field>], ctx: &RenderContext) -> FormResult<Vec<String>> {
	fields.iter().map(|field| field.render(ctx)).collect()
}

/// Stored items as `(index, item)` pairs
///
/// Arrays are indexed by position, objects by key, both in stored order.
pub(crate) fn stored_items(value: Option<Value>) -> Vec<(String, Value)> {
	match value {
		Some(Value::Array(items)) => items
			.into_iter()
			.enumerate()
			.map(|(index, item)| (index.to_string(), item))
			.collect(),
		Some(Value::Object(items)) => items.into_iter().collect(),
		_ => Vec::new(),
	}
}

#[derive(Debug, Clone)]
pub struct Repeater {
	base: FieldBase,
	schema: Vec<Box<dyn Field>>,
	simple: bool,
	min_items: Option<usize>,
	max_items: Option<usize>,
	reorderable: bool,
	addable: bool,
	deletable: bool,
	add_label: Option<String>,
}

impl Repeater {
	/// Create a repeater with the given name and an empty schema
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let links = Repeater::new("links")
	///     .with_field(TextInput::new("label"))
	///     .with_field(TextInput::new("url").url());
	///
	/// assert_eq!(links.children().len(), 2);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			schema: Vec::new(),
			simple: false,
			min_items: None,
			max_items: None,
			reorderable: false,
			addable: true,
			deletable: true,
			add_label: None,
		}
	}

	/// A repeater of a single unlabeled field, for lists of scalars
	///
	/// Scalar items seed the field directly.
	pub fn simple(name: impl Into<String>, field: impl Field + 'static) -> Self {
		let mut repeater = Self::new(name);
		repeater.schema = vec![Box::new(field)];
		repeater.simple = true;
		repeater
	}

	pub fn with_schema(mut self, schema: Vec<Box<dyn Field>>) -> Self {
		self.schema = schema;
		self
	}

	pub fn with_field(mut self, field: impl Field + 'static) -> Self {
		self.schema.push(Box::new(field));
		self
	}

	pub fn is_simple(&self) -> bool {
		self.simple
	}

	pub fn with_min_items(mut self, min: usize) -> Self {
		self.min_items = Some(min);
		self
	}

	pub fn with_max_items(mut self, max: usize) -> Self {
		self.max_items = Some(max);
		self
	}

	pub fn reorderable(mut self) -> Self {
		self.reorderable = true;
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

	pub fn with_add_label(mut self, label: impl Into<String>) -> Self {
		self.add_label = Some(label.into());
		self
	}

	/// Stored items in render order
	pub fn items(&self, ctx: &RenderContext) -> Vec<(String, Value)> {
		stored_items(self.value(ctx))
	}

	/// Materialize the schema for one item
	pub fn materialize(&self, index: &str, item: Option<&Value>) -> Vec<Box<dyn Field>> {
		self.schema
			.iter()
			.map(|child| {
				let seed = item.and_then(|item| match item {
					Value::Object(data) => data.get(child.name()).cloned(),
					scalar if self.simple => Some(scalar.clone()),
					_ => None,
				});
				let mut clone = clone_child(child.as_ref(), &self.base, index, seed);
				if self.simple {
					let base = clone.base_mut();
					base.clear_label();
					base.set_label_hidden(true);
				}
				clone
			})
			.collect()
	}

	/// Materialized schema for every stored item
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	/// use formwork::renderer::{RenderContext, TeraRenderer};
	/// use serde_json::json;
	///
	/// let ctx = RenderContext::new(TeraRenderer::new(tera::Tera::default()));
	/// let items = Repeater::new("items")
	///     .with_field(TextInput::new("label"))
	///     .with_default(json!([{"label": "A"}, {"label": "B"}]));
	///
	/// let rows = items.item_fields(&ctx);
	/// assert_eq!(rows[1][0].name(), "items[1][label]");
	/// assert_eq!(rows[1][0].default_value(), Some(json!("B")));
	/// ```
	pub fn item_fields(&self, ctx: &RenderContext) -> Vec<Vec<Box<dyn Field>>> {
		self.items(ctx)
			.iter()
			.map(|(index, item)| self.materialize(index, Some(item)))
			.collect()
	}

	/// Unseeded schema copy for rows added in the browser
	pub fn template_fields(&self) -> Vec<Box<dyn Field>> {
		self.materialize(INDEX_PLACEHOLDER, None)
	}

	fn add_label(&self, ctx: &RenderContext) -> String {
		self.add_label
			.clone()
			.unwrap_or_else(|| ctx.translate("Add item"))
	}
}

impl Field for Repeater {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"repeater"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		if self.min_items.is_some() || self.max_items.is_some() {
			rules.push(Rule::Array);
		}
		rules.extend(self.min_items.map(|n| Rule::Min(n as f64)));
		rules.extend(self.max_items.map(|n| Rule::Max(n as f64)));
		rules
	}

	fn children(&self) -> &[Box<dyn Field>] {
		&self.schema
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("simple".into(), json!(self.simple));
		context.insert("min_items".into(), json!(self.min_items));
		context.insert("max_items".into(), json!(self.max_items));
		context.insert("reorderable".into(), json!(self.reorderable));
		context.insert("addable".into(), json!(self.addable));
		context.insert("deletable".into(), json!(self.deletable));
		context.insert("add_label".into(), json!(self.add_label(ctx)));
		context.insert("remove_label".into(), json!(ctx.translate("Remove item")));
		context.insert("index_placeholder".into(), json!(INDEX_PLACEHOLDER));
	}

	fn view_data(&self, ctx: &RenderContext) -> FormResult<Value> {
		let mut context = self.context(ctx);
		let items = self.items(ctx);
		tracing::debug!(name = %self.name(), items = items.len(), "materializing repeater items");
		let rows = items
			.iter()
			.map(|(index, item)| {
				let fields = self.materialize(index, Some(item));
				Ok(json!({ "index": index, "fields": render_fields(&fields, ctx)? }))
			})
			.collect::<FormResult<Vec<Value>>>()?;
		context.insert("rows".into(), Value::Array(rows));
		context.insert(
			"template".into(),
			json!(render_fields(&self.template_fields(), ctx)?),
		);
		Ok(json!({ "field": context }))
	}
}
