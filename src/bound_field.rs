use crate::error::FormResult;
use crate::field::Field;
use crate::renderer::RenderContext;
use serde_json::Value;

/// A field paired with the request state it renders against
pub struct BoundField<'a> {
	field: &'a dyn Field,
	ctx: RenderContext,
}

impl<'a> BoundField<'a> {
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	/// use formwork::bound_field::BoundField;
	/// use formwork::renderer::{RenderContext, TeraRenderer};
	/// use serde_json::json;
	///
	/// let field = TextInput::new("name");
	/// let ctx = RenderContext::new(TeraRenderer::new(tera::Tera::default()))
	///     .with_old_input(json!({"name": "John"}));
	///
	/// let bound = BoundField::new(&field, ctx);
	/// assert_eq!(bound.name(), "name");
	/// assert_eq!(bound.value(), Some(json!("John")));
	/// ```
	pub fn new(field: &'a dyn Field, ctx: RenderContext) -> Self {
		Self { field, ctx }
	}

	pub fn field(&self) -> &'a dyn Field {
		self.field
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// Name of the submitted input; multi-valued fields submit `name[]`
	pub fn html_name(&self) -> String {
		match self.field.rules().iter().any(|r| r.name() == "array") {
			true if self.field.children().is_empty() => format!("{}[]", self.field.name()),
			_ => self.field.name().to_string(),
		}
	}

	pub fn id_for_label(&self) -> &str {
		self.field.id()
	}

	pub fn label(&self) -> Option<String> {
		if self.field.base().is_label_hidden() {
			return None;
		}
		self.field.base().label_for(self.ctx.record())
	}

	pub fn value(&self) -> Option<Value> {
		self.field.value(&self.ctx)
	}

	pub fn errors(&self) -> &[String] {
		self.ctx.errors().get(self.field.name())
	}

	pub fn has_errors(&self) -> bool {
		!self.errors().is_empty()
	}

	pub fn is_required(&self) -> bool {
		self.field.is_required()
	}

	pub fn render(&self) -> FormResult<String> {
		self.field.render(&self.ctx)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::prelude::*;
	use crate::request::ErrorBag;
	use crate::test_support::silent_context;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_bound_field_reads_errors_by_dotted_name() {
		// Arrange
		let errors: ErrorBag = [("tags.0", "Too short.")].into_iter().collect();
		let ctx = silent_context().with_errors(errors);
		let field = TextInput::new("tags[0]");

		// Act
		let bound = BoundField::new(&field, ctx);

		// Assert
		assert!(bound.has_errors());
		assert_eq!(bound.errors(), ["Too short.".to_string()]);
	}

	#[rstest]
	fn test_html_name_for_multiple_select() {
		let ctx = silent_context();
		let single = Select::new("tag");
		let multiple = Select::new("tags").multiple();
		let repeater = Repeater::new("rows").with_min_items(1).with_field(TextInput::new("label"));

		assert_eq!(BoundField::new(&single, ctx.clone()).html_name(), "tag");
		assert_eq!(BoundField::new(&multiple, ctx.clone()).html_name(), "tags[]");
		assert_eq!(BoundField::new(&repeater, ctx).html_name(), "rows");
	}

	#[rstest]
	fn test_hidden_label_is_none() {
		let ctx = silent_context().with_record(json!({}));
		let field = HiddenInput::new("token");

		assert_eq!(BoundField::new(&field, ctx).label(), None);
	}
}
