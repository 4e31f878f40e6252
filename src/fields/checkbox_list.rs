//! Group of checkboxes over a set of options

use crate::field::{Field, FieldBase};
use crate::fields::concerns::{CanBeInline, HasOptions, Inline, OptionsState};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct CheckboxList {
	base: FieldBase,
	options: OptionsState,
	inline: Inline,
	columns: u8,
}

impl CheckboxList {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			options: OptionsState::default(),
			inline: Inline::default(),
			columns: 1,
		}
	}

	/// Spread the options over a number of columns (at least one)
	pub fn with_columns(mut self, columns: u8) -> Self {
		self.columns = columns.max(1);
		self
	}

	pub fn columns(&self) -> u8 {
		self.columns
	}

	/// Selected option values, as strings
	pub fn selected(&self, ctx: &RenderContext) -> Vec<String> {
		match self.value(ctx) {
			Some(Value::Array(items)) => items.iter().map(value_key).collect(),
			Some(Value::Null) | None => Vec::new(),
			Some(other) => vec![value_key(&other)],
		}
	}
}

fn value_key(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

impl Field for CheckboxList {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"checkbox-list"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.push(Rule::Array);
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("options".into(), self.options_context(ctx.record()));
		context.insert("selected".into(), json!(self.selected(ctx)));
		context.insert("inline".into(), json!(self.is_inline()));
		context.insert("columns".into(), json!(self.columns));
	}
}

impl HasOptions for CheckboxList {
	fn options_state(&self) -> &OptionsState {
		&self.options
	}

	fn options_state_mut(&mut self) -> &mut OptionsState {
		&mut self.options
	}
}

impl CanBeInline for CheckboxList {
	fn inline_state(&self) -> &Inline {
		&self.inline
	}

	fn inline_state_mut(&mut self) -> &mut Inline {
		&mut self.inline
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::prelude::*;
	use crate::test_support::silent_context;
	use rstest::rstest;

	#[rstest]
	fn test_selected_values_are_stringified() {
		// Arrange
		let ctx = silent_context();
		let field = CheckboxList::new("days")
			.with_options([(1, "Mon"), (2, "Tue"), (3, "Wed")])
			.with_default(json!([1, "3"]))
			.inline()
			.with_columns(0);

		// Act
		let context = field.context(&ctx);

		// Assert
		assert_eq!(field.selected(&ctx), vec!["1", "3"]);
		assert_eq!(context["inline"], json!(true));
		assert_eq!(context["columns"], json!(1));
		assert_eq!(crate::rules::tokens(&field.rules()), vec!["array"]);
	}
}
