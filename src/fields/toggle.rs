//! On/off switch

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Toggle {
	base: FieldBase,
	on_label: Option<String>,
	off_label: Option<String>,
}

impl Toggle {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			on_label: None,
			off_label: None,
		}
	}

	pub fn with_on_label(mut self, label: impl Into<String>) -> Self {
		self.on_label = Some(label.into());
		self
	}

	pub fn with_off_label(mut self, label: impl Into<String>) -> Self {
		self.off_label = Some(label.into());
		self
	}

	pub fn is_on(&self, ctx: &RenderContext) -> bool {
		match self.value(ctx) {
			Some(Value::Bool(flag)) => flag,
			Some(Value::Number(number)) => number.as_i64() == Some(1),
			Some(Value::String(text)) => matches!(text.as_str(), "1" | "on" | "true"),
			_ => false,
		}
	}
}

impl Field for Toggle {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"toggle"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.push(Rule::Boolean);
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("on".into(), json!(self.is_on(ctx)));
		context.insert("on_label".into(), json!(self.on_label));
		context.insert("off_label".into(), json!(self.off_label));
	}
}
