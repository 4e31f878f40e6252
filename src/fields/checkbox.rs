//! Single checkbox

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Checkbox {
	base: FieldBase,
	checked_value: Value,
}

impl Checkbox {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			checked_value: Value::Bool(true),
		}
	}

	/// Value submitted when checked (default `true`)
	pub fn with_checked_value(mut self, value: impl Into<Value>) -> Self {
		self.checked_value = value.into();
		self
	}

	pub fn checked_value(&self) -> &Value {
		&self.checked_value
	}

	/// Whether `value` counts as checked
	///
	/// Besides the checked value itself, the usual truthy submissions
	/// (`"1"`, `"on"`, `"true"`, `1`) are accepted.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::fields::Checkbox;
	/// use serde_json::json;
	///
	/// let terms = Checkbox::new("terms");
	/// assert!(terms.is_checked(Some(&json!("on"))));
	/// assert!(!terms.is_checked(Some(&json!(false))));
	/// assert!(!terms.is_checked(None));
	/// ```
	pub fn is_checked(&self, value: Option<&Value>) -> bool {
		let Some(value) = value else {
			return false;
		};
		if *value == self.checked_value {
			return true;
		}
		match value {
			Value::Bool(flag) => *flag,
			Value::Number(number) => number.as_i64() == Some(1),
			Value::String(text) => matches!(text.as_str(), "1" | "on" | "true" | "yes"),
			_ => false,
		}
	}
}

impl Field for Checkbox {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"checkbox"
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		let value = self.value(ctx);
		context.insert("checked".into(), json!(self.is_checked(value.as_ref())));
		context.insert("checked_value".into(), self.checked_value.clone());
	}
}
