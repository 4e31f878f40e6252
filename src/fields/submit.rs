//! Submit button

use crate::error::FormResult;
use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
	#[default]
	Primary,
	Secondary,
	Danger,
}

/// Submit button; renders with a `submit` view key instead of `field`
#[derive(Debug, Clone)]
pub struct Submit {
	base: FieldBase,
	spinner: bool,
	style: ButtonStyle,
}

impl Submit {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			spinner: true,
			style: ButtonStyle::Primary,
		}
	}

	pub fn without_spinner(mut self) -> Self {
		self.spinner = false;
		self
	}

	pub fn danger(mut self) -> Self {
		self.style = ButtonStyle::Danger;
		self
	}

	pub fn secondary(mut self) -> Self {
		self.style = ButtonStyle::Secondary;
		self
	}

	pub fn style(&self) -> ButtonStyle {
		self.style
	}

	/// Explicit label, else the translated "Submit"
	pub fn button_label(&self, ctx: &RenderContext) -> String {
		if self.base.has_explicit_label() {
			self.base.label_for(ctx.record()).unwrap_or_default()
		} else {
			ctx.translate("Submit")
		}
	}
}

impl Field for Submit {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"submit"
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("label".into(), json!(self.button_label(ctx)));
		context.insert("spinner".into(), json!(self.spinner));
		context.insert("style".into(), json!(self.style));
	}

	fn view_data(&self, ctx: &RenderContext) -> FormResult<Value> {
		Ok(json!({ "submit": self.context(ctx) }))
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
	fn test_view_data_uses_submit_key() {
		// Arrange
		let ctx = silent_context();
		let button = Submit::new("save").danger();

		// Act
		let data = button.view_data(&ctx).unwrap();

		// Assert
		assert!(data.get("field").is_none());
		assert_eq!(data["submit"]["label"], json!("Submit"));
		assert_eq!(data["submit"]["style"], json!("danger"));
	}

	#[rstest]
	fn test_label_translation_and_override() {
		let catalog = MessageCatalog::with_messages("fr", [("Submit", "Envoyer")]);
		let ctx = silent_context().with_translator(Arc::new(catalog));

		assert_eq!(Submit::new("save").button_label(&ctx), "Envoyer");
		assert_eq!(
			Submit::new("save").with_label("Save draft").button_label(&ctx),
			"Save draft"
		);
	}
}
