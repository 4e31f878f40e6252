//! Multi-line text input

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use crate::settings::FormSettings;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Textarea {
	base: FieldBase,
	rows: u32,
	autosize: Option<bool>,
	max_length: Option<usize>,
}

impl Textarea {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			rows: 3,
			autosize: None,
			max_length: None,
		}
	}

	pub fn with_rows(mut self, rows: u32) -> Self {
		self.rows = rows;
		self
	}

	pub fn rows(&self) -> u32 {
		self.rows
	}

	/// Grow with the content instead of scrolling
	pub fn autosize(self) -> Self {
		self.with_autosize(true)
	}

	pub fn with_autosize(mut self, autosize: bool) -> Self {
		self.autosize = Some(autosize);
		self
	}

	/// Explicit autosize setting, else the configured default
	///
	/// # Examples
	///
	/// ```
	/// use formwork::fields::Textarea;
	/// use formwork::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str("textarea_autosize = true").unwrap();
	///
	/// assert!(Textarea::new("bio").is_autosize(&settings));
	/// assert!(!Textarea::new("bio").with_autosize(false).is_autosize(&settings));
	/// ```
	pub fn is_autosize(&self, settings: &FormSettings) -> bool {
		self.autosize.unwrap_or(settings.textarea_autosize)
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}
}

impl Field for Textarea {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"textarea"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.extend(self.max_length.map(|n| Rule::Max(n as f64)));
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("rows".into(), json!(self.rows));
		context.insert("autosize".into(), json!(self.is_autosize(ctx.settings())));
		context.insert("max_length".into(), json!(self.max_length));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::tokens;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let field = Textarea::new("notes");

		assert_eq!(field.rows(), 3);
		assert!(!field.is_autosize(&FormSettings::default()));
		assert!(field.rules().is_empty());
	}

	#[rstest]
	fn test_max_length_rule() {
		let field = Textarea::new("notes").with_rows(6).with_max_length(500);

		assert_eq!(tokens(&field.rules()), vec!["max:500"]);
		assert_eq!(field.rows(), 6);
	}
}
