//! Dropdown select, optionally searchable or backed by a remote endpoint

use crate::field::{Field, FieldBase};
use crate::fields::concerns::{HasOptions, OptionsState};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Select {
	base: FieldBase,
	options: OptionsState,
	multiple: bool,
	searchable: bool,
	allow_clear: bool,
	remote_url: Option<String>,
	search_prompt: Option<String>,
}

impl Select {
	/// Create a new select with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let field = Select::new("status")
	///     .with_options([("draft", "Draft"), ("published", "Published")])
	///     .searchable();
	///
	/// assert_eq!(field.options().len(), 2);
	/// assert!(field.is_searchable());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			options: OptionsState::default(),
			multiple: false,
			searchable: false,
			allow_clear: false,
			remote_url: None,
			search_prompt: None,
		}
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn is_multiple(&self) -> bool {
		self.multiple
	}

	pub fn searchable(mut self) -> Self {
		self.searchable = true;
		self
	}

	pub fn is_searchable(&self) -> bool {
		self.searchable || self.remote_url.is_some()
	}

	/// Show a control that resets the selection
	pub fn allow_clear(mut self) -> Self {
		self.allow_clear = true;
		self
	}

	/// Fetch options from `url` while the user types
	pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
		self.remote_url = Some(url.into());
		self
	}

	pub fn remote_url(&self) -> Option<&str> {
		self.remote_url.as_deref()
	}

	pub fn with_search_prompt(mut self, prompt: impl Into<String>) -> Self {
		self.search_prompt = Some(prompt.into());
		self
	}

	/// Placeholder shown while nothing is selected
	pub fn placeholder_text(&self, ctx: &RenderContext) -> String {
		self.base
			.placeholder_for(ctx.record())
			.unwrap_or_else(|| ctx.translate("Select an option"))
	}
}

impl Field for Select {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"select"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		if self.multiple {
			rules.push(Rule::Array);
		}
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("placeholder".into(), json!(self.placeholder_text(ctx)));
		context.insert("options".into(), self.options_context(ctx.record()));
		context.insert("multiple".into(), json!(self.multiple));
		context.insert("searchable".into(), json!(self.is_searchable()));
		context.insert("allow_clear".into(), json!(self.allow_clear));
		context.insert("remote_url".into(), json!(self.remote_url));
		context.insert(
			"search_prompt".into(),
			json!(
				self.search_prompt
					.clone()
					.unwrap_or_else(|| ctx.translate("Type to search..."))
			),
		);
		// Multiple selects submit an array, so the input name needs brackets.
		if self.multiple {
			context.insert("input_name".into(), json!(format!("{}[]", self.name())));
		} else {
			context.insert("input_name".into(), json!(self.name()));
		}
	}
}

impl HasOptions for Select {
	fn options_state(&self) -> &OptionsState {
		&self.options
	}

	fn options_state_mut(&mut self) -> &mut OptionsState {
		&mut self.options
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
	fn test_placeholder_defaults_to_translated_prompt() {
		// Arrange
		let catalog = MessageCatalog::with_messages("nl", [("Select an option", "Kies een optie")]);
		let ctx = silent_context().with_translator(Arc::new(catalog));

		// Act
		let default = Select::new("country").placeholder_text(&ctx);
		let explicit = Select::new("country")
			.with_placeholder("Pick one")
			.placeholder_text(&ctx);

		// Assert
		assert_eq!(default, "Kies een optie");
		assert_eq!(explicit, "Pick one");
	}

	#[rstest]
	fn test_multiple_select_context() {
		// Arrange
		let ctx = silent_context();
		let field = Select::new("tags")
			.multiple()
			.with_options([("rust", "Rust"), ("go", "Go")]);

		// Act
		let context = field.context(&ctx);

		// Assert
		assert_eq!(context["input_name"], json!("tags[]"));
		assert_eq!(context["options"][1]["label"], json!("Go"));
		assert_eq!(crate::rules::tokens(&field.rules()), vec!["array"]);
	}

	#[rstest]
	fn test_remote_select_is_searchable() {
		let field = Select::new("user_id").with_remote_url("/api/users");

		assert!(field.is_searchable());
		assert_eq!(field.remote_url(), Some("/api/users"));
	}
}
