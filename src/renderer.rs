//! View rendering seam and the per-request render context
//!
//! This crate does not ship markup. Fields and forms hand a view name
//! (`formwork/<kind>.html`) and a JSON context to a [`ViewRenderer`]; the host
//! application owns the templates behind those names.
//!
//! # Examples
//!
//! ```
//! use formwork::renderer::{RenderContext, TeraRenderer};
//! use serde_json::json;
//!
//! let mut tera = tera::Tera::default();
//! tera.add_raw_template("formwork/text-input.html", "<input name=\"{{ field.name }}\">")
//!     .unwrap();
//!
//! let ctx = RenderContext::new(TeraRenderer::new(tera));
//! let html = ctx
//!     .renderer()
//!     .render("formwork/text-input.html", &json!({"field": {"name": "email"}}))
//!     .unwrap();
//! assert_eq!(html, "<input name=\"email\">");
//! ```

use crate::error::{FormError, FormResult};
use crate::i18n::{IdentityTranslator, Translator};
use crate::request::{ErrorBag, NoOldInput, OldInput};
use crate::settings::FormSettings;
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use tera::{Context, Tera};

/// Turns a view name and its context into markup
pub trait ViewRenderer: Send + Sync {
	fn render(&self, view: &str, context: &Value) -> FormResult<String>;
}

/// [`ViewRenderer`] backed by a host supplied Tera instance
pub struct TeraRenderer {
	tera: Tera,
}

impl TeraRenderer {
	pub fn new(tera: Tera) -> Self {
		Self { tera }
	}

	/// Register or replace a single template
	pub fn add_raw_template(&mut self, name: &str, source: &str) -> FormResult<()> {
		self.tera
			.add_raw_template(name, source)
			.map_err(|e| FormError::render(name, describe(&e)))
	}

	pub fn tera(&self) -> &Tera {
		&self.tera
	}
}

impl ViewRenderer for TeraRenderer {
	fn render(&self, view: &str, context: &Value) -> FormResult<String> {
		let ctx = Context::from_serialize(context).map_err(|e| FormError::render(view, describe(&e)))?;
		self.tera
			.render(view, &ctx)
			.map_err(|e| FormError::render(view, describe(&e)))
	}
}

impl fmt::Debug for TeraRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TeraRenderer")
			.field("templates", &self.tera.get_template_names().count())
			.finish()
	}
}

// Tera nests the useful message (missing variable, bad filter) in the source chain.
fn describe(err: &tera::Error) -> String {
	let mut message = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		message.push_str(": ");
		message.push_str(&cause.to_string());
		source = cause.source();
	}
	message
}

/// Everything a field needs from the current request while it renders
///
/// Cloning is cheap: every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct RenderContext {
	renderer: Arc<dyn ViewRenderer>,
	translator: Arc<dyn Translator>,
	old_input: Arc<dyn OldInput>,
	errors: Arc<ErrorBag>,
	settings: Arc<FormSettings>,
	record: Option<Arc<Value>>,
}

impl RenderContext {
	pub fn new(renderer: impl ViewRenderer + 'static) -> Self {
		Self::from_renderer(Arc::new(renderer))
	}

	pub fn from_renderer(renderer: Arc<dyn ViewRenderer>) -> Self {
		Self {
			renderer,
			translator: Arc::new(IdentityTranslator),
			old_input: Arc::new(NoOldInput),
			errors: Arc::new(ErrorBag::new()),
			settings: Arc::new(FormSettings::default()),
			record: None,
		}
	}

	pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
		self.translator = translator;
		self
	}

	pub fn with_old_input(mut self, old_input: impl OldInput + 'static) -> Self {
		self.old_input = Arc::new(old_input);
		self
	}

	pub fn with_errors(mut self, errors: ErrorBag) -> Self {
		self.errors = Arc::new(errors);
		self
	}

	pub fn with_settings(mut self, settings: Arc<FormSettings>) -> Self {
		self.settings = settings;
		self
	}

	/// Bind a record; contextual values are evaluated against it
	pub fn with_record(mut self, record: Value) -> Self {
		self.record = Some(Arc::new(record));
		self
	}

	pub fn without_record(mut self) -> Self {
		self.record = None;
		self
	}

	pub fn renderer(&self) -> &dyn ViewRenderer {
		self.renderer.as_ref()
	}

	pub fn translate(&self, key: &str) -> String {
		self.translator.translate(key)
	}

	pub fn old(&self, name: &str) -> Option<Value> {
		self.old_input.old(name)
	}

	pub fn errors(&self) -> &ErrorBag {
		&self.errors
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn record(&self) -> Option<&Value> {
		self.record.as_deref()
	}
}

impl fmt::Debug for RenderContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderContext")
			.field("errors", &self.errors)
			.field("settings", &self.settings)
			.field("record", &self.record)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::i18n::MessageCatalog;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_tera_renderer_reports_missing_template() {
		// Arrange
		let renderer = TeraRenderer::new(Tera::default());

		// Act
		let result = renderer.render("formwork/select.html", &json!({}));

		// Assert
		match result {
			Err(FormError::Render { view, .. }) => assert_eq!(view, "formwork/select.html"),
			other => panic!("expected render error, got {:?}", other),
		}
	}

	#[rstest]
	fn test_tera_renderer_escapes_html_views() {
		// Arrange
		let mut renderer = TeraRenderer::new(Tera::default());
		renderer
			.add_raw_template("formwork/hint.html", "<p>{{ field.hint }}</p>")
			.unwrap();

		// Act
		let html = renderer
			.render("formwork/hint.html", &json!({"field": {"hint": "<b>x</b>"}}))
			.unwrap();

		// Assert
		assert_eq!(html, "<p>&lt;b&gt;x&lt;&#x2F;b&gt;</p>");
	}

	#[rstest]
	fn test_context_builders() {
		// Arrange
		let catalog = MessageCatalog::with_messages("de", [("Submit", "Absenden")]);

		// Act
		let ctx = RenderContext::new(TeraRenderer::new(Tera::default()))
			.with_translator(Arc::new(catalog))
			.with_old_input(json!({"email": "old@example.com"}))
			.with_record(json!({"id": 7}));

		// Assert
		assert_eq!(ctx.translate("Submit"), "Absenden");
		assert_eq!(ctx.old("email"), Some(json!("old@example.com")));
		assert_eq!(ctx.record(), Some(&json!({"id": 7})));
		assert!(ctx.clone().without_record().record().is_none());
		assert!(ctx.errors().is_empty());
	}
}
