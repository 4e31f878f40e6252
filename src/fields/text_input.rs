//! Single-line text input

use crate::field::{Field, FieldBase};
use crate::fields::concerns::{HasMinMax, HasStep, MinMax, Step};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use crate::settings::FormSettings;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// HTML input type of a [`TextInput`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
	#[default]
	Text,
	Email,
	Url,
	Tel,
	Number,
	Search,
	Date,
	Time,
	DatetimeLocal,
	Month,
	Week,
	Color,
}

impl InputType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Email => "email",
			Self::Url => "url",
			Self::Tel => "tel",
			Self::Number => "number",
			Self::Search => "search",
			Self::Date => "date",
			Self::Time => "time",
			Self::DatetimeLocal => "datetime-local",
			Self::Month => "month",
			Self::Week => "week",
			Self::Color => "color",
		}
	}
}

/// Text input with optional length, pattern and numeric constraints
#[derive(Debug, Clone)]
pub struct TextInput {
	base: FieldBase,
	input_type: InputType,
	min_max: MinMax,
	step: Step,
	min_length: Option<usize>,
	max_length: Option<usize>,
	pattern: Option<String>,
	autocomplete: Option<String>,
	datalist: Vec<String>,
	mask: Option<String>,
	format: Option<String>,
}

impl TextInput {
	/// Create a new text input with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let field = TextInput::new("username");
	/// assert_eq!(field.name(), "username");
	/// assert_eq!(field.input_type(), InputType::Text);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			input_type: InputType::Text,
			min_max: MinMax::default(),
			step: Step::default(),
			min_length: None,
			max_length: None,
			pattern: None,
			autocomplete: None,
			datalist: Vec::new(),
			mask: None,
			format: None,
		}
	}

	pub fn with_type(mut self, input_type: InputType) -> Self {
		self.input_type = input_type;
		self
	}

	/// Shorthand for an email input, which also emits the `email` rule
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let field = TextInput::new("email").email();
	/// assert_eq!(formwork::rules::tokens(&field.rules()), vec!["email"]);
	/// ```
	pub fn email(self) -> Self {
		self.with_type(InputType::Email)
	}

	pub fn url(self) -> Self {
		self.with_type(InputType::Url)
	}

	pub fn tel(self) -> Self {
		self.with_type(InputType::Tel)
	}

	pub fn numeric(self) -> Self {
		self.with_type(InputType::Number)
	}

	pub fn input_type(&self) -> InputType {
		self.input_type
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn min_length(&self) -> Option<usize> {
		self.min_length
	}

	pub fn max_length(&self) -> Option<usize> {
		self.max_length
	}

	/// Pattern the value must match, without delimiters
	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.pattern = Some(pattern.into());
		self
	}

	pub fn pattern(&self) -> Option<&str> {
		self.pattern.as_deref()
	}

	pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
		self.autocomplete = Some(autocomplete.into());
		self
	}

	/// Suggestions offered while typing
	pub fn with_datalist<I, S>(mut self, suggestions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.datalist = suggestions.into_iter().map(Into::into).collect();
		self
	}

	pub fn datalist(&self) -> &[String] {
		&self.datalist
	}

	/// Client-side input mask, e.g. `99/99/9999`
	pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
		self.mask = Some(mask.into());
		self
	}

	/// Display format for date-like types
	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = Some(format.into());
		self
	}

	/// Explicit display format, else the configured one for date-like types
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	/// use formwork::FormSettings;
	///
	/// let settings = FormSettings::default();
	/// let field = TextInput::new("starts_on").with_type(InputType::Date);
	///
	/// assert_eq!(field.display_format(&settings).as_deref(), Some("%Y-%m-%d"));
	/// assert_eq!(TextInput::new("name").display_format(&settings), None);
	/// ```
	pub fn display_format(&self, settings: &FormSettings) -> Option<String> {
		if let Some(format) = &self.format {
			return Some(format.clone());
		}
		match self.input_type {
			InputType::Date => Some(settings.date_format.clone()),
			InputType::Time => Some(settings.time_format.clone()),
			InputType::DatetimeLocal => Some(settings.datetime_format.clone()),
			_ => None,
		}
	}
}

impl Field for TextInput {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"text-input"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		match self.input_type {
			InputType::Email => rules.push(Rule::Email),
			InputType::Url => rules.push(Rule::Url),
			InputType::Date | InputType::DatetimeLocal => rules.push(Rule::Date),
			_ => {}
		}
		if self.input_type == InputType::Number {
			rules.extend(self.min_value().map(Rule::Min));
			rules.extend(self.max_value().map(Rule::Max));
		} else {
			rules.extend(self.min_length.map(|n| Rule::Min(n as f64)));
			rules.extend(self.max_length.map(|n| Rule::Max(n as f64)));
		}
		rules.extend(self.pattern.clone().map(Rule::Regex));
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("type".into(), json!(self.input_type));
		context.insert("min".into(), json!(self.min_value()));
		context.insert("max".into(), json!(self.max_value()));
		context.insert("step".into(), json!(self.step()));
		context.insert("min_length".into(), json!(self.min_length));
		context.insert("max_length".into(), json!(self.max_length));
		context.insert("pattern".into(), json!(self.pattern));
		context.insert("autocomplete".into(), json!(self.autocomplete));
		context.insert("datalist".into(), json!(self.datalist));
		context.insert("mask".into(), json!(self.mask));
		context.insert("format".into(), json!(self.display_format(ctx.settings())));
	}
}

impl HasMinMax for TextInput {
	fn min_max(&self) -> &MinMax {
		&self.min_max
	}

	fn min_max_mut(&mut self) -> &mut MinMax {
		&mut self.min_max
	}
}

impl HasStep for TextInput {
	fn step_state(&self) -> &Step {
		&self.step
	}

	fn step_state_mut(&mut self) -> &mut Step {
		&mut self.step
	}
}
