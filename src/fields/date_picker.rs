//! Calendar date (and optional time) picker

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use chrono::NaiveDate;
use serde_json::{Map, Value, json};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct DatePicker {
	base: FieldBase,
	min_date: Option<NaiveDate>,
	max_date: Option<NaiveDate>,
	disabled_dates: Vec<NaiveDate>,
	with_time: bool,
	format: Option<String>,
}

impl DatePicker {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			min_date: None,
			max_date: None,
			disabled_dates: Vec::new(),
			with_time: false,
			format: None,
		}
	}

	pub fn with_min_date(mut self, date: NaiveDate) -> Self {
		self.min_date = Some(date);
		self
	}

	pub fn with_max_date(mut self, date: NaiveDate) -> Self {
		self.max_date = Some(date);
		self
	}

	/// Dates that cannot be picked
	pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
		self.disabled_dates = dates.into_iter().collect();
		self
	}

	pub fn is_date_disabled(&self, date: NaiveDate) -> bool {
		self.min_date.is_some_and(|min| date < min)
			|| self.max_date.is_some_and(|max| date > max)
			|| self.disabled_dates.contains(&date)
	}

	pub fn with_time(mut self) -> Self {
		self.with_time = true;
		self
	}

	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = Some(format.into());
		self
	}

	/// Explicit display format, else the configured date or date-time format
	pub fn display_format(&self, ctx: &RenderContext) -> String {
		match &self.format {
			Some(format) => format.clone(),
			None if self.with_time => ctx.settings().datetime_format.clone(),
			None => ctx.settings().date_format.clone(),
		}
	}
}

impl Field for DatePicker {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"date-picker"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.push(Rule::Date);
		if let Some(min) = self.min_date {
			rules.push(Rule::AfterOrEqual(min.format(DATE_FORMAT).to_string()));
		}
		if let Some(max) = self.max_date {
			rules.push(Rule::BeforeOrEqual(max.format(DATE_FORMAT).to_string()));
		}
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		let iso = |date: &NaiveDate| date.format(DATE_FORMAT).to_string();
		context.insert("min_date".into(), json!(self.min_date.as_ref().map(iso)));
		context.insert("max_date".into(), json!(self.max_date.as_ref().map(iso)));
		context.insert(
			"disabled_dates".into(),
			json!(self.disabled_dates.iter().map(iso).collect::<Vec<_>>()),
		);
		context.insert("with_time".into(), json!(self.with_time));
		context.insert("format".into(), json!(self.display_format(ctx)));
	}
}
