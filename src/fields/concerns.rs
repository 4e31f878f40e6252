//! Capability concerns shared by several field types
//!
//! Each concern is a small state struct embedded in the field plus a trait
//! whose provided methods implement the behavior on top of it. A field opts in
//! by embedding the state and implementing the two accessors.

use crate::error::{FormError, FormResult};
use crate::evaluable::Evaluable;
use crate::field::Field;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// One entry of an options map: a display label or a labelled group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionEntry {
	Label(String),
	Group(IndexMap<String, String>),
}

/// Ordered value → label map for choice fields
///
/// Keys are the submitted values. Integer keys are stored in their decimal
/// string form, matching what a browser submits.
///
/// # Examples
///
/// ```
/// use formwork::fields::concerns::Options;
///
/// let options = Options::new()
///     .with_option("nl", "Netherlands")
///     .with_option(31, "Area code 31");
///
/// assert_eq!(options.keys().collect::<Vec<_>>(), vec!["nl", "31"]);
/// assert_eq!(options.label("31"), Some("Area code 31"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Options(IndexMap<String, OptionEntry>);

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_option(mut self, value: impl ToString, label: impl Into<String>) -> Self {
		self.insert(value, label);
		self
	}

	/// Add a labelled group of `(value, label)` pairs
	pub fn with_group<I, K, V>(mut self, group: impl Into<String>, options: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: ToString,
		V: Into<String>,
	{
		let entries = options
			.into_iter()
			.map(|(value, label)| (value.to_string(), label.into()))
			.collect();
		self.0.insert(group.into(), OptionEntry::Group(entries));
		self
	}

	pub fn insert(&mut self, value: impl ToString, label: impl Into<String>) {
		self.0
			.insert(value.to_string(), OptionEntry::Label(label.into()));
	}

	/// Build options from JSON
	///
	/// Objects map values to labels (or to nested objects for groups); arrays of
	/// scalars use each item as both value and label.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::fields::concerns::Options;
	/// use serde_json::json;
	///
	/// let flat = Options::from_json(&json!({"draft": "Draft", "1": "Published"})).unwrap();
	/// assert_eq!(flat.len(), 2);
	///
	/// let list = Options::from_json(&json!(["red", "green"])).unwrap();
	/// assert_eq!(list.label("green"), Some("green"));
	///
	/// assert!(Options::from_json(&json!("red")).is_err());
	/// ```
	pub fn from_json(value: &Value) -> FormResult<Self> {
		let mut options = Self::new();
		match value {
			Value::Object(map) => {
				for (key, entry) in map {
					let entry = match entry {
						Value::Object(group) => OptionEntry::Group(
							group
								.iter()
								.map(|(value, label)| Ok::<_, FormError>((value.clone(), scalar(label)?)))
								.collect::<FormResult<_>>()?,
						),
						other => OptionEntry::Label(scalar(other)?),
					};
					options.0.insert(key.clone(), entry);
				}
			}
			Value::Array(items) => {
				for item in items {
					let text = scalar(item)?;
					options.0.insert(text.clone(), OptionEntry::Label(text));
				}
			}
			other => {
				return Err(FormError::InvalidOptions(format!(
					"expected an object or an array, got {}",
					other
				)));
			}
		}
		Ok(options)
	}

	pub fn get(&self, value: &str) -> Option<&OptionEntry> {
		self.0.get(value)
	}

	/// Label for a flat option value
	pub fn label(&self, value: &str) -> Option<&str> {
		match self.0.get(value)? {
			OptionEntry::Label(label) => Some(label),
			OptionEntry::Group(_) => None,
		}
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionEntry)> {
		self.0.iter().map(|(key, entry)| (key.as_str(), entry))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `Some(true)` when every entry is a group, `Some(false)` when every entry
	/// is a label (or there are none), `None` for a mix
	pub fn grouped(&self) -> Option<bool> {
		let groups = self
			.0
			.values()
			.filter(|entry| matches!(entry, OptionEntry::Group(_)))
			.count();
		match groups {
			0 => Some(false),
			n if n == self.0.len() => Some(true),
			_ => None,
		}
	}
}

fn scalar(value: &Value) -> FormResult<String> {
	match value {
		Value::String(text) => Ok(text.clone()),
		Value::Number(number) => Ok(number.to_string()),
		Value::Bool(flag) => Ok(flag.to_string()),
		other => Err(FormError::InvalidOptions(format!(
			"option labels must be scalars, got {}",
			other
		))),
	}
}

impl<K, V> FromIterator<(K, V)> for Options
where
	K: ToString,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut options = Self::new();
		for (value, label) in iter {
			options.insert(value, label);
		}
		options
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Options
where
	K: ToString,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

/// Predicate deciding per option whether it is disabled
#[derive(Clone)]
pub struct OptionPredicate(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>);

impl OptionPredicate {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&str, &str) -> bool + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	pub fn test(&self, value: &str, label: &str) -> bool {
		(self.0)(value, label)
	}
}

impl fmt::Debug for OptionPredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("OptionPredicate(..)")
	}
}

/// Options state embedded by choice fields
#[derive(Debug, Clone, Default)]
pub struct OptionsState {
	options: Option<Evaluable<Options>>,
	disabled: Option<OptionPredicate>,
}

/// Fields offering a fixed set of choices
pub trait HasOptions: Field {
	fn options_state(&self) -> &OptionsState;

	fn options_state_mut(&mut self) -> &mut OptionsState;

	/// Resolved options; empty when unset or when a deferred source fails
	fn options(&self) -> Options {
		self.options_for(None)
	}

	fn options_for(&self, record: Option<&Value>) -> Options {
		self.options_state()
			.options
			.as_ref()
			.and_then(|options| options.evaluate_with(record))
			.unwrap_or_default()
	}

	fn is_option_disabled(&self, value: &str, label: &str) -> bool {
		self.options_state()
			.disabled
			.as_ref()
			.is_some_and(|predicate| predicate.test(value, label))
	}

	/// Whether the resolved options are two-level groups
	///
	/// Mixed grouped and flat entries are rejected.
	fn has_grouped_options(&self) -> FormResult<bool> {
		self.options()
			.grouped()
			.ok_or_else(|| FormError::MixedOptionShapes {
				field: self.name().to_string(),
			})
	}

	fn with_options(mut self, options: impl Into<Options>) -> Self
	where
		Self: Sized,
	{
		self.options_state_mut().options = Some(Evaluable::Value(options.into()));
		self
	}

	/// Options computed each time they are read
	fn with_options_using<F>(mut self, f: F) -> Self
	where
		Self: Sized,
		F: Fn() -> anyhow::Result<Options> + Send + Sync + 'static,
	{
		self.options_state_mut().options = Some(Evaluable::try_from_fn(f));
		self
	}

	/// Options computed from the bound record
	fn with_options_for_record<F>(mut self, f: F) -> Self
	where
		Self: Sized,
		F: Fn(&Value) -> anyhow::Result<Options> + Send + Sync + 'static,
	{
		self.options_state_mut().options = Some(Evaluable::try_contextual(f));
		self
	}

	fn disable_option_when<F>(mut self, predicate: F) -> Self
	where
		Self: Sized,
		F: Fn(&str, &str) -> bool + Send + Sync + 'static,
	{
		self.options_state_mut().disabled = Some(OptionPredicate::new(predicate));
		self
	}

	/// Options in view form: `[{value, label, disabled}]`, or
	/// `[{label, options: [...]}]` when grouped
	fn options_context(&self, record: Option<&Value>) -> Value {
		let options = self.options_for(record);
		let entry = |value: &str, label: &str| {
			json!({
				"value": value,
				"label": label,
				"disabled": self.is_option_disabled(value, label),
			})
		};
		match options.grouped() {
			Some(false) => Value::Array(
				options
					.iter()
					.filter_map(|(value, option)| match option {
						OptionEntry::Label(label) => Some(entry(value, label)),
						OptionEntry::Group(_) => None,
					})
					.collect(),
			),
			Some(true) => Value::Array(
				options
					.iter()
					.filter_map(|(group, option)| match option {
						OptionEntry::Group(items) => Some(json!({
							"label": group,
							"options": items
								.iter()
								.map(|(value, label)| entry(value, label))
								.collect::<Vec<_>>(),
						})),
						OptionEntry::Label(_) => None,
					})
					.collect(),
			),
			None => {
				tracing::warn!(field = %self.name(), "options mix grouped and flat entries");
				Value::Array(Vec::new())
			}
		}
	}
}

/// Numeric lower and upper bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMax {
	min: Option<f64>,
	max: Option<f64>,
}

impl MinMax {
	pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
		Self { min, max }
	}
}

/// Fields with numeric bounds; `min <= max` is left to the caller
pub trait HasMinMax: Field {
	fn min_max(&self) -> &MinMax;

	fn min_max_mut(&mut self) -> &mut MinMax;

	fn min_value(&self) -> Option<f64> {
		self.min_max().min
	}

	fn max_value(&self) -> Option<f64> {
		self.min_max().max
	}

	fn with_min(mut self, min: f64) -> Self
	where
		Self: Sized,
	{
		self.min_max_mut().min = Some(min);
		self
	}

	fn with_max(mut self, max: f64) -> Self
	where
		Self: Sized,
	{
		self.min_max_mut().max = Some(max);
		self
	}
}

/// Step increment for numeric inputs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step(Option<f64>);

impl Step {
	pub fn new(step: Option<f64>) -> Self {
		Self(step)
	}
}

pub trait HasStep: Field {
	fn step_state(&self) -> &Step;

	fn step_state_mut(&mut self) -> &mut Step;

	fn step(&self) -> Option<f64> {
		self.step_state().0
	}

	fn with_step(mut self, step: f64) -> Self
	where
		Self: Sized,
	{
		self.step_state_mut().0 = Some(step);
		self
	}
}

/// Layout flag for choice lists rendered on one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inline(bool);

pub trait CanBeInline: Field {
	fn inline_state(&self) -> &Inline;

	fn inline_state_mut(&mut self) -> &mut Inline;

	fn is_inline(&self) -> bool {
		self.inline_state().0
	}

	fn inline(self) -> Self
	where
		Self: Sized,
	{
		self.with_inline(true)
	}

	fn with_inline(mut self, inline: bool) -> Self
	where
		Self: Sized,
	{
		self.inline_state_mut().0 = inline;
		self
	}
}
