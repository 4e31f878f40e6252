//! Request-scoped state consumed while rendering: old input and validation errors

use crate::text::{data_get, dot_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source of previously submitted values
///
/// When a submission fails validation the host redisplays the form; fields then
/// show what the user typed instead of their defaults.
pub trait OldInput: Send + Sync {
	/// Previously submitted value for `name` (bracket or dot notation)
	fn old(&self, name: &str) -> Option<Value>;

	fn old_or(&self, name: &str, fallback: Value) -> Value {
		self.old(name).unwrap_or(fallback)
	}
}

/// Old-input provider for requests that are not a redisplay
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOldInput;

impl OldInput for NoOldInput {
	fn old(&self, _name: &str) -> Option<Value> {
		None
	}
}

impl OldInput for Value {
	fn old(&self, name: &str) -> Option<Value> {
		data_get(self, name).cloned()
	}
}

impl OldInput for Map<String, Value> {
	fn old(&self, name: &str) -> Option<Value> {
		let mut segments = crate::text::name_segments(name).into_iter();
		let first = segments.next()?;
		let root = self.get(&first)?;
		let rest: Vec<String> = segments.collect();
		if rest.is_empty() {
			return Some(root.clone());
		}
		data_get(root, &rest.join(".")).cloned()
	}
}

/// Validation messages keyed by field name
///
/// Keys are normalized to dot notation so `items[0][label]` and
/// `items.0.label` address the same entry.
///
/// # Examples
///
/// ```
/// use formwork::ErrorBag;
///
/// let mut errors = ErrorBag::new();
/// errors.add("items.0.label", "The label is required.");
///
/// assert!(errors.has("items[0][label]"));
/// assert_eq!(errors.first("items[0][label]"), Some("The label is required."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBag {
	messages: IndexMap<String, Vec<String>>,
}

impl ErrorBag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, name: &str, message: impl Into<String>) {
		self.messages
			.entry(dot_name(name))
			.or_default()
			.push(message.into());
	}

	pub fn get(&self, name: &str) -> &[String] {
		self.messages
			.get(&dot_name(name))
			.map(|m| m.as_slice())
			.unwrap_or(&[])
	}

	pub fn first(&self, name: &str) -> Option<&str> {
		self.get(name).first().map(String::as_str)
	}

	pub fn has(&self, name: &str) -> bool {
		!self.get(name).is_empty()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}
}

impl<K, V> FromIterator<(K, V)> for ErrorBag
where
	K: AsRef<str>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut bag = Self::new();
		for (name, message) in iter {
			bag.add(name.as_ref(), message);
		}
		bag
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_no_old_input() {
		assert_eq!(NoOldInput.old("email"), None);
		assert_eq!(NoOldInput.old_or("email", json!("x")), json!("x"));
	}

	#[rstest]
	fn test_old_input_from_value() {
		// Arrange
		let old = json!({"email": "ada@example.com", "items": [{"label": "A"}]});

		// Act & Assert
		assert_eq!(old.old("email"), Some(json!("ada@example.com")));
		assert_eq!(old.old("items[0][label]"), Some(json!("A")));
		assert_eq!(old.old("missing"), None);
	}

	#[rstest]
	fn test_old_input_from_map() {
		// Arrange
		let mut old = Map::new();
		old.insert("tags".to_string(), json!(["a", "b"]));

		// Act & Assert
		assert_eq!(old.old("tags"), Some(json!(["a", "b"])));
		assert_eq!(old.old("tags[1]"), Some(json!("b")));
		assert_eq!(old.old("other"), None);
	}

	#[rstest]
	fn test_error_bag_collects_in_order() {
		// Arrange
		let errors: ErrorBag = [
			("email", "The email is required."),
			("email", "The email must be valid."),
			("name", "The name is required."),
		]
		.into_iter()
		.collect();

		// Act & Assert
		assert_eq!(errors.len(), 2);
		assert_eq!(errors.get("email").len(), 2);
		assert_eq!(errors.first("email"), Some("The email is required."));
		assert!(!errors.has("password"));
		assert!(errors.get("password").is_empty());
	}
}
