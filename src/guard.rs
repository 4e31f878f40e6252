//! Mass-assignment guarding for fields bound to a model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Which fields may bypass mass-assignment protection
///
/// Deserializes from either a boolean or a list of field names:
///
/// ```
/// use formwork::Unguarded;
///
/// let all: Unguarded = serde_json::from_str("true").unwrap();
/// let some: Unguarded = serde_json::from_str(r#"["email"]"#).unwrap();
///
/// assert!(all.allows("anything"));
/// assert!(some.allows("email"));
/// assert!(!some.allows("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unguarded {
	All(bool),
	Fields(BTreeSet<String>),
}

impl Unguarded {
	/// Unguard exactly the given field names
	pub fn fields<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Fields(names.into_iter().map(Into::into).collect())
	}

	pub fn allows(&self, name: &str) -> bool {
		match self {
			Self::All(all) => *all,
			Self::Fields(names) => names.contains(name),
		}
	}
}

impl Default for Unguarded {
	fn default() -> Self {
		Self::All(false)
	}
}

impl From<bool> for Unguarded {
	fn from(value: bool) -> Self {
		Self::All(value)
	}
}

/// Decides, for a bound model, whether its fields stay guarded
#[derive(Clone)]
pub struct GuardPredicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl GuardPredicate {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Returns `true` when the model's fields should be guarded
	pub fn guards(&self, model: &Value) -> bool {
		(self.0)(model)
	}
}

impl fmt::Debug for GuardPredicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("GuardPredicate(..)")
	}
}

/// Resolve the effective unguarded setting.
///
/// The first configured source wins outright; sources are never merged field by
/// field: the instance setting, then the configured default, then the guard
/// predicate applied to the bound model. Without any of these every field is
/// guarded.
pub fn resolve_unguarded(
	instance: Option<&Unguarded>,
	default: Option<&Unguarded>,
	predicate: Option<&GuardPredicate>,
	model: Option<&Value>,
) -> Unguarded {
	if let Some(instance) = instance {
		return instance.clone();
	}
	if let Some(default) = default {
		return default.clone();
	}
	match (predicate, model) {
		(Some(predicate), Some(model)) => Unguarded::All(!predicate.guards(model)),
		_ => Unguarded::All(false),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_instance_setting_wins_outright() {
		// Arrange
		let instance = Unguarded::fields(["email"]);
		let default = Unguarded::All(true);

		// Act
		let resolved = resolve_unguarded(Some(&instance), Some(&default), None, None);

		// Assert
		assert!(resolved.allows("email"));
		assert!(!resolved.allows("name"));
	}

	#[rstest]
	fn test_default_used_without_instance_setting() {
		let resolved = resolve_unguarded(None, Some(&Unguarded::All(true)), None, None);

		assert_eq!(resolved, Unguarded::All(true));
	}

	#[rstest]
	#[case(json!({"guarded": true}), false)]
	#[case(json!({"guarded": false}), true)]
	fn test_predicate_consulted_for_model(#[case] model: Value, #[case] expected: bool) {
		// Arrange
		let predicate = GuardPredicate::new(|model| model["guarded"].as_bool().unwrap_or(true));

		// Act
		let resolved = resolve_unguarded(None, None, Some(&predicate), Some(&model));

		// Assert
		assert_eq!(resolved, Unguarded::All(expected));
	}

	#[rstest]
	fn test_guarded_by_default() {
		let predicate = GuardPredicate::new(|_| false);

		assert_eq!(resolve_unguarded(None, None, None, None), Unguarded::All(false));
		assert_eq!(
			resolve_unguarded(None, None, Some(&predicate), None),
			Unguarded::All(false)
		);
	}
}
