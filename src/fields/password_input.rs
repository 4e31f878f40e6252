//! Password input with confirmation, reveal toggle and strength meter

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde::Serialize;
use serde_json::{Map, Value, json};

const DEFAULT_MIN_LENGTH: usize = 8;

/// Coarse strength level shown by the strength meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
	Weak,
	Fair,
	Good,
	Strong,
}

impl PasswordStrength {
	pub fn from_score(score: u8) -> Self {
		match score {
			0 | 1 => Self::Weak,
			2 => Self::Fair,
			3 => Self::Good,
			_ => Self::Strong,
		}
	}

	/// Untranslated display label
	pub fn label(&self) -> &'static str {
		match self {
			Self::Weak => "Weak",
			Self::Fair => "Fair",
			Self::Good => "Good",
			Self::Strong => "Strong",
		}
	}
}

/// Score a password from 0 to 4
///
/// One point each for a length of at least 8, a length of at least 12, mixed
/// case, a digit and a symbol, capped at 4.
///
/// # Examples
///
/// ```
/// use formwork::fields::password_input::{PasswordStrength, strength, strength_score};
///
/// assert_eq!(strength_score(""), 0);
/// assert_eq!(strength_score("password"), 1);
/// assert_eq!(strength("Correct-Horse-7"), PasswordStrength::Strong);
/// ```
pub fn strength_score(password: &str) -> u8 {
	if password.is_empty() {
		return 0;
	}
	let length = password.chars().count();
	let checks = [
		length >= 8,
		length >= 12,
		password.chars().any(char::is_lowercase) && password.chars().any(char::is_uppercase),
		password.chars().any(|c| c.is_ascii_digit()),
		password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
	];
	let score = checks.iter().filter(|passed| **passed).count() as u8;
	score.min(4)
}

pub fn strength(password: &str) -> PasswordStrength {
	PasswordStrength::from_score(strength_score(password))
}

#[derive(Debug, Clone)]
pub struct PasswordInput {
	base: FieldBase,
	min_length: Option<usize>,
	confirmed: bool,
	revealable: bool,
	strength_meter: bool,
}

impl PasswordInput {
	/// Create a password input; a minimum length of 8 is applied by default
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let field = PasswordInput::new("password").confirmed();
	/// assert_eq!(formwork::rules::tokens(&field.rules()), vec!["min:8", "confirmed"]);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			min_length: Some(DEFAULT_MIN_LENGTH),
			confirmed: false,
			revealable: false,
			strength_meter: false,
		}
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn without_min_length(mut self) -> Self {
		self.min_length = None;
		self
	}

	pub fn min_length(&self) -> Option<usize> {
		self.min_length
	}

	/// Require a matching `<name>_confirmation` input
	pub fn confirmed(mut self) -> Self {
		self.confirmed = true;
		self
	}

	pub fn is_confirmed(&self) -> bool {
		self.confirmed
	}

	pub fn revealable(mut self) -> Self {
		self.revealable = true;
		self
	}

	pub fn with_strength_meter(mut self) -> Self {
		self.strength_meter = true;
		self
	}

	pub fn has_strength_meter(&self) -> bool {
		self.strength_meter
	}
}

impl Field for PasswordInput {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"password-input"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.extend(self.min_length.map(|n| Rule::Min(n as f64)));
		if self.confirmed {
			rules.push(Rule::Confirmed);
		}
		rules
	}

	// Passwords are never echoed back, not even from old input.
	fn value(&self, _ctx: &RenderContext) -> Option<Value> {
		None
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("min_length".into(), json!(self.min_length));
		context.insert("confirmed".into(), json!(self.confirmed));
		context.insert(
			"confirmation_name".into(),
			json!(format!("{}_confirmation", self.name())),
		);
		context.insert("revealable".into(), json!(self.revealable));
		context.insert("strength_meter".into(), json!(self.strength_meter));
		let levels: Vec<Value> = [
			PasswordStrength::Weak,
			PasswordStrength::Fair,
			PasswordStrength::Good,
			PasswordStrength::Strong,
		]
		.iter()
		.map(|level| json!({"level": level, "label": ctx.translate(level.label())}))
		.collect();
		context.insert("strength_levels".into(), Value::Array(levels));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::prelude::*;
	use crate::rules::tokens;
	use rstest::rstest;

	#[rstest]
	#[case("", 0, PasswordStrength::Weak)]
	#[case("abc", 0, PasswordStrength::Weak)]
	#[case("abcdefgh", 1, PasswordStrength::Weak)]
	#[case("abcdefgh1", 2, PasswordStrength::Fair)]
	#[case("Abcdefgh1", 3, PasswordStrength::Good)]
	#[case("Abcdefghijk1!", 4, PasswordStrength::Strong)]
	#[case("aB1!", 3, PasswordStrength::Good)]
	fn test_strength_scoring(
		#[case] password: &str,
		#[case] score: u8,
		#[case] level: PasswordStrength,
	) {
		assert_eq!(strength_score(password), score);
		assert_eq!(strength(password), level);
	}

	#[rstest]
	fn test_required_stays_first() {
		// Arrange
		let field = PasswordInput::new("password").required().confirmed();

		// Act & Assert
		assert_eq!(tokens(&field.rules()), vec!["required", "min:8", "confirmed"]);
	}

	#[rstest]
	fn test_min_length_can_be_dropped() {
		let field = PasswordInput::new("pin").without_min_length();

		assert!(field.rules().is_empty());
		assert_eq!(field.min_length(), None);
	}
}
