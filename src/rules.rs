//! Validation rule tokens
//!
//! Fields emit rules; an external validator interprets them. The token grammar
//! is a plain string convention (`required`, `min:8`, `regex:/^[a-z]+$/`), so
//! [`Rule`] exists to build those strings without typos, not to validate
//! anything itself.

use serde::{Serialize, Serializer};
use std::fmt;

/// A single validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
	Required,
	Nullable,
	/// Minimum length, size or value depending on the input type
	Min(f64),
	Max(f64),
	Between(f64, f64),
	/// Pattern written without delimiters; rendered as `regex:/pattern/`
	Regex(String),
	Confirmed,
	Email,
	Url,
	Array,
	Boolean,
	File,
	Image,
	Mimetypes(Vec<String>),
	In(Vec<String>),
	Date,
	AfterOrEqual(String),
	BeforeOrEqual(String),
	/// Any token this enum has no variant for, passed through verbatim
	Custom(String),
}

impl Rule {
	/// The token name without parameters (`min` for `min:8`)
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Rule;
	///
	/// assert_eq!(Rule::Min(8.0).name(), "min");
	/// assert_eq!(Rule::from("unique:users,email").name(), "unique");
	/// ```
	pub fn name(&self) -> &str {
		match self {
			Self::Required => "required",
			Self::Nullable => "nullable",
			Self::Min(_) => "min",
			Self::Max(_) => "max",
			Self::Between(..) => "between",
			Self::Regex(_) => "regex",
			Self::Confirmed => "confirmed",
			Self::Email => "email",
			Self::Url => "url",
			Self::Array => "array",
			Self::Boolean => "boolean",
			Self::File => "file",
			Self::Image => "image",
			Self::Mimetypes(_) => "mimetypes",
			Self::In(_) => "in",
			Self::Date => "date",
			Self::AfterOrEqual(_) => "after_or_equal",
			Self::BeforeOrEqual(_) => "before_or_equal",
			Self::Custom(token) => token.split(':').next().unwrap_or(token),
		}
	}

	pub fn is_required(&self) -> bool {
		match self {
			Self::Required => true,
			Self::Custom(token) => token == "required",
			_ => false,
		}
	}
}

// Integral bounds print without a fractional part so `min:8` stays `min:8`.
fn number(n: f64) -> String {
	if n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{}", n as i64)
	} else {
		n.to_string()
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Min(n) => write!(f, "min:{}", number(*n)),
			Self::Max(n) => write!(f, "max:{}", number(*n)),
			Self::Between(a, b) => write!(f, "between:{},{}", number(*a), number(*b)),
			Self::Regex(pattern) => write!(f, "regex:/{}/", pattern),
			Self::Mimetypes(types) => write!(f, "mimetypes:{}", types.join(",")),
			Self::In(values) => write!(f, "in:{}", values.join(",")),
			Self::AfterOrEqual(date) => write!(f, "after_or_equal:{}", date),
			Self::BeforeOrEqual(date) => write!(f, "before_or_equal:{}", date),
			Self::Custom(token) => f.write_str(token),
			other => f.write_str(other.name()),
		}
	}
}

impl Serialize for Rule {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl From<&str> for Rule {
	fn from(token: &str) -> Self {
		Self::Custom(token.to_string())
	}
}

impl From<String> for Rule {
	fn from(token: String) -> Self {
		Self::Custom(token)
	}
}

/// Render a rule list to its token strings
pub fn tokens(rules: &[Rule]) -> Vec<String> {
	rules.iter().map(ToString::to_string).collect()
}
