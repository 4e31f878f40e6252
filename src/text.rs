//! Name and label helpers

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Bracket segments of an input name, e.g. `[0]` and `[label]` in `items[0][label]`.
static BRACKET_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[([^\[\]]*)\]").expect("BRACKET_SEGMENT: invalid regex pattern")
});

/// Convert a field name to an id-safe slug
///
/// # Examples
///
/// ```
/// use formwork::text::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("first_name"), "first-name");
/// assert_eq!(slugify("items[0][label]"), "items-0-label");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
	text.to_lowercase()
		.chars()
		.map(|ch| match ch {
			'a'..='z' | '0'..='9' => ch,
			_ => '-',
		})
		.collect::<String>()
		.split('-')
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join("-")
}

/// Derive a human readable headline from a field name
///
/// Words are split on underscores, dashes, dots, whitespace, brackets and
/// camel-case boundaries; each word gets an upper-case first letter.
///
/// # Examples
///
/// ```
/// use formwork::text::headline;
///
/// assert_eq!(headline("first_name"), "First Name");
/// assert_eq!(headline("emailAddress"), "Email Address");
/// assert_eq!(headline("billing.zip-code"), "Billing Zip Code");
/// assert_eq!(headline("HTML"), "HTML");
/// ```
pub fn headline(name: &str) -> String {
	let mut words: Vec<String> = Vec::new();
	let mut current = String::new();
	let mut previous: Option<char> = None;

	for ch in name.chars() {
		if matches!(ch, '_' | '-' | '.' | '[' | ']') || ch.is_whitespace() {
			if !current.is_empty() {
				words.push(std::mem::take(&mut current));
			}
			previous = None;
			continue;
		}
		if ch.is_uppercase()
			&& previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
			&& !current.is_empty()
		{
			words.push(std::mem::take(&mut current));
		}
		current.push(ch);
		previous = Some(ch);
	}
	if !current.is_empty() {
		words.push(current);
	}

	words
		.iter()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Split an input name into its path segments
///
/// Both bracket (`items[0][label]`) and dot (`items.0.label`) notation are
/// accepted.
///
/// # Examples
///
/// ```
/// use formwork::text::name_segments;
///
/// assert_eq!(name_segments("items[0][label]"), vec!["items", "0", "label"]);
/// assert_eq!(name_segments("items.0.label"), vec!["items", "0", "label"]);
/// assert_eq!(name_segments("email"), vec!["email"]);
/// ```
pub fn name_segments(name: &str) -> Vec<String> {
	let (head, rest) = match name.find('[') {
		Some(pos) => (&name[..pos], &name[pos..]),
		None => (name, ""),
	};

	let mut segments: Vec<String> = head
		.split('.')
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect();
	segments.extend(
		BRACKET_SEGMENT
			.captures_iter(rest)
			.map(|caps| caps[1].to_string()),
	);
	segments
}

/// Convert an input name to dot notation (`items[0][label]` → `items.0.label`)
pub fn dot_name(name: &str) -> String {
	name_segments(name).join(".")
}

/// Look up a value by input name inside nested objects and arrays
///
/// # Examples
///
/// ```
/// use formwork::text::data_get;
/// use serde_json::json;
///
/// let data = json!({"items": [{"label": "A"}, {"label": "B"}]});
/// assert_eq!(data_get(&data, "items[1][label]"), Some(&json!("B")));
/// assert_eq!(data_get(&data, "items.0.label"), Some(&json!("A")));
/// assert_eq!(data_get(&data, "items[2][label]"), None);
/// ```
pub fn data_get<'a>(data: &'a Value, name: &str) -> Option<&'a Value> {
	let segments = name_segments(name);
	if segments.is_empty() {
		return None;
	}
	segments
		.iter()
		.try_fold(data, |current, segment| match current {
			Value::Object(map) => map.get(segment),
			Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
			_ => None,
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("email_address", "Email Address")]
	#[case("first_name", "First Name")]
	#[case("name", "Name")]
	#[case("postalCode2", "Postal Code2")]
	#[case("address2Line", "Address2 Line")]
	#[case("  spaced  out ", "Spaced Out")]
	fn test_headline(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(headline(input), expected);
	}

	#[rstest]
	#[case("Email Address", "email-address")]
	#[case("__private__", "private")]
	#[case("tags[]", "tags")]
	fn test_slugify(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(slugify(input), expected);
	}

	#[rstest]
	fn test_name_segments_mixed_notation() {
		assert_eq!(
			name_segments("address.lines[0]"),
			vec!["address", "lines", "0"]
		);
		assert_eq!(name_segments("tags[]"), vec!["tags", ""]);
		assert!(name_segments("").is_empty());
	}

	#[rstest]
	fn test_dot_name() {
		assert_eq!(dot_name("items[3][label]"), "items.3.label");
		assert_eq!(dot_name("email"), "email");
	}

	#[rstest]
	fn test_data_get_on_scalars() {
		let data = json!({"name": "Ada", "age": 36});

		assert_eq!(data_get(&data, "name"), Some(&json!("Ada")));
		assert_eq!(data_get(&data, "name[first]"), None);
		assert_eq!(data_get(&json!("plain"), "name"), None);
	}
}
