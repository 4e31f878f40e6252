//! String lookup for the labels and prompts fields generate on their own

use std::collections::HashMap;

/// Injectable translation lookup
///
/// Implementations must fall back to returning the key itself when no
/// translation is known.
pub trait Translator: Send + Sync {
	fn translate(&self, key: &str) -> String;
}

/// Translator that returns every key untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
	fn translate(&self, key: &str) -> String {
		key.to_string()
	}
}

/// A message catalog holding translations for one locale
///
/// # Example
/// ```
/// use formwork::i18n::{MessageCatalog, Translator};
///
/// let mut catalog = MessageCatalog::new("nl");
/// catalog.add_translation("Select an option", "Kies een optie");
///
/// assert_eq!(catalog.translate("Select an option"), "Kies een optie");
/// assert_eq!(catalog.translate("Add item"), "Add item");
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
		}
	}

	/// Build a catalog from `(message, translation)` pairs
	pub fn with_messages<I, K, V>(locale: &str, messages: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut catalog = Self::new(locale);
		for (message, translation) in messages {
			catalog.add_translation(message, translation);
		}
		catalog
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	pub fn add_translation(&mut self, message: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(message.into(), translation.into());
	}

	pub fn get(&self, message: &str) -> Option<&String> {
		self.messages.get(message)
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}

impl Translator for MessageCatalog {
	fn translate(&self, key: &str) -> String {
		self.get(key).cloned().unwrap_or_else(|| key.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_identity_translator_returns_key() {
		assert_eq!(IdentityTranslator.translate("Submit"), "Submit");
	}

	#[rstest]
	fn test_catalog_from_pairs() {
		// Arrange
		let catalog = MessageCatalog::with_messages("fr", [("Submit", "Envoyer"), ("Key", "Clé")]);

		// Act & Assert
		assert_eq!(catalog.locale(), "fr");
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.translate("Submit"), "Envoyer");
		assert_eq!(catalog.translate("Value"), "Value");
	}

	#[rstest]
	fn test_empty_catalog() {
		let catalog = MessageCatalog::new("de");

		assert!(catalog.is_empty());
		assert_eq!(catalog.get("Cancel"), None);
	}
}
