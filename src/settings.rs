//! Form settings and the injectable configuration built from them
//!
//! Settings are plain data, loadable from TOML:
//!
//! ```toml
//! default_unguarded = ["email", "name"]
//! textarea_autosize = true
//! max_upload_size_kb = 4096
//!
//! [css]
//! input = "rounded border-gray-300"
//! ```
//!
//! A [`FormConfig`] pairs settings with the pieces that cannot be serialized (the
//! guard predicate and the translator). It is shared through an `Arc` by every
//! form a [`crate::FormFactory`] creates, so there is no process-wide state to
//! reset between tests or tenants.

use crate::error::FormResult;
use crate::guard::{GuardPredicate, Unguarded};
use crate::i18n::{IdentityTranslator, Translator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Serializable form settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
	/// Unguarded fields for forms that do not configure their own
	#[serde(default)]
	pub default_unguarded: Option<Unguarded>,

	/// Display format for date inputs
	#[serde(default = "default_date_format")]
	pub date_format: String,

	/// Display format for time inputs
	#[serde(default = "default_time_format")]
	pub time_format: String,

	/// Display format for date-time inputs
	#[serde(default = "default_datetime_format")]
	pub datetime_format: String,

	/// Whether textareas grow with their content unless configured otherwise
	#[serde(default)]
	pub textarea_autosize: bool,

	/// Upload size limit for file fields without their own limit
	#[serde(default = "default_max_upload_size_kb")]
	pub max_upload_size_kb: u64,

	/// Presentational class strings keyed by element
	#[serde(default)]
	pub css: IndexMap<String, String>,

	/// Application specific values
	#[serde(default)]
	pub custom: IndexMap<String, Value>,
}

fn default_date_format() -> String {
	"%Y-%m-%d".to_string()
}

fn default_time_format() -> String {
	"%H:%M".to_string()
}

fn default_datetime_format() -> String {
	"%Y-%m-%d %H:%M".to_string()
}

fn default_max_upload_size_kb() -> u64 {
	2048
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			default_unguarded: None,
			date_format: default_date_format(),
			time_format: default_time_format(),
			datetime_format: default_datetime_format(),
			textarea_autosize: false,
			max_upload_size_kb: default_max_upload_size_kb(),
			css: IndexMap::new(),
			custom: IndexMap::new(),
		}
	}
}

impl FormSettings {
	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str("textarea_autosize = true").unwrap();
	/// assert!(settings.textarea_autosize);
	/// assert_eq!(settings.max_upload_size_kb, 2048);
	/// ```
	pub fn from_toml_str(source: &str) -> FormResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	pub fn css_class(&self, key: &str) -> Option<&str> {
		self.css.get(key).map(String::as_str)
	}

	/// Look up an application specific value, falling back to `default`
	pub fn value(&self, key: &str, default: Value) -> Value {
		self.custom.get(key).cloned().unwrap_or(default)
	}
}

/// Injectable configuration shared by the forms of one factory
#[derive(Clone)]
pub struct FormConfig {
	settings: Arc<FormSettings>,
	guard_when: Option<GuardPredicate>,
	translator: Arc<dyn Translator>,
}

impl FormConfig {
	pub fn new(settings: FormSettings) -> Self {
		Self {
			settings: Arc::new(settings),
			guard_when: None,
			translator: Arc::new(IdentityTranslator),
		}
	}

	/// Copy of this configuration with the guard predicate replaced
	///
	/// The predicate returns `true` when a bound model's fields must stay guarded.
	pub fn with_guard_when<F>(&self, predicate: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		Self {
			guard_when: Some(GuardPredicate::new(predicate)),
			..self.clone()
		}
	}

	/// Copy of this configuration with a different default unguarded setting
	pub fn with_default_unguarded(&self, unguarded: impl Into<Unguarded>) -> Self {
		let mut settings = (*self.settings).clone();
		settings.default_unguarded = Some(unguarded.into());
		Self {
			settings: Arc::new(settings),
			..self.clone()
		}
	}

	pub fn with_translator(&self, translator: impl Translator + 'static) -> Self {
		Self {
			translator: Arc::new(translator),
			..self.clone()
		}
	}

	pub fn with_settings(&self, settings: FormSettings) -> Self {
		Self {
			settings: Arc::new(settings),
			..self.clone()
		}
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn settings_arc(&self) -> Arc<FormSettings> {
		Arc::clone(&self.settings)
	}

	pub fn guard_when(&self) -> Option<&GuardPredicate> {
		self.guard_when.as_ref()
	}

	pub fn translator(&self) -> Arc<dyn Translator> {
		Arc::clone(&self.translator)
	}
}

impl Default for FormConfig {
	fn default() -> Self {
		Self::new(FormSettings::default())
	}
}

impl fmt::Debug for FormConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormConfig")
			.field("settings", &self.settings)
			.field("guard_when", &self.guard_when)
			.finish_non_exhaustive()
	}
}
