//! Form assembly tests
//!
//! Configuration loading, guarding, rule aggregation and metadata extraction
//! exercised through the public API only.

use formwork::metadata::FormExt;
use formwork::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::io::Write;

struct Blank;

impl ViewRenderer for Blank {
	fn render(&self, _view: &str, _context: &Value) -> FormResult<String> {
		Ok(String::new())
	}
}

#[fixture]
fn ctx() -> RenderContext {
	RenderContext::new(Blank)
}

fn signup_form(factory: &FormFactory) -> Form {
	factory
		.make()
		.with_id("signup")
		.with_action("/register")
		.with_field(TextInput::new("name").required().with_max_length(120))
		.with_field(TextInput::new("email").email().required())
		.with_field(PasswordInput::new("password").confirmed())
		.with_field(
			Select::new("plan")
				.with_options([("free", "Free"), ("pro", "Pro")])
				.with_default("free"),
		)
		.with_field(Checkbox::new("newsletter"))
		.with_field(Submit::new("submit"))
}

#[rstest]
fn test_validation_rules_follow_schema_order() {
	// Arrange
	let form = signup_form(&FormFactory::default());

	// Act
	let rules = form.validation_rules();

	// Assert
	assert_eq!(
		rules.keys().map(String::as_str).collect::<Vec<_>>(),
		vec!["name", "email", "password"]
	);
	assert_eq!(rules["name"], vec!["required", "max:120"]);
	assert_eq!(rules["email"], vec!["required", "email"]);
	assert_eq!(rules["password"], vec!["min:8", "confirmed"]);
}

#[rstest]
fn test_settings_file_drives_guarding() {
	// Arrange
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "default_unguarded = true\nmax_upload_size_kb = 512").unwrap();
	let settings = FormSettings::from_file(file.path()).unwrap();
	let factory = FormFactory::new(FormConfig::new(settings));

	// Act
	let open = factory.make();
	let narrowed = factory.make().unguard_fields(["email"]);

	// Assert
	assert!(open.is_field_unguarded("name"));
	assert!(narrowed.is_field_unguarded("email"));
	assert!(!narrowed.is_field_unguarded("name"));
	assert_eq!(factory.config().settings().max_upload_size_kb, 512);
}

#[rstest]
fn test_factories_do_not_share_configuration() {
	// Arrange
	let open = FormFactory::new(FormConfig::default().with_default_unguarded(true));
	let closed = FormFactory::default();

	// Act & Assert
	assert!(open.make().is_field_unguarded("name"));
	assert!(!closed.make().is_field_unguarded("name"));
}

#[rstest]
fn test_default_data_resolves_deferred_and_record_defaults(ctx: RenderContext) {
	// Arrange
	let form = Form::new()
		.with_model(json!({"first": "Ada", "last": "Lovelace"}))
		.with_field(TextInput::new("first"))
		.with_field(TextInput::new("country").with_default_using(|| Ok(json!("UK"))))
		.with_field(TextInput::new("display").with_default_for_record(|record| {
			Ok(json!(format!("{} {}", record["first"].as_str().unwrap_or_default(), record["last"].as_str().unwrap_or_default())))
		}))
		.with_field(TextInput::new("broken").with_default_using(|| anyhow::bail!("no lookup")));

	// Act
	let data = form.default_data(&ctx);

	// Assert
	assert_eq!(data["first"], json!("Ada"));
	assert_eq!(data["country"], json!("UK"));
	assert_eq!(data["display"], json!("Ada Lovelace"));
	assert_eq!(data["broken"], Value::Null);
}

#[rstest]
fn test_nested_rules_use_wildcard_keys() {
	// Arrange
	let form = Form::new()
		.with_field(
			Repeater::new("addresses")
				.with_max_items(3)
				.with_field(TextInput::new("street").required())
				.with_field(Repeater::new("phones").with_field(TextInput::new("number").tel().required())),
		)
		.with_field(KeyValue::new("meta").required());

	// Act
	let rules = form.all_validation_rules();

	// Assert
	assert_eq!(rules["addresses"], vec!["array", "max:3"]);
	assert_eq!(rules["addresses.*.street"], vec!["required"]);
	assert_eq!(rules["addresses.*.phones.*.number"], vec!["required"]);
	assert_eq!(rules["meta"], vec!["required", "array"]);
	assert!(!rules.contains_key("addresses.*.phones"));
}

#[rstest]
fn test_metadata_describes_form(ctx: RenderContext) {
	// Arrange
	let form = signup_form(&FormFactory::default())
		.background()
		.with_debounce(300)
		.submit_on_change_of(["plan"])
		.with_confirmation(Confirmation::new().danger());

	// Act
	let metadata = serde_json::to_value(form.to_metadata(&ctx)).unwrap();

	// Assert
	assert_eq!(metadata["id"], json!("signup"));
	assert_eq!(metadata["action"], json!("/register"));
	assert_eq!(metadata["has_files"], json!(false));
	assert_eq!(metadata["fields"].as_array().unwrap().len(), 6);
	assert_eq!(metadata["fields"][3]["value"], json!("free"));
	assert_eq!(metadata["behaviors"]["debounce_ms"], json!(300));
	assert_eq!(metadata["behaviors"]["submit_on_change"], json!({"fields": ["plan"]}));
	assert_eq!(
		metadata["behaviors"]["confirmation"]["text"],
		json!("Are you sure you want to continue?")
	);
	assert_eq!(metadata["unguarded"], json!(false));
}

#[rstest]
fn test_cloned_field_is_independent() {
	// Arrange
	let shared = TextInput::new("name");
	let mut first = Form::new().with_field(shared.clone());
	let second = Form::new().with_field(shared);

	// Act
	if let Some(field) = first.get_field_mut("name") {
		field.base_mut().set_required(true);
	}

	// Assert
	assert!(first.get_field("name").unwrap().is_required());
	assert!(!second.get_field("name").unwrap().is_required());
}

#[rstest]
fn test_downcast_schema_field() {
	let form = signup_form(&FormFactory::default());

	let select = form
		.get_field("plan")
		.and_then(|field| field.downcast_ref::<Select>())
		.unwrap();

	assert_eq!(select.options().len(), 2);
}
