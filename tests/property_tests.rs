//! Property-based tests
//!
//! Invariants of field identity, labels, rules, evaluables, schema projection,
//! repeater cloning, option shapes and guarding.

use formwork::fields::concerns::Options;
use formwork::prelude::*;
use formwork::text::headline;
use proptest::prelude::*;
use rstest::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;

struct Blank;

impl ViewRenderer for Blank {
	fn render(&self, _view: &str, _context: &Value) -> FormResult<String> {
		Ok(String::new())
	}
}

fn field_name() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9_]{0,15}"
}

fn rule_token() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("required".to_string()),
		Just("string".to_string()),
		Just("nullable".to_string()),
		Just("alpha_dash".to_string()),
	]
}

// ============================================================================
// Field identity and labels
// ============================================================================

proptest! {
	/// Ids are never empty and do not change between reads
	#[rstest]
	fn prop_id_non_empty_and_stable(name in ".{0,24}") {
		let field = TextInput::new(name);

		prop_assert!(!field.id().is_empty());
		prop_assert_eq!(field.id(), field.id());
	}

	/// Without an explicit label the headline of the name is used
	#[rstest]
	fn prop_label_defaults_to_headline(name in field_name()) {
		let field = Textarea::new(name.clone());

		prop_assert_eq!(field.label(), Some(headline(&name)));
	}

	/// `required` appears exactly once, first, iff the field is required
	#[rstest]
	fn prop_required_rule_first_and_unique(
		tokens in prop::collection::vec(rule_token(), 0..6),
		required_calls in 0usize..3,
	) {
		let mut field = TextInput::new("name").with_rules(tokens.clone());
		for _ in 0..required_calls {
			field = field.required();
		}

		let rules = formwork::rules::tokens(&field.rules());
		let count = rules.iter().filter(|r| *r == "required").count();
		let expected = required_calls > 0 || tokens.iter().any(|t| t == "required");

		prop_assert_eq!(field.is_required(), expected);
		prop_assert_eq!(count, usize::from(expected));
		if expected {
			prop_assert_eq!(rules[0].as_str(), "required");
		}
	}
}

// ============================================================================
// Evaluables
// ============================================================================

proptest! {
	/// Literal, deferred and contextual values resolve as configured
	#[rstest]
	fn prop_evaluable_round_trip(text in ".{0,32}", key in "[a-z]{1,8}") {
		let literal: Evaluable<String> = Evaluable::Value(text.clone());
		let captured = text.clone();
		let deferred: Evaluable<String> = Evaluable::from_fn(move || captured.clone());
		let lookup = key.clone();
		let contextual: Evaluable<String> = Evaluable::contextual(move |record| {
			record[lookup.as_str()].as_str().unwrap_or_default().to_string()
		});
		let mut data = serde_json::Map::new();
		data.insert(key, json!(text));
		let record = Value::Object(data);

		prop_assert_eq!(literal.evaluate(), Some(text.clone()));
		prop_assert_eq!(deferred.evaluate(), Some(text.clone()));
		prop_assert_eq!(contextual.evaluate(), None);
		prop_assert_eq!(contextual.evaluate_with(Some(&record)), Some(text));
	}
}

// ============================================================================
// Form projections
// ============================================================================

proptest! {
	/// Hidden fields are dropped, order is kept and the schema is untouched
	#[rstest]
	fn prop_visible_schema(hidden in prop::collection::vec(any::<bool>(), 0..12)) {
		let form = hidden.iter().enumerate().fold(Form::new(), |form, (i, hide)| {
			form.with_field(TextInput::new(format!("f{}", i)).visible(!hide))
		});

		let mut visible = form.visible_schema();
		let names: Vec<String> = visible.iter().map(|f| f.name().to_string()).collect();
		let expected: Vec<String> = hidden
			.iter()
			.enumerate()
			.filter(|(_, hide)| !**hide)
			.map(|(i, _)| format!("f{}", i))
			.collect();
		visible.clear();

		prop_assert_eq!(names, expected);
		prop_assert_eq!(form.field_count(), hidden.len());
	}

	/// Rule map keys are exactly the fields with a non-empty rule list
	#[rstest]
	fn prop_validation_rule_keys(ruled in prop::collection::vec(any::<bool>(), 0..12)) {
		let form = ruled.iter().enumerate().fold(Form::new(), |form, (i, has_rules)| {
			let field = TextInput::new(format!("f{}", i));
			form.with_field(if *has_rules { field.with_rule("string") } else { field })
		});

		let keys: BTreeSet<String> = form.validation_rules().into_keys().collect();
		let expected: BTreeSet<String> = ruled
			.iter()
			.enumerate()
			.filter(|(_, has_rules)| **has_rules)
			.map(|(i, _)| format!("f{}", i))
			.collect();

		prop_assert_eq!(keys, expected);
	}
}

// ============================================================================
// Repeater cloning
// ============================================================================

proptest! {
	/// Every stored item becomes a clone named and identified after the
	/// original names; items without a value keep the child's default and the
	/// template stays unseeded
	#[rstest]
	fn prop_repeater_clones(
		parent in field_name(),
		child in field_name(),
		labels in prop::collection::vec(prop::option::of("[A-Za-z ]{1,12}"), 0..8),
	) {
		let ctx = RenderContext::new(Blank);
		let stored: Vec<Value> = labels
			.iter()
			.map(|label| {
				let mut item = serde_json::Map::new();
				if let Some(label) = label {
					item.insert(child.clone(), json!(label));
				}
				Value::Object(item)
			})
			.collect();
		let items = Repeater::new(parent.clone())
			.with_field(TextInput::new(child.clone()).with_default("template default"))
			.with_default(Value::Array(stored));

		let rows = items.item_fields(&ctx);
		let template = items.template_fields();

		prop_assert_eq!(rows.len(), labels.len());
		for (index, (row, label)) in rows.iter().zip(&labels).enumerate() {
			prop_assert_eq!(row[0].name(), format!("{}[{}][{}]", parent, index, child));
			prop_assert_eq!(row[0].id(), format!("{}_{}_{}", parent, index, child));
			let expected = label.as_ref().map_or(json!("template default"), |label| json!(label));
			prop_assert_eq!(row[0].default_value(), Some(expected));
		}
		prop_assert_eq!(template[0].name(), format!("{}[__INDEX__][{}]", parent, child));
		prop_assert_eq!(template[0].default_value(), None);
	}

	/// Simple-mode clones carry no label at all
	#[rstest]
	fn prop_simple_repeater_strips_labels(parent in field_name(), values in prop::collection::vec("[a-z]{1,8}", 1..6)) {
		let ctx = RenderContext::new(Blank);
		let tags = Repeater::simple(parent, TextInput::new("tag").with_label("Tag"))
			.with_default(json!(values));

		let rows = tags.item_fields(&ctx);

		for row in &rows {
			prop_assert_eq!(row[0].label(), None);
		}
		prop_assert_eq!(tags.template_fields()[0].label(), None);
	}
}

// ============================================================================
// Options and guarding
// ============================================================================

proptest! {
	/// Grouping is detected only for uniform shapes
	#[rstest]
	fn prop_grouped_option_shapes(groups in prop::collection::vec(any::<bool>(), 1..8)) {
		let options = groups.iter().enumerate().fold(Options::new(), |options, (i, group)| {
			if *group {
				options.with_group(format!("g{}", i), [(format!("v{}", i), "Label")])
			} else {
				options.with_option(format!("v{}", i), "Label")
			}
		});
		let field = Select::new("choice").with_options(options);

		let result = field.has_grouped_options();

		if groups.iter().all(|g| *g) {
			prop_assert!(matches!(result, Ok(true)));
		} else if groups.iter().all(|g| !*g) {
			prop_assert!(matches!(result, Ok(false)));
		} else {
			let is_mixed = matches!(result, Err(FormError::MixedOptionShapes { .. }));
			prop_assert!(is_mixed);
		}
	}

	/// An instance field set wins outright over the configured default
	#[rstest]
	fn prop_instance_unguarded_wins(
		unguarded in prop::collection::btree_set(field_name(), 0..5),
		default in any::<bool>(),
		probe in field_name(),
	) {
		let factory = FormFactory::new(FormConfig::default().with_default_unguarded(default));
		let form = factory.make().unguard_fields(unguarded.clone());

		prop_assert_eq!(form.is_field_unguarded(&probe), unguarded.contains(&probe));
	}
}
