//! Radio buttons over a set of options

use crate::field::{Field, FieldBase};
use crate::fields::concerns::{CanBeInline, HasOptions, Inline, OptionsState};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Radio {
	base: FieldBase,
	options: OptionsState,
	inline: Inline,
}

impl Radio {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			options: OptionsState::default(),
			inline: Inline::default(),
		}
	}
}

impl Field for Radio {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"radio"
	}

	// The submitted value must be one of the offered options.
	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		let options = self.options();
		if !options.is_empty() && options.grouped() == Some(false) {
			rules.push(Rule::In(options.keys().map(str::to_string).collect()));
		}
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("options".into(), self.options_context(ctx.record()));
		context.insert("inline".into(), json!(self.is_inline()));
	}
}

impl HasOptions for Radio {
	fn options_state(&self) -> &OptionsState {
		&self.options
	}

	fn options_state_mut(&mut self) -> &mut OptionsState {
		&mut self.options
	}
}

impl CanBeInline for Radio {
	fn inline_state(&self) -> &Inline {
		&self.inline
	}

	fn inline_state_mut(&mut self) -> &mut Inline {
		&mut self.inline
	}
}
