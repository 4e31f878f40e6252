//! Slider over a numeric range

use crate::field::{Field, FieldBase};
use crate::fields::concerns::{HasMinMax, HasStep, MinMax, Step};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
pub struct Range {
	base: FieldBase,
	min_max: MinMax,
	step: Step,
	show_value: bool,
}

impl Range {
	/// Create a slider from 0 to 100 in steps of 1
	///
	/// # Examples
	///
	/// ```
	/// use formwork::prelude::*;
	///
	/// let volume = Range::new("volume").with_max(11.0);
	/// assert_eq!(volume.min_value(), Some(0.0));
	/// assert_eq!(volume.max_value(), Some(11.0));
	/// assert_eq!(volume.step(), Some(1.0));
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			min_max: MinMax::new(Some(0.0), Some(100.0)),
			step: Step::new(Some(1.0)),
			show_value: true,
		}
	}

	pub fn with_show_value(mut self, show: bool) -> Self {
		self.show_value = show;
		self
	}
}

impl Field for Range {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"range"
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		rules.extend(self.min_value().map(Rule::Min));
		rules.extend(self.max_value().map(Rule::Max));
		rules
	}

	fn extend_context(&self, _ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("min".into(), json!(self.min_value()));
		context.insert("max".into(), json!(self.max_value()));
		context.insert("step".into(), json!(self.step()));
		context.insert("show_value".into(), json!(self.show_value));
	}
}

impl HasMinMax for Range {
	fn min_max(&self) -> &MinMax {
		&self.min_max
	}

	fn min_max_mut(&mut self) -> &mut MinMax {
		&mut self.min_max
	}
}

impl HasStep for Range {
	fn step_state(&self) -> &Step {
		&self.step
	}

	fn step_state_mut(&mut self) -> &mut Step {
		&mut self.step
	}
}
