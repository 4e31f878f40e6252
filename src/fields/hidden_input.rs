//! Hidden `<input>` carrying a value through the submission
//!
//! Unlike the `hidden` flag, which suppresses rendering entirely, a hidden
//! input is rendered and submitted; it just is not shown.

use crate::field::{Field, FieldBase};

#[derive(Debug, Clone)]
pub struct HiddenInput {
	base: FieldBase,
}

impl HiddenInput {
	pub fn new(name: impl Into<String>) -> Self {
		let mut base = FieldBase::new(name);
		base.set_label_hidden(true);
		Self { base }
	}
}

impl Field for HiddenInput {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"hidden-input"
	}
}
