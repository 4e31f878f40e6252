//! Label, hint and error chrome around a single control

use crate::error::{FormError, FormResult};
use crate::evaluable::Evaluable;
use crate::field::Field;
use crate::fields::TextInput;
use crate::renderer::RenderContext;
use serde_json::json;

pub const WRAPPER_VIEW: &str = "formwork/wrapper.html";

/// Overrides applied to the wrapped field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperProps {
	pub name: Option<String>,
	pub label: Option<String>,
	pub hint: Option<String>,
	pub required: Option<bool>,
}

impl WrapperProps {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}
}

#[derive(Debug, Clone)]
pub struct FieldWrapper {
	field: Box<dyn Field>,
}

impl FieldWrapper {
	/// Wrap `field`, or a plain text input when only a non-empty name is given
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FormError;
	/// use formwork::wrapper::{FieldWrapper, WrapperProps};
	///
	/// let wrapper = FieldWrapper::new(None, WrapperProps::named("email")).unwrap();
	/// assert_eq!(wrapper.field().kind(), "text-input");
	///
	/// let missing = FieldWrapper::new(None, WrapperProps::named(""));
	/// assert!(matches!(missing, Err(FormError::MissingField { component: "FieldWrapper" })));
	/// ```
	pub fn new(field: Option<Box<dyn Field>>, props: WrapperProps) -> FormResult<Self> {
		let name = props.name.as_deref().filter(|name| !name.is_empty());
		let mut field = match (field, name) {
			(Some(field), _) => field,
			(None, Some(name)) => Box::new(TextInput::new(name)) as Box<dyn Field>,
			(None, None) => {
				return Err(FormError::MissingField {
					component: "FieldWrapper",
				});
			}
		};
		let base = field.base_mut();
		if let Some(label) = props.label {
			base.set_label(Evaluable::Value(label));
		}
		if let Some(hint) = props.hint {
			base.set_hint(Evaluable::Value(hint));
		}
		if let Some(required) = props.required {
			base.set_required(required);
		}
		Ok(Self { field })
	}

	pub fn field(&self) -> &dyn Field {
		self.field.as_ref()
	}

	pub fn render(&self, ctx: &RenderContext) -> FormResult<String> {
		if self.field.is_hidden() {
			return Ok(String::new());
		}
		let control = self.field.render(ctx)?;
		let errors = ctx.errors().get(self.field.name());
		ctx.renderer().render(
			WRAPPER_VIEW,
			&json!({
				"field": self.field.context(ctx),
				"control": control,
				"errors": errors,
			}),
		)
	}
}
