//! Everything needed to declare and render forms
//!
//! ```
//! use formwork::prelude::*;
//!
//! let form = Form::new().with_field(Select::new("country").with_options([("nl", "Netherlands")]));
//! assert_eq!(form.field_count(), 1);
//! ```

pub use crate::error::{FormError, FormResult};
pub use crate::evaluable::Evaluable;
pub use crate::field::{Field, FieldBuilder};
pub use crate::fields::concerns::{CanBeInline, HasMinMax, HasOptions, HasStep, Options};
pub use crate::fields::{
	ButtonStyle, Checkbox, CheckboxList, DatePicker, FileUpload, HiddenInput, InputType, KeyValue,
	PasswordInput, PasswordStrength, Radio, Range, Repeater, RichEditor, Select, Submit, TextInput,
	Textarea, Toggle, ToolbarButton,
};
pub use crate::form::{Confirmation, Form, FormFactory, Method};
pub use crate::guard::Unguarded;
pub use crate::renderer::{RenderContext, TeraRenderer, ViewRenderer};
pub use crate::rules::Rule;
pub use crate::settings::{FormConfig, FormSettings};
