//! Error types shared across the crate

/// Errors raised while configuring, loading settings for, or rendering forms.
///
/// Most field operations never fail: a deferred value that errors resolves to
/// `None` instead. The variants below cover the few cases where failing loudly
/// is the only way to surface a caller bug.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("{component} requires either a field or a field name")]
	MissingField { component: &'static str },
	#[error("options for field '{field}' mix grouped and flat entries")]
	MixedOptionShapes { field: String },
	#[error("invalid options: {0}")]
	InvalidOptions(String),
	#[error("failed to render view '{view}': {message}")]
	Render { view: String, message: String },
	#[error("invalid form settings: {0}")]
	Settings(#[from] toml::de::Error),
	#[error("failed to read form settings: {0}")]
	Io(#[from] std::io::Error),
}

impl FormError {
	/// Build a render error for the given view
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FormError;
	///
	/// let err = FormError::render("formwork/text-input.html", "template not found");
	/// assert_eq!(
	///     err.to_string(),
	///     "failed to render view 'formwork/text-input.html': template not found"
	/// );
	/// ```
	pub fn render(view: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Render {
			view: view.into(),
			message: message.into(),
		}
	}
}

pub type FormResult<T> = Result<T, FormError>;
