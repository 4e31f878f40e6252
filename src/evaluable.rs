//! Values that are either stored literally or computed when read
//!
//! A field definition is often rendered in two situations: generically (schema
//! introspection, a create form) and against a bound record (an edit form). An
//! [`Evaluable`] captures both: a plain value, a deferred computation that needs
//! nothing, or a contextual computation that needs the record.
//!
//! The variant is fixed when the value is configured, so reading it never has to
//! guess how a closure wants to be called.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Deferred<T> = Arc<dyn Fn() -> anyhow::Result<T> + Send + Sync>;
type Contextual<T> = Arc<dyn Fn(&Value) -> anyhow::Result<T> + Send + Sync>;

/// A configuration value resolved at read time
pub enum Evaluable<T> {
	/// Literal value, returned unchanged
	Value(T),
	/// Computation that needs no context
	Deferred(Deferred<T>),
	/// Computation that needs the bound record
	Contextual(Contextual<T>),
}

impl<T: Clone + 'static> Evaluable<T> {
	/// Wrap an infallible zero-argument computation
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Evaluable;
	///
	/// let label: Evaluable<String> = Evaluable::from_fn(|| "Computed".to_string());
	/// assert_eq!(label.evaluate(), Some("Computed".to_string()));
	/// ```
	pub fn from_fn<F>(f: F) -> Self
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		Self::Deferred(Arc::new(move || Ok::<T, anyhow::Error>(f())))
	}

	/// Wrap a fallible zero-argument computation
	///
	/// An error resolves to `None` when the value is read.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Evaluable;
	///
	/// let broken: Evaluable<String> = Evaluable::try_from_fn(|| anyhow::bail!("lookup failed"));
	/// assert_eq!(broken.evaluate(), None);
	/// ```
	pub fn try_from_fn<F>(f: F) -> Self
	where
		F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
	{
		Self::Deferred(Arc::new(f))
	}

	/// Wrap a computation that needs the bound record
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Evaluable;
	/// use serde_json::json;
	///
	/// let greeting: Evaluable<String> = Evaluable::contextual(|record| {
	///     format!("Hello {}", record["name"].as_str().unwrap_or_default())
	/// });
	///
	/// assert_eq!(greeting.evaluate(), None);
	/// assert_eq!(
	///     greeting.evaluate_with(Some(&json!({"name": "Ada"}))),
	///     Some("Hello Ada".to_string())
	/// );
	/// ```
	pub fn contextual<F>(f: F) -> Self
	where
		F: Fn(&Value) -> T + Send + Sync + 'static,
	{
		Self::Contextual(Arc::new(move |record: &Value| Ok::<T, anyhow::Error>(f(record))))
	}

	/// Wrap a fallible computation that needs the bound record
	pub fn try_contextual<F>(f: F) -> Self
	where
		F: Fn(&Value) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		Self::Contextual(Arc::new(f))
	}

	/// Resolve without any context.
	///
	/// Contextual computations are not invoked and resolve to `None`.
	pub fn evaluate(&self) -> Option<T> {
		match self {
			Self::Value(value) => Some(value.clone()),
			Self::Deferred(f) => settle(f()),
			Self::Contextual(_) => None,
		}
	}

	/// Resolve with an optional bound record.
	///
	/// Contextual computations are invoked when a record is supplied; literal and
	/// deferred values behave exactly like [`Evaluable::evaluate`].
	pub fn evaluate_with(&self, record: Option<&Value>) -> Option<T> {
		match (self, record) {
			(Self::Contextual(f), Some(record)) => settle(f(record)),
			_ => self.evaluate(),
		}
	}

	pub fn is_contextual(&self) -> bool {
		matches!(self, Self::Contextual(_))
	}
}

fn settle<T>(result: anyhow::Result<T>) -> Option<T> {
	match result {
		Ok(value) => Some(value),
		Err(err) => {
			tracing::warn!(error = %err, "deferred value failed to evaluate");
			None
		}
	}
}

impl<T> Clone for Evaluable<T>
where
	T: Clone,
{
	fn clone(&self) -> Self {
		match self {
			Self::Value(value) => Self::Value(value.clone()),
			Self::Deferred(f) => Self::Deferred(Arc::clone(f)),
			Self::Contextual(f) => Self::Contextual(Arc::clone(f)),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Evaluable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
			Self::Contextual(_) => f.write_str("Contextual(..)"),
		}
	}
}

impl<T> From<T> for Evaluable<T> {
	fn from(value: T) -> Self {
		Self::Value(value)
	}
}

impl From<&str> for Evaluable<String> {
	fn from(value: &str) -> Self {
		Self::Value(value.to_string())
	}
}
