//! Helpers shared by unit tests

use crate::error::FormResult;
use crate::renderer::{RenderContext, ViewRenderer};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Renderer that returns empty markup for every view
pub(crate) struct Silent;

impl ViewRenderer for Silent {
	fn render(&self, _view: &str, _context: &Value) -> FormResult<String> {
		Ok(String::new())
	}
}

pub(crate) fn silent_context() -> RenderContext {
	RenderContext::new(Silent)
}

/// Renderer that records every call and returns `<view>`
#[derive(Default)]
pub(crate) struct Recorder {
	pub(crate) calls: Mutex<Vec<(String, Value)>>,
}

impl Recorder {
	pub(crate) fn views(&self) -> Vec<String> {
		self.calls
			.lock()
			.unwrap()
			.iter()
			.map(|(view, _)| view.clone())
			.collect()
	}
}

impl ViewRenderer for Arc<Recorder> {
	fn render(&self, view: &str, context: &Value) -> FormResult<String> {
		self.calls
			.lock()
			.unwrap()
			.push((view.to_string(), context.clone()));
		Ok(format!("<{}>", view))
	}
}

pub(crate) fn recording_context() -> (Arc<Recorder>, RenderContext) {
	let recorder = Arc::new(Recorder::default());
	let ctx = RenderContext::new(Arc::clone(&recorder));
	(recorder, ctx)
}
