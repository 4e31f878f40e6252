//! File upload input
//!
//! Only configuration is carried to the view; storing the file is the host's
//! business.

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use crate::rules::Rule;
use crate::settings::FormSettings;
use serde_json::{Map, Value, json};

const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone)]
pub struct FileUpload {
	base: FieldBase,
	accept: Vec<String>,
	multiple: bool,
	max_size_kb: Option<u64>,
	disk: Option<String>,
	directory: Option<String>,
	image: bool,
	preview: bool,
}

impl FileUpload {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			accept: Vec::new(),
			multiple: false,
			max_size_kb: None,
			disk: None,
			directory: None,
			image: false,
			preview: false,
		}
	}

	/// Accepted MIME types
	pub fn with_accept<I, S>(mut self, types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.accept = types.into_iter().map(Into::into).collect();
		self
	}

	pub fn accept(&self) -> &[String] {
		&self.accept
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn with_max_size_kb(mut self, kilobytes: u64) -> Self {
		self.max_size_kb = Some(kilobytes);
		self
	}

	/// Explicit limit, else the configured upload limit
	///
	/// # Examples
	///
	/// ```
	/// use formwork::fields::FileUpload;
	/// use formwork::FormSettings;
	///
	/// let settings = FormSettings::default();
	/// assert_eq!(FileUpload::new("avatar").max_size_kb(&settings), 2048);
	/// assert_eq!(FileUpload::new("avatar").with_max_size_kb(512).max_size_kb(&settings), 512);
	/// ```
	pub fn max_size_kb(&self, settings: &FormSettings) -> u64 {
		self.max_size_kb.unwrap_or(settings.max_upload_size_kb)
	}

	pub fn with_disk(mut self, disk: impl Into<String>) -> Self {
		self.disk = Some(disk.into());
		self
	}

	pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
		self.directory = Some(directory.into());
		self
	}

	/// Accept common image types and show a preview
	pub fn image(mut self) -> Self {
		self.image = true;
		self.preview = true;
		if self.accept.is_empty() {
			self.accept = IMAGE_TYPES.iter().map(|t| t.to_string()).collect();
		}
		self
	}

	pub fn with_preview(mut self, preview: bool) -> Self {
		self.preview = preview;
		self
	}
}

impl Field for FileUpload {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"file-upload"
	}

	fn has_file_upload(&self) -> bool {
		true
	}

	fn rules(&self) -> Vec<Rule> {
		let mut rules = self.base.rules();
		if self.multiple {
			rules.push(Rule::Array);
			return rules;
		}
		if self.image {
			rules.push(Rule::Image);
		} else if self.max_size_kb.is_some() || !self.accept.is_empty() {
			rules.push(Rule::File);
		}
		rules.extend(self.max_size_kb.map(|kb| Rule::Max(kb as f64)));
		if !self.accept.is_empty() {
			rules.push(Rule::Mimetypes(self.accept.clone()));
		}
		rules
	}

	fn extend_context(&self, ctx: &RenderContext, context: &mut Map<String, Value>) {
		context.insert("accept".into(), json!(self.accept.join(",")));
		context.insert("multiple".into(), json!(self.multiple));
		context.insert("max_size_kb".into(), json!(self.max_size_kb(ctx.settings())));
		context.insert("disk".into(), json!(self.disk));
		context.insert("directory".into(), json!(self.directory));
		context.insert("image".into(), json!(self.image));
		context.insert("preview".into(), json!(self.preview));
	}
}
