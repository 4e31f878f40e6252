//! Rich text editor with a configurable toolbar

use crate::field::{Field, FieldBase};
use crate::renderer::RenderContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A toolbar button of the rich editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarButton {
	Bold,
	Italic,
	Underline,
	Strike,
	H1,
	H2,
	H3,
	BulletList,
	OrderedList,
	Blockquote,
	CodeBlock,
	Link,
	AttachFiles,
	Table,
	Undo,
	Redo,
}

impl ToolbarButton {
	pub const ALL: [ToolbarButton; 16] = [
		Self::Bold,
		Self::Italic,
		Self::Underline,
		Self::Strike,
		Self::H1,
		Self::H2,
		Self::H3,
		Self::BulletList,
		Self::OrderedList,
		Self::Blockquote,
		Self::CodeBlock,
		Self::Link,
		Self::AttachFiles,
		Self::Table,
		Self::Undo,
		Self::Redo,
	];

	pub fn group(&self) -> ToolbarGroup {
		match self {
			Self::Bold | Self::Italic | Self::Underline | Self::Strike => ToolbarGroup::Text,
			Self::H1 | Self::H2 | Self::H3 => ToolbarGroup::Heading,
			Self::BulletList | Self::OrderedList => ToolbarGroup::List,
			Self::Blockquote | Self::CodeBlock => ToolbarGroup::Block,
			Self::Link | Self::AttachFiles | Self::Table => ToolbarGroup::Insert,
			Self::Undo | Self::Redo => ToolbarGroup::History,
		}
	}
}

/// Toolbar sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarGroup {
	Text,
	Heading,
	List,
	Block,
	Insert,
	History,
}

impl ToolbarGroup {
	pub const ORDER: [ToolbarGroup; 6] = [
		Self::Text,
		Self::Heading,
		Self::List,
		Self::Block,
		Self::Insert,
		Self::History,
	];
}

#[derive(Debug, Clone)]
pub struct RichEditor {
	base: FieldBase,
	toolbar: Vec<ToolbarButton>,
	attachments_disk: Option<String>,
	attachments_directory: Option<String>,
}

impl RichEditor {
	/// Create an editor with every toolbar button enabled
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			base: FieldBase::new(name),
			toolbar: ToolbarButton::ALL.to_vec(),
			attachments_disk: None,
			attachments_directory: None,
		}
	}

	/// Replace the toolbar; duplicates are dropped, first occurrence wins
	pub fn with_toolbar(mut self, buttons: impl IntoIterator<Item = ToolbarButton>) -> Self {
		self.toolbar.clear();
		for button in buttons {
			if !self.toolbar.contains(&button) {
				self.toolbar.push(button);
			}
		}
		self
	}

	pub fn enable_toolbar_buttons(mut self, buttons: impl IntoIterator<Item = ToolbarButton>) -> Self {
		for button in buttons {
			if !self.toolbar.contains(&button) {
				self.toolbar.push(button);
			}
		}
		self
	}

	pub fn disable_toolbar_buttons(mut self, buttons: impl IntoIterator<Item = ToolbarButton>) -> Self {
		let disabled: Vec<ToolbarButton> = buttons.into_iter().collect();
		self.toolbar.retain(|button| !disabled.contains(button));
		self
	}

	pub fn disable_all_toolbar_buttons(mut self) -> Self {
		self.toolbar.clear();
		self
	}

	pub fn toolbar_buttons(&self) -> &[ToolbarButton] {
		&self.toolbar
	}

	pub fn has_toolbar_button(&self, button: ToolbarButton) -> bool {
		self.toolbar.contains(&button)
	}

	/// Enabled buttons bucketed into their groups
	///
	/// Groups appear in fixed order and only when non-empty; buttons keep their
	/// configured order inside a group.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::fields::RichEditor;
	/// use formwork::fields::rich_editor::{ToolbarButton, ToolbarGroup};
	///
	/// let editor = RichEditor::new("body").with_toolbar([
	///     ToolbarButton::Redo,
	///     ToolbarButton::Italic,
	///     ToolbarButton::Bold,
	/// ]);
	///
	/// assert_eq!(
	///     editor.toolbar_groups(),
	///     vec![
	///         (ToolbarGroup::Text, vec![ToolbarButton::Italic, ToolbarButton::Bold]),
	///         (ToolbarGroup::History, vec![ToolbarButton::Redo]),
	///     ]
	/// );
	/// ```
	pub fn toolbar_groups(&self) -> Vec<(ToolbarGroup, Vec<ToolbarButton>)> {
		ToolbarGroup::ORDER
			.iter()
			.filter_map(|group| {
				let buttons: Vec<ToolbarButton> = self
					.toolbar
					.iter()
					.copied()
					.filter(|button| button.group() == *group)
					.collect();
				(!buttons.is_empty()).then_some((*group, buttons))
			})
			.collect()
	}

	pub fn with_attachments_disk(mut self, disk: impl Into<String>) -> Self {
		self.attachments_disk = Some(disk.into());
		self
	}

	pub fn with_attachments_directory(mut self, directory: impl Into<String>) -> Self {
		self.attachments_directory = Some(directory.into());
		self
	}
}

impl Field for RichEditor {
	fn base(&self) -> &FieldBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut FieldBase {
		&mut self.base
	}

	fn kind(&self) -> &'static str {
		"rich-editor"
	}

	fn extend_context(&self, _ctx: &RenderContext, context: &mut Map<String, Value>) {
		let groups: Vec<Value> = self
			.toolbar_groups()
			.into_iter()
			.map(|(group, buttons)| json!({"group": group, "buttons": buttons}))
			.collect();
		context.insert("toolbar".into(), Value::Array(groups));
		context.insert(
			"attachments".into(),
			json!({
				"enabled": self.has_toolbar_button(ToolbarButton::AttachFiles),
				"disk": self.attachments_disk,
				"directory": self.attachments_directory,
			}),
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_toolbar_has_every_group() {
		let editor = RichEditor::new("body");

		let groups: Vec<ToolbarGroup> = editor.toolbar_groups().into_iter().map(|(g, _)| g).collect();

		assert_eq!(groups, ToolbarGroup::ORDER.to_vec());
	}

	#[rstest]
	fn test_disabling_drops_empty_groups() {
		// Arrange
		let editor = RichEditor::new("body").disable_toolbar_buttons([
			ToolbarButton::H1,
			ToolbarButton::H2,
			ToolbarButton::H3,
			ToolbarButton::AttachFiles,
		]);

		// Act
		let groups = editor.toolbar_groups();

		// Assert
		assert!(groups.iter().all(|(group, _)| *group != ToolbarGroup::Heading));
		let insert = groups
			.iter()
			.find(|(group, _)| *group == ToolbarGroup::Insert)
			.unwrap();
		assert_eq!(insert.1, vec![ToolbarButton::Link, ToolbarButton::Table]);
	}

	#[rstest]
	fn test_toolbar_has_no_duplicates() {
		let editor = RichEditor::new("body")
			.with_toolbar([ToolbarButton::Bold, ToolbarButton::Bold])
			.enable_toolbar_buttons([ToolbarButton::Bold, ToolbarButton::Link]);

		assert_eq!(
			editor.toolbar_buttons(),
			[ToolbarButton::Bold, ToolbarButton::Link]
		);
	}

	#[rstest]
	fn test_buttons_serialize_camel_case() {
		assert_eq!(json!(ToolbarButton::BulletList), json!("bulletList"));
		assert_eq!(json!(ToolbarButton::H2), json!("h2"));
		assert!(RichEditor::new("body").disable_all_toolbar_buttons().toolbar_groups().is_empty());
	}
}
