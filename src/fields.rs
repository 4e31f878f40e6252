// Shared capabilities
pub mod concerns;

// Inputs
pub mod checkbox;
pub mod checkbox_list;
pub mod date_picker;
pub mod file_upload;
pub mod hidden_input;
pub mod password_input;
pub mod radio;
pub mod range;
pub mod rich_editor;
pub mod select;
pub mod text_input;
pub mod textarea;
pub mod toggle;

// Containers and actions
pub mod key_value;
pub mod repeater;
pub mod submit;

// Re-exports for inputs
pub use checkbox::Checkbox;
pub use checkbox_list::CheckboxList;
pub use date_picker::DatePicker;
pub use file_upload::FileUpload;
pub use hidden_input::HiddenInput;
pub use password_input::{PasswordInput, PasswordStrength};
pub use radio::Radio;
pub use range::Range;
pub use rich_editor::{RichEditor, ToolbarButton, ToolbarGroup};
pub use select::Select;
pub use text_input::{InputType, TextInput};
pub use textarea::Textarea;
pub use toggle::Toggle;

// Re-exports for containers and actions
pub use key_value::KeyValue;
pub use repeater::Repeater;
pub use submit::{ButtonStyle, Submit};
