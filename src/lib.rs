pub mod core;
pub mod error;
pub mod object_editor;
pub mod runtime;
pub mod ui;

pub use crate::core::PageId;
pub use crate::core::classify::{Kind, ScalarType, classify};
pub use crate::core::value::Value;
pub use crate::core::value_path::{PathSegment, ValuePath};
pub use error::{ConfigError, EditorError};
pub use object_editor::{
    EditorOptions, FieldConfig, Interaction, ObjectEditor, Outcome, ShellButton, render_editor,
};
pub use runtime::bus::RerenderBus;
pub use runtime::event::{Change, ChangeKind, EditorEvent};
pub use ui::view::{
    ActionId, Control, ControlInput, GroupLayout, GroupView, NO_ITEMS_PLACEHOLDER, ViewNode,
    ViewTree,
};
