use std::sync::mpsc::{Receiver, Sender};

use tracing::debug;

use crate::core::PageId;
use crate::core::namespace;
use crate::core::value::Value;
use crate::error::EditorError;
use crate::runtime::bus::RerenderBus;
use crate::runtime::event::{Change, EditorEvent};
use crate::ui::diff::{DiffLine, pending_changes};
use crate::ui::view::{Action, ActionId, ShellAction, ViewTree};

pub use actions::{Interaction, apply_action, remove_segment};
pub use options::{AddFactory, DeleteHandler, EditorOptions, FieldConfig, ShellButton};

/// Fills configured defaults into `value`, then compiles a view of it.
pub fn render_editor(value: &mut Value, options: &EditorOptions) -> ViewTree {
    walk::apply_defaults(value, options);
    let tree = walk::build_meta_tree(value, options);
    render::compile_view(&tree, value, options, 0)
}

/// Read-only editors may still navigate back but not save or delete.
pub(crate) fn shell_enabled(options: &EditorOptions, shell: ShellAction) -> bool {
    shell == ShellAction::Back || !options.read_only()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Mutated(Change),
    Shell(ShellAction),
}

/// Owns the edited value for one page. Each render walks the whole value
/// again; edits land in place and the page is told to render afresh.
pub struct ObjectEditor {
    page: PageId,
    value: Value,
    saved: Value,
    options: EditorOptions,
    bus: RerenderBus,
    revision: u64,
}

impl ObjectEditor {
    pub fn new(page: impl Into<PageId>, value: Value, options: EditorOptions) -> Self {
        Self {
            page: page.into(),
            saved: value.clone(),
            value,
            options,
            bus: RerenderBus::new(),
            revision: 0,
        }
    }

    pub fn with_subscriber(mut self, tx: Sender<EditorEvent>) -> Self {
        self.bus.attach(tx);
        self
    }

    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        self.bus.subscribe()
    }

    pub fn page(&self) -> &PageId {
        &self.page
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Full re-derivation from the current value.
    pub fn render(&mut self) -> ViewTree {
        walk::apply_defaults(&mut self.value, &self.options);
        let tree = walk::build_meta_tree(&self.value, &self.options);
        debug!(page = %self.page, revision = self.revision, nodes = tree.len(), "rendering editor");
        render::compile_view(&tree, &self.value, &self.options, self.revision)
    }

    pub fn press(&mut self, view: &ViewTree, id: ActionId) -> Result<Outcome, EditorError> {
        self.perform(view, id, Interaction::Press)
    }

    /// Runs the action behind `id`. The view must come from the current
    /// revision; anything older may point at elements that have moved.
    pub fn perform(
        &mut self,
        view: &ViewTree,
        id: ActionId,
        interaction: Interaction,
    ) -> Result<Outcome, EditorError> {
        if view.revision != self.revision {
            return Err(EditorError::StaleView {
                view: view.revision,
                current: self.revision,
            });
        }
        let action = view.action(id).ok_or(EditorError::UnknownAction(id))?;
        if let Action::Shell(shell) = action {
            if !shell_enabled(&self.options, *shell) {
                return Err(EditorError::Disabled {
                    namespace: namespace::ROOT.to_string(),
                });
            }
            self.run_shell(*shell);
            return Ok(Outcome::Shell(*shell));
        }

        let change = apply_action(&mut self.value, &self.options, action, interaction)?;
        self.revision += 1;
        self.bus.publish(EditorEvent::Mutated {
            page: self.page.clone(),
            revision: self.revision,
            change: change.clone(),
        });
        Ok(Outcome::Mutated(change))
    }

    fn run_shell(&mut self, shell: ShellAction) {
        let page = self.page.clone();
        let event = match shell {
            ShellAction::Back => {
                if let Some(button) = self.options.back_button() {
                    button.invoke(&self.value);
                }
                EditorEvent::Back { page }
            }
            ShellAction::Save => {
                if let Some(button) = self.options.save_button() {
                    button.invoke(&self.value);
                }
                self.saved = self.value.clone();
                EditorEvent::Saved { page }
            }
            ShellAction::Delete => {
                if let Some(button) = self.options.delete_button() {
                    button.invoke(&self.value);
                }
                EditorEvent::Deleted { page }
            }
        };
        debug!(page = %self.page, action = ?shell, "shell action");
        self.bus.publish(event);
    }

    /// True when the value differs from what was last saved. Compared in
    /// document form, where a `NaN` number is `null` on both sides.
    pub fn is_dirty(&self) -> bool {
        serde_json::Value::from(&self.value) != serde_json::Value::from(&self.saved)
    }

    pub fn pending_changes(&self) -> Vec<DiffLine> {
        pending_changes(&self.saved, &self.value, 3)
    }
}

pub mod actions;
mod controls;
pub mod model;
pub mod options;
mod render;
pub mod walk;
