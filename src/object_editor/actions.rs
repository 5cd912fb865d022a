use tracing::debug;

use crate::core::classify::ScalarType;
use crate::core::value::Value;
use crate::core::value_path::{PathSegment, ValuePath};
use crate::error::EditorError;
use crate::runtime::event::{Change, ChangeKind};
use crate::ui::view::Action;

use super::model::DeleteWiring;
use super::options::EditorOptions;

/// What the user did with an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// A button was pressed.
    Press,
    Toggle(bool),
    Text(String),
}

/// Applies a mutating action to the value tree. Shell actions carry no
/// mutation and are rejected here; the editor handles them.
pub fn apply_action(
    root: &mut Value,
    options: &EditorOptions,
    action: &Action,
    interaction: Interaction,
) -> Result<Change, EditorError> {
    if action.is_disabled() {
        return Err(EditorError::Disabled {
            namespace: action.namespace().unwrap_or_default().to_string(),
        });
    }
    let change = match action {
        Action::Edit {
            path,
            namespace,
            scalar,
            ..
        } => {
            let next = coerce(*scalar, namespace, interaction)?;
            let slot = root
                .get_path_mut(path)
                .ok_or_else(|| path_not_found(path))?;
            *slot = next;
            Change::new(ChangeKind::Edited, namespace, path.clone())
        }
        Action::Remove {
            path,
            namespace,
            wiring,
            ..
        } => {
            remove(root, options, path, wiring)?;
            Change::new(ChangeKind::Removed, namespace, path.clone())
        }
        Action::Add {
            path,
            namespace,
            factory,
            ..
        } => {
            let factory = options
                .new_button(factory)
                .ok_or_else(|| EditorError::MissingHandler {
                    key: factory.clone(),
                })?;
            let target = root
                .get_path_mut(path)
                .ok_or_else(|| path_not_found(path))?;
            if !target.is_container() {
                return Err(EditorError::NotAContainer {
                    path: path.to_string(),
                });
            }
            factory(target);
            Change::new(ChangeKind::Added, namespace, path.clone())
        }
        Action::Shell(_) => {
            return Err(EditorError::InputMismatch {
                namespace: String::new(),
                expected: "a mutating action",
            });
        }
    };
    debug!(kind = ?change.kind, namespace = %change.namespace, path = %change.path, "applied edit");
    Ok(change)
}

/// Number fields take `Number(text)` (blank is zero, garbage is NaN) and text
/// fields take the text as typed; the field keeps its type either way.
pub fn coerce(
    scalar: ScalarType,
    namespace: &str,
    interaction: Interaction,
) -> Result<Value, EditorError> {
    match (scalar, interaction) {
        (ScalarType::Boolean, Interaction::Toggle(flag)) => Ok(Value::Bool(flag)),
        (ScalarType::Number, Interaction::Text(text)) => Ok(Value::Number(parse_number(&text))),
        (ScalarType::Number, Interaction::Toggle(flag)) => {
            Ok(Value::Number(if flag { 1.0 } else { 0.0 }))
        }
        (ScalarType::Text, Interaction::Text(text)) => Ok(Value::Text(text)),
        (ScalarType::Text, Interaction::Toggle(flag)) => Ok(Value::Text(flag.to_string())),
        (scalar, _) => Err(EditorError::InputMismatch {
            namespace: namespace.to_string(),
            expected: match scalar {
                ScalarType::Boolean => "toggle",
                ScalarType::Number | ScalarType::Text => "text",
            },
        }),
    }
}

pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn remove(
    root: &mut Value,
    options: &EditorOptions,
    path: &ValuePath,
    wiring: &DeleteWiring,
) -> Result<(), EditorError> {
    let (parent_path, segment) = path.split_last().ok_or_else(|| path_not_found(path))?;
    let parent = root
        .get_path_mut(&parent_path)
        .ok_or_else(|| path_not_found(&parent_path))?;
    match wiring {
        DeleteWiring::Splice { index } => {
            let Value::List(items) = parent else {
                return Err(EditorError::NotAContainer {
                    path: parent_path.to_string(),
                });
            };
            if *index >= items.len() {
                return Err(EditorError::IndexOutOfRange {
                    path: parent_path.to_string(),
                    index: *index,
                });
            }
            items.remove(*index);
        }
        DeleteWiring::Handler { key } => {
            let handler = options
                .del_button(key)
                .ok_or_else(|| EditorError::MissingHandler { key: key.clone() })?;
            if !parent.is_container() {
                return Err(EditorError::NotAContainer {
                    path: parent_path.to_string(),
                });
            }
            handler(parent, segment);
        }
    }
    Ok(())
}

/// Default removal for handlers that want the splice/remove-key behaviour.
pub fn remove_segment(parent: &mut Value, segment: &PathSegment) -> Option<Value> {
    match (parent, segment) {
        (Value::List(items), PathSegment::Index(index)) if *index < items.len() => {
            Some(items.remove(*index))
        }
        (Value::Object(map), PathSegment::Key(key)) => map.shift_remove(key.as_str()),
        _ => None,
    }
}

fn path_not_found(path: &ValuePath) -> EditorError {
    EditorError::PathNotFound {
        path: path.to_string(),
    }
}
