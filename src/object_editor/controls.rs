use crate::core::classify::{Kind, ScalarType};
use crate::core::value::{Value, format_number};
use crate::ui::view::{Action, ButtonView, Control, ControlInput, ViewTree};

use super::model::MetaNode;
use super::options::EditorOptions;

pub const REMOVE_TITLE: &str = "Remove";

/// Builds the input row for a leaf node, or nothing when it is hidden.
pub(super) fn make_control(
    node: &MetaNode,
    root: &Value,
    options: &EditorOptions,
    view: &mut ViewTree,
) -> Option<Control> {
    if options.is_hidden(&node.namespace, node.index) {
        return None;
    }
    let Kind::Scalar(scalar) = node.kind else {
        return None;
    };
    let disabled = options.is_disabled(&node.namespace, node.index);
    let current = root.get_path(&node.path).unwrap_or(&Value::None);

    let input = if node.absent {
        None
    } else {
        Some(control_input(scalar, current))
    };
    let edit = input.as_ref().map(|_| {
        view.push_action(Action::Edit {
            path: node.path.clone(),
            namespace: node.namespace.clone(),
            scalar,
            disabled,
        })
    });
    let remove = node.delete.clone().map(|wiring| ButtonView {
        title: REMOVE_TITLE.to_string(),
        action: view.push_action(Action::Remove {
            path: node.path.clone(),
            namespace: node.namespace.clone(),
            wiring,
            disabled,
        }),
        disabled,
    });
    let label = if node.in_array() {
        None
    } else {
        Some(node.title.clone())
    };

    Some(Control {
        render_key: node.render_key.clone(),
        namespace: node.namespace.clone(),
        label,
        input,
        disabled,
        edit,
        remove,
    })
}

fn control_input(scalar: ScalarType, current: &Value) -> ControlInput {
    match scalar {
        ScalarType::Boolean => ControlInput::Toggle(current.as_bool().unwrap_or(false)),
        ScalarType::Number => ControlInput::Number(current.as_number().unwrap_or(f64::NAN)),
        ScalarType::Text => ControlInput::Text(current.to_text_scalar().unwrap_or_default()),
    }
}

impl ControlInput {
    pub fn display(&self) -> String {
        match self {
            Self::Toggle(true) => "[x]".to_string(),
            Self::Toggle(false) => "[ ]".to_string(),
            Self::Text(text) => text.clone(),
            Self::Number(n) => format_number(*n),
        }
    }
}
