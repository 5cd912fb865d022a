use crate::core::value::Value;
use crate::ui::view::{
    Action, ButtonView, GroupBody, GroupHeader, GroupLayout, GroupView, NO_ITEMS_PLACEHOLDER,
    ShellAction, ViewNode, ViewTree,
};

use super::controls::make_control;
use super::shell_enabled;
use super::model::{MetaId, MetaTree};
use super::options::{EditorOptions, ShellButton};

pub const ADD_TITLE: &str = "Add";
pub const DELETE_TITLE: &str = "Delete";

/// Lays out the shell buttons, the root scalar and boolean grids and then
/// the nested groups.
pub(super) fn compile_view(
    tree: &MetaTree,
    root: &Value,
    options: &EditorOptions,
    revision: u64,
) -> ViewTree {
    let mut view = ViewTree::new(revision);
    let back = options
        .back_button()
        .map(|button| shell_button(&mut view, options, button, ShellAction::Back));
    let save = options
        .save_button()
        .map(|button| shell_button(&mut view, options, button, ShellAction::Save));
    let delete = options
        .delete_button()
        .map(|button| shell_button(&mut view, options, button, ShellAction::Delete));
    view.back = back;
    view.save = save;
    view.delete = delete;

    for id in &tree.root_scalars {
        if let Some(control) = make_control(tree.node(*id), root, options, &mut view) {
            view.root_scalars.push(control);
        }
    }
    for id in &tree.root_booleans {
        if let Some(control) = make_control(tree.node(*id), root, options, &mut view) {
            view.root_booleans.push(control);
        }
    }
    for id in &tree.root_groups {
        if let Some(group) = compile_group(tree, *id, root, options, &mut view) {
            view.groups.push(group);
        }
    }
    view
}

fn shell_button(
    view: &mut ViewTree,
    options: &EditorOptions,
    button: &ShellButton,
    action: ShellAction,
) -> ButtonView {
    ButtonView {
        title: button.title().to_string(),
        action: view.push_action(Action::Shell(action)),
        disabled: !shell_enabled(options, action),
    }
}

pub(super) fn compile_group(
    tree: &MetaTree,
    id: MetaId,
    root: &Value,
    options: &EditorOptions,
    view: &mut ViewTree,
) -> Option<GroupView> {
    let node = tree.node(id);
    if options.is_hidden(&node.namespace, node.index) {
        return None;
    }

    let mut items = Vec::new();
    for child in tree.children(id) {
        if child.is_container() {
            if let Some(group) = compile_group(tree, child.id, root, options, view) {
                items.push(ViewNode::Group(group));
            }
        } else if let Some(control) = make_control(child, root, options, view) {
            items.push(ViewNode::Control(control));
        }
    }

    let disabled = options.is_disabled(&node.namespace, node.index);
    let delete = node.delete.clone().map(|wiring| ButtonView {
        title: DELETE_TITLE.to_string(),
        action: view.push_action(Action::Remove {
            path: node.path.clone(),
            namespace: node.namespace.clone(),
            wiring,
            disabled,
        }),
        disabled,
    });
    let add = node.add.clone().map(|factory| ButtonView {
        title: ADD_TITLE.to_string(),
        action: view.push_action(Action::Add {
            path: node.path.clone(),
            namespace: node.namespace.clone(),
            factory,
            disabled,
        }),
        disabled,
    });
    let header = if node.title.is_empty() && add.is_none() {
        None
    } else {
        Some(GroupHeader {
            title: node.title.clone(),
            add,
        })
    };
    let body = if items.is_empty() {
        GroupBody::Placeholder(NO_ITEMS_PLACEHOLDER)
    } else {
        GroupBody::Items(items)
    };

    Some(GroupView {
        render_key: node.render_key.clone(),
        namespace: node.namespace.clone(),
        kind: node.kind,
        depth: node.depth,
        layout: if node.nested {
            GroupLayout::Nested
        } else {
            GroupLayout::Flat
        },
        delete,
        header,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::compile_view;
    use crate::core::value::Value;
    use crate::object_editor::options::{EditorOptions, ShellButton};
    use crate::object_editor::walk::build_meta_tree;
    use crate::ui::view::{Action, GroupLayout, NO_ITEMS_PLACEHOLDER, ShellAction, ViewNode};

    fn compile(json: serde_json::Value, options: &EditorOptions) -> crate::ui::view::ViewTree {
        let root = Value::from(json);
        let tree = build_meta_tree(&root, options);
        compile_view(&tree, &root, options, 0)
    }

    #[test]
    fn string_arrays_are_flat_and_object_arrays_nest() {
        let view = compile(
            serde_json::json!({"DNS": ["a", "b"], "Peers": [{"Tag": "x"}]}),
            &EditorOptions::new(),
        );
        let dns = view.group("root_DNS").expect("dns");
        assert_eq!(dns.layout, GroupLayout::Flat);
        assert_eq!(dns.items().len(), 2);
        assert!(dns.items().iter().all(|item| matches!(
            item,
            ViewNode::Control(control) if control.remove.is_some() && control.label.is_none()
        )));

        let peers = view.group("root_Peers").expect("peers");
        assert_eq!(peers.layout, GroupLayout::Nested);
        let peer = view.group("root_Peers_0").expect("peer");
        assert_eq!(peer.title(), Some("x"));
        assert!(peer.delete.is_some());
    }

    #[test]
    fn empty_containers_show_placeholder() {
        let view = compile(serde_json::json!({"Routes": []}), &EditorOptions::new());
        let routes = view.group("root_Routes").expect("routes");
        assert_eq!(routes.placeholder(), Some(NO_ITEMS_PLACEHOLDER));
        assert!(routes.items().is_empty());
    }

    #[test]
    fn hidden_children_leave_placeholder_behind() {
        let options = EditorOptions::new().with_hidden("root_Peer_Key");
        let view = compile(serde_json::json!({"Peer": {"Key": "abc"}}), &options);
        let peer = view.group("root_Peer").expect("peer");
        assert_eq!(peer.placeholder(), Some(NO_ITEMS_PLACEHOLDER));
    }

    #[test]
    fn add_button_lives_on_the_array_header() {
        let options = EditorOptions::new().with_new_button("root_DNS", |dns| {
            if let Value::List(items) = dns {
                items.push(Value::Text(String::new()));
            }
        });
        let view = compile(serde_json::json!({"DNS": ["a"]}), &options);
        let dns = view.group("root_DNS").expect("dns");
        let header = dns.header.as_ref().expect("header");
        assert_eq!(header.title, "DNS");
        let add = header.add.as_ref().expect("add button");
        assert!(matches!(view.action(add.action), Some(Action::Add { .. })));
    }

    #[test]
    fn shell_buttons_come_from_options() {
        let options = EditorOptions::new()
            .with_back_button(ShellButton::new("Back", |_| {}))
            .with_save_button(ShellButton::new("Save", |_| {}));
        let view = compile(serde_json::json!({}), &options);
        let back = view.back.as_ref().expect("back");
        assert_eq!(back.title, "Back");
        assert!(matches!(
            view.action(back.action),
            Some(Action::Shell(ShellAction::Back))
        ));
        assert!(view.save.is_some());
        assert!(view.delete.is_none());
    }

    #[test]
    fn untitled_groups_have_no_header() {
        let view = compile(
            serde_json::json!({"Peers": [{"Key": "a"}], "Matrix": [[1, 2]]}),
            &EditorOptions::new(),
        );
        let peer = view.group("root_Peers_0").expect("peer");
        assert!(peer.header.is_none());
        assert_eq!(peer.layout, GroupLayout::Flat);

        let row = view.group("root_Matrix_0").expect("row");
        assert_eq!(row.title(), Some("0"));
    }

    #[test]
    fn aliased_render_keys_resolve_to_the_first_node() {
        let view = compile(
            serde_json::json!({"a_0": "top", "a": ["element"]}),
            &EditorOptions::new(),
        );
        assert_eq!(view.render_keys(), vec!["root_a_0", "root_a", "root_a_0"]);
        let control = view.control("root_a_0").expect("control");
        assert_eq!(control.label.as_deref(), Some("a_0"));
    }
}
