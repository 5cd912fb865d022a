use serde::Serialize;

use crate::core::classify::{Kind, ScalarType};
use crate::core::value_path::ValuePath;
use crate::object_editor::model::DeleteWiring;

pub const NO_ITEMS_PLACEHOLDER: &str = "no items available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionId(usize);

impl ActionId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Back,
    Save,
    Delete,
}

/// What happens when an element is used. Paths point into the value tree
/// as it was when the view was compiled.
#[derive(Debug, Clone)]
pub enum Action {
    Edit {
        path: ValuePath,
        namespace: String,
        scalar: ScalarType,
        disabled: bool,
    },
    Remove {
        path: ValuePath,
        namespace: String,
        wiring: DeleteWiring,
        disabled: bool,
    },
    Add {
        path: ValuePath,
        namespace: String,
        factory: String,
        disabled: bool,
    },
    Shell(ShellAction),
}

impl Action {
    pub fn is_disabled(&self) -> bool {
        match self {
            Self::Edit { disabled, .. }
            | Self::Remove { disabled, .. }
            | Self::Add { disabled, .. } => *disabled,
            Self::Shell(_) => false,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Edit { namespace, .. }
            | Self::Remove { namespace, .. }
            | Self::Add { namespace, .. } => Some(namespace),
            Self::Shell(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub title: String,
    pub action: ActionId,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ControlInput {
    Toggle(bool),
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub render_key: String,
    pub namespace: String,
    /// Absent for array elements, which show a remove button instead.
    pub label: Option<String>,
    /// Absent for null fields.
    pub input: Option<ControlInput>,
    pub disabled: bool,
    pub edit: Option<ActionId>,
    pub remove: Option<ButtonView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLayout {
    /// Members are all scalars; shown as plain rows.
    Flat,
    /// Collapsible titled panel.
    Nested,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupHeader {
    pub title: String,
    pub add: Option<ButtonView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GroupBody {
    Items(Vec<ViewNode>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub render_key: String,
    pub namespace: String,
    pub kind: Kind,
    pub depth: usize,
    pub layout: GroupLayout,
    pub delete: Option<ButtonView>,
    pub header: Option<GroupHeader>,
    pub body: GroupBody,
}

impl GroupView {
    pub fn title(&self) -> Option<&str> {
        self.header.as_ref().map(|header| header.title.as_str())
    }

    pub fn items(&self) -> &[ViewNode] {
        match &self.body {
            GroupBody::Items(items) => items,
            GroupBody::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self.body {
            GroupBody::Placeholder(text) => Some(text),
            GroupBody::Items(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ViewNode {
    Control(Control),
    Group(GroupView),
}

#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Control(&'a Control),
    Group(&'a GroupView),
}

pub fn visit_nodes<'a>(nodes: &'a [ViewNode], f: &mut impl FnMut(NodeRef<'a>)) {
    for node in nodes {
        match node {
            ViewNode::Control(control) => f(NodeRef::Control(control)),
            ViewNode::Group(group) => {
                f(NodeRef::Group(group));
                visit_nodes(group.items(), f);
            }
        }
    }
}

/// One compiled pass. Interactive elements carry an [`ActionId`] that the
/// host hands back to the editor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewTree {
    pub revision: u64,
    pub back: Option<ButtonView>,
    pub save: Option<ButtonView>,
    pub delete: Option<ButtonView>,
    pub root_scalars: Vec<Control>,
    pub root_booleans: Vec<Control>,
    pub groups: Vec<GroupView>,
    #[serde(skip)]
    actions: Vec<Action>,
}

impl ViewTree {
    pub(crate) fn new(revision: u64) -> Self {
        Self {
            revision,
            ..Self::default()
        }
    }

    pub(crate) fn push_action(&mut self, action: Action) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.0)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Every control and group, depth first, root scalars and booleans
    /// first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(NodeRef<'a>)) {
        for control in self.root_scalars.iter().chain(&self.root_booleans) {
            f(NodeRef::Control(control));
        }
        for group in &self.groups {
            f(NodeRef::Group(group));
            visit_nodes(group.items(), f);
        }
    }

    /// First control with `render_key` in [`visit`](Self::visit) order.
    /// Keys that contain `_` can alias an array element (`a_0` and `a[0]`
    /// both render as `root_a_0`); the earlier node wins.
    pub fn control(&self, render_key: &str) -> Option<&Control> {
        let mut found = None;
        self.visit(&mut |node| {
            if let NodeRef::Control(control) = node
                && found.is_none()
                && control.render_key == render_key
            {
                found = Some(control);
            }
        });
        found
    }

    /// First group with `render_key` in [`visit`](Self::visit) order.
    pub fn group(&self, render_key: &str) -> Option<&GroupView> {
        let mut found = None;
        self.visit(&mut |node| {
            if let NodeRef::Group(group) = node
                && found.is_none()
                && group.render_key == render_key
            {
                found = Some(group);
            }
        });
        found
    }

    pub fn render_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.visit(&mut |node| match node {
            NodeRef::Control(control) => keys.push(control.render_key.clone()),
            NodeRef::Group(group) => keys.push(group.render_key.clone()),
        });
        keys
    }
}
