use crate::core::classify::Kind;
use crate::core::value_path::{PathSegment, ValuePath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetaId(usize);

impl MetaId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteWiring {
    /// Remove the element from its parent array.
    Splice { index: usize },
    /// Hand the parent container to a caller-registered handler.
    Handler { key: String },
}

/// One editable unit of the value tree, valid for a single render pass.
#[derive(Debug, Clone)]
pub struct MetaNode {
    pub id: MetaId,
    pub kind: Kind,
    pub key: PathSegment,
    pub namespace: String,
    pub render_key: String,
    pub index: Option<usize>,
    pub parent: Option<MetaId>,
    pub path: ValuePath,
    pub title: String,
    pub children: Vec<MetaId>,
    pub depth: usize,
    /// Container with at least one object/array member.
    pub nested: bool,
    pub absent: bool,
    pub add: Option<String>,
    pub delete: Option<DeleteWiring>,
}

impl MetaNode {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn in_array(&self) -> bool {
        self.index.is_some()
    }
}

/// Arena of meta nodes plus the root-level buckets the shell lays out.
#[derive(Debug, Clone, Default)]
pub struct MetaTree {
    nodes: Vec<MetaNode>,
    pub root_scalars: Vec<MetaId>,
    pub root_booleans: Vec<MetaId>,
    pub root_groups: Vec<MetaId>,
}

impl MetaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, build: impl FnOnce(MetaId) -> MetaNode) -> MetaId {
        let id = MetaId(self.nodes.len());
        let node = build(id);
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: MetaId) -> Option<&MetaNode> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: MetaId) -> &MetaNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: MetaId) -> Option<&MetaNode> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    pub fn children(&self, id: MetaId) -> impl Iterator<Item = &MetaNode> + '_ {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|child| self.node(*child))
    }

    pub fn nodes(&self) -> &[MetaNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, render_key: &str) -> Option<&MetaNode> {
        self.nodes.iter().find(|node| node.render_key == render_key)
    }
}
