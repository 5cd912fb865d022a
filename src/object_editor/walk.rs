use tracing::{debug, trace};

use crate::core::classify::{Kind, ScalarType, classify, has_nested, is_absent};
use crate::core::namespace;
use crate::core::value::Value;
use crate::core::value_path::{PathSegment, ValuePath};

use super::model::{DeleteWiring, MetaId, MetaNode, MetaTree};
use super::options::EditorOptions;

/// Where a value sits: everything the walker needs besides the value itself.
#[derive(Debug, Clone)]
struct Slot {
    key: PathSegment,
    namespace: String,
    render_key: String,
    index: Option<usize>,
    parent: Option<MetaId>,
    path: ValuePath,
}

impl Slot {
    fn root() -> Self {
        Self {
            key: PathSegment::Key(String::new()),
            namespace: namespace::ROOT.to_string(),
            render_key: namespace::ROOT.to_string(),
            index: None,
            parent: None,
            path: ValuePath::empty(),
        }
    }

    fn top_level(key: &str) -> Self {
        let namespace = namespace::child(namespace::ROOT, key);
        Self {
            key: PathSegment::Key(key.to_string()),
            render_key: namespace.clone(),
            namespace,
            index: None,
            parent: None,
            path: ValuePath::empty().key(key),
        }
    }

    fn member(node: &MetaNode, key: &str) -> Self {
        Self {
            key: PathSegment::Key(key.to_string()),
            namespace: namespace::child(&node.namespace, key),
            render_key: namespace::child(&node.render_key, key),
            index: None,
            parent: Some(node.id),
            path: node.path.key(key),
        }
    }

    fn element(node: &MetaNode, index: usize) -> Self {
        Self {
            key: PathSegment::Index(index),
            namespace: namespace::element(&node.namespace),
            render_key: namespace::element_render_key(&node.render_key, index),
            index: Some(index),
            parent: Some(node.id),
            path: node.path.index(index),
        }
    }
}

/// Writes configured defaults into top-level fields that are null.
/// Returns how many fields were filled.
pub fn apply_defaults(root: &mut Value, options: &EditorOptions) -> usize {
    let Value::Object(map) = root else {
        return 0;
    };
    let mut filled = 0;
    for (key, value) in map.iter_mut() {
        if !is_absent(value) {
            continue;
        }
        let ns = namespace::child(namespace::ROOT, key);
        if let Some(default) = options.default_for(&ns) {
            trace!(namespace = %ns, "filling null field with configured default");
            *value = default.clone();
            filled += 1;
        }
    }
    filled
}

pub fn build_meta_tree(root: &Value, options: &EditorOptions) -> MetaTree {
    let mut walker = Walker {
        options,
        tree: MetaTree::new(),
        depth: 0,
    };
    match root {
        Value::Object(map) => {
            for (key, value) in ordered_members(map) {
                let id = walker.walk(value, Slot::top_level(key));
                walker.route_root(id);
            }
        }
        other => {
            let id = walker.walk(other, Slot::root());
            walker.route_root(id);
        }
    }
    debug!(
        nodes = walker.tree.len(),
        scalars = walker.tree.root_scalars.len(),
        booleans = walker.tree.root_booleans.len(),
        groups = walker.tree.root_groups.len(),
        "built meta tree"
    );
    walker.tree
}

/// Plain scalars first, then booleans, then nested containers.
fn ordered_members(map: &indexmap::IndexMap<String, Value>) -> Vec<(&str, &Value)> {
    let mut scalars = Vec::new();
    let mut booleans = Vec::new();
    let mut containers = Vec::new();
    for (key, value) in map {
        let bucket = match classify(value) {
            Kind::Object | Kind::Array => &mut containers,
            Kind::Scalar(ScalarType::Boolean) => &mut booleans,
            Kind::Scalar(_) => &mut scalars,
        };
        bucket.push((key.as_str(), value));
    }
    scalars.extend(booleans);
    scalars.extend(containers);
    scalars
}

struct Walker<'a> {
    options: &'a EditorOptions,
    tree: MetaTree,
    depth: usize,
}

impl Walker<'_> {
    fn walk(&mut self, value: &Value, slot: Slot) -> MetaId {
        let kind = classify(value);
        if !kind.is_container() {
            return self.push_node(value, kind, slot, false);
        }

        let nested = has_nested(value);
        let id = self.push_node(value, kind, slot, nested);
        self.depth += 1;
        match value {
            Value::Object(map) if nested => {
                for (key, member) in ordered_members(map) {
                    let slot = Slot::member(self.tree.node(id), key);
                    self.walk(member, slot);
                }
            }
            Value::Object(map) => {
                for (key, member) in map {
                    let slot = Slot::member(self.tree.node(id), key);
                    self.push_node(member, classify(member), slot, false);
                }
            }
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let slot = Slot::element(self.tree.node(id), index);
                    if nested {
                        self.walk(item, slot);
                    } else {
                        self.push_node(item, classify(item), slot, false);
                    }
                }
            }
            _ => {}
        }
        self.depth -= 1;
        id
    }

    fn push_node(&mut self, value: &Value, kind: Kind, slot: Slot, nested: bool) -> MetaId {
        let title = self.resolve_title(value, kind, &slot);
        let delete = self.delete_wiring(&slot);
        let add = if kind.is_container() && slot.index.is_none() {
            self.options.add_key(&slot.namespace, None)
        } else {
            None
        };
        let depth = self.depth;
        let absent = is_absent(value);
        self.tree.push(|id| MetaNode {
            id,
            kind,
            key: slot.key,
            namespace: slot.namespace,
            render_key: slot.render_key,
            index: slot.index,
            parent: slot.parent,
            path: slot.path,
            title,
            children: Vec::new(),
            depth,
            nested,
            absent,
            add,
            delete,
        })
    }

    fn delete_wiring(&self, slot: &Slot) -> Option<DeleteWiring> {
        if slot.path.is_empty() {
            return None;
        }
        match self.options.delete_key(&slot.namespace, slot.index) {
            Some(key) => Some(DeleteWiring::Handler { key }),
            None => slot.index.map(|index| DeleteWiring::Splice { index }),
        }
    }

    fn resolve_title(&self, value: &Value, kind: Kind, slot: &Slot) -> String {
        if let Some(title) = self.options.title_for(&slot.namespace, slot.index) {
            return title.to_string();
        }
        trace!(namespace = %slot.namespace, "no configured title");
        if kind != Kind::Object {
            return slot.key.to_string();
        }
        let own = ["Tag", "Name", "Title"]
            .iter()
            .filter_map(|field| value.get(field))
            .filter_map(Value::to_text_scalar)
            .find(|text| !text.is_empty());
        match own {
            Some(title) => title,
            None if slot.index.is_none() => slot.key.to_string(),
            None => String::new(),
        }
    }

    fn route_root(&mut self, id: MetaId) {
        let kind = self.tree.node(id).kind;
        match kind {
            Kind::Object | Kind::Array => self.tree.root_groups.push(id),
            Kind::Scalar(ScalarType::Boolean) => self.tree.root_booleans.push(id),
            Kind::Scalar(_) => self.tree.root_scalars.push(id),
        }
    }
}
