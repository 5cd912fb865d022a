use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::core::namespace;
use crate::core::value::Value;
use crate::core::value_path::PathSegment;
use crate::error::ConfigError;

/// Pushes a new element into the container it is registered for.
pub type AddFactory = Arc<dyn Fn(&mut Value) + Send + Sync>;

/// Removes `segment` from the parent container it is handed.
pub type DeleteHandler = Arc<dyn Fn(&mut Value, &PathSegment) + Send + Sync>;

pub type ShellFn = Arc<dyn Fn(&Value) + Send + Sync>;

#[derive(Clone)]
pub struct ShellButton {
    title: String,
    func: ShellFn,
}

impl ShellButton {
    pub fn new(title: impl Into<String>, func: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        Self {
            title: title.into(),
            func: Arc::new(func),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn invoke(&self, root: &Value) {
        (self.func)(root)
    }
}

impl fmt::Debug for ShellButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellButton")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// The declarative half of the editor options; hosts usually keep it next
/// to the page definition as YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    pub titles: IndexMap<String, String>,
    pub defaults: IndexMap<String, Value>,
    pub hidden: IndexMap<String, bool>,
    pub disabled: IndexMap<String, bool>,
    pub read_only: bool,
}

impl FieldConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Exact namespaces plus glob patterns such as `root_Peers_*_PrivateKey`.
#[derive(Debug, Clone, Default)]
pub struct NamespaceSet {
    exact: HashSet<String>,
    patterns: Vec<Glob>,
    globs: Option<GlobSet>,
}

impl NamespaceSet {
    pub fn compile(flags: &IndexMap<String, bool>) -> Result<Self, ConfigError> {
        let mut set = Self::default();
        for (entry, enabled) in flags {
            if *enabled {
                set.add(entry)?;
            }
        }
        Ok(set)
    }

    pub fn add(&mut self, entry: &str) -> Result<(), ConfigError> {
        if !is_pattern(entry) {
            self.exact.insert(entry.to_string());
            return Ok(());
        }
        let glob = Glob::new(entry).map_err(|source| ConfigError::Pattern {
            pattern: entry.to_string(),
            source,
        })?;
        self.patterns.push(glob);
        let mut builder = GlobSetBuilder::new();
        for glob in &self.patterns {
            builder.add(glob.clone());
        }
        let globs = builder.build().map_err(|source| ConfigError::Pattern {
            pattern: entry.to_string(),
            source,
        })?;
        self.globs = Some(globs);
        Ok(())
    }

    pub fn insert_exact(&mut self, namespace: impl Into<String>) {
        self.exact.insert(namespace.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.exact.contains(key)
            || self
                .globs
                .as_ref()
                .map(|globs| globs.is_match(key))
                .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }
}

fn is_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}

#[derive(Clone, Default)]
pub struct EditorOptions {
    fields: FieldConfig,
    hidden: NamespaceSet,
    disabled: NamespaceSet,
    new_buttons: IndexMap<String, AddFactory>,
    del_buttons: IndexMap<String, DeleteHandler>,
    back_button: Option<ShellButton>,
    save_button: Option<ShellButton>,
    delete_button: Option<ShellButton>,
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(fields: FieldConfig) -> Result<Self, ConfigError> {
        let hidden = NamespaceSet::compile(&fields.hidden)?;
        let disabled = NamespaceSet::compile(&fields.disabled)?;
        Ok(Self {
            fields,
            hidden,
            disabled,
            ..Self::default()
        })
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        Self::from_config(FieldConfig::from_yaml_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Self::from_config(FieldConfig::from_json_str(input)?)
    }

    pub fn with_title(mut self, namespace: impl Into<String>, title: impl Into<String>) -> Self {
        self.fields.titles.insert(namespace.into(), title.into());
        self
    }

    pub fn with_default(mut self, namespace: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.defaults.insert(namespace.into(), value.into());
        self
    }

    pub fn with_hidden(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.fields.hidden.insert(namespace.clone(), true);
        self.hidden.insert_exact(namespace);
        self
    }

    pub fn with_hidden_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.hidden.add(pattern)?;
        self.fields.hidden.insert(pattern.to_string(), true);
        Ok(self)
    }

    pub fn with_disabled(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.fields.disabled.insert(namespace.clone(), true);
        self.disabled.insert_exact(namespace);
        self
    }

    pub fn with_disabled_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.disabled.add(pattern)?;
        self.fields.disabled.insert(pattern.to_string(), true);
        Ok(self)
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.fields.read_only = read_only;
        self
    }

    pub fn with_new_button(
        mut self,
        namespace: impl Into<String>,
        factory: impl Fn(&mut Value) + Send + Sync + 'static,
    ) -> Self {
        self.new_buttons.insert(namespace.into(), Arc::new(factory));
        self
    }

    pub fn with_delete_button(
        mut self,
        namespace: impl Into<String>,
        handler: impl Fn(&mut Value, &PathSegment) + Send + Sync + 'static,
    ) -> Self {
        self.del_buttons.insert(namespace.into(), Arc::new(handler));
        self
    }

    pub fn with_back_button(mut self, button: ShellButton) -> Self {
        self.back_button = Some(button);
        self
    }

    pub fn with_save_button(mut self, button: ShellButton) -> Self {
        self.save_button = Some(button);
        self
    }

    pub fn with_delete_action(mut self, button: ShellButton) -> Self {
        self.delete_button = Some(button);
        self
    }

    pub fn fields(&self) -> &FieldConfig {
        &self.fields
    }

    pub fn read_only(&self) -> bool {
        self.fields.read_only
    }

    pub fn back_button(&self) -> Option<&ShellButton> {
        self.back_button.as_ref()
    }

    pub fn save_button(&self) -> Option<&ShellButton> {
        self.save_button.as_ref()
    }

    pub fn delete_button(&self) -> Option<&ShellButton> {
        self.delete_button.as_ref()
    }

    pub fn default_for(&self, namespace: &str) -> Option<&Value> {
        self.fields.defaults.get(namespace)
    }

    pub fn title_for(&self, namespace: &str, index: Option<usize>) -> Option<&str> {
        namespace::lookup_keys(namespace, index)
            .into_iter()
            .find_map(|key| self.fields.titles.get(key.as_str()))
            .map(String::as_str)
    }

    pub fn is_hidden(&self, namespace: &str, index: Option<usize>) -> bool {
        namespace::lookup_keys(namespace, index)
            .iter()
            .any(|key| self.hidden.contains(key))
    }

    pub fn is_disabled(&self, namespace: &str, index: Option<usize>) -> bool {
        self.read_only()
            || namespace::lookup_keys(namespace, index)
                .iter()
                .any(|key| self.disabled.contains(key))
    }

    /// Registered key of the add factory for a node, if any.
    pub fn add_key(&self, namespace: &str, index: Option<usize>) -> Option<String> {
        namespace::lookup_keys(namespace, index)
            .into_iter()
            .find(|key| self.new_buttons.contains_key(key.as_str()))
    }

    /// Registered key of the delete handler for a node, if any.
    pub fn delete_key(&self, namespace: &str, index: Option<usize>) -> Option<String> {
        namespace::lookup_keys(namespace, index)
            .into_iter()
            .find(|key| self.del_buttons.contains_key(key.as_str()))
    }

    pub fn new_button(&self, key: &str) -> Option<&AddFactory> {
        self.new_buttons.get(key)
    }

    pub fn del_button(&self, key: &str) -> Option<&DeleteHandler> {
        self.del_buttons.get(key)
    }
}

impl fmt::Debug for EditorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorOptions")
            .field("fields", &self.fields)
            .field("new_buttons", &self.new_buttons.keys().collect::<Vec<_>>())
            .field("del_buttons", &self.del_buttons.keys().collect::<Vec<_>>())
            .field("back_button", &self.back_button)
            .field("save_button", &self.save_button)
            .field("delete_button", &self.delete_button)
            .finish()
    }
}
