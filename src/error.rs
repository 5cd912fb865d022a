use crate::ui::view::ActionId;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("view was rendered at revision {view} but the editor is at revision {current}")]
    StaleView { view: u64, current: u64 },

    #[error("no action {0:?} in this view")]
    UnknownAction(ActionId),

    #[error("field '{namespace}' is not editable")]
    Disabled { namespace: String },

    #[error("no value at path '{path}'")]
    PathNotFound { path: String },

    #[error("value at '{path}' is not an object or array")]
    NotAContainer { path: String },

    #[error("index {index} is out of range for '{path}'")]
    IndexOutOfRange { path: String, index: usize },

    #[error("field '{namespace}' expects {expected} input")]
    InputMismatch {
        namespace: String,
        expected: &'static str,
    },

    #[error("no handler registered under '{key}'")]
    MissingHandler { key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid namespace pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
