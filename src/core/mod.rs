pub mod classify;
pub mod namespace;
pub mod value;
pub mod value_path;

use std::fmt;

/// Identifies the host page that owns an editor; re-render requests are
/// addressed to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
