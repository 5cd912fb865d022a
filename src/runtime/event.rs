use crate::core::PageId;
use crate::core::value_path::ValuePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Edited,
    Removed,
    Added,
}

/// A completed write into the value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub kind: ChangeKind,
    pub namespace: String,
    pub path: ValuePath,
}

impl Change {
    pub fn new(kind: ChangeKind, namespace: impl Into<String>, path: ValuePath) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            path,
        }
    }
}

/// Messages an editor sends to its host. They are only published after the
/// value tree has been fully written.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Mutated {
        page: PageId,
        revision: u64,
        change: Change,
    },
    Back {
        page: PageId,
    },
    Saved {
        page: PageId,
    },
    Deleted {
        page: PageId,
    },
}

impl EditorEvent {
    pub fn page(&self) -> &PageId {
        match self {
            Self::Mutated { page, .. }
            | Self::Back { page }
            | Self::Saved { page }
            | Self::Deleted { page } => page,
        }
    }

    /// Mutations always need a fresh pass; shell actions leave it to the
    /// host.
    pub fn requests_rerender(&self) -> bool {
        matches!(self, Self::Mutated { .. })
    }
}
