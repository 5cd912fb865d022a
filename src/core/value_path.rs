use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of a node inside a [`Value`](crate::core::value::Value) tree,
/// from the root down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    /// Parent path plus the segment that addresses the node inside it.
    pub fn split_last(&self) -> Option<(ValuePath, &PathSegment)> {
        let (last, rest) = self.segments.split_last()?;
        let parent = ValuePath {
            segments: rest.to_vec(),
        };
        Some((parent, last))
    }
}

/// `Networks[0].Routes`; the empty path prints as `$`.
impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (pos, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if pos == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSegment, ValuePath};

    #[test]
    fn display_mixes_keys_and_indexes() {
        let path = ValuePath::empty()
            .key("Networks")
            .index(0)
            .key("Routes")
            .index(1)
            .key("Address");
        assert_eq!(path.to_string(), "Networks[0].Routes[1].Address");
        assert_eq!(ValuePath::empty().to_string(), "$");
        assert_eq!(ValuePath::empty().index(2).to_string(), "[2]");
    }

    #[test]
    fn split_last_returns_parent() {
        let path = ValuePath::empty().key("DNS").index(3);
        let (parent, last) = path.split_last().expect("non-empty");
        assert_eq!(parent, ValuePath::empty().key("DNS"));
        assert_eq!(last, &PathSegment::Index(3));
        assert_eq!(last.index(), Some(3));
        assert!(ValuePath::empty().split_last().is_none());
    }
}
