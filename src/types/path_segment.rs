use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("path segment \"{0}\" is not a list index")]
    NotAnIndex(String),
}

/// One step of a path: a map key or a list index.
///
/// Conversions between the two forms are best-effort. An index can always
/// be rendered as a key; a key only converts to an index when it is the
/// decimal form of a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    pub fn index(&self) -> Result<usize, SegmentError> {
        match self {
            PathSegment::Index(i) => Ok(*i),
            PathSegment::Key(s) => s
                .parse::<usize>()
                .map_err(|_| SegmentError::NotAnIndex(s.clone())),
        }
    }

    /// The key form of this segment. Indexes are rendered in decimal.
    pub fn key(&self) -> std::borrow::Cow<'_, str> {
        match self {
            PathSegment::Index(i) => std::borrow::Cow::Owned(i.to_string()),
            PathSegment::Key(s) => std::borrow::Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(s) => f.write_str(s),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Key(s)
    }
}
