use std::fmt;

use serde::{Deserialize, Serialize};

/// The essential serializable kind of a node.
///
/// Every node has exactly one kind, and the kind decides which accessors
/// are legal to call on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReprKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Bytes,
    Link,
    Map,
    List,
}

impl ReprKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReprKind::Null => "null",
            ReprKind::Bool => "bool",
            ReprKind::Int => "int",
            ReprKind::Float => "float",
            ReprKind::String => "string",
            ReprKind::Bytes => "bytes",
            ReprKind::Link => "link",
            ReprKind::Map => "map",
            ReprKind::List => "list",
        }
    }

    /// Map and list are the only kinds with children.
    pub fn is_recursive(&self) -> bool {
        matches!(self, ReprKind::Map | ReprKind::List)
    }
}

impl fmt::Display for ReprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed set of kinds, used to report which kinds an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReprKindSet(&'static [ReprKind]);

impl ReprKindSet {
    pub const JUST_NULL: ReprKindSet = ReprKindSet(&[ReprKind::Null]);
    pub const JUST_BOOL: ReprKindSet = ReprKindSet(&[ReprKind::Bool]);
    pub const JUST_INT: ReprKindSet = ReprKindSet(&[ReprKind::Int]);
    pub const JUST_FLOAT: ReprKindSet = ReprKindSet(&[ReprKind::Float]);
    pub const JUST_STRING: ReprKindSet = ReprKindSet(&[ReprKind::String]);
    pub const JUST_BYTES: ReprKindSet = ReprKindSet(&[ReprKind::Bytes]);
    pub const JUST_LINK: ReprKindSet = ReprKindSet(&[ReprKind::Link]);
    pub const JUST_MAP: ReprKindSet = ReprKindSet(&[ReprKind::Map]);
    pub const JUST_LIST: ReprKindSet = ReprKindSet(&[ReprKind::List]);
    pub const RECURSIVE: ReprKindSet = ReprKindSet(&[ReprKind::Map, ReprKind::List]);

    /// The set containing only `kind`.
    pub fn just(kind: ReprKind) -> ReprKindSet {
        match kind {
            ReprKind::Null => Self::JUST_NULL,
            ReprKind::Bool => Self::JUST_BOOL,
            ReprKind::Int => Self::JUST_INT,
            ReprKind::Float => Self::JUST_FLOAT,
            ReprKind::String => Self::JUST_STRING,
            ReprKind::Bytes => Self::JUST_BYTES,
            ReprKind::Link => Self::JUST_LINK,
            ReprKind::Map => Self::JUST_MAP,
            ReprKind::List => Self::JUST_LIST,
        }
    }

    pub fn contains(&self, kind: ReprKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn kinds(&self) -> &'static [ReprKind] {
        self.0
    }
}

impl fmt::Display for ReprKindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            f.write_str(kind.as_str())?;
        }
        Ok(())
    }
}
