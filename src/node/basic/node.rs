use std::any::Any;

use indexmap::IndexMap;

use crate::node::{ListIterator, MapIterator, Node, NodeStyle};
use crate::types::{Link, NodeError, ReprKind, ReprKindSet};

use super::BASIC_STYLE;

/// The generic node representation: works for any data.
///
/// Maps keep insertion order and only allow string keys.
#[derive(Debug, Clone, PartialEq)]
pub enum BasicNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Link(Link),
    Map(IndexMap<String, BasicNode>),
    List(Vec<BasicNode>),
}

impl Node for BasicNode {
    fn repr_kind(&self) -> ReprKind {
        match self {
            BasicNode::Null => ReprKind::Null,
            BasicNode::Bool(_) => ReprKind::Bool,
            BasicNode::Int(_) => ReprKind::Int,
            BasicNode::Float(_) => ReprKind::Float,
            BasicNode::String(_) => ReprKind::String,
            BasicNode::Bytes(_) => ReprKind::Bytes,
            BasicNode::Link(_) => ReprKind::Link,
            BasicNode::Map(_) => ReprKind::Map,
            BasicNode::List(_) => ReprKind::List,
        }
    }

    fn type_name(&self) -> &'static str {
        "BasicNode"
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn lookup_string(&self, key: &str) -> Result<&dyn Node, NodeError> {
        match self {
            BasicNode::Map(entries) => entries
                .get(key)
                .map(|v| v as &dyn Node)
                .ok_or_else(|| NodeError::not_found(key)),
            _ => Err(self.wrong_kind("lookup_string", ReprKindSet::JUST_MAP)),
        }
    }

    fn lookup_index(&self, index: usize) -> Result<&dyn Node, NodeError> {
        match self {
            BasicNode::List(elements) => {
                elements
                    .get(index)
                    .map(|v| v as &dyn Node)
                    .ok_or(NodeError::OutOfRange {
                        index,
                        length: elements.len(),
                    })
            }
            _ => Err(self.wrong_kind("lookup_index", ReprKindSet::JUST_LIST)),
        }
    }

    fn map_iterator(&self) -> Option<Box<dyn MapIterator<'_> + '_>> {
        match self {
            BasicNode::Map(entries) => Some(Box::new(BasicMapIterator {
                entries: entries.iter(),
            })),
            _ => None,
        }
    }

    fn list_iterator(&self) -> Option<Box<dyn ListIterator<'_> + '_>> {
        match self {
            BasicNode::List(elements) => Some(Box::new(BasicListIterator {
                elements: elements.iter().enumerate(),
            })),
            _ => None,
        }
    }

    fn length(&self) -> Option<usize> {
        match self {
            BasicNode::Map(entries) => Some(entries.len()),
            BasicNode::List(elements) => Some(elements.len()),
            _ => None,
        }
    }

    fn as_bool(&self) -> Result<bool, NodeError> {
        match self {
            BasicNode::Bool(v) => Ok(*v),
            _ => Err(self.wrong_kind("as_bool", ReprKindSet::JUST_BOOL)),
        }
    }

    fn as_int(&self) -> Result<i64, NodeError> {
        match self {
            BasicNode::Int(v) => Ok(*v),
            _ => Err(self.wrong_kind("as_int", ReprKindSet::JUST_INT)),
        }
    }

    fn as_float(&self) -> Result<f64, NodeError> {
        match self {
            BasicNode::Float(v) => Ok(*v),
            _ => Err(self.wrong_kind("as_float", ReprKindSet::JUST_FLOAT)),
        }
    }

    fn as_string(&self) -> Result<&str, NodeError> {
        match self {
            BasicNode::String(v) => Ok(v),
            _ => Err(self.wrong_kind("as_string", ReprKindSet::JUST_STRING)),
        }
    }

    fn as_bytes(&self) -> Result<&[u8], NodeError> {
        match self {
            BasicNode::Bytes(v) => Ok(v),
            _ => Err(self.wrong_kind("as_bytes", ReprKindSet::JUST_BYTES)),
        }
    }

    fn as_link(&self) -> Result<&Link, NodeError> {
        match self {
            BasicNode::Link(v) => Ok(v),
            _ => Err(self.wrong_kind("as_link", ReprKindSet::JUST_LINK)),
        }
    }
}

struct BasicMapIterator<'a> {
    entries: indexmap::map::Iter<'a, String, BasicNode>,
}

impl<'a> MapIterator<'a> for BasicMapIterator<'a> {
    fn next(&mut self) -> Result<(&'a dyn Node, &'a dyn Node), NodeError> {
        let (key, value) = self.entries.next().ok_or(NodeError::Overread)?;
        Ok((key as &dyn Node, value as &dyn Node))
    }

    fn done(&self) -> bool {
        self.entries.len() == 0
    }
}

struct BasicListIterator<'a> {
    elements: std::iter::Enumerate<std::slice::Iter<'a, BasicNode>>,
}

impl<'a> ListIterator<'a> for BasicListIterator<'a> {
    fn next(&mut self) -> Result<(usize, &'a dyn Node), NodeError> {
        let (index, value) = self.elements.next().ok_or(NodeError::Overread)?;
        Ok((index, value as &dyn Node))
    }

    fn done(&self) -> bool {
        self.elements.len() == 0
    }
}

impl From<bool> for BasicNode {
    fn from(v: bool) -> Self {
        BasicNode::Bool(v)
    }
}

impl From<i64> for BasicNode {
    fn from(v: i64) -> Self {
        BasicNode::Int(v)
    }
}

impl From<f64> for BasicNode {
    fn from(v: f64) -> Self {
        BasicNode::Float(v)
    }
}

impl From<&str> for BasicNode {
    fn from(v: &str) -> Self {
        BasicNode::String(v.to_string())
    }
}

impl From<String> for BasicNode {
    fn from(v: String) -> Self {
        BasicNode::String(v)
    }
}

impl From<Link> for BasicNode {
    fn from(v: Link) -> Self {
        BasicNode::Link(v)
    }
}
