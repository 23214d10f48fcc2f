//! The read-only node contract and its iterators.
//!
//! A [`Node`] is an immutable value of exactly one [`ReprKind`]. The trait
//! covers the superset of methods for every kind; calling a method that does
//! not fit the node's kind fails with [`NodeError::WrongKind`] rather than
//! returning a zero value. New nodes are only ever produced by a
//! [`NodeBuilder`] obtained from a [`NodeStyle`].

pub mod assembler;
pub mod basic;
pub mod copy;

use std::any::Any;
use std::fmt;

use crate::types::{Link, NodeError, PathSegment, ReprKind, ReprKindSet};

pub use assembler::{ListAssembler, MaState, MapAssembler, NodeAssembler, NodeBuilder};
pub use basic::{BasicAssembler, BasicNode, BasicStyle};
pub use copy::copy_node;

/// A value in the data model.
///
/// Only `repr_kind`, `type_name`, `style` and `as_any` are required. Every
/// other method defaults to the `WrongKind` failure, so an implementation
/// overrides exactly the accessors its kind supports.
///
/// Implementations must be immutable: repeated calls with the same
/// arguments observe the same values for the lifetime of the node.
pub trait Node: fmt::Debug + Send + Sync {
    fn repr_kind(&self) -> ReprKind;

    /// Name of the concrete type, reported in `WrongKind` errors.
    fn type_name(&self) -> &'static str;

    /// The style that builds nodes of this implementation.
    fn style(&self) -> &'static dyn NodeStyle;

    fn as_any(&self) -> &dyn Any;

    fn lookup_string(&self, _key: &str) -> Result<&dyn Node, NodeError> {
        Err(self.wrong_kind("lookup_string", ReprKindSet::JUST_MAP))
    }

    /// Like `lookup_string`, but with a reified key.
    ///
    /// Typed maps override this to accept their own key type without a
    /// round trip through the string representation.
    fn lookup(&self, key: &dyn Node) -> Result<&dyn Node, NodeError> {
        if self.repr_kind() != ReprKind::Map {
            return Err(self.wrong_kind("lookup", ReprKindSet::JUST_MAP));
        }
        let key = key.as_string()?;
        self.lookup_string(key)
    }

    fn lookup_index(&self, _index: usize) -> Result<&dyn Node, NodeError> {
        Err(self.wrong_kind("lookup_index", ReprKindSet::JUST_LIST))
    }

    /// Acts as `lookup_string` on maps and `lookup_index` on lists,
    /// converting the segment as needed.
    fn lookup_segment(&self, segment: &PathSegment) -> Result<&dyn Node, NodeError> {
        match self.repr_kind() {
            ReprKind::Map => self.lookup_string(&segment.key()),
            ReprKind::List => self.lookup_index(segment.index()?),
            _ => Err(self.wrong_kind("lookup_segment", ReprKindSet::RECURSIVE)),
        }
    }

    /// `None` unless the node is a map.
    fn map_iterator(&self) -> Option<Box<dyn MapIterator<'_> + '_>> {
        None
    }

    /// `None` unless the node is a list.
    fn list_iterator(&self) -> Option<Box<dyn ListIterator<'_> + '_>> {
        None
    }

    /// Number of entries of a map or elements of a list; `None` for scalars.
    fn length(&self) -> Option<usize> {
        None
    }

    /// Only schema-typed structs report undefined, for optional fields that
    /// are absent. Data model nodes never do.
    fn is_undefined(&self) -> bool {
        false
    }

    fn is_null(&self) -> bool {
        self.repr_kind() == ReprKind::Null
    }

    fn as_bool(&self) -> Result<bool, NodeError> {
        Err(self.wrong_kind("as_bool", ReprKindSet::JUST_BOOL))
    }

    fn as_int(&self) -> Result<i64, NodeError> {
        Err(self.wrong_kind("as_int", ReprKindSet::JUST_INT))
    }

    fn as_float(&self) -> Result<f64, NodeError> {
        Err(self.wrong_kind("as_float", ReprKindSet::JUST_FLOAT))
    }

    fn as_string(&self) -> Result<&str, NodeError> {
        Err(self.wrong_kind("as_string", ReprKindSet::JUST_STRING))
    }

    fn as_bytes(&self) -> Result<&[u8], NodeError> {
        Err(self.wrong_kind("as_bytes", ReprKindSet::JUST_BYTES))
    }

    fn as_link(&self) -> Result<&Link, NodeError> {
        Err(self.wrong_kind("as_link", ReprKindSet::JUST_LINK))
    }

    #[doc(hidden)]
    fn wrong_kind(&self, method: &'static str, appropriate: ReprKindSet) -> NodeError {
        NodeError::wrong_kind(self.type_name(), method, appropriate, self.repr_kind())
    }
}

/// Cursor over the entries of a map node.
///
/// Two iterators created from the same node yield the same entries in the
/// same order. Calling `next` once more than the map's length fails with
/// [`NodeError::Overread`].
pub trait MapIterator<'a> {
    fn next(&mut self) -> Result<(&'a dyn Node, &'a dyn Node), NodeError>;

    /// False while at least one entry remains. An implementation that needs
    /// I/O to answer must return false when that I/O could fail, so that the
    /// failure is reported by the following `next`.
    fn done(&self) -> bool;
}

/// Cursor over the elements of a list node.
pub trait ListIterator<'a> {
    fn next(&mut self) -> Result<(usize, &'a dyn Node), NodeError>;

    fn done(&self) -> bool;
}

/// Describes a node implementation and hands out builders for it.
pub trait NodeStyle: Send + Sync {
    fn new_builder(&self) -> Box<dyn NodeBuilder>;

    /// Feature detection for copy-on-write construction.
    /// Callers must probe; most styles return `None`.
    fn as_amending(&self) -> Option<&dyn AmendingStyle> {
        None
    }
}

/// Styles that can start a new node from the content of an existing one.
pub trait AmendingStyle: NodeStyle {
    fn amending_builder(&self, base: &dyn Node) -> Result<Box<dyn NodeBuilder>, NodeError>;
}

impl Node for String {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::String
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &basic::BASIC_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_string(&self) -> Result<&str, NodeError> {
        Ok(self.as_str())
    }
}

/// Lets generated code hand out static field names as key nodes.
impl Node for &'static str {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::String
    }

    fn type_name(&self) -> &'static str {
        "String"
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &basic::BASIC_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_string(&self) -> Result<&str, NodeError> {
        Ok(*self)
    }
}

impl Node for i64 {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::Int
    }

    fn type_name(&self) -> &'static str {
        "Int"
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &basic::BASIC_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_int(&self) -> Result<i64, NodeError> {
        Ok(*self)
    }
}
