//! ```text
//! type K2 struct { u String, i String } representation stringjoin (":")
//! ```

use std::any::Any;
use std::fmt;

use crate::node::{MapIterator, Node, NodeStyle};
use crate::types::{NodeError, ReprKind};

use super::structs::{FieldValue, GeneratedStruct, StructAssembler};
use super::StructStyle;

static K2_STYLE: StructStyle<K2> = StructStyle::new();

static FIELD_U: &str = "u";
static FIELD_I: &str = "i";

const DELIMITER: char = ':';

/// Map key made of two strings, represented as `"u:i"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct K2 {
    u: String,
    i: String,
}

impl K2 {
    pub fn new(u: impl Into<String>, i: impl Into<String>) -> Self {
        Self {
            u: u.into(),
            i: i.into(),
        }
    }

    pub fn u(&self) -> &str {
        &self.u
    }

    pub fn i(&self) -> &str {
        &self.i
    }

    pub fn assembler() -> StructAssembler<K2> {
        StructAssembler::new()
    }
}

/// The stringjoin representation.
impl fmt::Display for K2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.u, self.i)
    }
}

impl GeneratedStruct for K2 {
    const TYPE_NAME: &'static str = "K2";
    const FIELDS: &'static [&'static str] = &["u", "i"];
    const FIELD_KIND: ReprKind = ReprKind::String;

    fn set_field(&mut self, index: usize, value: FieldValue) {
        match (index, value) {
            (0, FieldValue::String(v)) => self.u = v,
            (1, FieldValue::String(v)) => self.i = v,
            _ => {}
        }
    }

    fn struct_style() -> &'static dyn NodeStyle {
        &K2_STYLE
    }

    fn from_repr_string(repr: &str) -> Result<Self, NodeError> {
        match repr.split_once(DELIMITER) {
            Some((u, i)) if !i.contains(DELIMITER) => Ok(K2::new(u, i)),
            _ => Err(NodeError::InvalidRepr {
                type_name: Self::TYPE_NAME,
                repr: repr.to_string(),
            }),
        }
    }

    /// Fields holding the delimiter would make the joined form ambiguous.
    fn validate(&self) -> Result<(), NodeError> {
        if self.u.contains(DELIMITER) || self.i.contains(DELIMITER) {
            return Err(NodeError::InvalidRepr {
                type_name: Self::TYPE_NAME,
                repr: self.to_string(),
            });
        }
        Ok(())
    }
}

impl Node for K2 {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::Map
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &K2_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn lookup_string(&self, key: &str) -> Result<&dyn Node, NodeError> {
        match key {
            "u" => Ok(&self.u),
            "i" => Ok(&self.i),
            _ => Err(NodeError::not_found(key)),
        }
    }

    fn map_iterator(&self) -> Option<Box<dyn MapIterator<'_> + '_>> {
        Some(Box::new(K2MapIterator { n: self, idx: 0 }))
    }

    fn length(&self) -> Option<usize> {
        Some(Self::FIELDS.len())
    }
}

struct K2MapIterator<'a> {
    n: &'a K2,
    idx: usize,
}

impl<'a> MapIterator<'a> for K2MapIterator<'a> {
    fn next(&mut self) -> Result<(&'a dyn Node, &'a dyn Node), NodeError> {
        let n = self.n;
        let entry: (&'a dyn Node, &'a dyn Node) = match self.idx {
            0 => (&FIELD_U, &n.u),
            1 => (&FIELD_I, &n.i),
            _ => return Err(NodeError::Overread),
        };
        self.idx += 1;
        Ok(entry)
    }

    fn done(&self) -> bool {
        self.idx >= K2::FIELDS.len()
    }
}
