//! ```text
//! type T2 struct { a Int, b Int, c Int, d Int }
//! ```

use std::any::Any;

use crate::node::{MapIterator, Node, NodeStyle};
use crate::types::{NodeError, ReprKind};

use super::structs::{FieldValue, GeneratedStruct, StructAssembler};
use super::StructStyle;

static T2_STYLE: StructStyle<T2> = StructStyle::new();

static FIELD_A: &str = "a";
static FIELD_B: &str = "b";
static FIELD_C: &str = "c";
static FIELD_D: &str = "d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct T2 {
    a: i64,
    b: i64,
    c: i64,
    d: i64,
}

impl T2 {
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> Self {
        Self { a, b, c, d }
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn c(&self) -> i64 {
        self.c
    }

    pub fn d(&self) -> i64 {
        self.d
    }

    pub fn assembler() -> StructAssembler<T2> {
        StructAssembler::new()
    }
}

impl GeneratedStruct for T2 {
    const TYPE_NAME: &'static str = "T2";
    const FIELDS: &'static [&'static str] = &["a", "b", "c", "d"];
    const FIELD_KIND: ReprKind = ReprKind::Int;

    fn set_field(&mut self, index: usize, value: FieldValue) {
        if let FieldValue::Int(v) = value {
            match index {
                0 => self.a = v,
                1 => self.b = v,
                2 => self.c = v,
                3 => self.d = v,
                _ => {}
            }
        }
    }

    fn struct_style() -> &'static dyn NodeStyle {
        &T2_STYLE
    }
}

impl Node for T2 {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::Map
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &T2_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn lookup_string(&self, key: &str) -> Result<&dyn Node, NodeError> {
        match key {
            "a" => Ok(&self.a),
            "b" => Ok(&self.b),
            "c" => Ok(&self.c),
            "d" => Ok(&self.d),
            _ => Err(NodeError::not_found(key)),
        }
    }

    fn map_iterator(&self) -> Option<Box<dyn MapIterator<'_> + '_>> {
        Some(Box::new(T2MapIterator { n: self, idx: 0 }))
    }

    fn length(&self) -> Option<usize> {
        Some(Self::FIELDS.len())
    }
}

struct T2MapIterator<'a> {
    n: &'a T2,
    idx: usize,
}

impl<'a> MapIterator<'a> for T2MapIterator<'a> {
    fn next(&mut self) -> Result<(&'a dyn Node, &'a dyn Node), NodeError> {
        let n = self.n;
        let entry: (&'a dyn Node, &'a dyn Node) = match self.idx {
            0 => (&FIELD_A, &n.a),
            1 => (&FIELD_B, &n.b),
            2 => (&FIELD_C, &n.c),
            3 => (&FIELD_D, &n.d),
            _ => return Err(NodeError::Overread),
        };
        self.idx += 1;
        Ok(entry)
    }

    fn done(&self) -> bool {
        self.idx >= T2::FIELDS.len()
    }
}
