//! ```text
//! type Root struct { mp {K2:T2} }
//! ```
//!
//! Only the anonymous map matters here: complex keys, struct values.

use std::any::Any;
use std::collections::HashMap;

use crate::node::{
    copy_node, ListAssembler, MaState, MapAssembler, MapIterator, Node, NodeAssembler, NodeBuilder,
    NodeStyle,
};
use crate::types::{Link, NodeError, ReprKind, ReprKindSet};

use super::structs::{GeneratedStruct, Phase, StructAssembler};
use super::{K2, T2};

const TYPE_NAME: &str = "Map_K2_T2";

static MAP_K2_T2_STYLE: MapK2T2Style = MapK2T2Style;

/// `{K2: T2}`.
///
/// Entries live contiguously in `entries`, in insertion order. `index`
/// maps each key to its position there. Both always hold the same key set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapK2T2 {
    index: HashMap<K2, usize>,
    entries: Vec<MapK2T2Entry>,
}

#[derive(Debug, Clone, PartialEq)]
struct MapK2T2Entry {
    k: K2,
    v: T2,
}

impl MapK2T2 {
    pub fn get(&self, key: &K2) -> Option<&T2> {
        self.index.get(key).map(|&pos| &self.entries[pos].v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K2, &T2)> {
        self.entries.iter().map(|e| (&e.k, &e.v))
    }

    pub fn assembler() -> MapK2T2Assembler {
        MapK2T2Assembler::new()
    }

    fn insert(&mut self, k: K2, v: T2) -> Result<(), NodeError> {
        if self.index.contains_key(&k) {
            return Err(NodeError::RepeatedMapKey { key: k.to_string() });
        }
        self.index.insert(k.clone(), self.entries.len());
        self.entries.push(MapK2T2Entry { k, v });
        Ok(())
    }

    /// Reifies any key node as a `K2`, through its assembler.
    fn reify_key(key: &dyn Node) -> Result<K2, NodeError> {
        if let Some(k) = key.as_any().downcast_ref::<K2>() {
            return Ok(k.clone());
        }
        let mut ka = K2::assembler();
        ka.assign_node(key)?;
        ka.take_value()
            .ok_or_else(|| NodeError::misuse(K2::TYPE_NAME, "reify_key", "unfinished"))
    }
}

impl Node for MapK2T2 {
    fn repr_kind(&self) -> ReprKind {
        ReprKind::Map
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &MAP_K2_T2_STYLE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Keys are reified from their stringjoin representation; a string
    /// that is not a valid `K2` cannot be present.
    fn lookup_string(&self, key: &str) -> Result<&dyn Node, NodeError> {
        let k = K2::from_repr_string(key).map_err(|_| NodeError::not_found(key))?;
        self.get(&k)
            .map(|v| v as &dyn Node)
            .ok_or_else(|| NodeError::not_found(key))
    }

    fn lookup(&self, key: &dyn Node) -> Result<&dyn Node, NodeError> {
        let k = Self::reify_key(key)?;
        self.get(&k)
            .map(|v| v as &dyn Node)
            .ok_or_else(|| NodeError::not_found(k.to_string()))
    }

    fn map_iterator(&self) -> Option<Box<dyn MapIterator<'_> + '_>> {
        Some(Box::new(MapK2T2Iterator {
            entries: self.entries.iter(),
        }))
    }

    fn length(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct MapK2T2Iterator<'a> {
    entries: std::slice::Iter<'a, MapK2T2Entry>,
}

impl<'a> MapIterator<'a> for MapK2T2Iterator<'a> {
    fn next(&mut self) -> Result<(&'a dyn Node, &'a dyn Node), NodeError> {
        let entry = self.entries.next().ok_or(NodeError::Overread)?;
        Ok((&entry.k as &dyn Node, &entry.v as &dyn Node))
    }

    fn done(&self) -> bool {
        self.entries.len() == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MapK2T2Style;

impl NodeStyle for MapK2T2Style {
    fn new_builder(&self) -> Box<dyn NodeBuilder> {
        Box::new(MapK2T2Assembler::new())
    }
}

/// Assembler and builder for [`MapK2T2`].
///
/// Keys are assembled by the `K2` assembler, so they may arrive either as
/// `{u, i}` maps or as `"u:i"` strings.
#[derive(Debug, Default)]
pub struct MapK2T2Assembler {
    phase: Phase,
    w: MapK2T2,
    key: StructAssembler<K2>,
    pending_key: Option<K2>,
    value: StructAssembler<T2>,
}

impl MapK2T2Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the finished map out. The assembler is dead afterwards.
    pub fn build_map(&mut self) -> Result<MapK2T2, NodeError> {
        if self.phase != Phase::Complete {
            return Err(self.misuse("build"));
        }
        self.phase = Phase::Taken;
        Ok(std::mem::take(&mut self.w))
    }

    fn misuse(&self, operation: &'static str) -> NodeError {
        NodeError::misuse(TYPE_NAME, operation, self.phase.as_str())
    }

    fn reject(&self, method: &'static str, attempted: ReprKind) -> NodeError {
        NodeError::wrong_kind(TYPE_NAME, method, ReprKindSet::JUST_MAP, attempted)
    }

    fn settle(&mut self) -> Result<(), NodeError> {
        match self.phase {
            Phase::Building(MaState::MidKey) => {
                if let Some(k) = self.key.take_value() {
                    if self.w.index.contains_key(&k) {
                        self.phase = Phase::Building(MaState::Initial);
                        return Err(NodeError::RepeatedMapKey { key: k.to_string() });
                    }
                    self.pending_key = Some(k);
                    self.phase = Phase::Building(MaState::ExpectValue);
                }
            }
            Phase::Building(MaState::MidValue) => {
                if let Some(v) = self.value.take_value() {
                    if let Some(k) = self.pending_key.take() {
                        self.w.insert(k, v)?;
                    }
                    self.phase = Phase::Building(MaState::Initial);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn expect(&self, operation: &'static str, want: MaState) -> Result<(), NodeError> {
        if self.phase == Phase::Building(want) {
            Ok(())
        } else {
            Err(self.misuse(operation))
        }
    }
}

impl NodeAssembler for MapK2T2Assembler {
    fn begin_map(&mut self, size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError> {
        if self.phase != Phase::Unstarted {
            return Err(self.misuse("begin_map"));
        }
        self.w.entries.reserve(size_hint);
        self.w.index.reserve(size_hint);
        self.phase = Phase::Building(MaState::Initial);
        Ok(self)
    }

    fn begin_list(&mut self, _size_hint: usize) -> Result<&mut dyn ListAssembler, NodeError> {
        Err(self.reject("begin_list", ReprKind::List))
    }

    fn assign_null(&mut self) -> Result<(), NodeError> {
        Err(self.reject("assign_null", ReprKind::Null))
    }

    fn assign_bool(&mut self, _value: bool) -> Result<(), NodeError> {
        Err(self.reject("assign_bool", ReprKind::Bool))
    }

    fn assign_int(&mut self, _value: i64) -> Result<(), NodeError> {
        Err(self.reject("assign_int", ReprKind::Int))
    }

    fn assign_float(&mut self, _value: f64) -> Result<(), NodeError> {
        Err(self.reject("assign_float", ReprKind::Float))
    }

    fn assign_string(&mut self, _value: &str) -> Result<(), NodeError> {
        Err(self.reject("assign_string", ReprKind::String))
    }

    fn assign_bytes(&mut self, _value: &[u8]) -> Result<(), NodeError> {
        Err(self.reject("assign_bytes", ReprKind::Bytes))
    }

    fn assign_link(&mut self, _value: &Link) -> Result<(), NodeError> {
        Err(self.reject("assign_link", ReprKind::Link))
    }

    fn assign_node(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        if self.phase != Phase::Unstarted {
            return Err(self.misuse("assign_node"));
        }
        if let Some(same) = node.as_any().downcast_ref::<MapK2T2>() {
            self.w = same.clone();
            self.phase = Phase::Complete;
            return Ok(());
        }
        copy_node(node, self)
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &MAP_K2_T2_STYLE
    }
}

impl MapAssembler for MapK2T2Assembler {
    fn assemble_key(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_key", MaState::Initial)?;
        self.phase = Phase::Building(MaState::MidKey);
        self.key = K2::assembler();
        Ok(&mut self.key)
    }

    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_value", MaState::ExpectValue)?;
        self.phase = Phase::Building(MaState::MidValue);
        self.value = T2::assembler();
        Ok(&mut self.value)
    }

    fn assemble_entry(&mut self, key: &str) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_entry", MaState::Initial)?;
        let k = K2::from_repr_string(key)?;
        if self.w.index.contains_key(&k) {
            return Err(NodeError::RepeatedMapKey {
                key: key.to_string(),
            });
        }
        self.pending_key = Some(k);
        self.phase = Phase::Building(MaState::MidValue);
        self.value = T2::assembler();
        Ok(&mut self.value)
    }

    fn finish(&mut self) -> Result<(), NodeError> {
        self.settle()?;
        self.expect("finish", MaState::Initial)?;
        self.phase = Phase::Complete;
        Ok(())
    }

    fn key_style(&self) -> &'static dyn NodeStyle {
        K2::struct_style()
    }

    fn value_style(&self, _key: &str) -> &'static dyn NodeStyle {
        T2::struct_style()
    }
}

impl NodeBuilder for MapK2T2Assembler {
    fn build(&mut self) -> Result<Box<dyn Node>, NodeError> {
        Ok(Box::new(self.build_map()?))
    }
}
