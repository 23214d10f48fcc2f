//! Assembler machinery shared by the generated struct types.
//!
//! A generated struct has a closed, ordered set of required fields that all
//! share one scalar kind. Its assembler accepts the struct as a map (by
//! field name) and rejects unknown fields, repeated fields and missing
//! fields. Types with a string representation also accept `assign_string`.

use std::fmt;
use std::mem;

use crate::node::basic::BASIC_STYLE;
use crate::node::{
    copy_node, ListAssembler, MaState, MapAssembler, Node, NodeAssembler, NodeBuilder, NodeStyle,
};
use crate::types::{Link, NodeError, ReprKind, ReprKindSet};

/// A scalar field value, as collected by a field's value assembler.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
}

/// Implemented by every generated struct type.
pub trait GeneratedStruct: Node + Clone + Default + fmt::Debug + 'static {
    const TYPE_NAME: &'static str;
    /// Field names in declared order; this is also the iteration order.
    const FIELDS: &'static [&'static str];
    const FIELD_KIND: ReprKind;

    fn set_field(&mut self, index: usize, value: FieldValue);

    fn struct_style() -> &'static dyn NodeStyle;

    /// Parses the type's string representation. Types without one reject
    /// strings outright.
    fn from_repr_string(_repr: &str) -> Result<Self, NodeError> {
        Err(NodeError::wrong_kind(
            Self::TYPE_NAME,
            "assign_string",
            ReprKindSet::JUST_MAP,
            ReprKind::String,
        ))
    }

    /// Checks constraints spanning fields once every field is set.
    fn validate(&self) -> Result<(), NodeError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Unstarted,
    Building(MaState),
    Complete,
    Taken,
}

impl Phase {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Phase::Unstarted => "initial",
            Phase::Building(state) => state.as_str(),
            Phase::Complete => "finished",
            Phase::Taken => "taken",
        }
    }
}

/// Assembler and builder for a generated struct.
#[derive(Debug)]
pub struct StructAssembler<T: GeneratedStruct> {
    phase: Phase,
    w: T,
    isset: u32,
    current: Option<usize>,
    key: FieldKeyAssembler,
    slot: FieldSlot,
}

impl<T: GeneratedStruct> StructAssembler<T> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unstarted,
            w: T::default(),
            isset: 0,
            current: None,
            key: FieldKeyAssembler::new(T::TYPE_NAME, T::FIELDS),
            slot: FieldSlot::new(T::TYPE_NAME, T::FIELD_KIND),
        }
    }

    /// Moves the finished value out, if assembly is complete.
    pub fn take_value(&mut self) -> Option<T> {
        if self.phase != Phase::Complete {
            return None;
        }
        self.phase = Phase::Taken;
        Some(mem::take(&mut self.w))
    }

    fn misuse(&self, operation: &'static str) -> NodeError {
        NodeError::misuse(T::TYPE_NAME, operation, self.phase.as_str())
    }

    fn reject(&self, method: &'static str, attempted: ReprKind) -> NodeError {
        NodeError::wrong_kind(T::TYPE_NAME, method, ReprKindSet::JUST_MAP, attempted)
    }

    fn settle(&mut self) -> Result<(), NodeError> {
        match self.phase {
            Phase::Building(MaState::MidKey) => {
                if let Some(index) = self.key.picked.take() {
                    if self.isset & (1 << index) != 0 {
                        self.phase = Phase::Building(MaState::Initial);
                        return Err(NodeError::RepeatedMapKey {
                            key: T::FIELDS[index].to_string(),
                        });
                    }
                    self.current = Some(index);
                    self.phase = Phase::Building(MaState::ExpectValue);
                }
            }
            Phase::Building(MaState::MidValue) => {
                if let Some(value) = self.slot.value.take() {
                    if let Some(index) = self.current.take() {
                        self.w.set_field(index, value);
                        self.isset |= 1 << index;
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

    fn reset_slot(&mut self) -> &mut FieldSlot {
        self.slot = FieldSlot::new(T::TYPE_NAME, T::FIELD_KIND);
        &mut self.slot
    }
}

impl<T: GeneratedStruct> Default for StructAssembler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GeneratedStruct> NodeAssembler for StructAssembler<T> {
    fn begin_map(&mut self, _size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError> {
        if self.phase != Phase::Unstarted {
            return Err(self.misuse("begin_map"));
        }
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

    fn assign_string(&mut self, value: &str) -> Result<(), NodeError> {
        if self.phase != Phase::Unstarted {
            return Err(self.misuse("assign_string"));
        }
        self.w = T::from_repr_string(value)?;
        self.phase = Phase::Complete;
        Ok(())
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
        if let Some(same) = node.as_any().downcast_ref::<T>() {
            same.validate()?;
            self.w = same.clone();
            self.phase = Phase::Complete;
            return Ok(());
        }
        copy_node(node, self)
    }

    fn style(&self) -> &'static dyn NodeStyle {
        T::struct_style()
    }
}

impl<T: GeneratedStruct> MapAssembler for StructAssembler<T> {
    fn assemble_key(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_key", MaState::Initial)?;
        self.phase = Phase::Building(MaState::MidKey);
        self.key = FieldKeyAssembler::new(T::TYPE_NAME, T::FIELDS);
        Ok(&mut self.key)
    }

    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_value", MaState::ExpectValue)?;
        self.phase = Phase::Building(MaState::MidValue);
        Ok(self.reset_slot())
    }

    fn assemble_entry(&mut self, key: &str) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_entry", MaState::Initial)?;
        let index = field_index(T::TYPE_NAME, T::FIELDS, key)?;
        if self.isset & (1 << index) != 0 {
            return Err(NodeError::RepeatedMapKey {
                key: key.to_string(),
            });
        }
        self.current = Some(index);
        self.phase = Phase::Building(MaState::MidValue);
        Ok(self.reset_slot())
    }

    fn finish(&mut self) -> Result<(), NodeError> {
        self.settle()?;
        self.expect("finish", MaState::Initial)?;
        for (index, &field) in T::FIELDS.iter().enumerate() {
            if self.isset & (1 << index) == 0 {
                return Err(NodeError::MissingField {
                    type_name: T::TYPE_NAME,
                    field,
                });
            }
        }
        self.w.validate()?;
        self.phase = Phase::Complete;
        Ok(())
    }

    fn key_style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }

    fn value_style(&self, _key: &str) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}

impl<T: GeneratedStruct> NodeBuilder for StructAssembler<T> {
    fn build(&mut self) -> Result<Box<dyn Node>, NodeError> {
        let value = self.take_value().ok_or_else(|| self.misuse("build"))?;
        Ok(Box::new(value))
    }
}

fn field_index(
    type_name: &'static str,
    fields: &'static [&'static str],
    key: &str,
) -> Result<usize, NodeError> {
    fields
        .iter()
        .position(|f| *f == key)
        .ok_or_else(|| NodeError::UnknownField {
            type_name,
            field: key.to_string(),
        })
}

/// Key assembler for a closed field set: unknown names fail immediately.
#[derive(Debug)]
struct FieldKeyAssembler {
    type_name: &'static str,
    fields: &'static [&'static str],
    picked: Option<usize>,
}

impl FieldKeyAssembler {
    fn new(type_name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            type_name,
            fields,
            picked: None,
        }
    }

    fn reject(&self, method: &'static str, attempted: ReprKind) -> NodeError {
        NodeError::wrong_kind(self.type_name, method, ReprKindSet::JUST_STRING, attempted)
    }
}

impl NodeAssembler for FieldKeyAssembler {
    fn begin_map(&mut self, _size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError> {
        Err(self.reject("begin_map", ReprKind::Map))
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

    fn assign_string(&mut self, value: &str) -> Result<(), NodeError> {
        if self.picked.is_some() {
            return Err(NodeError::misuse(self.type_name, "assign_string", "finished"));
        }
        self.picked = Some(field_index(self.type_name, self.fields, value)?);
        Ok(())
    }

    fn assign_bytes(&mut self, _value: &[u8]) -> Result<(), NodeError> {
        Err(self.reject("assign_bytes", ReprKind::Bytes))
    }

    fn assign_link(&mut self, _value: &Link) -> Result<(), NodeError> {
        Err(self.reject("assign_link", ReprKind::Link))
    }

    fn assign_node(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        match node.repr_kind() {
            ReprKind::String => self.assign_string(node.as_string()?),
            other => Err(self.reject("assign_node", other)),
        }
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}

/// Value assembler for one scalar field.
#[derive(Debug)]
struct FieldSlot {
    type_name: &'static str,
    kind: ReprKind,
    value: Option<FieldValue>,
}

impl FieldSlot {
    fn new(type_name: &'static str, kind: ReprKind) -> Self {
        Self {
            type_name,
            kind,
            value: None,
        }
    }

    fn reject(&self, method: &'static str, attempted: ReprKind) -> NodeError {
        NodeError::wrong_kind(self.type_name, method, ReprKindSet::just(self.kind), attempted)
    }

    fn store(
        &mut self,
        method: &'static str,
        attempted: ReprKind,
        value: FieldValue,
    ) -> Result<(), NodeError> {
        if attempted != self.kind {
            return Err(self.reject(method, attempted));
        }
        if self.value.is_some() {
            return Err(NodeError::misuse(self.type_name, method, "finished"));
        }
        self.value = Some(value);
        Ok(())
    }
}

impl NodeAssembler for FieldSlot {
    fn begin_map(&mut self, _size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError> {
        Err(self.reject("begin_map", ReprKind::Map))
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

    fn assign_int(&mut self, value: i64) -> Result<(), NodeError> {
        self.store("assign_int", ReprKind::Int, FieldValue::Int(value))
    }

    fn assign_float(&mut self, _value: f64) -> Result<(), NodeError> {
        Err(self.reject("assign_float", ReprKind::Float))
    }

    fn assign_string(&mut self, value: &str) -> Result<(), NodeError> {
        self.store(
            "assign_string",
            ReprKind::String,
            FieldValue::String(value.to_string()),
        )
    }

    fn assign_bytes(&mut self, _value: &[u8]) -> Result<(), NodeError> {
        Err(self.reject("assign_bytes", ReprKind::Bytes))
    }

    fn assign_link(&mut self, _value: &Link) -> Result<(), NodeError> {
        Err(self.reject("assign_link", ReprKind::Link))
    }

    fn assign_node(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        match node.repr_kind() {
            ReprKind::String => self.assign_string(node.as_string()?),
            ReprKind::Int => self.assign_int(node.as_int()?),
            other => Err(self.reject("assign_node", other)),
        }
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}
