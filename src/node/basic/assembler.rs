use std::mem;

use indexmap::IndexMap;

use crate::node::{
    copy_node, ListAssembler, MaState, MapAssembler, Node, NodeAssembler, NodeBuilder, NodeStyle,
};
use crate::types::{Link, NodeError, ReprKind, ReprKindSet};

use super::{BasicNode, BASIC_STYLE};

const ASSEMBLER: &str = "BasicAssembler";
const MAP_ASSEMBLER: &str = "BasicMapAssembler";
const LIST_ASSEMBLER: &str = "BasicListAssembler";
const KEY_ASSEMBLER: &str = "BasicMapKey";

#[derive(Debug, Default)]
enum State {
    #[default]
    Initial,
    Map(Box<BasicMapAssembler>),
    List(Box<BasicListAssembler>),
    Assigned(BasicNode),
    Taken,
}

impl State {
    fn as_str(&self) -> &'static str {
        match self {
            State::Initial => "initial",
            State::Map(_) => "mid-map",
            State::List(_) => "mid-list",
            State::Assigned(_) => "finished",
            State::Taken => "taken",
        }
    }
}

/// Assembler and builder for [`BasicNode`].
///
/// As a root builder it may carry an amend base: `begin_map` on a map base
/// (or `begin_list` on a list base) continues from the base's content.
/// Any other first call replaces the base.
#[derive(Debug, Default)]
pub struct BasicAssembler {
    state: State,
    base: Option<BasicNode>,
}

impl BasicAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amending(base: BasicNode) -> Self {
        Self {
            state: State::Initial,
            base: Some(base),
        }
    }

    /// Moves the built node out. The assembler is dead afterwards.
    pub fn build_basic(&mut self) -> Result<BasicNode, NodeError> {
        let state = self.state.as_str();
        self.take_finished()
            .ok_or_else(|| NodeError::misuse(ASSEMBLER, "build", state))
    }

    /// The finished value, if the assembler has reached its final state.
    fn take_finished(&mut self) -> Option<BasicNode> {
        let finished = match &self.state {
            State::Assigned(_) => true,
            State::Map(ma) => ma.state == MaState::Finished,
            State::List(la) => la.state == MaState::Finished,
            State::Initial | State::Taken => false,
        };
        if !finished {
            return None;
        }
        match mem::replace(&mut self.state, State::Taken) {
            State::Assigned(node) => Some(node),
            State::Map(ma) => Some(BasicNode::Map(ma.entries)),
            State::List(la) => Some(BasicNode::List(la.elements)),
            State::Initial | State::Taken => None,
        }
    }

    fn expect_initial(&self, operation: &'static str) -> Result<(), NodeError> {
        match self.state {
            State::Initial => Ok(()),
            _ => Err(NodeError::misuse(ASSEMBLER, operation, self.state.as_str())),
        }
    }

    fn assign(&mut self, operation: &'static str, node: BasicNode) -> Result<(), NodeError> {
        self.expect_initial(operation)?;
        self.base = None;
        self.state = State::Assigned(node);
        Ok(())
    }
}

impl NodeAssembler for BasicAssembler {
    fn begin_map(&mut self, size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError> {
        self.expect_initial("begin_map")?;
        let entries = match self.base.take() {
            Some(BasicNode::Map(entries)) => entries,
            _ => IndexMap::with_capacity(size_hint),
        };
        self.state = State::Map(Box::new(BasicMapAssembler::new(entries)));
        match &mut self.state {
            State::Map(ma) => Ok(ma.as_mut()),
            other => Err(NodeError::misuse(ASSEMBLER, "begin_map", other.as_str())),
        }
    }

    fn begin_list(&mut self, size_hint: usize) -> Result<&mut dyn ListAssembler, NodeError> {
        self.expect_initial("begin_list")?;
        let elements = match self.base.take() {
            Some(BasicNode::List(elements)) => elements,
            _ => Vec::with_capacity(size_hint),
        };
        self.state = State::List(Box::new(BasicListAssembler::new(elements)));
        match &mut self.state {
            State::List(la) => Ok(la.as_mut()),
            other => Err(NodeError::misuse(ASSEMBLER, "begin_list", other.as_str())),
        }
    }

    fn assign_null(&mut self) -> Result<(), NodeError> {
        self.assign("assign_null", BasicNode::Null)
    }

    fn assign_bool(&mut self, value: bool) -> Result<(), NodeError> {
        self.assign("assign_bool", BasicNode::Bool(value))
    }

    fn assign_int(&mut self, value: i64) -> Result<(), NodeError> {
        self.assign("assign_int", BasicNode::Int(value))
    }

    fn assign_float(&mut self, value: f64) -> Result<(), NodeError> {
        self.assign("assign_float", BasicNode::Float(value))
    }

    fn assign_string(&mut self, value: &str) -> Result<(), NodeError> {
        self.assign("assign_string", BasicNode::String(value.to_string()))
    }

    fn assign_bytes(&mut self, value: &[u8]) -> Result<(), NodeError> {
        self.assign("assign_bytes", BasicNode::Bytes(value.to_vec()))
    }

    fn assign_link(&mut self, value: &Link) -> Result<(), NodeError> {
        self.assign("assign_link", BasicNode::Link(value.clone()))
    }

    fn assign_node(&mut self, node: &dyn Node) -> Result<(), NodeError> {
        if let Some(same) = node.as_any().downcast_ref::<BasicNode>() {
            return self.assign("assign_node", same.clone());
        }
        self.expect_initial("assign_node")?;
        self.base = None;
        copy_node(node, self)
    }

    fn style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}

impl NodeBuilder for BasicAssembler {
    fn build(&mut self) -> Result<Box<dyn Node>, NodeError> {
        Ok(Box::new(self.build_basic()?))
    }
}

#[derive(Debug)]
struct BasicMapAssembler {
    entries: IndexMap<String, BasicNode>,
    state: MaState,
    key: KeyAssembler,
    pending_key: Option<String>,
    value: BasicAssembler,
}

impl BasicMapAssembler {
    fn new(entries: IndexMap<String, BasicNode>) -> Self {
        Self {
            entries,
            state: MaState::Initial,
            key: KeyAssembler::default(),
            pending_key: None,
            value: BasicAssembler::new(),
        }
    }

    /// Collects a child that finished since the last call.
    fn settle(&mut self) -> Result<(), NodeError> {
        match self.state {
            MaState::MidKey => {
                if let Some(key) = self.key.value.take() {
                    if self.entries.contains_key(&key) {
                        self.state = MaState::Initial;
                        return Err(NodeError::RepeatedMapKey { key });
                    }
                    self.pending_key = Some(key);
                    self.state = MaState::ExpectValue;
                }
            }
            MaState::MidValue => {
                if let Some(value) = self.value.take_finished() {
                    if let Some(key) = self.pending_key.take() {
                        self.entries.insert(key, value);
                    }
                    self.state = MaState::Initial;
                }
            }
            MaState::Initial | MaState::ExpectValue | MaState::Finished => {}
        }
        Ok(())
    }

    fn expect(&self, operation: &'static str, want: MaState) -> Result<(), NodeError> {
        if self.state == want {
            Ok(())
        } else {
            Err(NodeError::misuse(MAP_ASSEMBLER, operation, self.state.as_str()))
        }
    }
}

impl MapAssembler for BasicMapAssembler {
    fn assemble_key(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_key", MaState::Initial)?;
        self.state = MaState::MidKey;
        self.key = KeyAssembler::default();
        Ok(&mut self.key)
    }

    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_value", MaState::ExpectValue)?;
        self.state = MaState::MidValue;
        self.value = BasicAssembler::new();
        Ok(&mut self.value)
    }

    fn assemble_entry(&mut self, key: &str) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle()?;
        self.expect("assemble_entry", MaState::Initial)?;
        if self.entries.contains_key(key) {
            return Err(NodeError::RepeatedMapKey {
                key: key.to_string(),
            });
        }
        self.pending_key = Some(key.to_string());
        self.state = MaState::MidValue;
        self.value = BasicAssembler::new();
        Ok(&mut self.value)
    }

    fn finish(&mut self) -> Result<(), NodeError> {
        self.settle()?;
        self.expect("finish", MaState::Initial)?;
        self.state = MaState::Finished;
        Ok(())
    }

    fn key_style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }

    fn value_style(&self, _key: &str) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}

#[derive(Debug)]
struct BasicListAssembler {
    elements: Vec<BasicNode>,
    state: MaState,
    value: BasicAssembler,
}

impl BasicListAssembler {
    fn new(elements: Vec<BasicNode>) -> Self {
        Self {
            elements,
            state: MaState::Initial,
            value: BasicAssembler::new(),
        }
    }

    fn settle(&mut self) {
        if self.state == MaState::MidValue {
            if let Some(value) = self.value.take_finished() {
                self.elements.push(value);
                self.state = MaState::Initial;
            }
        }
    }

    fn expect_initial(&self, operation: &'static str) -> Result<(), NodeError> {
        if self.state == MaState::Initial {
            Ok(())
        } else {
            Err(NodeError::misuse(LIST_ASSEMBLER, operation, self.state.as_str()))
        }
    }
}

impl ListAssembler for BasicListAssembler {
    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError> {
        self.settle();
        self.expect_initial("assemble_value")?;
        self.state = MaState::MidValue;
        self.value = BasicAssembler::new();
        Ok(&mut self.value)
    }

    fn finish(&mut self) -> Result<(), NodeError> {
        self.settle();
        self.expect_initial("finish")?;
        self.state = MaState::Finished;
        Ok(())
    }

    fn value_style(&self) -> &'static dyn NodeStyle {
        &BASIC_STYLE
    }
}

/// Accepts exactly one string: basic maps only have string keys.
#[derive(Debug, Default)]
struct KeyAssembler {
    value: Option<String>,
}

impl KeyAssembler {
    fn reject(&self, method: &'static str, attempted: ReprKind) -> NodeError {
        NodeError::wrong_kind(KEY_ASSEMBLER, method, ReprKindSet::JUST_STRING, attempted)
    }
}

impl NodeAssembler for KeyAssembler {
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
        if self.value.is_some() {
            return Err(NodeError::misuse(KEY_ASSEMBLER, "assign_string", "finished"));
        }
        self.value = Some(value.to_string());
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
