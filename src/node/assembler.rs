//! The write-once construction contract.
//!
//! A [`NodeAssembler`] accepts exactly one value: either a single `assign_*`
//! call, or a `begin_map`/`begin_list` followed by a composite assembler run
//! that ends in `finish`. Child assemblers handed out by a composite are
//! borrowed from it, so a child can never outlive its parent; the parent
//! collects the child's finished value on its next call.
//!
//! Every call that does not fit the current state fails with
//! [`NodeError::StateMisuse`]. Nothing in this contract panics on misuse.

use crate::types::{Link, NodeError};

use super::{Node, NodeStyle};

/// Receives exactly one value.
pub trait NodeAssembler {
    fn begin_map(&mut self, size_hint: usize) -> Result<&mut dyn MapAssembler, NodeError>;
    fn begin_list(&mut self, size_hint: usize) -> Result<&mut dyn ListAssembler, NodeError>;
    fn assign_null(&mut self) -> Result<(), NodeError>;
    fn assign_bool(&mut self, value: bool) -> Result<(), NodeError>;
    fn assign_int(&mut self, value: i64) -> Result<(), NodeError>;
    fn assign_float(&mut self, value: f64) -> Result<(), NodeError>;
    fn assign_string(&mut self, value: &str) -> Result<(), NodeError>;
    fn assign_bytes(&mut self, value: &[u8]) -> Result<(), NodeError>;
    fn assign_link(&mut self, value: &Link) -> Result<(), NodeError>;

    /// Copies the value of an existing node. Implementations take a fast
    /// path when `node` has their own concrete type and fall back to
    /// [`copy_node`](super::copy_node) otherwise.
    fn assign_node(&mut self, node: &dyn Node) -> Result<(), NodeError>;

    /// Style of the node this assembler produces.
    fn style(&self) -> &'static dyn NodeStyle;
}

/// Assembles the entries of a map.
///
/// Legal sequences are `(assemble_key, assemble_value | assemble_entry)* finish`.
pub trait MapAssembler {
    /// Hands out the assembler for the next key. Legal in `initial` only.
    fn assemble_key(&mut self) -> Result<&mut dyn NodeAssembler, NodeError>;

    /// Hands out the assembler for the value of the key just assembled.
    /// Legal in `expect-value` only.
    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError>;

    /// Shortcut for a string key followed by `assemble_value`. Fails with
    /// [`NodeError::RepeatedMapKey`] if the key was already assembled.
    fn assemble_entry(&mut self, key: &str) -> Result<&mut dyn NodeAssembler, NodeError>;

    /// Completes the map. Legal in `initial` only; a key or value that is
    /// still being assembled is a state misuse.
    fn finish(&mut self) -> Result<(), NodeError>;

    fn key_style(&self) -> &'static dyn NodeStyle;
    fn value_style(&self, key: &str) -> &'static dyn NodeStyle;
}

/// Assembles the elements of a list.
pub trait ListAssembler {
    fn assemble_value(&mut self) -> Result<&mut dyn NodeAssembler, NodeError>;
    fn finish(&mut self) -> Result<(), NodeError>;
    fn value_style(&self) -> &'static dyn NodeStyle;
}

/// A root assembler that hands the finished node to its caller.
///
/// `build` moves the node out; the builder is dead afterwards and every
/// further call fails with `StateMisuse`.
pub trait NodeBuilder: NodeAssembler {
    fn build(&mut self) -> Result<Box<dyn Node>, NodeError>;
}

/// States of a map assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaState {
    /// Ready for the next key or `finish`.
    Initial,
    /// A key assembler is out.
    MidKey,
    /// The key is done; `assemble_value` is the only legal next step.
    ExpectValue,
    /// A value assembler is out.
    MidValue,
    Finished,
}

impl MaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaState::Initial => "initial",
            MaState::MidKey => "mid-key",
            MaState::ExpectValue => "expect-value",
            MaState::MidValue => "mid-value",
            MaState::Finished => "finished",
        }
    }
}

