//! Generic, order-preserving node representation.

pub mod assembler;
pub mod node;

pub use assembler::BasicAssembler;
pub use node::BasicNode;

use crate::node::{copy_node, AmendingStyle, Node, NodeBuilder, NodeStyle};
use crate::types::NodeError;

/// Style of [`BasicNode`]. Supports amending.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicStyle;

pub(crate) static BASIC_STYLE: BasicStyle = BasicStyle;

impl BasicNode {
    /// Copies any node into the basic representation.
    pub fn from_node(node: &dyn Node) -> Result<BasicNode, NodeError> {
        if let Some(same) = node.as_any().downcast_ref::<BasicNode>() {
            return Ok(same.clone());
        }
        let mut builder = BasicAssembler::new();
        copy_node(node, &mut builder)?;
        builder.build_basic()
    }
}

impl NodeStyle for BasicStyle {
    fn new_builder(&self) -> Box<dyn NodeBuilder> {
        Box::new(BasicAssembler::new())
    }

    fn as_amending(&self) -> Option<&dyn AmendingStyle> {
        Some(self)
    }
}

impl AmendingStyle for BasicStyle {
    fn amending_builder(&self, base: &dyn Node) -> Result<Box<dyn NodeBuilder>, NodeError> {
        let base = BasicNode::from_node(base)?;
        Ok(Box::new(BasicAssembler::amending(base)))
    }
}
