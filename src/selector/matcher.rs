use crate::node::Node;
use crate::types::PathSegment;

use super::parser::{expect_body_map, ParseError};
use super::Selector;

/// Selects the node it is applied to and goes no further.
#[derive(Debug, Default, Clone, Copy)]
pub struct Matcher;

impl Matcher {
    pub fn parse(body: &dyn Node) -> Result<Self, ParseError> {
        expect_body_map("Matcher", body)?;
        Ok(Matcher)
    }
}

impl Selector for Matcher {
    fn interests(&self) -> Option<&[PathSegment]> {
        Some(&[])
    }

    fn explore(&self, _node: &dyn Node, _segment: &PathSegment) -> Option<&dyn Selector> {
        None
    }

    fn decide(&self, _node: &dyn Node) -> bool {
        true
    }
}
