use crate::node::Node;
use crate::types::PathSegment;

use super::parser::{expect_body_map, required_field, ParseError, SelectorParser};
use super::{Selector, NEXT_SELECTOR_KEY};

const DIRECTIVE: &str = "ExploreAll";

/// Continues into every child with the same next selector.
#[derive(Debug)]
pub struct ExploreAll {
    next: Box<dyn Selector>,
}

impl ExploreAll {
    pub fn new(next: Box<dyn Selector>) -> Self {
        Self { next }
    }

    pub fn parse(
        parser: &SelectorParser,
        body: &dyn Node,
        depth: usize,
    ) -> Result<Self, ParseError> {
        expect_body_map(DIRECTIVE, body)?;
        let next = required_field(DIRECTIVE, body, NEXT_SELECTOR_KEY)?;
        Ok(ExploreAll::new(parser.parse_nested(next, depth + 1)?))
    }
}

impl Selector for ExploreAll {
    fn interests(&self) -> Option<&[PathSegment]> {
        None
    }

    fn explore(&self, _node: &dyn Node, _segment: &PathSegment) -> Option<&dyn Selector> {
        Some(self.next.as_ref())
    }

    fn decide(&self, _node: &dyn Node) -> bool {
        false
    }
}
