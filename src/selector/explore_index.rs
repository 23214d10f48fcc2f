use crate::node::Node;
use crate::types::{PathSegment, ReprKind};

use super::parser::{expect_body_map, required_field, required_index, ParseError, SelectorParser};
use super::{Selector, INDEX_KEY, NEXT_SELECTOR_KEY};

const DIRECTIVE: &str = "ExploreIndex";

/// Continues into one specific list index with a next selector.
///
/// This is a pure router: it never selects a node itself.
#[derive(Debug)]
pub struct ExploreIndex {
    next: Box<dyn Selector>,
    interest: [PathSegment; 1],
}

impl ExploreIndex {
    pub fn new(index: usize, next: Box<dyn Selector>) -> Self {
        Self {
            next,
            interest: [PathSegment::Index(index)],
        }
    }

    /// Parses the body of an `ExploreIndex` directive: an `index` integer
    /// and a `next` selector.
    pub fn parse(
        parser: &SelectorParser,
        body: &dyn Node,
        depth: usize,
    ) -> Result<Self, ParseError> {
        expect_body_map(DIRECTIVE, body)?;
        let index = required_index(DIRECTIVE, body, INDEX_KEY)?;
        let next = required_field(DIRECTIVE, body, NEXT_SELECTOR_KEY)?;
        let next = parser.parse_nested(next, depth + 1)?;
        Ok(ExploreIndex::new(index, next))
    }
}

impl Selector for ExploreIndex {
    fn interests(&self) -> Option<&[PathSegment]> {
        Some(&self.interest)
    }

    fn explore(&self, node: &dyn Node, segment: &PathSegment) -> Option<&dyn Selector> {
        if node.repr_kind() != ReprKind::List {
            return None;
        }
        let expected = segment.index().ok()?;
        let actual = self.interest[0].index().ok()?;
        if expected != actual {
            return None;
        }
        Some(self.next.as_ref())
    }

    fn decide(&self, _node: &dyn Node) -> bool {
        false
    }
}
