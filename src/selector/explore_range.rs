use crate::node::Node;
use crate::types::{PathSegment, ReprKind};

use super::parser::{expect_body_map, required_field, required_index, ParseError, SelectorParser};
use super::{Selector, END_KEY, NEXT_SELECTOR_KEY, START_KEY};

const DIRECTIVE: &str = "ExploreRange";

/// Ranges wider than this report every child as interesting instead of
/// listing indexes; `explore` still prunes to `start..end`.
const MAX_LISTED_INTERESTS: usize = 1 << 16;

/// Continues into list indexes in `start..end` with a next selector.
#[derive(Debug)]
pub struct ExploreRange {
    start: usize,
    end: usize,
    next: Box<dyn Selector>,
    interest: Option<Vec<PathSegment>>,
}

impl ExploreRange {
    pub fn new(start: usize, end: usize, next: Box<dyn Selector>) -> Self {
        let interest = (end.saturating_sub(start) <= MAX_LISTED_INTERESTS)
            .then(|| (start..end).map(PathSegment::Index).collect());
        Self {
            start,
            end,
            next,
            interest,
        }
    }

    pub fn parse(
        parser: &SelectorParser,
        body: &dyn Node,
        depth: usize,
    ) -> Result<Self, ParseError> {
        expect_body_map(DIRECTIVE, body)?;
        let start = required_index(DIRECTIVE, body, START_KEY)?;
        let end = required_index(DIRECTIVE, body, END_KEY)?;
        if end < start {
            return Err(ParseError::InvalidField {
                directive: DIRECTIVE,
                field: END_KEY,
                reason: format!("must not be less than start ({start}), found {end}"),
            });
        }
        let max = parser.config().max_range_len;
        if end - start > max {
            return Err(ParseError::InvalidField {
                directive: DIRECTIVE,
                field: END_KEY,
                reason: format!("spans {} indexes, more than the limit of {max}", end - start),
            });
        }
        let next = required_field(DIRECTIVE, body, NEXT_SELECTOR_KEY)?;
        let next = parser.parse_nested(next, depth + 1)?;
        Ok(ExploreRange::new(start, end, next))
    }
}

impl Selector for ExploreRange {
    fn interests(&self) -> Option<&[PathSegment]> {
        self.interest.as_deref()
    }

    fn explore(&self, node: &dyn Node, segment: &PathSegment) -> Option<&dyn Selector> {
        if node.repr_kind() != ReprKind::List {
            return None;
        }
        let index = segment.index().ok()?;
        if index < self.start || index >= self.end {
            return None;
        }
        Some(self.next.as_ref())
    }

    fn decide(&self, _node: &dyn Node) -> bool {
        false
    }
}
