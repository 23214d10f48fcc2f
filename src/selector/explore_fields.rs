use indexmap::IndexMap;

use crate::node::Node;
use crate::types::{PathSegment, ReprKind};

use super::parser::{expect_body_map, required_field, ParseError, SelectorParser};
use super::{Selector, FIELDS_KEY};

const DIRECTIVE: &str = "ExploreFields";

/// Continues into named map entries, each with its own selector.
#[derive(Debug)]
pub struct ExploreFields {
    selections: IndexMap<String, Box<dyn Selector>>,
    interests: Vec<PathSegment>,
}

impl ExploreFields {
    pub fn new(selections: IndexMap<String, Box<dyn Selector>>) -> Self {
        let interests = selections
            .keys()
            .map(|k| PathSegment::Key(k.clone()))
            .collect();
        Self {
            selections,
            interests,
        }
    }

    pub fn parse(
        parser: &SelectorParser,
        body: &dyn Node,
        depth: usize,
    ) -> Result<Self, ParseError> {
        expect_body_map(DIRECTIVE, body)?;
        let fields = required_field(DIRECTIVE, body, FIELDS_KEY)?;
        if fields.repr_kind() != ReprKind::Map {
            return Err(ParseError::InvalidField {
                directive: DIRECTIVE,
                field: FIELDS_KEY,
                reason: format!("must be a map, found {}", fields.repr_kind()),
            });
        }

        let mut selections = IndexMap::with_capacity(fields.length().unwrap_or(0));
        if let Some(mut entries) = fields.map_iterator() {
            while !entries.done() {
                let (name, spec) = entries.next()?;
                let name = name.as_string()?;
                let selector = parser.parse_nested(spec, depth + 1)?;
                selections.insert(name.to_string(), selector);
            }
        }
        Ok(ExploreFields::new(selections))
    }
}

impl Selector for ExploreFields {
    fn interests(&self) -> Option<&[PathSegment]> {
        Some(&self.interests)
    }

    fn explore(&self, node: &dyn Node, segment: &PathSegment) -> Option<&dyn Selector> {
        if node.repr_kind() != ReprKind::Map {
            return None;
        }
        self.selections
            .get(&*segment.key())
            .map(|s| s.as_ref())
    }

    fn decide(&self, _node: &dyn Node) -> bool {
        false
    }
}
