use thiserror::Error;

use crate::node::Node;
use crate::types::{NodeError, ReprKind};

use super::config::SelectorParseConfig;
use super::{
    ExploreAll, ExploreFields, ExploreIndex, ExploreRange, Matcher, Selector,
    SELECTOR_EXPLORE_ALL_KEY, SELECTOR_EXPLORE_FIELDS_KEY, SELECTOR_EXPLORE_INDEX_KEY,
    SELECTOR_EXPLORE_RANGE_KEY, SELECTOR_MATCHER_KEY,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("selector spec parse rejected: selector is a keyed union and thus must be a map, found {0}")]
    NotAMap(ReprKind),

    #[error("selector spec parse rejected: selector is a keyed union and thus must be a single-entry map")]
    NotSingleEntry,

    #[error("selector spec parse rejected: \"{0}\" is not a known member of the selector union")]
    UnknownDirective(String),

    #[error("selector spec parse rejected: {directive} selector body must be a map, found {actual}")]
    BodyNotAMap {
        directive: &'static str,
        actual: ReprKind,
    },

    #[error("selector spec parse rejected: {field} field must be present in {directive} selector")]
    MissingField {
        directive: &'static str,
        field: &'static str,
    },

    #[error("selector spec parse rejected: {field} field in {directive} selector {reason}")]
    InvalidField {
        directive: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("selector spec parse rejected: nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("selector spec parse rejected: {0}")]
    Node(#[from] NodeError),
}

/// Parses serialized selectors.
///
/// A serialized selector is a single-entry map whose key names the
/// directive and whose value is the directive's parameter map.
#[derive(Debug, Clone, Default)]
pub struct SelectorParser {
    config: SelectorParseConfig,
}

impl SelectorParser {
    pub fn new(config: SelectorParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorParseConfig {
        &self.config
    }

    pub fn parse(&self, node: &dyn Node) -> Result<Box<dyn Selector>, ParseError> {
        self.parse_nested(node, 0).map_err(|e| {
            tracing::debug!(error = %e, "selector spec rejected");
            e
        })
    }

    /// Parses a selector found at nesting `depth`. Directives call this for
    /// their nested selectors with `depth + 1`.
    pub(crate) fn parse_nested(
        &self,
        node: &dyn Node,
        depth: usize,
    ) -> Result<Box<dyn Selector>, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::DepthExceeded(self.config.max_depth));
        }
        if node.repr_kind() != ReprKind::Map {
            return Err(ParseError::NotAMap(node.repr_kind()));
        }
        if node.length() != Some(1) {
            return Err(ParseError::NotSingleEntry);
        }
        let mut entries = node
            .map_iterator()
            .ok_or(ParseError::NotAMap(node.repr_kind()))?;
        let (key, body) = entries.next()?;

        let selector: Box<dyn Selector> = match key.as_string()? {
            SELECTOR_MATCHER_KEY => Box::new(Matcher::parse(body)?),
            SELECTOR_EXPLORE_ALL_KEY => Box::new(ExploreAll::parse(self, body, depth)?),
            SELECTOR_EXPLORE_FIELDS_KEY => Box::new(ExploreFields::parse(self, body, depth)?),
            SELECTOR_EXPLORE_INDEX_KEY => Box::new(ExploreIndex::parse(self, body, depth)?),
            SELECTOR_EXPLORE_RANGE_KEY => Box::new(ExploreRange::parse(self, body, depth)?),
            other => return Err(ParseError::UnknownDirective(other.to_string())),
        };
        Ok(selector)
    }
}

/// Parses `node` with the default configuration.
pub fn parse_selector(node: &dyn Node) -> Result<Box<dyn Selector>, ParseError> {
    SelectorParser::default().parse(node)
}

pub(crate) fn expect_body_map(directive: &'static str, body: &dyn Node) -> Result<(), ParseError> {
    match body.repr_kind() {
        ReprKind::Map => Ok(()),
        actual => Err(ParseError::BodyNotAMap { directive, actual }),
    }
}

pub(crate) fn required_field<'a>(
    directive: &'static str,
    body: &'a dyn Node,
    field: &'static str,
) -> Result<&'a dyn Node, ParseError> {
    body.lookup_string(field).map_err(|e| match e {
        NodeError::NotFound { .. } => ParseError::MissingField { directive, field },
        other => ParseError::Node(other),
    })
}

pub(crate) fn required_index(
    directive: &'static str,
    body: &dyn Node,
    field: &'static str,
) -> Result<usize, ParseError> {
    let value = required_field(directive, body, field)?
        .as_int()
        .map_err(|_| ParseError::InvalidField {
            directive,
            field,
            reason: "must be a number".to_string(),
        })?;
    usize::try_from(value).map_err(|_| ParseError::InvalidField {
        directive,
        field,
        reason: format!("must not be negative, found {value}"),
    })
}
