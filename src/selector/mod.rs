//! Declarative traversal directives.
//!
//! A traversal driver holds a node and a [`Selector`]. At each node it asks
//! `decide` whether the node itself is a result, asks `interests` which
//! children can matter, and asks `explore` for the selector to continue with
//! inside each child it visits. `explore` and `decide` never fail: a
//! non-match is `None` or `false`.

pub mod config;
pub mod explore_all;
pub mod explore_fields;
pub mod explore_index;
pub mod explore_range;
pub mod matcher;
pub mod parser;

use std::fmt;

use crate::node::Node;
use crate::types::PathSegment;

pub use config::SelectorParseConfig;
pub use explore_all::ExploreAll;
pub use explore_fields::ExploreFields;
pub use explore_index::ExploreIndex;
pub use explore_range::ExploreRange;
pub use matcher::Matcher;
pub use parser::{parse_selector, ParseError, SelectorParser};

// Union member keys of a serialized selector.
pub const SELECTOR_MATCHER_KEY: &str = ".";
pub const SELECTOR_EXPLORE_ALL_KEY: &str = "a";
pub const SELECTOR_EXPLORE_FIELDS_KEY: &str = "f";
pub const SELECTOR_EXPLORE_INDEX_KEY: &str = "i";
pub const SELECTOR_EXPLORE_RANGE_KEY: &str = "r";

// Field keys inside a selector body.
pub const FIELDS_KEY: &str = "f>";
pub const INDEX_KEY: &str = "i";
pub const START_KEY: &str = "^";
pub const END_KEY: &str = "$";
pub const NEXT_SELECTOR_KEY: &str = ">";

pub trait Selector: fmt::Debug + Send + Sync {
    /// The children this selector can continue into. `None` means every
    /// child may matter; `Some(&[])` means none do.
    fn interests(&self) -> Option<&[PathSegment]>;

    /// The selector to apply inside the child at `segment` of `node`, or
    /// `None` to prune that branch.
    fn explore(&self, node: &dyn Node, segment: &PathSegment) -> Option<&dyn Selector>;

    /// Whether `node` itself is selected.
    fn decide(&self, node: &dyn Node) -> bool;
}
