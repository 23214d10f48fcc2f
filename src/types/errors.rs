use thiserror::Error;

use super::kind::{ReprKind, ReprKindSet};
use super::path_segment::{PathSegment, SegmentError};

/// Errors raised by nodes, iterators and assemblers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("func called on wrong kind: {method} called on a {type_name} node, but only makes sense on {appropriate} (node is {actual})")]
    WrongKind {
        type_name: &'static str,
        method: &'static str,
        appropriate: ReprKindSet,
        actual: ReprKind,
    },

    #[error("key not found: {segment}")]
    NotFound { segment: PathSegment },

    #[error("index {index} out of range (length={length})")]
    OutOfRange { index: usize, length: usize },

    #[error("iterator overread")]
    Overread,

    #[error("cannot repeat map key \"{key}\"")]
    RepeatedMapKey { key: String },

    #[error("invalid assembler use: {operation} on {assembler} in state {state}")]
    StateMisuse {
        assembler: &'static str,
        operation: &'static str,
        state: &'static str,
    },

    #[error("{type_name} has no field named \"{field}\"")]
    UnknownField { type_name: &'static str, field: String },

    #[error("{type_name} is missing required field \"{field}\"")]
    MissingField {
        type_name: &'static str,
        field: &'static str,
    },

    #[error("\"{repr}\" is not a valid representation of {type_name}")]
    InvalidRepr { type_name: &'static str, repr: String },

    #[error(transparent)]
    InvalidSegment(#[from] SegmentError),
}

impl NodeError {
    pub fn wrong_kind(
        type_name: &'static str,
        method: &'static str,
        appropriate: ReprKindSet,
        actual: ReprKind,
    ) -> Self {
        NodeError::WrongKind {
            type_name,
            method,
            appropriate,
            actual,
        }
    }

    pub(crate) fn misuse(
        assembler: &'static str,
        operation: &'static str,
        state: &'static str,
    ) -> Self {
        tracing::debug!(assembler, operation, state, "assembler state misuse");
        NodeError::StateMisuse {
            assembler,
            operation,
            state,
        }
    }

    pub(crate) fn not_found(segment: impl Into<PathSegment>) -> Self {
        NodeError::NotFound {
            segment: segment.into(),
        }
    }

    /// True for absent keys, out-of-range indexes and segments that cannot
    /// address the node at all.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            NodeError::NotFound { .. } | NodeError::OutOfRange { .. } | NodeError::InvalidSegment(_)
        )
    }
}
