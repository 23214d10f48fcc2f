pub mod errors;
pub mod kind;
pub mod link;
pub mod path_segment;

pub use errors::NodeError;
pub use kind::{ReprKind, ReprKindSet};
pub use link::Link;
pub use path_segment::{PathSegment, SegmentError};
