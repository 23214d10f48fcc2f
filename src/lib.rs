//! In-memory IPLD data model and selector algebra.
//!
//! `ipld-core` provides the read-only [`Node`](node::Node) contract over
//! tree-shaped, content-addressable data (maps, lists, scalars and links),
//! the write-once [`NodeAssembler`](node::NodeAssembler) state machine that
//! produces new immutable nodes, a generic [`BasicNode`](node::BasicNode)
//! representation, a worked example of generated specialized types, and the
//! [`Selector`](selector::Selector) algebra for declarative traversal.
//!
//! Completed nodes never change and may be read from any number of threads.
//! Codecs, link loading and storage are left to the caller.

pub mod gendemo;
pub mod node;
pub mod selector;
pub mod traversal;
pub mod types;
