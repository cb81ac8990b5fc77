//! Edit Context Tree
//!
//! The store never owns the tree of editable regions. It reads it through the
//! [`ContextTree`] contract using non-owning [`NodeKey`] handles. An arena
//! implementation ([`ContextRegistry`]) is provided for collaborators that do
//! not already keep their own tree.

pub mod registry;
pub mod trail;
pub mod tree;

pub use registry::{ContextRegistry, NodeDescription, OptionsProvider, TreeDescription};
pub use trail::{context_trail, resolve_trail, DEFAULT_MAX_TRAIL_DEPTH};
pub use tree::{ContextTree, NodeKey};
