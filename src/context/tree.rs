//! Read contract for the collaborator-owned context tree.

use crate::menu::MenuOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-owning handle to a node in a context tree.
///
/// Handles are plain indices into whatever arena the collaborator keeps.
/// Holding one never keeps a node alive, so parent links cannot form
/// ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(usize);

impl NodeKey {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tree of menu-contributing scopes
///
/// All methods are pure reads. `menu_options` is queried on every
/// reconciliation pass and must return the node's *current* descriptors.
pub trait ContextTree {
    /// Stable id of the node, or `None` when the handle no longer resolves.
    fn context_id(&self, node: NodeKey) -> Option<&str>;

    /// Parent handle; `None` for a root.
    fn parent(&self, node: NodeKey) -> Option<NodeKey>;

    /// Co-equal contributors whose options merge into this node's entry.
    fn peers(&self, node: NodeKey) -> &[NodeKey];

    /// Current menu option descriptors contributed by the node itself.
    fn menu_options(&self, node: NodeKey) -> Vec<MenuOption>;
}
