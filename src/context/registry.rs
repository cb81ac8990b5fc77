//! Arena-backed context tree
//!
//! Nodes live in slots addressed by [`NodeKey`]. Removing a node (an editable
//! region unmounting) empties its slot: handles to it stop resolving and
//! children that pointed at it become roots.

use crate::context::tree::{ContextTree, NodeKey};
use crate::error::{ApiError, StoreError};
use crate::menu::MenuOption;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Closure queried on every reconciliation pass for a node's current options.
pub type OptionsProvider = Arc<dyn Fn() -> Vec<MenuOption> + Send + Sync>;

#[derive(Clone)]
enum OptionSource {
    Static(Vec<MenuOption>),
    Provider(OptionsProvider),
}

impl OptionSource {
    fn current(&self) -> Vec<MenuOption> {
        match self {
            OptionSource::Static(options) => options.clone(),
            OptionSource::Provider(provider) => provider(),
        }
    }
}

struct ContextNode {
    id: String,
    parent: Option<NodeKey>,
    peers: Vec<NodeKey>,
    options: OptionSource,
}

/// In-memory context tree
#[derive(Default)]
pub struct ContextRegistry {
    nodes: Vec<Option<ContextNode>>,
    index: HashMap<String, NodeKey>,
}

impl fmt::Debug for ContextRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRegistry")
            .field("nodes", &self.index.len())
            .finish()
    }
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent` (or as a root). Ids must be unique.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        parent: Option<NodeKey>,
    ) -> Result<NodeKey, StoreError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateContextId(id));
        }
        if let Some(parent) = parent {
            self.node(parent)?;
        }

        let key = NodeKey::new(self.nodes.len());
        self.nodes.push(Some(ContextNode {
            id: id.clone(),
            parent,
            peers: Vec::new(),
            options: OptionSource::Static(Vec::new()),
        }));
        self.index.insert(id, key);
        Ok(key)
    }

    /// Re-parent a node. No cycle check happens here; the trail walk
    /// detects cycles when they are traversed.
    pub fn set_parent(&mut self, node: NodeKey, parent: Option<NodeKey>) -> Result<(), StoreError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        self.node_mut(node)?.parent = parent;
        Ok(())
    }

    /// Register `peer` as a co-equal contributor of `node`.
    pub fn add_peer(&mut self, node: NodeKey, peer: NodeKey) -> Result<(), StoreError> {
        self.node(peer)?;
        let entry = self.node_mut(node)?;
        if !entry.peers.contains(&peer) {
            entry.peers.push(peer);
        }
        Ok(())
    }

    /// Replace the node's options with a fixed list.
    pub fn set_menu_options(
        &mut self,
        node: NodeKey,
        options: Vec<MenuOption>,
    ) -> Result<(), StoreError> {
        self.node_mut(node)?.options = OptionSource::Static(options);
        Ok(())
    }

    /// Compute the node's options on demand.
    pub fn set_options_provider<F>(&mut self, node: NodeKey, provider: F) -> Result<(), StoreError>
    where
        F: Fn() -> Vec<MenuOption> + Send + Sync + 'static,
    {
        self.node_mut(node)?.options = OptionSource::Provider(Arc::new(provider));
        Ok(())
    }

    /// Unmount a node. Its handle stops resolving and it is dropped from
    /// every peer list.
    pub fn remove(&mut self, node: NodeKey) -> Result<(), StoreError> {
        let removed = self
            .nodes
            .get_mut(node.index())
            .and_then(Option::take)
            .ok_or(StoreError::UnknownContext(node))?;
        self.index.remove(&removed.id);
        for entry in self.nodes.iter_mut().flatten() {
            entry.peers.retain(|peer| *peer != node);
        }
        Ok(())
    }

    pub fn key_of(&self, id: &str) -> Option<NodeKey> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, node: NodeKey) -> bool {
        self.node(node).is_ok()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Build a registry from a serialized tree description.
    ///
    /// Nodes may reference parents and peers declared later in the list.
    pub fn from_description(description: &TreeDescription) -> Result<Self, ApiError> {
        let mut registry = Self::new();
        for node in &description.nodes {
            let key = registry.insert(node.id.clone(), None).map_err(|e| match e {
                StoreError::DuplicateContextId(id) => {
                    ApiError::InvalidTree(format!("duplicate node id '{}'", id))
                }
                other => ApiError::from(other),
            })?;
            registry.set_menu_options(key, node.options.clone())?;
        }

        for node in &description.nodes {
            let key = registry.lookup(&node.id)?;
            if let Some(parent_id) = &node.parent {
                let parent = registry.lookup(parent_id)?;
                registry.set_parent(key, Some(parent))?;
            }
            for peer_id in &node.peers {
                let peer = registry.lookup(peer_id)?;
                registry.add_peer(key, peer)?;
            }
        }

        Ok(registry)
    }

    fn lookup(&self, id: &str) -> Result<NodeKey, ApiError> {
        self.key_of(id)
            .ok_or_else(|| ApiError::InvalidTree(format!("unknown node id '{}'", id)))
    }

    fn node(&self, key: NodeKey) -> Result<&ContextNode, StoreError> {
        self.nodes
            .get(key.index())
            .and_then(Option::as_ref)
            .ok_or(StoreError::UnknownContext(key))
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut ContextNode, StoreError> {
        self.nodes
            .get_mut(key.index())
            .and_then(Option::as_mut)
            .ok_or(StoreError::UnknownContext(key))
    }
}

impl ContextTree for ContextRegistry {
    fn context_id(&self, node: NodeKey) -> Option<&str> {
        self.node(node).ok().map(|n| n.id.as_str())
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.node(node)
            .ok()
            .and_then(|n| n.parent)
            .filter(|parent| self.contains(*parent))
    }

    fn peers(&self, node: NodeKey) -> &[NodeKey] {
        self.node(node).map(|n| n.peers.as_slice()).unwrap_or(&[])
    }

    fn menu_options(&self, node: NodeKey) -> Vec<MenuOption> {
        self.node(node)
            .map(|n| n.options.current())
            .unwrap_or_default()
    }
}

/// Serialized form of a context tree (TOML or JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

impl TreeDescription {
    /// Read a description from disk: `.json` files as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ApiError::InvalidTree(format!("failed to read {}: {}", path.display(), e))
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            serde_json::from_str(&text)
                .map_err(|e| ApiError::InvalidTree(format!("{}: {}", path.display(), e)))
        } else {
            toml::from_str(&text)
                .map_err(|e| ApiError::InvalidTree(format!("{}: {}", path.display(), e)))
        }
    }
}

/// One node in a [`TreeDescription`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default)]
    pub options: Vec<MenuOption>,
}
