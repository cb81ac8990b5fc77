//! Context Trail Resolver
//!
//! Walks parent links from the active node. The walk refuses to revisit a
//! node and is bounded by a maximum depth, so a malformed (cyclic) tree is
//! reported instead of looping forever.

use crate::context::tree::{ContextTree, NodeKey};
use crate::error::StoreError;
use std::collections::HashSet;
use tracing::debug;

/// Default bound on the number of nodes a single walk may visit.
pub const DEFAULT_MAX_TRAIL_DEPTH: usize = 256;

/// Resolve the full walk from `active` to its root, inclusive.
///
/// Returned order is active-first, root-last. Every handle in the result is
/// known to resolve in `tree`.
pub fn resolve_trail<T: ContextTree + ?Sized>(
    tree: &T,
    active: NodeKey,
    max_depth: usize,
) -> Result<Vec<NodeKey>, StoreError> {
    let start = tree
        .context_id(active)
        .ok_or(StoreError::UnknownContext(active))?
        .to_string();

    let mut visited = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(active);

    while let Some(node) = current {
        if tree.context_id(node).is_none() {
            return Err(StoreError::UnknownContext(node));
        }
        if visited.len() >= max_depth || !seen.insert(node) {
            return Err(StoreError::CyclicContextTree {
                context: start,
                depth: visited.len(),
            });
        }
        visited.push(node);
        current = tree.parent(node);
    }

    debug!(context = %start, depth = visited.len(), "Resolved context trail");
    Ok(visited)
}

/// Ids of the trail from `active` up to, but not including, the root.
///
/// Active-first. Empty when nothing is active or the active node is a root.
pub fn context_trail<T: ContextTree + ?Sized>(
    tree: &T,
    active: Option<NodeKey>,
    max_depth: usize,
) -> Result<Vec<String>, StoreError> {
    let Some(active) = active else {
        return Ok(Vec::new());
    };
    let mut walk = resolve_trail(tree, active, max_depth)?;
    // The walk always ends on a parentless node.
    walk.pop();
    Ok(walk
        .into_iter()
        .filter_map(|node| tree.context_id(node).map(str::to_string))
        .collect())
}
