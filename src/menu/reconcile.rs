//! Menu Option Reconciler
//!
//! Maintains the option map: context id -> (option name -> record), both
//! levels insertion-ordered. Reconciling a node merges the current options of
//! the node and each of its peers into the node's submap in place.

use crate::context::{ContextTree, NodeKey};
use crate::error::StoreError;
use crate::menu::option::SharedOption;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Options of one context node, keyed by option name.
pub type OptionSubmap = IndexMap<String, SharedOption>;

/// What a single reconciliation pass did to a submap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub context_id: String,
    pub created: bool,
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
}

impl ReconcileOutcome {
    pub fn changed(&self) -> bool {
        self.created || self.inserted > 0 || self.updated > 0 || self.removed > 0
    }
}

/// Per-context option submaps in trail order.
#[derive(Debug, Default)]
pub struct OptionMap {
    entries: IndexMap<String, OptionSubmap>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Context ids in their current order.
    pub fn context_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, context_id: &str) -> Option<&OptionSubmap> {
        self.entries.get(context_id)
    }

    /// Submaps in order, for flattening.
    pub fn submaps(&self) -> impl Iterator<Item = (&str, &OptionSubmap)> {
        self.entries.iter().map(|(id, submap)| (id.as_str(), submap))
    }

    /// Drop every submap. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Merge the current options of `node` and its peers into the node's
    /// submap.
    ///
    /// Existing records are written in place (their `Arc` is kept), new names
    /// are appended, and names no contributor offered this pass are removed.
    /// Names keep the position they were first inserted at.
    pub fn update_menu_options<T: ContextTree + ?Sized>(
        &mut self,
        tree: &T,
        node: NodeKey,
    ) -> Result<ReconcileOutcome, StoreError> {
        let context_id = tree
            .context_id(node)
            .ok_or(StoreError::UnknownContext(node))?
            .to_string();

        let mut outcome = ReconcileOutcome {
            context_id: context_id.clone(),
            created: !self.entries.contains_key(&context_id),
            ..ReconcileOutcome::default()
        };
        let submap = self.entries.entry(context_id).or_default();

        let mut seen = HashSet::new();
        let contributors = std::iter::once(node).chain(tree.peers(node).iter().copied());
        for contributor in contributors {
            for option in tree.menu_options(contributor) {
                seen.insert(option.name.clone());
                match submap.get(&option.name) {
                    Some(existing) => {
                        if existing.write().assign(option) {
                            outcome.updated += 1;
                        }
                    }
                    None => {
                        submap.insert(option.name.clone(), option.into_shared());
                        outcome.inserted += 1;
                    }
                }
            }
        }

        let before = submap.len();
        submap.retain(|name, _| seen.contains(name));
        outcome.removed = before - submap.len();

        if outcome.changed() {
            debug!(
                context = %outcome.context_id,
                inserted = outcome.inserted,
                updated = outcome.updated,
                removed = outcome.removed,
                "Reconciled menu options"
            );
        }
        Ok(outcome)
    }

    /// Rebuild the top-level order from a walk given active-first.
    ///
    /// The result is root-first; submaps of contexts not in `visited` are
    /// dropped. Returns whether the key sequence changed.
    pub fn retain_trail(&mut self, visited: &[String]) -> bool {
        let previous: Vec<String> = self.entries.keys().cloned().collect();
        let mut remaining = std::mem::take(&mut self.entries);
        for context_id in visited.iter().rev() {
            if let Some(submap) = remaining.swap_remove(context_id) {
                self.entries.insert(context_id.clone(), submap);
            }
        }
        !previous.iter().eq(self.entries.keys())
    }

    /// Look up a record and report whether it is the same allocation as
    /// `other`.
    pub fn is_same_record(&self, context_id: &str, name: &str, other: &SharedOption) -> bool {
        self.get(context_id)
            .and_then(|submap| submap.get(name))
            .map(|record| Arc::ptr_eq(record, other))
            .unwrap_or(false)
    }
}
