//! Page Edit Store
//!
//! Owns the option map, the active-context pointer, the editor flags and the
//! overlay. Reads the collaborator's context tree on demand and never keeps
//! anything but handles into it.
//!
//! Mutators take `&mut self`: there is one logical writer. Every mutator
//! publishes at most one [`StoreEvent`] per facet it actually changed.

use crate::config::EditorConfig;
use crate::context::{self, ContextTree, NodeKey, DEFAULT_MAX_TRAIL_DEPTH};
use crate::error::StoreError;
use crate::events::{ChangeBus, StoreEvent};
use crate::menu::{to_json, AggregatedMenu, OptionMap, SharedOption};
use crate::overlay::{OverlayController, OverlayDefaults, TimerScheduler};
use crate::session::{PersistentFlags, SessionStorage};
use serde_json::Value;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::{debug, info};

pub struct PageEditStore {
    storage: Arc<dyn SessionStorage>,
    max_trail_depth: usize,
    active_context: Option<NodeKey>,
    flags: PersistentFlags,
    local_tooltips_disabled: bool,
    option_map: OptionMap,
    revision: u64,
    view: AggregatedMenu,
    overlay: OverlayController,
    bus: ChangeBus,
}

impl PageEditStore {
    /// Store with default trail bound and overlay defaults, flags seeded
    /// from `storage`.
    pub fn new(storage: Arc<dyn SessionStorage>, scheduler: Arc<dyn TimerScheduler>) -> Self {
        Self::build(
            storage,
            scheduler,
            DEFAULT_MAX_TRAIL_DEPTH,
            OverlayDefaults::default(),
        )
    }

    pub fn from_config(
        config: &EditorConfig,
        storage: Arc<dyn SessionStorage>,
        scheduler: Arc<dyn TimerScheduler>,
    ) -> Self {
        Self::build(
            storage,
            scheduler,
            config.store.max_trail_depth,
            config.overlay.clone(),
        )
    }

    fn build(
        storage: Arc<dyn SessionStorage>,
        scheduler: Arc<dyn TimerScheduler>,
        max_trail_depth: usize,
        overlay_defaults: OverlayDefaults,
    ) -> Self {
        let flags = PersistentFlags::load(storage.as_ref());
        debug!(
            is_edit = flags.is_edit,
            is_position_toggled = flags.is_position_toggled,
            "Seeded editor flags"
        );
        let bus = ChangeBus::new();
        Self {
            storage,
            max_trail_depth: max_trail_depth.max(1),
            active_context: None,
            flags,
            local_tooltips_disabled: false,
            option_map: OptionMap::new(),
            revision: 0,
            view: AggregatedMenu::new(),
            overlay: OverlayController::new(scheduler, overlay_defaults, bus.clone()),
            bus,
        }
    }

    /// Activate `active` right after construction.
    pub fn with_active_context<T: ContextTree + ?Sized>(
        mut self,
        tree: &T,
        active: NodeKey,
    ) -> Result<Self, StoreError> {
        self.set_active_context(tree, Some(active))?;
        Ok(self)
    }

    /// Make `context` active (or keep the current one with `None`), then
    /// reconcile every node on the walk to the root and reorder the option
    /// map root-first, dropping contexts that are no longer on the walk.
    ///
    /// The walk is resolved before anything is touched, so an error leaves
    /// the store as it was. Returns whether the option map changed.
    pub fn set_active_context<T: ContextTree + ?Sized>(
        &mut self,
        tree: &T,
        context: Option<NodeKey>,
    ) -> Result<bool, StoreError> {
        let active = context.or(self.active_context);
        let walk = match active {
            Some(node) => context::resolve_trail(tree, node, self.max_trail_depth)?,
            None => Vec::new(),
        };

        let mut changed = false;
        let mut visited = Vec::with_capacity(walk.len());
        for node in walk {
            let outcome = self.option_map.update_menu_options(tree, node)?;
            changed |= outcome.changed();
            visited.push(outcome.context_id);
        }
        changed |= self.option_map.retain_trail(&visited);

        let focus_moved = active != self.active_context;
        self.active_context = active;

        if focus_moved {
            let context = active.and_then(|node| tree.context_id(node)).map(str::to_string);
            debug!(context = ?context, "Active context changed");
            self.bus.publish(StoreEvent::ActiveContextChanged { context });
        }
        if changed {
            self.menu_changed();
        }
        Ok(changed)
    }

    /// Reconcile a single node (and its peers) into its submap, creating the
    /// submap if needed. Returns the node's id.
    pub fn update_menu_options<T: ContextTree + ?Sized>(
        &mut self,
        tree: &T,
        node: NodeKey,
    ) -> Result<String, StoreError> {
        let outcome = self.option_map.update_menu_options(tree, node)?;
        if outcome.changed() {
            self.menu_changed();
        }
        Ok(outcome.context_id)
    }

    /// Flattened menu, root-first. Recomputed at most once per change.
    pub fn context_menu_options(&self) -> Arc<Vec<SharedOption>> {
        self.view.get(&self.option_map, self.revision)
    }

    /// The flattened menu as JSON, unset fields omitted.
    pub fn context_menu_json(&self) -> Value {
        to_json(&self.context_menu_options())
    }

    pub fn option_map(&self) -> &OptionMap {
        &self.option_map
    }

    pub fn active_context(&self) -> Option<NodeKey> {
        self.active_context
    }

    /// Ids from the active context up to (not including) its root.
    pub fn context_trail<T: ContextTree + ?Sized>(&self, tree: &T) -> Result<Vec<String>, StoreError> {
        context::context_trail(tree, self.active_context, self.max_trail_depth)
    }

    pub fn is_edit(&self) -> bool {
        self.flags.is_edit
    }

    pub fn is_position_toggled(&self) -> bool {
        self.flags.is_position_toggled
    }

    pub fn are_local_tooltips_disabled(&self) -> bool {
        self.local_tooltips_disabled
    }

    /// Flip edit mode, or set it with `Some`. Always written through to
    /// storage. Returns the new value.
    pub fn toggle_edit(&mut self, on: Option<bool>) -> bool {
        let value = on.unwrap_or(!self.flags.is_edit);
        let changed = value != self.flags.is_edit;
        self.flags.is_edit = value;
        self.flags.save_edit(self.storage.as_ref());
        if changed {
            self.flags_changed();
        }
        value
    }

    /// Flip the menu position toggle, or set it with `Some`. Always written
    /// through to storage. Returns the new value.
    pub fn toggle_position(&mut self, on: Option<bool>) -> bool {
        let value = on.unwrap_or(!self.flags.is_position_toggled);
        let changed = value != self.flags.is_position_toggled;
        self.flags.is_position_toggled = value;
        self.flags.save_position(self.storage.as_ref());
        if changed {
            self.flags_changed();
        }
        value
    }

    /// In-memory only.
    pub fn toggle_local_tooltips_disabled(&mut self, on: Option<bool>) -> bool {
        let value = on.unwrap_or(!self.local_tooltips_disabled);
        if value != self.local_tooltips_disabled {
            self.local_tooltips_disabled = value;
            self.flags_changed();
        }
        value
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    /// Bumped once per change to the option map.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view_recompute_count(&self) -> u64 {
        self.view.recompute_count()
    }

    /// Back to initial state: no active context, flags off, empty option
    /// map, inactive overlay.
    ///
    /// Flags are not written to storage. A pending overlay timer is
    /// cancelled and `on_close` is not called.
    pub fn reset(&mut self) {
        if self.active_context.take().is_some() {
            self.bus
                .publish(StoreEvent::ActiveContextChanged { context: None });
        }
        if self.flags != PersistentFlags::default() {
            self.flags = PersistentFlags::default();
            self.flags_changed();
        }
        if self.option_map.clear() {
            self.menu_changed();
        }
        self.overlay.reset();
        info!("Page edit store reset");
    }

    fn menu_changed(&mut self) {
        self.revision += 1;
        self.bus.publish(StoreEvent::MenuChanged {
            revision: self.revision,
        });
    }

    fn flags_changed(&self) {
        self.bus.publish(StoreEvent::FlagsChanged {
            is_edit: self.flags.is_edit,
            is_position_toggled: self.flags.is_position_toggled,
            are_local_tooltips_disabled: self.local_tooltips_disabled,
        });
    }
}
