//! Menu options: descriptors, per-context reconciliation, and the
//! flattened view handed to the UI.

pub mod option;
pub mod reconcile;
pub mod view;

pub use option::{Flag, GroupMerge, Handler, MenuOption, SharedOption, MENU_OPTION_FIELDS};
pub use reconcile::{OptionMap, OptionSubmap, ReconcileOutcome};
pub use view::{flatten, to_json, AggregatedMenu};
