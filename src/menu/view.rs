//! Aggregated Menu View
//!
//! Flattens the option map into one ordered list. The list is cached against
//! the option map revision so repeated reads between changes share one
//! computation.

use crate::menu::option::SharedOption;
use crate::menu::reconcile::OptionMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Flatten submaps root-first, options in insertion order.
///
/// Names are not deduplicated across contexts: the same name at two trail
/// positions yields two entries.
pub fn flatten(map: &OptionMap) -> Vec<SharedOption> {
    map.submaps()
        .flat_map(|(_, submap)| submap.values().cloned())
        .collect()
}

/// JSON array of the options, each carrying only its set fields.
pub fn to_json(options: &[SharedOption]) -> Value {
    Value::Array(
        options
            .iter()
            .map(|option| serde_json::to_value(&*option.read()).unwrap_or(Value::Null))
            .collect(),
    )
}

struct CachedView {
    revision: u64,
    options: Arc<Vec<SharedOption>>,
}

/// Lazily recomputed flattened view.
#[derive(Default)]
pub struct AggregatedMenu {
    cache: Mutex<Option<CachedView>>,
    recomputes: Mutex<u64>,
}

impl AggregatedMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flattened options for `revision`, recomputing only when the
    /// revision moved since the last read.
    pub fn get(&self, map: &OptionMap, revision: u64) -> Arc<Vec<SharedOption>> {
        let mut cache = self.cache.lock();
        if let Some(cached) = cache.as_ref() {
            if cached.revision == revision {
                return Arc::clone(&cached.options);
            }
        }
        let options = Arc::new(flatten(map));
        *cache = Some(CachedView {
            revision,
            options: Arc::clone(&options),
        });
        *self.recomputes.lock() += 1;
        options
    }

    /// Drop the cached list.
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    /// How many times the list has been recomputed.
    pub fn recompute_count(&self) -> u64 {
        *self.recomputes.lock()
    }
}
