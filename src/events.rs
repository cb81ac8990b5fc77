//! In-process change bus for store events.
//!
//! Every subscriber gets its own channel. Publishing prunes subscribers whose
//! receiver has been dropped.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// One logical change to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The active context handle moved (id of the new one, if any).
    ActiveContextChanged { context: Option<String> },
    /// The option map changed; the aggregated view is stale.
    MenuChanged { revision: u64 },
    FlagsChanged {
        is_edit: bool,
        is_position_toggled: bool,
        are_local_tooltips_disabled: bool,
    },
    OverlayChanged { is_active: bool },
}

#[derive(Clone, Default)]
pub struct ChangeBus {
    senders: Arc<Mutex<Vec<Sender<StoreEvent>>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (sender, receiver) = channel();
        self.senders.lock().push(sender);
        receiver
    }

    pub fn publish(&self, event: StoreEvent) {
        self.senders
            .lock()
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().len()
    }
}
