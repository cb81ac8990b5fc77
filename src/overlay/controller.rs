//! Overlay Controller
//!
//! Holds the single live overlay. Every `show`, `hide` and `reset` bumps a
//! generation counter; a timer only acts if the generation it was scheduled
//! under is still current, so a superseded timer that already fired is a
//! no-op.

use crate::error::StoreError;
use crate::events::{ChangeBus, StoreEvent};
use crate::overlay::scheduler::{TimerHandle, TimerScheduler};
use crate::overlay::settings::{
    CloseCallback, OverlayDefaults, OverlayOptions, OverlaySettings, OverlaySnapshot, OverlayUpdate,
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info};

struct OverlayState {
    settings: OverlaySettings,
    generation: u64,
    timer: Option<TimerHandle>,
}

#[derive(Clone)]
pub struct OverlayController {
    state: Arc<Mutex<OverlayState>>,
    scheduler: Arc<dyn TimerScheduler>,
    defaults: OverlayDefaults,
    bus: ChangeBus,
}

impl OverlayController {
    pub fn new(scheduler: Arc<dyn TimerScheduler>, defaults: OverlayDefaults, bus: ChangeBus) -> Self {
        Self {
            state: Arc::new(Mutex::new(OverlayState {
                settings: defaults.inactive(),
                generation: 0,
                timer: None,
            })),
            scheduler,
            defaults,
            bus,
        }
    }

    /// Replace the overlay wholesale and activate it.
    ///
    /// Any pending timer is cancelled first. When `max_timeout` is set a new
    /// timer hides the overlay (running `on_close`) once it elapses. If the
    /// timer cannot be scheduled nothing changes.
    pub fn show(&self, options: OverlayOptions) -> Result<(), StoreError> {
        let settings = self.defaults.activate(options);
        let timeout = settings.max_timeout;

        let stale = {
            let mut state = self.state.lock();
            let generation = state.generation + 1;
            let timer = match timeout {
                Some(delay) => Some(self.schedule_expiry(delay, generation)?),
                None => None,
            };
            state.generation = generation;
            state.settings = settings;
            std::mem::replace(&mut state.timer, timer)
        };
        if let Some(stale) = stale {
            stale.cancel();
        }

        info!(timeout = ?timeout, "Overlay shown");
        self.bus.publish(StoreEvent::OverlayChanged { is_active: true });
        Ok(())
    }

    /// Change message, spinner or close button of the live overlay.
    ///
    /// No-op (returns `false`) when the overlay is inactive or nothing
    /// differs.
    pub fn update(&self, update: OverlayUpdate) -> bool {
        let changed = {
            let mut state = self.state.lock();
            state.settings.is_active && update.apply(&mut state.settings)
        };
        if changed {
            self.bus.publish(StoreEvent::OverlayChanged { is_active: true });
        }
        changed
    }

    /// Cancel any pending timer, reset to inactive defaults, then run the
    /// `on_close` that was current.
    pub fn hide(&self) {
        let (on_close, was_active, timer) = {
            let mut state = self.state.lock();
            Self::deactivate(&mut state, &self.defaults)
        };
        if let Some(timer) = timer {
            timer.cancel();
        }
        Self::finish_close(&self.bus, on_close, was_active);
    }

    /// Restore inactive defaults without running `on_close`.
    ///
    /// The pending timer is invalidated and cancelled. Returns whether the
    /// overlay was active.
    pub fn reset(&self) -> bool {
        let (timer, was_active) = {
            let mut state = self.state.lock();
            let was_active = state.settings.is_active;
            state.generation += 1;
            state.settings = self.defaults.inactive();
            (state.timer.take(), was_active)
        };
        if let Some(timer) = timer {
            timer.cancel();
        }
        if was_active {
            self.bus
                .publish(StoreEvent::OverlayChanged { is_active: false });
        }
        was_active
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        self.state.lock().settings.snapshot()
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().settings.is_active
    }

    pub fn has_pending_timer(&self) -> bool {
        self.state.lock().timer.is_some()
    }

    fn schedule_expiry(&self, delay: Duration, generation: u64) -> Result<TimerHandle, StoreError> {
        let state: Weak<Mutex<OverlayState>> = Arc::downgrade(&self.state);
        let defaults = self.defaults.clone();
        let bus = self.bus.clone();
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let (on_close, was_active, _own_timer) = {
                    let mut state = state.lock();
                    if state.generation != generation {
                        debug!(generation, current = state.generation, "Ignoring stale overlay timer");
                        return;
                    }
                    Self::deactivate(&mut state, &defaults)
                };
                info!("Overlay timed out");
                Self::finish_close(&bus, on_close, was_active);
            }),
        )
    }

    fn deactivate(
        state: &mut OverlayState,
        defaults: &OverlayDefaults,
    ) -> (CloseCallback, bool, Option<TimerHandle>) {
        let previous = std::mem::replace(&mut state.settings, defaults.inactive());
        state.generation += 1;
        (previous.on_close, previous.is_active, state.timer.take())
    }

    fn finish_close(bus: &ChangeBus, on_close: CloseCallback, was_active: bool) {
        on_close();
        if was_active {
            bus.publish(StoreEvent::OverlayChanged { is_active: false });
        }
    }
}
