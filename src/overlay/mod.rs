//! Blocking page overlay (busy indicator) with optional auto-close.

pub mod controller;
pub mod scheduler;
pub mod settings;

pub use controller::OverlayController;
pub use scheduler::{ManualScheduler, TimerHandle, TimerScheduler, TimerTask, TokioScheduler};
pub use settings::{
    CloseCallback, OverlayDefaults, OverlayOptions, OverlaySettings, OverlaySnapshot, OverlayUpdate,
};
