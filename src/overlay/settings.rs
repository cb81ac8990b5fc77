//! Overlay settings and the partial settings accepted by `show`/`update`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback run when an overlay closes (explicitly or by timeout).
pub type CloseCallback = Arc<dyn Fn() + Send + Sync>;

fn noop_close() -> CloseCallback {
    Arc::new(|| {})
}

/// Values applied to fields a caller does not provide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayDefaults {
    #[serde(default)]
    pub has_close_button: bool,
    #[serde(default = "default_true")]
    pub has_spinner: bool,
    #[serde(default)]
    pub message: String,
}

fn default_true() -> bool {
    true
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            has_close_button: false,
            has_spinner: true,
            message: String::new(),
        }
    }
}

impl OverlayDefaults {
    /// The resting, inactive overlay.
    pub fn inactive(&self) -> OverlaySettings {
        OverlaySettings {
            is_active: false,
            has_close_button: self.has_close_button,
            has_spinner: self.has_spinner,
            message: self.message.clone(),
            max_timeout: None,
            on_close: noop_close(),
        }
    }

    /// Defaults overlaid with `options`, activated.
    pub fn activate(&self, options: OverlayOptions) -> OverlaySettings {
        OverlaySettings {
            is_active: true,
            has_close_button: options.has_close_button.unwrap_or(self.has_close_button),
            has_spinner: options.has_spinner.unwrap_or(self.has_spinner),
            message: options.message.unwrap_or_else(|| self.message.clone()),
            max_timeout: options.max_timeout,
            on_close: options.on_close.unwrap_or_else(noop_close),
        }
    }
}

/// Full overlay record
#[derive(Clone)]
pub struct OverlaySettings {
    pub is_active: bool,
    pub has_close_button: bool,
    pub has_spinner: bool,
    pub message: String,
    /// `None` disables auto-close.
    pub max_timeout: Option<Duration>,
    pub on_close: CloseCallback,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        OverlayDefaults::default().inactive()
    }
}

impl fmt::Debug for OverlaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlaySettings")
            .field("is_active", &self.is_active)
            .field("has_close_button", &self.has_close_button)
            .field("has_spinner", &self.has_spinner)
            .field("message", &self.message)
            .field("max_timeout", &self.max_timeout)
            .finish_non_exhaustive()
    }
}

impl OverlaySettings {
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            is_active: self.is_active,
            has_close_button: self.has_close_button,
            has_spinner: self.has_spinner,
            message: self.message.clone(),
            max_timeout_in_seconds: self.max_timeout.map(|d| d.as_secs_f64()),
        }
    }
}

/// Caller-provided overlay settings; unset fields take the defaults
#[derive(Clone, Default)]
pub struct OverlayOptions {
    pub has_close_button: Option<bool>,
    pub has_spinner: Option<bool>,
    pub message: Option<String>,
    pub max_timeout: Option<Duration>,
    pub on_close: Option<CloseCallback>,
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn close_button(mut self, enabled: bool) -> Self {
        self.has_close_button = Some(enabled);
        self
    }

    pub fn spinner(mut self, enabled: bool) -> Self {
        self.has_spinner = Some(enabled);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.max_timeout = Some(timeout);
        self
    }

    pub fn timeout_secs(self, seconds: u64) -> Self {
        self.timeout(Duration::from_secs(seconds))
    }

    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(f));
        self
    }
}

/// Partial change to the live overlay; the timer is untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayUpdate {
    pub message: Option<String>,
    pub has_spinner: Option<bool>,
    pub has_close_button: Option<bool>,
}

impl OverlayUpdate {
    pub(crate) fn apply(self, settings: &mut OverlaySettings) -> bool {
        let mut changed = false;
        if let Some(message) = self.message {
            changed |= settings.message != message;
            settings.message = message;
        }
        if let Some(spinner) = self.has_spinner {
            changed |= settings.has_spinner != spinner;
            settings.has_spinner = spinner;
        }
        if let Some(close) = self.has_close_button {
            changed |= settings.has_close_button != close;
            settings.has_close_button = close;
        }
        changed
    }
}

/// What overlay consumers read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySnapshot {
    pub is_active: bool,
    pub has_close_button: bool,
    pub has_spinner: bool,
    pub message: String,
    pub max_timeout_in_seconds: Option<f64>,
}
