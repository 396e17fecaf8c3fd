//! Debug overlay: a single status line showing what is being looked at.
//!
//! Only active in debug mode. Updates are mirrored to `tracing` at debug
//! level so the overlay can be followed from logs.

use tracing::debug;

/// Status text shown while debugging gaze selection.
#[derive(Debug, Clone, Default)]
pub struct DebugOverlay {
    enabled: bool,
    text: String,
}

impl DebugOverlay {
    /// Creates an overlay; when `enabled` is false every update is ignored.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            text: String::new(),
        }
    }

    /// Whether the overlay is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current overlay text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the overlay text.
    pub fn show(&mut self, text: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.text = text.into();
        debug!(overlay = %self.text, "overlay updated");
    }

    /// Shows the selected target, or clears the overlay.
    pub fn show_selection(&mut self, current: Option<&str>) {
        match current {
            Some(name) => self.show(format!("Looking at: {name}")),
            None => self.clear(),
        }
    }

    /// Clears the overlay text.
    pub fn clear(&mut self) {
        self.show(String::new());
    }
}
