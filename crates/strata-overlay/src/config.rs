#![forbid(unsafe_code)]

//! Per-overlay behaviour switches.
//!
//! Defaults describe a modal dialog: scroll locked, background inert, focus
//! moved to the content root, Escape closes when on top, and the Tab cycle
//! runs over the focusable controls only.
//!
//! With the `serde` feature, configs deserialize with every missing field
//! taking its modal default.

/// Behaviour of one overlay while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Suppress background scrolling while open.
    pub lock_scroll: bool,
    /// Hide the background from assistive technology while open.
    pub inert_background: bool,
    /// Escape closes the overlay when it is top-most.
    pub escape_closes: bool,
    /// Move focus to the content root on open.
    pub focus_root_on_open: bool,
    /// Make the content root the first stop of the Tab cycle.
    pub root_in_cycle: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::modal()
    }
}

impl OverlayConfig {
    /// Modal dialog behaviour.
    #[must_use]
    pub const fn modal() -> Self {
        Self {
            lock_scroll: true,
            inert_background: true,
            escape_closes: true,
            focus_root_on_open: true,
            root_in_cycle: false,
        }
    }

    /// Confirmation alert behaviour: the root (holding the message) is part
    /// of the Tab cycle and the background is left exposed.
    #[must_use]
    pub const fn alert() -> Self {
        Self {
            lock_scroll: true,
            inert_background: false,
            escape_closes: true,
            focus_root_on_open: true,
            root_in_cycle: true,
        }
    }

    #[must_use]
    pub const fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    #[must_use]
    pub const fn inert_background(mut self, inert: bool) -> Self {
        self.inert_background = inert;
        self
    }

    #[must_use]
    pub const fn escape_closes(mut self, closes: bool) -> Self {
        self.escape_closes = closes;
        self
    }

    #[must_use]
    pub const fn focus_root_on_open(mut self, focus: bool) -> Self {
        self.focus_root_on_open = focus;
        self
    }

    #[must_use]
    pub const fn root_in_cycle(mut self, include: bool) -> Self {
        self.root_in_cycle = include;
        self
    }
}
