#![forbid(unsafe_code)]

//! Shared background effects: scroll lock and inert marking.
//!
//! Every open overlay may want the page behind it frozen and hidden from
//! assistive technology, but the host only has one page. `BackgroundLock`
//! remembers which effects are engaged so the host sees a single lock when
//! the first overlay asks and a single release when the stack empties.
//!
//! Releasing is driven by the overlay stack being empty at close time, not
//! by a separate counter.

use std::cell::Cell;

use strata_core::OverlayHost;
use tracing::debug;

/// Engagement state of the shared background effects.
#[derive(Debug, Default)]
pub struct BackgroundLock {
    scroll_locked: Cell<bool>,
    inert: Cell<bool>,
}

impl BackgroundLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress background scrolling unless already suppressed.
    pub fn lock_scroll<H: OverlayHost + ?Sized>(&self, host: &H) {
        if !self.scroll_locked.replace(true) {
            debug!("background scroll locked");
            host.set_scroll_locked(true);
        }
    }

    /// Mark the background inert unless already marked.
    pub fn mark_inert<H: OverlayHost + ?Sized>(&self, host: &H) {
        if !self.inert.replace(true) {
            debug!("background marked inert");
            host.set_background_inert(true);
        }
    }

    /// Undo every engaged effect.
    pub fn release<H: OverlayHost + ?Sized>(&self, host: &H) {
        if self.scroll_locked.replace(false) {
            debug!("background scroll unlocked");
            host.set_scroll_locked(false);
        }
        if self.inert.replace(false) {
            debug!("background inert marking removed");
            host.set_background_inert(false);
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    pub fn is_inert(&self) -> bool {
        self.inert.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::testing::MockHost;

    #[test]
    fn repeated_lock_hits_host_once() {
        let host = MockHost::new();
        let lock = BackgroundLock::new();

        lock.lock_scroll(&host);
        lock.lock_scroll(&host);
        lock.mark_inert(&host);

        assert!(host.is_scroll_locked());
        assert!(host.is_background_inert());
        assert_eq!(host.scroll_lock_transitions(), 1);
        assert_eq!(host.inert_transitions(), 1);
    }

    #[test]
    fn release_undoes_only_engaged_effects() {
        let host = MockHost::new();
        let lock = BackgroundLock::new();

        lock.lock_scroll(&host);
        lock.release(&host);
        lock.release(&host);

        assert!(!host.is_scroll_locked());
        assert!(!lock.is_scroll_locked());
        assert_eq!(host.scroll_lock_transitions(), 2);
        assert_eq!(host.inert_transitions(), 0);
    }
}
