#![forbid(unsafe_code)]

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generated overlay ids.
static OVERLAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of one open overlay.
///
/// Unique per overlay instance and stable for as long as the overlay is open.
/// Cloning is cheap (shared string).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(Rc<str>);

impl OverlayId {
    /// Wrap a caller-chosen id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Rc::from(id.into()))
    }

    /// Produce a fresh, process-unique id of the form `overlay-<n>`.
    pub fn generate() -> Self {
        let n = OVERLAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("overlay-{n}"))
    }

    /// The raw id string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OverlayId").field(&&*self.0).finish()
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OverlayId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}
