#![forbid(unsafe_code)]

//! Ordered registry of open overlays with change notification.
//!
//! The `OverlayStack` records which overlays are open, in the order they
//! opened. The last entry is the top-most overlay: it owns Escape handling and
//! renders above everything else. Every entry's tier is the stack baseline
//! plus its current position, so closing a lower overlay shifts the tiers of
//! everything above it down by one.
//!
//! # Invariants
//!
//! - An id appears at most once. Re-registering a present id neither moves it
//!   nor notifies.
//! - Exactly one entry (the last) reports `is_top` while the stack is
//!   non-empty.
//! - Tiers are unique and strictly increasing from bottom to top.
//! - Subscribers run synchronously, in subscription order, after the mutation
//!   is complete. No internal borrow is held while they run, so a listener
//!   may query (or even mutate) the stack.
//!
//! # Failure Modes
//!
//! - `deregister()` of an absent id is a no-op and does not notify.
//! - `snapshot()` of an absent id reports `is_top: false, tier: None`.
//!
//! # Example
//!
//! ```
//! use strata_overlay::{OverlayId, OverlayStack};
//!
//! let stack = OverlayStack::new();
//! let settings = OverlayId::from("m1");
//! let confirm = OverlayId::from("m2");
//!
//! stack.register(settings.clone());
//! stack.register(confirm.clone());
//! assert!(stack.snapshot(&confirm).is_top);
//! assert_eq!(stack.snapshot(&settings).tier, Some(9999));
//!
//! stack.deregister(&settings);
//! assert_eq!(stack.snapshot(&confirm).tier, Some(9999));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use ahash::AHashSet;
use tracing::{debug, trace};

use crate::id::OverlayId;

/// Tier of the bottom-most overlay unless configured otherwise.
pub const DEFAULT_BASE_TIER: u32 = 9999;

/// Stacking status of one overlay, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackStatus {
    /// Whether the overlay is the most recently opened one still open.
    pub is_top: bool,
    /// Baseline plus position in the stack; `None` when not registered.
    ///
    /// Distinct among open overlays for every baseline, `u32::MAX` included.
    pub tier: Option<u64>,
}

type Listener = Rc<dyn Fn()>;

/// RAII guard for a stack listener.
///
/// The listener stays registered until the guard is dropped or
/// [`unsubscribe`](Self::unsubscribe) is called.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct StackSubscription {
    _listener: Listener,
}

impl StackSubscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for StackSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackSubscription").finish_non_exhaustive()
    }
}

#[derive(Default)]
struct StackState {
    /// Open overlays, bottom to top.
    entries: Vec<OverlayId>,
    members: AHashSet<OverlayId>,
}

/// Registry of open overlays, bottom to top.
///
/// Shared by reference (`Rc<OverlayStack>`) between every overlay controller
/// under one UI root.
pub struct OverlayStack {
    state: RefCell<StackState>,
    listeners: RefCell<Vec<Weak<dyn Fn()>>>,
    base_tier: u32,
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OverlayStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStack")
            .field("entries", &self.state.borrow().entries)
            .field("base_tier", &self.base_tier)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl OverlayStack {
    /// Create an empty stack with [`DEFAULT_BASE_TIER`].
    pub fn new() -> Self {
        Self::with_base_tier(DEFAULT_BASE_TIER)
    }

    /// Create an empty stack whose bottom entry gets tier `base_tier`.
    pub fn with_base_tier(base_tier: u32) -> Self {
        Self {
            state: RefCell::new(StackState::default()),
            listeners: RefCell::new(Vec::new()),
            base_tier,
        }
    }

    // --- Mutation ---

    /// Push `id` on top unless it is already open.
    pub fn register(&self, id: OverlayId) {
        let depth = {
            let mut state = self.state.borrow_mut();
            if !state.members.insert(id.clone()) {
                trace!(overlay = %id, "overlay already registered");
                return;
            }
            state.entries.push(id.clone());
            state.entries.len()
        };
        debug!(overlay = %id, depth, "overlay registered");
        self.notify();
    }

    /// Remove `id` from wherever it sits in the stack.
    pub fn deregister(&self, id: &OverlayId) {
        let depth = {
            let mut state = self.state.borrow_mut();
            if !state.members.remove(id) {
                return;
            }
            if let Some(index) = state.entries.iter().position(|e| e == id) {
                state.entries.remove(index);
            }
            state.entries.len()
        };
        debug!(overlay = %id, depth, "overlay deregistered");
        self.notify();
    }

    // --- Notification ---

    /// Call `listener` after every change to the stack.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> StackSubscription {
        let listener: Listener = Rc::new(listener);
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|weak| weak.strong_count() > 0);
        listeners.push(Rc::downgrade(&listener));
        StackSubscription {
            _listener: listener,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let live: Vec<Listener> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        trace!(listeners = live.len(), "notifying stack listeners");
        for listener in live {
            listener();
        }
    }

    // --- Queries ---

    /// Stacking status of `id`.
    pub fn snapshot(&self, id: &OverlayId) -> StackStatus {
        let state = self.state.borrow();
        let index = state.entries.iter().position(|e| e == id);
        StackStatus {
            is_top: index.is_some() && state.entries.last() == Some(id),
            tier: index.map(|i| self.tier_at(i)),
        }
    }

    /// Whether `id` is the top-most overlay.
    pub fn is_top(&self, id: &OverlayId) -> bool {
        self.state.borrow().entries.last() == Some(id)
    }

    /// The top-most overlay, if any.
    pub fn top(&self) -> Option<OverlayId> {
        self.state.borrow().entries.last().cloned()
    }

    /// Whether `id` is currently open.
    pub fn contains(&self, id: &OverlayId) -> bool {
        self.state.borrow().members.contains(id)
    }

    /// Open overlays, bottom to top.
    pub fn ids(&self) -> Vec<OverlayId> {
        self.state.borrow().entries.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Tier assigned to the bottom-most overlay.
    #[inline]
    pub fn base_tier(&self) -> u32 {
        self.base_tier
    }

    fn tier_at(&self, index: usize) -> u64 {
        u64::from(self.base_tier) + index as u64
    }
}
