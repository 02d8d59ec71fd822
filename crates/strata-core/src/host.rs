#![forbid(unsafe_code)]

//! Capability traits a UI toolkit implements so overlays can be coordinated
//! without touching the toolkit directly.
//!
//! [`FocusHost`] covers everything focus restoration and trapping need.
//! [`OverlayHost`] adds the shared background effects an open overlay imposes
//! on the rest of the UI (scroll lock, inert marking, top-most marker).
//!
//! # Invariants
//!
//! - Every method takes `&self`. Hosts keep their own interior mutability;
//!   callers never hold a host borrow across a call back into the registries.
//! - `focusable_descendants` returns elements in sequential navigation order.
//!   The first and last entries are the focus-cycle boundaries.
//!
//! # Failure Modes
//!
//! - `focus` on a detached or unfocusable handle returns `false` and leaves
//!   focus where it was.

use std::fmt;

/// Focus-related capabilities of the host UI tree.
pub trait FocusHost {
    /// Opaque reference to a UI element.
    type Handle: Clone + PartialEq + fmt::Debug;

    /// The element currently holding input focus, if any.
    fn current_focus_target(&self) -> Option<Self::Handle>;

    /// Move input focus to `handle`. Returns whether focus actually moved.
    fn focus(&self, handle: &Self::Handle) -> bool;

    /// Whether `handle` still exists and is attached to the live UI tree.
    fn is_attached(&self, handle: &Self::Handle) -> bool;

    /// Focusable elements inside `root`, in navigation order. `root` itself
    /// is not included.
    fn focusable_descendants(&self, root: &Self::Handle) -> Vec<Self::Handle>;

    /// Whether `element` is `root` or lies inside it, attached or not.
    ///
    /// The default only sees focusable descendants; hosts with parent links
    /// should walk them instead.
    fn is_within(&self, root: &Self::Handle, element: &Self::Handle) -> bool {
        root == element || self.focusable_descendants(root).contains(element)
    }
}

/// Background effects shared by every open overlay.
pub trait OverlayHost: FocusHost {
    /// Suppress or restore scrolling of the background page.
    ///
    /// The host saves whatever scroll style was in effect when locking and
    /// puts it back when unlocking.
    fn set_scroll_locked(&self, locked: bool);

    /// Hide (or un-hide) everything outside the overlay layer from assistive
    /// technology and keyboard navigation.
    fn set_background_inert(&self, inert: bool);

    /// Reflect an overlay's stacking status on its root element.
    fn mark_top(&self, root: &Self::Handle, is_top: bool, tier: u64);
}
