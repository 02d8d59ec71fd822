#![forbid(unsafe_code)]

//! Cyclic Tab order confined to an overlay's content.
//!
//! A [`FocusTrap`] snapshots the focusable elements inside an overlay's
//! content root. Tab on the last element wraps to the first, Shift+Tab on the
//! first wraps to the last, and anything in between is left to the host's
//! normal sequential navigation.
//!
//! The snapshot does not track later changes to the content. Call
//! [`FocusTrap::recompute`] when the overlay's content changes while open.
//!
//! # Invariants
//!
//! - An empty cycle prevents Tab outright; focus never leaves the overlay by
//!   default navigation.
//! - Focus found outside the cycle (on the content root itself, or anywhere
//!   else) is pulled back to the first element (Tab) or last (Shift+Tab).

use strata_core::{FocusHost, TabDirection};

/// What the trap wants done with a Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabOutcome<T> {
    /// Let the host move focus normally.
    Pass,
    /// Swallow the key without moving focus.
    Prevent,
    /// Swallow the key and focus this element instead.
    MoveTo(T),
}

/// Focus-cycle boundaries for one open overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTrap<T> {
    root: T,
    root_in_cycle: bool,
    cycle: Vec<T>,
}

impl<T: Clone + PartialEq> FocusTrap<T> {
    /// Snapshot the focusable descendants of `root`.
    ///
    /// With `root_in_cycle`, the content root itself is the first stop of the
    /// cycle (alert-style dialogs whose root carries the message).
    pub fn capture<H>(host: &H, root: T, root_in_cycle: bool) -> Self
    where
        H: FocusHost<Handle = T> + ?Sized,
    {
        let mut trap = Self {
            root,
            root_in_cycle,
            cycle: Vec::new(),
        };
        trap.recompute(host);
        trap
    }

    /// Re-read the focusable descendants of the content root.
    pub fn recompute<H>(&mut self, host: &H)
    where
        H: FocusHost<Handle = T> + ?Sized,
    {
        let mut cycle = Vec::new();
        if self.root_in_cycle {
            cycle.push(self.root.clone());
        }
        cycle.extend(host.focusable_descendants(&self.root));
        self.cycle = cycle;
    }

    /// The overlay's content root.
    pub fn root(&self) -> &T {
        &self.root
    }

    /// Elements of the cycle, in navigation order.
    pub fn cycle(&self) -> &[T] {
        &self.cycle
    }

    pub fn first(&self) -> Option<&T> {
        self.cycle.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.cycle.last()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    pub fn contains(&self, element: &T) -> bool {
        self.cycle.contains(element)
    }

    /// Decide what a Tab press does while `current` holds focus.
    pub fn on_tab(&self, current: Option<&T>, direction: TabDirection) -> TabOutcome<T> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return TabOutcome::Prevent;
        };
        let inside = current.is_some_and(|c| self.contains(c));
        match direction {
            TabDirection::Forward if !inside || current == Some(last) => {
                TabOutcome::MoveTo(first.clone())
            }
            TabDirection::Backward if !inside || current == Some(first) => {
                TabOutcome::MoveTo(last.clone())
            }
            _ => TabOutcome::Pass,
        }
    }
}
