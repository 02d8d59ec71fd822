#![forbid(unsafe_code)]

//! LIFO memory of where focus was before each overlay opened.
//!
//! Opening an overlay pushes a [`FocusFrame`] holding the element that had
//! focus at that moment. Closing it pops the frame and hands focus back, as
//! long as that element is still attached to the UI tree.
//!
//! Two flavours of the same stack are exposed:
//!
//! - [`push`](FocusMemory::push) / [`pop_and_restore`](FocusMemory::pop_and_restore):
//!   a raw stack. Callers must pair them and close in reverse open order;
//!   a skipped or extra call shifts every later restoration by one.
//! - [`push_for`](FocusMemory::push_for) / [`restore_for`](FocusMemory::restore_for):
//!   frames keyed by overlay id. An overlay that closes out of order removes
//!   its own frame instead of whichever frame is on top, and its restore
//!   target is inherited by the frame directly above it.
//!   [`restore_for_root`](FocusMemory::restore_for_root) additionally drops
//!   targets under the closing overlay's content root from that frame.
//!
//! # Invariants
//!
//! - Frames are removed only by `pop_and_restore`, the keyed restores or
//!   `clear`.
//! - Focus moves at most once per removal, and only to an attached element.
//! - `pop_and_restore` never consults inherited targets.
//!
//! # Failure Modes
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Empty stack / unknown owner | [`RestoreOutcome::NoFrame`], nothing changes |
//! | Nothing was focused at push time | [`RestoreOutcome::NothingSaved`] |
//! | Saved element detached | [`RestoreOutcome::Stale`], focus untouched |
//! | Keyed frame below the top | [`RestoreOutcome::HandedOff`], focus untouched |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use strata_core::FocusHost;
use tracing::{debug, trace};

use crate::id::OverlayId;

/// One saved focus-restoration target.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusFrame<T> {
    saved: Option<T>,
    owner: Option<OverlayId>,
    inherited: Vec<T>,
}

impl<T> FocusFrame<T> {
    /// The element that had focus when the frame was pushed.
    pub fn saved(&self) -> Option<&T> {
        self.saved.as_ref()
    }

    /// The overlay that pushed this frame, for keyed frames.
    pub fn owner(&self) -> Option<&OverlayId> {
        self.owner.as_ref()
    }

    /// Fallback targets handed down by frames that closed below this one.
    pub fn inherited(&self) -> &[T] {
        &self.inherited
    }

    fn into_targets(self) -> impl Iterator<Item = T> {
        self.saved.into_iter().chain(self.inherited)
    }
}

/// What a restore call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Focus moved to a remembered element.
    Restored,
    /// Every remembered element was detached (or refused focus).
    Stale,
    /// The frame was pushed while nothing had focus.
    NothingSaved,
    /// The frame was not on top; its targets passed to the frame above.
    HandedOff,
    /// No matching frame.
    NoFrame,
}

/// Process-wide stack of pre-overlay focus targets.
pub struct FocusMemory<H: FocusHost> {
    host: Rc<H>,
    frames: RefCell<Vec<FocusFrame<H::Handle>>>,
}

impl<H: FocusHost> fmt::Debug for FocusMemory<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusMemory")
            .field("frames", &*self.frames.borrow())
            .finish()
    }
}

impl<H: FocusHost> FocusMemory<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self {
            host,
            frames: RefCell::new(Vec::new()),
        }
    }

    /// Remember whatever currently has focus.
    pub fn push(&self) {
        self.push_frame(None);
    }

    /// Remember whatever currently has focus, on behalf of `owner`.
    pub fn push_for(&self, owner: OverlayId) {
        self.push_frame(Some(owner));
    }

    fn push_frame(&self, owner: Option<OverlayId>) {
        let saved = self.host.current_focus_target();
        trace!(element = ?saved, owner = ?owner, "remembering focus");
        self.frames.borrow_mut().push(FocusFrame {
            saved,
            owner,
            inherited: Vec::new(),
        });
    }

    /// Drop the most recent frame and focus its element if still attached.
    pub fn pop_and_restore(&self) -> RestoreOutcome {
        let Some(frame) = self.frames.borrow_mut().pop() else {
            return RestoreOutcome::NoFrame;
        };
        let outcome = match frame.saved {
            None => RestoreOutcome::NothingSaved,
            Some(element) => self.try_focus(std::iter::once(element)),
        };
        debug!(?outcome, "focus popped");
        outcome
    }

    /// Drop the frame pushed by `owner`, wherever it sits.
    ///
    /// Only a top frame restores focus; a lower frame passes its targets to
    /// the frame above so the overlay that is still open can fall back to
    /// them when it closes.
    pub fn restore_for(&self, owner: &OverlayId) -> RestoreOutcome {
        self.restore_keyed(owner, None)
    }

    /// [`restore_for`](Self::restore_for) for an overlay whose content lives
    /// under `root`.
    ///
    /// On hand-off, every target of the frame above that lies under `root` is
    /// forgotten. An overlay opened from inside this one would otherwise
    /// send focus back into closed content the host hid but kept attached.
    pub fn restore_for_root(&self, owner: &OverlayId, root: &H::Handle) -> RestoreOutcome {
        self.restore_keyed(owner, Some(root))
    }

    fn restore_keyed(
        &self,
        owner: &OverlayId,
        closing_root: Option<&H::Handle>,
    ) -> RestoreOutcome {
        let (frame, above) = {
            let mut frames = self.frames.borrow_mut();
            let Some(index) = frames
                .iter()
                .rposition(|frame| frame.owner.as_ref() == Some(owner))
            else {
                return RestoreOutcome::NoFrame;
            };
            let frame = frames.remove(index);
            (frame, (index < frames.len()).then_some(index))
        };

        if let Some(index) = above {
            self.hand_off(frame, index, closing_root);
            debug!(overlay = %owner, "focus frame closed below top, targets handed off");
            return RestoreOutcome::HandedOff;
        }

        let outcome = if frame.saved.is_none() && frame.inherited.is_empty() {
            RestoreOutcome::NothingSaved
        } else {
            self.try_focus(frame.into_targets())
        };
        debug!(overlay = %owner, ?outcome, "focus restored for overlay");
        outcome
    }

    /// Merge `frame`'s targets into the frame at `index`, minus anything
    /// under `closing_root`. Host queries run without a frames borrow.
    fn hand_off(
        &self,
        frame: FocusFrame<H::Handle>,
        index: usize,
        closing_root: Option<&H::Handle>,
    ) {
        let Some(mut above) = self.frames.borrow().get(index).cloned() else {
            return;
        };
        let outside = |element: &H::Handle| {
            closing_root.is_none_or(|root| !self.host.is_within(root, element))
        };

        if above.saved.as_ref().is_some_and(|saved| !outside(saved)) {
            trace!(element = ?above.saved, "dropping target inside closed overlay");
            above.saved = None;
        }
        above.inherited.retain(|element| outside(element));
        above
            .inherited
            .extend(frame.into_targets().filter(|element| outside(element)));

        if let Some(slot) = self.frames.borrow_mut().get_mut(index) {
            *slot = above;
        }
    }

    fn try_focus(&self, targets: impl Iterator<Item = H::Handle>) -> RestoreOutcome {
        for element in targets {
            if self.host.is_attached(&element) && self.host.focus(&element) {
                trace!(?element, "focus moved");
                return RestoreOutcome::Restored;
            }
            trace!(?element, "skipping stale focus target");
        }
        RestoreOutcome::Stale
    }

    /// Number of remembered frames.
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    /// Copy of the most recent frame.
    pub fn top_frame(&self) -> Option<FocusFrame<H::Handle>> {
        self.frames.borrow().last().cloned()
    }

    /// Forget every frame without moving focus.
    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}
