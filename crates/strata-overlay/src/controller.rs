#![forbid(unsafe_code)]

//! Per-overlay lifecycle binding to the shared registries.
//!
//! An `OverlayController` is created closed. [`attach`](OverlayController::attach)
//! opens it: focus is remembered, the overlay joins the stack, the background
//! is locked, focus moves into the content, and a focus trap is captured.
//! [`detach`](OverlayController::detach) undoes all of it and sends focus
//! back to where it was before the overlay opened.
//!
//! # Invariants
//!
//! - `detach` runs exactly once per `attach`. A second `attach` or a stray
//!   `detach` returns [`OverlayError`] and touches nothing. So does attaching
//!   a second controller whose id is already on the stack.
//! - Only the top-most overlay reacts to keys. The cached [`StackStatus`] is
//!   refreshed synchronously by a stack subscription, so it is current by the
//!   time the next key arrives.
//! - The background is released only when the stack is empty after this
//!   overlay leaves it.
//! - Dropping an open controller detaches it.
//!
//! # Failure Modes
//!
//! - Closing in the same tick as opening still performs the full teardown.
//! - If the pre-open focus target vanished while the overlay was open, focus
//!   is simply not restored.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use strata_core::{KeyCode, KeyEvent, OverlayHost};
use tracing::{debug, trace};

use crate::config::OverlayConfig;
use crate::context::OverlayContext;
use crate::error::OverlayError;
use crate::focus_memory::RestoreOutcome;
use crate::id::OverlayId;
use crate::stack::{OverlayStack, StackStatus, StackSubscription};
use crate::trap::{FocusTrap, TabOutcome};

/// How a key press was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not for this overlay; the host should process it normally.
    Ignored,
    /// Consumed (focus may have moved); stop propagation.
    Handled,
    /// Escape closed the overlay; stop propagation.
    Dismissed,
}

impl KeyOutcome {
    /// Whether the host should stop default handling of the key.
    #[inline]
    pub fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

type CloseCallback = Box<dyn FnMut(&OverlayId)>;

/// State that only exists while the overlay is open.
struct OpenState<T> {
    trap: FocusTrap<T>,
    status: Rc<Cell<StackStatus>>,
    _subscription: StackSubscription,
}

/// Binds one overlay instance to the stack, focus memory and background.
pub struct OverlayController<H: OverlayHost + 'static> {
    ctx: OverlayContext<H>,
    id: OverlayId,
    root: H::Handle,
    config: OverlayConfig,
    open: Option<OpenState<H::Handle>>,
    on_close: Option<CloseCallback>,
}

impl<H: OverlayHost + 'static> fmt::Debug for OverlayController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("config", &self.config)
            .field("open", &self.is_open())
            .field("status", &self.status())
            .finish()
    }
}

impl<H: OverlayHost + 'static> OverlayController<H> {
    /// Create a closed controller for the overlay whose content root is `root`.
    pub fn new(
        ctx: &OverlayContext<H>,
        id: OverlayId,
        root: H::Handle,
        config: OverlayConfig,
    ) -> Self {
        Self {
            ctx: ctx.clone(),
            id,
            root,
            config,
            open: None,
            on_close: None,
        }
    }

    /// Callback run after Escape has closed the overlay.
    ///
    /// Owners typically flip their visibility flag here; a later
    /// `sync_visibility(false)` is then a no-op.
    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut(&OverlayId) + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    // --- Lifecycle ---

    /// Open the overlay.
    ///
    /// # Errors
    ///
    /// [`OverlayError::AlreadyOpen`] if the controller is already open, or if
    /// another controller holds the same id on the stack.
    pub fn attach(&mut self) -> Result<(), OverlayError> {
        if self.open.is_some() || self.ctx.stack().contains(&self.id) {
            return Err(OverlayError::AlreadyOpen(self.id.clone()));
        }
        let host: &H = self.ctx.host();

        self.ctx.focus_memory().push_for(self.id.clone());
        self.ctx.stack().register(self.id.clone());
        if self.config.lock_scroll {
            self.ctx.background().lock_scroll(host);
        }
        if self.config.inert_background {
            self.ctx.background().mark_inert(host);
        }
        if self.config.focus_root_on_open && !host.focus(&self.root) {
            trace!(overlay = %self.id, "content root refused focus");
        }

        let trap = FocusTrap::capture(host, self.root.clone(), self.config.root_in_cycle);

        let status = Rc::new(Cell::new(StackStatus::default()));
        let subscription = {
            let stack = Rc::clone(self.ctx.stack());
            let host = Rc::clone(self.ctx.host());
            let id = self.id.clone();
            let root = self.root.clone();
            let status = Rc::clone(&status);
            self.ctx.stack().subscribe(move || {
                refresh_status(&stack, &*host, &id, &root, &status);
            })
        };
        refresh_status(self.ctx.stack(), host, &self.id, &self.root, &status);

        debug!(
            overlay = %self.id,
            tier = ?status.get().tier,
            cycle = trap.cycle().len(),
            "overlay attached"
        );
        self.open = Some(OpenState {
            trap,
            status,
            _subscription: subscription,
        });
        Ok(())
    }

    /// Close the overlay and restore focus.
    ///
    /// Returns what focus restoration did, for hosts that want to apply their
    /// own fallback when nothing could be restored.
    ///
    /// # Errors
    ///
    /// [`OverlayError::NotOpen`] if the controller is closed.
    pub fn detach(&mut self) -> Result<RestoreOutcome, OverlayError> {
        let Some(open) = self.open.take() else {
            return Err(OverlayError::NotOpen(self.id.clone()));
        };
        // Stops key handling and the stack subscription.
        drop(open);

        let host: &H = self.ctx.host();
        self.ctx.stack().deregister(&self.id);
        if self.ctx.stack().is_empty() {
            self.ctx.background().release(host);
        }
        let restored = self
            .ctx
            .focus_memory()
            .restore_for_root(&self.id, &self.root);
        debug!(overlay = %self.id, ?restored, "overlay detached");
        Ok(restored)
    }

    /// Drive the lifecycle from a visibility flag.
    ///
    /// Returns whether the controller changed state. Safe to call with the
    /// same value repeatedly.
    pub fn sync_visibility(&mut self, visible: bool) -> bool {
        match (visible, self.is_open()) {
            (true, false) => self.attach().is_ok(),
            (false, true) => self.detach().is_ok(),
            _ => false,
        }
    }

    /// Re-read the focus-trap boundaries after the content changed.
    ///
    /// Returns the new cycle length, or `None` while closed.
    pub fn recompute_boundaries(&mut self) -> Option<usize> {
        let host: &H = self.ctx.host();
        let open = self.open.as_mut()?;
        open.trap.recompute(host);
        let len = open.trap.cycle().len();
        trace!(overlay = %self.id, cycle = len, "focus trap recomputed");
        Some(len)
    }

    // --- Input ---

    /// Route a key press to this overlay.
    ///
    /// Only the top-most open overlay reacts. Below the top, both Tab and
    /// Escape return [`KeyOutcome::Ignored`] so the overlay above keeps its
    /// own focus cycle. Release events are always ignored.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !key.is_down() {
            return KeyOutcome::Ignored;
        }
        let Some(open) = self.open.as_ref() else {
            return KeyOutcome::Ignored;
        };
        if !open.status.get().is_top {
            trace!(overlay = %self.id, code = ?key.code, "key ignored below top");
            return KeyOutcome::Ignored;
        }

        if let Some(direction) = key.tab_direction() {
            let host: &H = self.ctx.host();
            let current = host.current_focus_target();
            return match open.trap.on_tab(current.as_ref(), direction) {
                TabOutcome::Pass => KeyOutcome::Ignored,
                TabOutcome::Prevent => KeyOutcome::Handled,
                TabOutcome::MoveTo(element) => {
                    trace!(overlay = %self.id, ?element, "focus wrapped");
                    host.focus(&element);
                    KeyOutcome::Handled
                }
            };
        }

        if key.code == KeyCode::Escape && self.config.escape_closes {
            // Open was checked above, so detach cannot fail here.
            if self.detach().is_ok()
                && let Some(callback) = self.on_close.as_mut()
            {
                callback(&self.id);
            }
            return KeyOutcome::Dismissed;
        }

        KeyOutcome::Ignored
    }

    // --- Queries ---

    pub fn id(&self) -> &OverlayId {
        &self.id
    }

    pub fn root(&self) -> &H::Handle {
        &self.root
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Stacking status as of the last stack change; default while closed.
    pub fn status(&self) -> StackStatus {
        self.open
            .as_ref()
            .map(|open| open.status.get())
            .unwrap_or_default()
    }

    /// Current focus-cycle elements, while open.
    pub fn boundaries(&self) -> Option<&[H::Handle]> {
        self.open.as_ref().map(|open| open.trap.cycle())
    }
}

impl<H: OverlayHost + 'static> Drop for OverlayController<H> {
    fn drop(&mut self) {
        if self.is_open() {
            let _ = self.detach();
        }
    }
}

fn refresh_status<H: OverlayHost + ?Sized>(
    stack: &OverlayStack,
    host: &H,
    id: &OverlayId,
    root: &H::Handle,
    status: &Cell<StackStatus>,
) {
    let current = stack.snapshot(id);
    if current == status.get() {
        return;
    }
    status.set(current);
    if let Some(tier) = current.tier {
        host.mark_top(root, current.is_top, tier);
    }
}
