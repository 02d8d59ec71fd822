#![forbid(unsafe_code)]

//! The shared registries every overlay under one UI root talks to.

use std::fmt;
use std::rc::Rc;

use strata_core::OverlayHost;

use crate::background::BackgroundLock;
use crate::config::OverlayConfig;
use crate::controller::OverlayController;
use crate::focus_memory::FocusMemory;
use crate::id::OverlayId;
use crate::stack::OverlayStack;

/// Handle to the host and the process-wide overlay registries.
///
/// Owned by the UI root and cloned into each overlay; clones share the same
/// registries.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use strata_core::testing::{BODY, MockHost};
/// use strata_overlay::{OverlayConfig, OverlayContext, OverlayId};
///
/// let host = Rc::new(MockHost::new());
/// let ctx = OverlayContext::new(Rc::clone(&host));
///
/// let root = host.add_container(BODY);
/// let mut modal = ctx.controller(OverlayId::from("settings"), root, OverlayConfig::modal());
/// modal.attach().unwrap();
/// assert!(host.is_scroll_locked());
/// modal.detach().unwrap();
/// assert!(!host.is_scroll_locked());
/// ```
pub struct OverlayContext<H: OverlayHost> {
    host: Rc<H>,
    stack: Rc<OverlayStack>,
    focus: Rc<FocusMemory<H>>,
    background: Rc<BackgroundLock>,
}

impl<H: OverlayHost> Clone for OverlayContext<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            stack: Rc::clone(&self.stack),
            focus: Rc::clone(&self.focus),
            background: Rc::clone(&self.background),
        }
    }
}

impl<H: OverlayHost> fmt::Debug for OverlayContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayContext")
            .field("stack", &self.stack)
            .field("focus", &self.focus)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> OverlayContext<H> {
    /// Fresh registries with the default tier baseline.
    pub fn new(host: Rc<H>) -> Self {
        Self::with_stack(host, OverlayStack::new())
    }

    /// Fresh registries around a pre-configured stack.
    pub fn with_stack(host: Rc<H>, stack: OverlayStack) -> Self {
        let focus = Rc::new(FocusMemory::new(Rc::clone(&host)));
        Self {
            host,
            stack: Rc::new(stack),
            focus,
            background: Rc::new(BackgroundLock::new()),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn stack(&self) -> &Rc<OverlayStack> {
        &self.stack
    }

    pub fn focus_memory(&self) -> &Rc<FocusMemory<H>> {
        &self.focus
    }

    pub fn background(&self) -> &Rc<BackgroundLock> {
        &self.background
    }
}

impl<H: OverlayHost + 'static> OverlayContext<H> {
    /// A closed controller for the overlay rooted at `root`.
    pub fn controller(
        &self,
        id: OverlayId,
        root: H::Handle,
        config: OverlayConfig,
    ) -> OverlayController<H> {
        OverlayController::new(self, id, root, config)
    }
}
