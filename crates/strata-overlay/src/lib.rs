#![forbid(unsafe_code)]

//! Coordination of layered overlays (modals, alerts) over one UI root.
//!
//! Several overlays can be open at once. This crate keeps them consistent:
//!
//! - [`OverlayStack`]: which overlay is on top, and each overlay's tier.
//! - [`FocusMemory`]: where focus was before each overlay opened.
//! - [`FocusTrap`]: Tab cycling confined to an overlay's content.
//! - [`BackgroundLock`]: scroll lock and inert marking shared by all overlays.
//! - [`OverlayController`]: one overlay's open/close lifecycle wired to all
//!   of the above, plus Escape routing to the top-most overlay.
//!
//! Registries live in an [`OverlayContext`] owned by the UI root. They are
//! single-threaded (`Rc`-shared) by construction; every mutation happens
//! synchronously inside a UI callback.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use strata_core::testing::{BODY, MockHost};
//! use strata_core::{KeyCode, KeyEvent};
//! use strata_overlay::{KeyOutcome, OverlayConfig, OverlayContext, OverlayId};
//!
//! let host = Rc::new(MockHost::new());
//! let ctx = OverlayContext::new(Rc::clone(&host));
//!
//! let trigger = host.add_focusable(BODY);
//! host.set_focus(trigger);
//!
//! let dialog = host.add_container(BODY);
//! let ok = host.add_focusable(dialog);
//! let mut modal = ctx.controller(OverlayId::from("confirm"), dialog, OverlayConfig::modal());
//!
//! modal.attach().unwrap();
//! assert_eq!(modal.handle_key(&KeyEvent::new(KeyCode::Tab)), KeyOutcome::Handled);
//! assert_eq!(host.focused(), Some(ok));
//!
//! assert_eq!(modal.handle_key(&KeyEvent::new(KeyCode::Escape)), KeyOutcome::Dismissed);
//! assert_eq!(host.focused(), Some(trigger));
//! ```

pub mod background;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod focus_memory;
pub mod id;
pub mod stack;
pub mod trap;

pub use background::BackgroundLock;
pub use config::OverlayConfig;
pub use context::OverlayContext;
pub use controller::{KeyOutcome, OverlayController};
pub use error::OverlayError;
pub use focus_memory::{FocusFrame, FocusMemory, RestoreOutcome};
pub use id::OverlayId;
pub use stack::{DEFAULT_BASE_TIER, OverlayStack, StackStatus, StackSubscription};
pub use trap::{FocusTrap, TabOutcome};
