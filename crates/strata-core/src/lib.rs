#![forbid(unsafe_code)]

//! Host capabilities and input events for strata overlay coordination.
//!
//! This crate carries no coordination logic of its own. It defines the seam
//! between the overlay registries in `strata-overlay` and whatever UI toolkit
//! renders the overlays:
//!
//! - [`host`]: the [`FocusHost`] and [`OverlayHost`] capability traits.
//! - [`event`]: keyboard events routed to open overlays.
//! - `testing` (feature `test-helpers`): an in-memory UI tree implementing
//!   both traits.

pub mod event;
pub mod host;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, TabDirection};
pub use host::{FocusHost, OverlayHost};
