#![forbid(unsafe_code)]

//! Core vocabulary for the lamina overlay toolkit.
//!
//! This crate carries the leaf types every other lamina crate builds on:
//!
//! - [`WindowId`]: process-unique window identifiers.
//! - [`WindowState`]: the `Hidden -> Disabled -> Active` display-state machine.
//! - [`Hooks`] / [`VetoHooks`]: synchronous observer lists, including the
//!   cancelable dispatch used by the close lifecycle.
//! - [`StackError`]: fail-fast misuse reporting.
//!
//! Everything here is single-threaded by design: manager operations run to
//! completion on the host's event loop, so listeners are plain `FnMut`
//! closures with no `Send` bounds.

pub mod error;
pub mod event;
pub mod id;
pub mod state;

pub use error::StackError;
pub use event::{CloseVerdict, Hooks, VetoHooks};
pub use id::WindowId;
pub use state::WindowState;
