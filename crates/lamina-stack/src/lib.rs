#![forbid(unsafe_code)]

//! Modal/non-modal stacking manager for lamina overlay windows.
//!
//! The [`StackingManager`] owns an ordered collection of overlay windows and
//! recomputes stacking order and enabled/disabled state on every
//! register/show/close/front request. The recompute itself is a pure
//! function over value-type snapshots (see [`plan`]); the manager applies
//! its output to the records and to a caller-supplied [`Presenter`].
//!
//! # Invariants
//!
//! - At most one modal window is `Active` at any time; showing a new modal
//!   window disables everything else.
//! - While any modal window is visible, every non-modal window is
//!   `Disabled` and `bring_to_front` is refused.
//! - Within each group, z-order follows activation order; re-packs are
//!   contiguous integers from [`plan::BASE_Z`] with no gaps.
//! - The shared backdrop is visible exactly while some visible window holds
//!   a backdrop reference.
//!
//! # Example
//!
//! ```
//! use lamina_stack::{NullPresenter, StackingManager, WindowConfig};
//!
//! let mut mgr = StackingManager::new(NullPresenter);
//! let panel = mgr.create(WindowConfig::new())?;
//! let confirm = mgr.create(WindowConfig::new().modal(true))?;
//!
//! mgr.show(panel)?;
//! mgr.show(confirm)?; // panel is now Disabled under the modal window
//! assert_eq!(mgr.frontmost(), Some(confirm));
//!
//! mgr.close(confirm)?; // panel regains Active
//! assert_eq!(mgr.frontmost(), Some(panel));
//! # Ok::<(), lamina_core::StackError>(())
//! ```

pub mod backdrop;
pub mod config;
pub mod manager;
pub mod plan;
pub mod record;

pub use backdrop::Backdrop;
pub use config::{WindowConfig, WindowFlags};
pub use manager::{CloseOutcome, NullPresenter, Presenter, StackingManager};
pub use plan::{Assignment, BASE_Z, FrontPlan, Layer};
pub use record::WindowRecord;
