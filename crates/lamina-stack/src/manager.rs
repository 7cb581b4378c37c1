#![forbid(unsafe_code)]

//! The stacking manager.
//!
//! A [`StackingManager`] owns the collection of [`WindowRecord`]s, runs the
//! pure recompute from [`crate::plan`] on every lifecycle transition, and
//! pushes the resulting `(state, z)` assignments through an injected
//! [`Presenter`]. One manager is instantiated per application context; there
//! is no module-level global.
//!
//! # Invariants
//!
//! - Registration (`create`) has no ordering or presentation side effects;
//!   recomputes only happen on show/close/front.
//! - Operations are synchronous and run to completion; listeners fire on the
//!   caller's stack and must not re-enter the manager.
//! - The shared backdrop is mutated only here, via the refcount.
//!
//! # Failure Modes
//!
//! - Lifecycle calls with unknown ids fail fast with
//!   [`StackError::UnknownWindow`]; duplicate caller-supplied ids fail with
//!   [`StackError::DuplicateId`]. Neither mutates anything.
//! - A vetoed close is not an error: it reports [`CloseOutcome::Vetoed`] and
//!   leaves state, z-order, and the collection unchanged.

use ahash::AHashMap;
use lamina_core::{Hooks, StackError, WindowId, WindowState};
use tracing::{debug, warn};

use crate::backdrop::Backdrop;
use crate::config::WindowConfig;
use crate::plan::{self, Assignment, FrontPlan, Layer};
use crate::record::WindowRecord;

/// Presentation adapter driven by the manager.
///
/// The embedding application implements this to mirror manager decisions
/// onto its visual layer. Implementations must not set z-order or display
/// state on their own; the manager is the only source of truth.
pub trait Presenter {
    /// Apply a recomputed `(state, z)` pair to the window's visual layer.
    /// `WindowState::Hidden` means undisplayed but retained.
    fn apply(&mut self, id: WindowId, state: WindowState, z: u32);

    /// Show or hide the shared dimming backdrop. Called on edges only.
    fn set_backdrop(&mut self, visible: bool);

    /// Release the window's visual layer after the record is destroyed.
    fn release(&mut self, id: WindowId);
}

/// Presenter that ignores every instruction; for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn apply(&mut self, _id: WindowId, _state: WindowState, _z: u32) {}
    fn set_backdrop(&mut self, _visible: bool) {}
    fn release(&mut self, _id: WindowId) {}
}

/// Result of a close/hide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The transition went through.
    Closed,
    /// An `on_close` listener vetoed; nothing changed.
    Vetoed,
}

impl CloseOutcome {
    /// Whether the transition went through.
    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Owner of the window collection and the shared backdrop.
pub struct StackingManager<P: Presenter> {
    /// Records in registration order; stacking order lives in each record's z.
    records: Vec<WindowRecord>,
    /// Per-window custom event buckets, dropped with the record.
    custom: AHashMap<WindowId, AHashMap<String, Hooks<WindowId>>>,
    backdrop: Backdrop,
    presenter: P,
}

impl<P: Presenter> StackingManager<P> {
    /// Create a manager driving the given presentation adapter.
    pub fn new(presenter: P) -> Self {
        Self {
            records: Vec::new(),
            custom: AHashMap::new(),
            backdrop: Backdrop::new(),
            presenter,
        }
    }

    // --- Registration ---

    /// Construct and register a window. The record starts `Hidden`; no
    /// recompute or presentation side effects happen until `show`.
    pub fn create(&mut self, config: WindowConfig) -> Result<WindowId, StackError> {
        let flags = config.flags();
        let id = match config.id {
            Some(id) => {
                if self.position(id).is_some() {
                    return Err(StackError::DuplicateId(id));
                }
                id
            }
            None => {
                let mut id = WindowId::next();
                // A caller-supplied raw id may have landed on the counter.
                while self.position(id).is_some() {
                    id = WindowId::next();
                }
                id
            }
        };
        self.records.push(WindowRecord::new(id, flags));
        Ok(id)
    }

    // --- Lifecycle ---

    /// Show a window and recompute the visible set's ordering and states.
    ///
    /// Double-show is idempotent modulo re-running the recompute.
    pub fn show(&mut self, id: WindowId) -> Result<(), StackError> {
        let idx = self.position(id).ok_or(StackError::UnknownWindow(id))?;
        let modal = self.records[idx].is_modal();
        debug!(window = %id, modal, "show");

        if self.records[idx].wants_backdrop() && !self.records[idx].holds_backdrop {
            self.records[idx].holds_backdrop = true;
            if self.backdrop.acquire() {
                self.presenter.set_backdrop(true);
            }
        }

        // Demoted first so the group queries below do not see the target as
        // already active.
        self.records[idx].state = WindowState::Disabled;

        let assignments = plan::plan_show(&self.layers(), id, modal);
        self.apply(&assignments);

        if let Some(idx) = self.position(id) {
            self.records[idx].on_show.fire(&id);
        }
        Ok(())
    }

    /// Close a window, removing its record and releasing its presentation.
    ///
    /// `on_close` listeners fire first and may veto; a veto changes nothing.
    pub fn close(&mut self, id: WindowId) -> Result<CloseOutcome, StackError> {
        self.close_impl(id, true)
    }

    /// Hide a window: the close path, but the record is parked `Hidden` and
    /// can be re-shown later. Fires `on_hide` after the demotion.
    pub fn hide(&mut self, id: WindowId) -> Result<CloseOutcome, StackError> {
        self.close_impl(id, false)
    }

    fn close_impl(&mut self, id: WindowId, destroy: bool) -> Result<CloseOutcome, StackError> {
        let idx = self.position(id).ok_or(StackError::UnknownWindow(id))?;

        if self.records[idx].on_close.fire(&id).is_cancel() {
            warn!(window = %id, "close vetoed by an on_close listener");
            return Ok(CloseOutcome::Vetoed);
        }
        debug!(window = %id, destroy, "close");

        let assignments = plan::plan_close(&self.layers(), id);
        self.apply(&assignments);

        let was_holding = {
            let rec = &mut self.records[idx];
            std::mem::replace(&mut rec.holds_backdrop, false)
        };
        if was_holding && self.backdrop.release() {
            self.presenter.set_backdrop(false);
        }

        if destroy {
            self.custom.remove(&id);
            self.records.remove(idx);
            self.presenter.release(id);
        } else {
            let z = self.records[idx].z;
            self.records[idx].state = WindowState::Hidden;
            self.presenter.apply(id, WindowState::Hidden, z);
            self.records[idx].on_hide.fire(&id);
        }
        Ok(CloseOutcome::Closed)
    }

    /// Raise a window above its non-modal peers on user interaction.
    ///
    /// Returns `true` iff the window is front-most afterwards. Refused
    /// (`false`, no state change) while any modal window is visible, and for
    /// hidden windows.
    pub fn bring_to_front(&mut self, id: WindowId) -> Result<bool, StackError> {
        self.position(id).ok_or(StackError::UnknownWindow(id))?;
        match plan::plan_front(&self.layers(), id) {
            FrontPlan::AlreadyFront => Ok(true),
            FrontPlan::Blocked => Ok(false),
            FrontPlan::Raise(assignments) => {
                debug!(window = %id, "raise to front");
                self.apply(&assignments);
                Ok(true)
            }
        }
    }

    /// The front-most visible window, if any. A visible modal window always
    /// out-ranks every non-modal window.
    pub fn frontmost(&self) -> Option<WindowId> {
        plan::frontmost(&self.layers())
    }

    /// Global Escape contract: close the front-most window iff it was
    /// configured closable. Returns whether a close actually happened (a
    /// veto yields `false`).
    pub fn handle_escape(&mut self) -> bool {
        let Some(front) = self.frontmost() else {
            return false;
        };
        let closable = self
            .position(front)
            .is_some_and(|idx| self.records[idx].closable());
        if !closable {
            return false;
        }
        matches!(self.close(front), Ok(CloseOutcome::Closed))
    }

    /// Force-remove every record, bypassing the close veto, and hide the
    /// backdrop. Used for hard resets. Idempotent on an empty collection.
    pub fn close_all(&mut self) {
        for rec in self.records.drain(..) {
            self.presenter.release(rec.id());
        }
        self.custom.clear();
        if self.backdrop.clear() {
            self.presenter.set_backdrop(false);
        }
    }

    // --- Queries ---

    /// Look up a record by id.
    pub fn find(&self, id: WindowId) -> Option<&WindowRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// Mutable record access, e.g. for registering lifecycle listeners.
    pub fn record_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.position(id).map(|idx| &mut self.records[idx])
    }

    /// Whether a record with the given id exists.
    pub fn contains(&self, id: WindowId) -> bool {
        self.position(id).is_some()
    }

    /// Number of registered records (any state).
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate every registered record in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.iter()
    }

    /// Whether the shared backdrop is currently visible.
    pub fn backdrop_visible(&self) -> bool {
        self.backdrop.is_visible()
    }

    /// The presentation adapter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // --- Custom per-window events ---

    /// Register a listener for a named per-window event.
    pub fn on(
        &mut self,
        id: WindowId,
        event: impl Into<String>,
        listener: impl FnMut(&WindowId) + 'static,
    ) -> Result<(), StackError> {
        if self.position(id).is_none() {
            return Err(StackError::UnknownWindow(id));
        }
        self.custom
            .entry(id)
            .or_default()
            .entry(event.into())
            .or_default()
            .listen(listener);
        Ok(())
    }

    /// Fire a named per-window event. Unknown event names are a no-op.
    pub fn emit(&mut self, id: WindowId, event: &str) -> Result<(), StackError> {
        if self.position(id).is_none() {
            return Err(StackError::UnknownWindow(id));
        }
        if let Some(bucket) = self.custom.get_mut(&id)
            && let Some(hooks) = bucket.get_mut(event)
        {
            hooks.fire(&id);
        }
        Ok(())
    }

    // --- Internals ---

    fn position(&self, id: WindowId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn layers(&self) -> Vec<Layer> {
        self.records
            .iter()
            .map(|r| Layer {
                id: r.id(),
                modal: r.is_modal(),
                state: r.state,
                z: r.z,
            })
            .collect()
    }

    fn apply(&mut self, assignments: &[Assignment]) {
        for assignment in assignments {
            let Some(idx) = self.position(assignment.id) else {
                continue;
            };
            {
                let rec = &mut self.records[idx];
                rec.state = assignment.state;
                rec.z = assignment.z;
            }
            self.presenter
                .apply(assignment.id, assignment.state, assignment.z);
        }
    }
}

impl<P: Presenter> std::fmt::Debug for StackingManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackingManager")
            .field("records", &self.records.len())
            .field("backdrop", &self.backdrop)
            .finish()
    }
}
