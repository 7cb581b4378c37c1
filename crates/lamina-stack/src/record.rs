#![forbid(unsafe_code)]

//! Per-window records owned by the stacking manager.

use lamina_core::{Hooks, VetoHooks, WindowId, WindowState};

use crate::config::WindowFlags;
use crate::plan::BASE_Z;

/// A window tracked by the stacking manager.
///
/// The manager owns every record and is the only mutator of `state` and
/// z-order; the presentation layer observes those through the `Presenter`
/// adapter and must never write them back.
#[derive(Debug)]
pub struct WindowRecord {
    id: WindowId,
    flags: WindowFlags,
    pub(crate) state: WindowState,
    pub(crate) z: u32,
    /// Whether this record currently holds a backdrop reference.
    pub(crate) holds_backdrop: bool,
    /// Fired after a show recompute completes.
    pub on_show: Hooks<WindowId>,
    /// Fired after the record is parked `Hidden` by a non-destroying close.
    pub on_hide: Hooks<WindowId>,
    /// Fired before any close/hide; a `Cancel` verdict aborts the transition.
    pub on_close: VetoHooks<WindowId>,
}

impl WindowRecord {
    pub(crate) fn new(id: WindowId, flags: WindowFlags) -> Self {
        Self {
            id,
            flags,
            state: WindowState::Hidden,
            z: BASE_Z,
            holds_backdrop: false,
            on_show: Hooks::new(),
            on_hide: Hooks::new(),
            on_close: VetoHooks::new(),
        }
    }

    /// The record's id.
    #[inline]
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Resolved behavior flags. Fixed at creation.
    #[inline]
    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Current display state.
    #[inline]
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Current z-order. Only its relative order within the record's group is
    /// stable across operations.
    #[inline]
    pub fn z_order(&self) -> u32 {
        self.z
    }

    /// Whether the window takes exclusive interaction while visible.
    #[inline]
    pub fn is_modal(&self) -> bool {
        self.flags.contains(WindowFlags::MODAL)
    }

    /// Whether showing the window raises the shared backdrop.
    #[inline]
    pub fn wants_backdrop(&self) -> bool {
        self.flags.contains(WindowFlags::BACKDROP)
    }

    /// Whether the global Escape contract may close the window.
    #[inline]
    pub fn closable(&self) -> bool {
        self.flags.contains(WindowFlags::CLOSABLE)
    }

    /// Whether the presentation layer may let the user drag the window.
    #[inline]
    pub fn movable(&self) -> bool {
        self.flags.contains(WindowFlags::MOVABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;

    #[test]
    fn new_record_is_hidden_at_base() {
        let rec = WindowRecord::new(WindowId::from_raw(1), WindowConfig::new().flags());
        assert_eq!(rec.state(), WindowState::Hidden);
        assert_eq!(rec.z_order(), BASE_Z);
        assert!(!rec.holds_backdrop);
    }

    #[test]
    fn flag_accessors() {
        let rec = WindowRecord::new(
            WindowId::from_raw(2),
            WindowConfig::new().modal(true).closable(false).flags(),
        );
        assert!(rec.is_modal());
        assert!(rec.wants_backdrop());
        assert!(!rec.closable());
        assert!(rec.movable());
    }
}
