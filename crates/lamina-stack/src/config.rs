#![forbid(unsafe_code)]

//! Window construction configuration.
//!
//! A [`WindowConfig`] is resolved into a [`WindowFlags`] set at registration.
//! Resolution applies one correction: a modal window always gets the shared
//! backdrop, even when the caller asked for none (logged, matching the
//! correction the manager has always applied rather than a hard error).

use lamina_core::WindowId;
use tracing::warn;

bitflags::bitflags! {
    /// Resolved per-window behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowFlags: u8 {
        /// The window takes exclusive interaction while visible.
        const MODAL = 1 << 0;
        /// Showing the window raises the shared dimming backdrop.
        const BACKDROP = 1 << 1;
        /// The window may be closed by the global Escape contract.
        const CLOSABLE = 1 << 2;
        /// The presentation layer may let the user drag the window.
        const MOVABLE = 1 << 3;
    }
}

/// Construction-time window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    pub(crate) id: Option<WindowId>,
    pub(crate) modal: bool,
    pub(crate) backdrop: Option<bool>,
    pub(crate) closable: bool,
    pub(crate) movable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            id: None,
            modal: false,
            backdrop: None,
            closable: true,
            movable: true,
        }
    }
}

impl WindowConfig {
    /// Default configuration: non-modal, closable, movable, auto id, backdrop
    /// following modality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the window is modal. Fixed at creation.
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Set whether showing the window raises the shared backdrop.
    ///
    /// Defaults to the modality flag; modal windows force this on.
    pub fn backdrop(mut self, backdrop: bool) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Set whether the global Escape contract may close the window.
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Set whether the presentation layer may let the user drag the window.
    pub fn movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Register under a caller-chosen id instead of a generated one.
    ///
    /// Registration fails with `StackError::DuplicateId` if the id is taken.
    pub fn id(mut self, id: WindowId) -> Self {
        self.id = Some(id);
        self
    }

    /// Resolve the configuration into flags.
    pub fn flags(&self) -> WindowFlags {
        let mut flags = WindowFlags::empty();
        if self.modal {
            flags |= WindowFlags::MODAL;
        }
        if self.closable {
            flags |= WindowFlags::CLOSABLE;
        }
        if self.movable {
            flags |= WindowFlags::MOVABLE;
        }
        let backdrop = self.backdrop.unwrap_or(self.modal);
        if self.modal && !backdrop {
            warn!("corrected: modal windows force the shared backdrop on");
        }
        if backdrop || self.modal {
            flags |= WindowFlags::BACKDROP;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let flags = WindowConfig::new().flags();
        assert!(!flags.contains(WindowFlags::MODAL));
        assert!(!flags.contains(WindowFlags::BACKDROP));
        assert!(flags.contains(WindowFlags::CLOSABLE));
        assert!(flags.contains(WindowFlags::MOVABLE));
    }

    #[test]
    fn backdrop_follows_modality_by_default() {
        let flags = WindowConfig::new().modal(true).flags();
        assert!(flags.contains(WindowFlags::MODAL));
        assert!(flags.contains(WindowFlags::BACKDROP));
    }

    #[test]
    fn modal_forces_backdrop_on() {
        let flags = WindowConfig::new().modal(true).backdrop(false).flags();
        assert!(flags.contains(WindowFlags::BACKDROP));
    }

    #[test]
    fn plain_window_can_opt_into_backdrop() {
        let flags = WindowConfig::new().backdrop(true).flags();
        assert!(!flags.contains(WindowFlags::MODAL));
        assert!(flags.contains(WindowFlags::BACKDROP));
    }

    #[test]
    fn closable_and_movable_opt_out() {
        let flags = WindowConfig::new().closable(false).movable(false).flags();
        assert!(!flags.contains(WindowFlags::CLOSABLE));
        assert!(!flags.contains(WindowFlags::MOVABLE));
    }
}
