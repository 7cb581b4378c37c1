#![forbid(unsafe_code)]

//! Per-window display-state machine.
//!
//! # Invariants
//!
//! - `Active` is only ever assigned by a stacking recompute (show/close),
//!   never set directly by callers.
//! - While any modal window is visible, every non-modal window is
//!   `Disabled`.
//! - `Hidden` windows keep their record and can be re-shown; they never
//!   participate in group ordering queries.

/// Display state of a window record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowState {
    /// Parked: not displayed, not counted in any stacking group.
    #[default]
    Hidden,
    /// Displayed but not interactive (a modal window owns interaction, or
    /// the window is mid-recompute).
    Disabled,
    /// Displayed and interactive.
    Active,
}

impl WindowState {
    /// Whether the window participates in stacking (anything but `Hidden`).
    #[inline]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether the window is interactive.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether the window is parked.
    #[inline]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_hidden() {
        assert_eq!(WindowState::default(), WindowState::Hidden);
    }

    #[test]
    fn visibility_predicates() {
        assert!(!WindowState::Hidden.is_visible());
        assert!(WindowState::Disabled.is_visible());
        assert!(WindowState::Active.is_visible());

        assert!(WindowState::Active.is_active());
        assert!(!WindowState::Disabled.is_active());
        assert!(WindowState::Hidden.is_hidden());
    }
}
