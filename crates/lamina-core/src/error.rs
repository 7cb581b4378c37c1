#![forbid(unsafe_code)]

//! Fail-fast misuse reporting.
//!
//! Lifecycle calls against unregistered windows and duplicate caller-supplied
//! ids are programmer errors; silently ignoring them would corrupt the
//! stacking invariants, so they surface as explicit results.

use crate::id::WindowId;

/// Errors from stacking-manager operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// A lifecycle operation referenced an id the manager does not track.
    UnknownWindow(WindowId),
    /// Registration was attempted with an id that is already registered.
    DuplicateId(WindowId),
}

impl std::fmt::Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWindow(id) => write!(f, "unknown window: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate window id: {id}"),
        }
    }
}

impl std::error::Error for StackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_id() {
        let err = StackError::UnknownWindow(WindowId::from_raw(3));
        assert_eq!(err.to_string(), "unknown window: window-3");
        let err = StackError::DuplicateId(WindowId::from_raw(8));
        assert_eq!(err.to_string(), "duplicate window id: window-8");
    }
}
