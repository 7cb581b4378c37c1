#![forbid(unsafe_code)]

//! Process-unique window identifiers.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generated window ids.
static WINDOW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a window tracked by the stacking manager.
///
/// Ids are normally allocated with [`WindowId::next`]; callers that need
/// stable, externally chosen ids can mint one with [`WindowId::from_raw`].
/// Both kinds share one namespace; the manager rejects duplicates at
/// registration time rather than silently reusing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowId(u64);

impl WindowId {
    /// Allocate the next process-unique id.
    pub fn next() -> Self {
        Self(WINDOW_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a caller-chosen raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}
