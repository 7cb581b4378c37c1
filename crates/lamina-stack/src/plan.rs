#![forbid(unsafe_code)]

//! Pure stacking computations.
//!
//! Every lifecycle operation boils down to a recompute of `(state, z)` pairs
//! over the visible set. This module performs that recompute on value-type
//! [`Layer`] snapshots and returns [`Assignment`] lists; the manager applies
//! them to its records and the presentation adapter. Nothing here touches a
//! record or a presenter, so the ordering rules are testable in isolation.
//!
//! # Invariants
//!
//! - Re-packs produce contiguous z values from [`BASE_Z`]: no gaps, no reuse
//!   of a closed record's old slot.
//! - A newly shown window lands strictly above every other visible window in
//!   its own group.
//! - Visible modal windows always out-rank every visible non-modal window;
//!   a non-modal show re-lifts the modal group above the target.
//! - `Hidden` layers never participate in group queries.
//!
//! # Failure Modes
//!
//! - Unknown target ids produce an empty/blocked plan (no panic); the
//!   manager fails fast with an error before planning.

use lamina_core::{WindowId, WindowState};

/// Base z slot for managed windows. The shared backdrop sits just below.
pub const BASE_Z: u32 = 1000;

/// Value-type snapshot of one window record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub id: WindowId,
    pub modal: bool,
    pub state: WindowState,
    pub z: u32,
}

/// One recomputed `(state, z)` pair for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub id: WindowId,
    pub state: WindowState,
    pub z: u32,
}

/// Result of planning a bring-to-front request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontPlan {
    /// The target already holds the top slot; nothing to do.
    AlreadyFront,
    /// A modal window pins the stack, or the target is hidden/unknown.
    Blocked,
    /// Assignments raising the target to the top of the non-modal group.
    Raise(Vec<Assignment>),
}

/// Visible members of one group, sorted by z ascending (bottom to top).
fn group(layers: &[Layer], modal: bool, exclude: Option<WindowId>) -> Vec<Layer> {
    let mut members: Vec<Layer> = layers
        .iter()
        .copied()
        .filter(|l| l.state.is_visible() && l.modal == modal && Some(l.id) != exclude)
        .collect();
    members.sort_by_key(|l| l.z);
    members
}

/// Plan the recompute for showing `target`.
///
/// `layers` is the full collection; the target is excluded from the group
/// queries regardless of the state it is snapshotted in, so a double-show
/// replans to the same result. Both groups are re-packed contiguously, so
/// re-showing an already-visible window lands it strictly on top
/// of its group instead of colliding with its old slot.
///
/// A modal target disables both groups and takes the slot above everything
/// visible. A non-modal target takes the slot above its own group, the modal
/// group keeps contiguous slots strictly above it, and the target is
/// `Active` only when no modal window is visible.
pub fn plan_show(layers: &[Layer], target: WindowId, target_modal: bool) -> Vec<Assignment> {
    let modals = group(layers, true, Some(target));
    let plain = group(layers, false, Some(target));
    let mut out = Vec::with_capacity(modals.len() + plain.len() + 1);

    if target_modal {
        for (idx, layer) in plain.iter().enumerate() {
            out.push(Assignment {
                id: layer.id,
                state: WindowState::Disabled,
                z: BASE_Z + idx as u32,
            });
        }
        for (idx, layer) in modals.iter().enumerate() {
            out.push(Assignment {
                id: layer.id,
                state: WindowState::Disabled,
                z: BASE_Z + (plain.len() + idx) as u32,
            });
        }
        out.push(Assignment {
            id: target,
            state: WindowState::Active,
            z: BASE_Z + (plain.len() + modals.len()) as u32,
        });
    } else {
        let target_z = BASE_Z + plain.len() as u32;
        for (idx, layer) in plain.iter().enumerate() {
            out.push(Assignment {
                id: layer.id,
                state: layer.state,
                z: BASE_Z + idx as u32,
            });
        }
        for (idx, layer) in modals.iter().enumerate() {
            out.push(Assignment {
                id: layer.id,
                state: layer.state,
                z: target_z + 1 + idx as u32,
            });
        }
        let state = if modals.is_empty() {
            WindowState::Active
        } else {
            WindowState::Disabled
        };
        out.push(Assignment {
            id: target,
            state,
            z: target_z,
        });
    }
    out
}

/// Plan the recompute after closing or hiding `target`.
///
/// The returned assignments cover the *remaining* visible windows only; the
/// caller parks or removes the target itself. The non-modal group re-packs
/// from [`BASE_Z`], the modal group re-packs contiguously above it, and the
/// top-most remaining modal window regains `Active` (most recently stacked,
/// not insertion order).
pub fn plan_close(layers: &[Layer], target: WindowId) -> Vec<Assignment> {
    let modals = group(layers, true, Some(target));
    let plain = group(layers, false, Some(target));
    let mut out = Vec::with_capacity(modals.len() + plain.len());

    let top_modal = modals.len().checked_sub(1);
    for (idx, layer) in modals.iter().enumerate() {
        let state = if Some(idx) == top_modal {
            WindowState::Active
        } else {
            layer.state
        };
        out.push(Assignment {
            id: layer.id,
            state,
            z: BASE_Z + (plain.len() + idx) as u32,
        });
    }
    for (idx, layer) in plain.iter().enumerate() {
        let state = if modals.is_empty() {
            WindowState::Active
        } else {
            WindowState::Disabled
        };
        out.push(Assignment {
            id: layer.id,
            state,
            z: BASE_Z + idx as u32,
        });
    }
    out
}

/// Plan a user-interaction request to raise `target` above its peers.
///
/// Refused while any modal window is visible: show/close are the only
/// operations that adjust layering then. Also refused for hidden or unknown
/// targets, which cannot receive the interaction that motivates the call.
pub fn plan_front(layers: &[Layer], target: WindowId) -> FrontPlan {
    let Some(snapshot) = layers.iter().copied().find(|l| l.id == target) else {
        return FrontPlan::Blocked;
    };
    if snapshot.state.is_hidden() {
        return FrontPlan::Blocked;
    }
    if frontmost(layers) == Some(target) {
        return FrontPlan::AlreadyFront;
    }
    if !group(layers, true, None).is_empty() {
        return FrontPlan::Blocked;
    }

    let others = group(layers, false, Some(target));
    let mut out = Vec::with_capacity(others.len() + 1);
    for (idx, layer) in others.iter().enumerate() {
        out.push(Assignment {
            id: layer.id,
            state: layer.state,
            z: BASE_Z + idx as u32,
        });
    }
    out.push(Assignment {
        id: target,
        state: snapshot.state,
        z: BASE_Z + others.len() as u32,
    });
    FrontPlan::Raise(out)
}

/// The front-most visible window, if any.
///
/// The modal group conceptually sits above the non-modal group, so the top
/// modal window wins whenever one is visible.
pub fn frontmost(layers: &[Layer]) -> Option<WindowId> {
    let modals = group(layers, true, None);
    if let Some(top) = modals.last() {
        return Some(top.id);
    }
    group(layers, false, None).last().map(|l| l.id)
}
