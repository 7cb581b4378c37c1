#![forbid(unsafe_code)]

//! Transient toast notifications with deadline-based auto-hide.
//!
//! A [`ToastHub`] owns the set of live toasts. Auto-hide is modeled as a
//! deferred hide with a deadline, not a thread: the host event loop calls
//! [`ToastHub::pump`] with the current time (or wires a one-shot timer to
//! [`ToastHub::fire`]) and the hub expires whatever is due.
//!
//! # Invariants
//!
//! - Last scheduler wins: re-scheduling a toast bumps its generation stamp,
//!   so a timer armed for the old deadline fires as a no-op.
//! - Dismissing a toast removes its record; any later timer firing for it is
//!   a no-op, guarded by record existence.
//! - `Loading` toasts are sticky by default: no deadline, never expired by
//!   `pump`, removed only by [`ToastHub::dismiss`].
//!
//! # Failure Modes
//!
//! - `dismiss`/`fire` on an unknown id returns `false` (no panic); expiry
//!   racing an explicit dismissal is expected, not an error.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lamina_core::Hooks;
use tracing::debug;
use web_time::Instant;

/// Global counter for toast ids.
static TOAST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a toast in a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToastId(u64);

impl ToastId {
    fn next() -> Self {
        Self(TOAST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Toast severity / presentation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
    /// In-progress indicator; sticky until dismissed.
    Loading,
}

impl ToastKind {
    /// Default auto-hide duration for this kind; `None` is sticky.
    pub const fn default_duration(self) -> Option<Duration> {
        match self {
            Self::Info | Self::Success => Some(Duration::from_millis(1500)),
            Self::Warning => Some(Duration::from_millis(2000)),
            Self::Error => Some(Duration::from_millis(2500)),
            Self::Loading => None,
        }
    }
}

/// A toast message with its auto-hide policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    duration: Option<Duration>,
}

impl Toast {
    /// Create a toast of the given kind with its default duration.
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: kind.default_duration(),
        }
    }

    /// Informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    /// Success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    /// Warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    /// Error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    /// Loading toast; sticky until dismissed.
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Loading)
    }

    /// Override the auto-hide duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Keep the toast until explicitly dismissed.
    pub fn sticky(mut self) -> Self {
        self.duration = None;
        self
    }

    /// The toast message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The toast kind.
    #[inline]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// The auto-hide duration, if any.
    #[inline]
    pub fn auto_hide(&self) -> Option<Duration> {
        self.duration
    }
}

#[derive(Debug)]
struct ActiveToast {
    id: ToastId,
    toast: Toast,
    deadline: Option<Instant>,
    /// Scheduler stamp; a timer armed under an older stamp must no-op.
    generation: u64,
}

/// Owner of the live toast set.
pub struct ToastHub {
    entries: Vec<ActiveToast>,
    generations: u64,
    /// Fired once per expired toast, after removal.
    pub on_timeout: Hooks<ToastId>,
}

impl ToastHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            generations: 0,
            on_timeout: Hooks::new(),
        }
    }

    /// Add a toast, scheduling its deadline from `now`.
    pub fn push(&mut self, toast: Toast, now: Instant) -> ToastId {
        let id = ToastId::next();
        self.generations += 1;
        let deadline = toast.duration.map(|d| now + d);
        self.entries.push(ActiveToast {
            id,
            toast,
            deadline,
            generation: self.generations,
        });
        id
    }

    /// Re-schedule a toast's deadline from `now` (last scheduler wins).
    ///
    /// Bumps the generation stamp so any timer armed for the previous
    /// deadline becomes stale. Returns `false` for unknown ids.
    pub fn reschedule(&mut self, id: ToastId, now: Instant) -> bool {
        self.generations += 1;
        let generation = self.generations;
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.deadline = entry.toast.duration.map(|d| now + d);
        entry.generation = generation;
        true
    }

    /// Remove a toast explicitly. Returns `false` for unknown ids.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries.remove(idx);
        true
    }

    /// The deadline and generation stamp a one-shot timer should be armed
    /// with, or `None` for unknown or sticky toasts.
    pub fn schedule(&self, id: ToastId) -> Option<(Instant, u64)> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.deadline.map(|at| (at, e.generation)))
    }

    /// One-shot timer delivery for a single toast.
    ///
    /// Expires the toast iff it still exists and `generation` matches its
    /// current stamp; a stale or unknown delivery is a no-op. Returns whether
    /// the toast was expired.
    pub fn fire(&mut self, id: ToastId, generation: u64) -> bool {
        let Some(idx) = self
            .entries
            .iter()
            .position(|e| e.id == id && e.generation == generation)
        else {
            return false;
        };
        let entry = self.entries.remove(idx);
        debug!(toast = %entry.id, "toast expired");
        self.on_timeout.fire(&entry.id);
        true
    }

    /// Expire every toast whose deadline has passed. Returns the expired ids
    /// in scheduling order.
    pub fn pump(&mut self, now: Instant) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.entries.retain(|e| match e.deadline {
            Some(at) if at <= now => {
                expired.push(e.id);
                false
            }
            _ => true,
        });
        for id in &expired {
            debug!(toast = %id, "toast expired");
            self.on_timeout.fire(id);
        }
        expired
    }

    /// Look up a live toast.
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.toast)
    }

    /// Iterate live toasts in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.entries.iter().map(|e| (e.id, &e.toast))
    }

    /// Number of live toasts.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no toasts are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToastHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHub")
            .field("entries", &self.entries.len())
            .field("generations", &self.generations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_durations_per_kind() {
        assert_eq!(
            ToastKind::Info.default_duration(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(
            ToastKind::Success.default_duration(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(
            ToastKind::Warning.default_duration(),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(
            ToastKind::Error.default_duration(),
            Some(Duration::from_millis(2500))
        );
        assert_eq!(ToastKind::Loading.default_duration(), None);
    }

    #[test]
    fn pump_expires_only_due_toasts() {
        let mut hub = ToastHub::new();
        let t0 = Instant::now();
        let fast = hub.push(Toast::info("saved"), t0);
        let slow = hub.push(Toast::error("request failed"), t0);

        assert_eq!(hub.pump(t0 + Duration::from_millis(1500)), vec![fast]);
        assert!(hub.get(fast).is_none());
        assert!(hub.get(slow).is_some());

        assert_eq!(hub.pump(t0 + Duration::from_millis(2500)), vec![slow]);
        assert!(hub.is_empty());
    }

    #[test]
    fn loading_is_sticky() {
        let mut hub = ToastHub::new();
        let t0 = Instant::now();
        let id = hub.push(Toast::loading("uploading"), t0);
        assert!(hub.pump(t0 + Duration::from_secs(3600)).is_empty());
        assert!(hub.dismiss(id));
        assert!(hub.is_empty());
    }

    #[test]
    fn reschedule_is_last_scheduler_wins() {
        let mut hub = ToastHub::new();
        let t0 = Instant::now();
        let id = hub.push(Toast::info("copied"), t0);
        let (first_deadline, first_generation) = hub.schedule(id).unwrap();

        let t1 = t0 + Duration::from_millis(1000);
        assert!(hub.reschedule(id, t1));

        // the old deadline passes without expiring the toast
        assert!(hub.pump(first_deadline).is_empty());
        // a timer armed under the old stamp is stale
        assert!(!hub.fire(id, first_generation));
        assert!(hub.get(id).is_some());

        assert_eq!(hub.pump(t1 + Duration::from_millis(1500)), vec![id]);
    }

    #[test]
    fn fire_after_dismiss_is_noop() {
        let mut hub = ToastHub::new();
        let t0 = Instant::now();
        let id = hub.push(Toast::success("done"), t0);
        let (_, generation) = hub.schedule(id).unwrap();
        assert!(hub.dismiss(id));
        assert!(!hub.fire(id, generation));
        assert!(!hub.dismiss(id));
    }

    #[test]
    fn fire_with_current_stamp_expires() {
        let mut hub = ToastHub::new();
        let t0 = Instant::now();
        let id = hub.push(Toast::warning("low disk space"), t0);
        let (_, generation) = hub.schedule(id).unwrap();
        assert!(hub.fire(id, generation));
        assert!(hub.is_empty());
    }

    #[test]
    fn on_timeout_fires_per_expiry() {
        let mut hub = ToastHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        hub.on_timeout.listen(move |id| sink.borrow_mut().push(*id));

        let t0 = Instant::now();
        let a = hub.push(Toast::info("one"), t0);
        let b = hub.push(Toast::info("two"), t0);
        hub.pump(t0 + Duration::from_secs(2));
        assert_eq!(*seen.borrow(), vec![a, b]);
    }

    #[test]
    fn duration_override_and_sticky() {
        let toast = Toast::error("boom").duration(Duration::from_millis(10));
        assert_eq!(toast.auto_hide(), Some(Duration::from_millis(10)));
        let toast = Toast::error("boom").sticky();
        assert_eq!(toast.auto_hide(), None);
    }

    proptest! {
        #[test]
        fn pump_never_leaves_due_toasts(
            durations in proptest::collection::vec(1u64..5_000, 1..20),
            advance in 0u64..10_000,
        ) {
            let mut hub = ToastHub::new();
            let t0 = Instant::now();
            for ms in &durations {
                hub.push(
                    Toast::info("x").duration(Duration::from_millis(*ms)),
                    t0,
                );
            }
            let now = t0 + Duration::from_millis(advance);
            let expired = hub.pump(now);
            let due = durations.iter().filter(|ms| **ms <= advance).count();
            prop_assert_eq!(expired.len(), due);
            // nothing still due remains live
            for (id, _) in hub.iter() {
                let (at, _) = hub.schedule(id).unwrap();
                prop_assert!(at > now);
            }
        }
    }
}
