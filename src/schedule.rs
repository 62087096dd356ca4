//! Delayed step plans on a caller-driven logical timeline.

use tracing::trace;

/// What accepting a new intent does to steps left over from earlier intents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelPolicy {
    /// Drop every pending step before arming the new plan
    #[default]
    CancelPending,
    /// Let superseded steps fire alongside the new plan
    LetRun,
}

/// One step of a plan: `action` fires `delay_ms` after the plan is armed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<A> {
    pub delay_ms: u64,
    pub action: A,
}

impl<A> Step<A> {
    /// A step firing `delay_ms` after the plan is armed.
    pub fn after(delay_ms: u64, action: A) -> Self {
        Self { delay_ms, action }
    }
}

/// A step that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<A> {
    /// Logical time the step was due at
    pub due_ms: u64,
    pub action: A,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    due_ms: u64,
    seq: u64,
    action: A,
}

/// Fire-once timers, cancelled together.
///
/// Like the rest of the crate, the scheduler has no clock of its own. Plans
/// are armed at a caller-supplied `now_ms` and drained with
/// [`pop_due`](Self::pop_due). Steps due at the same instant fire in the
/// order they were armed.
///
/// ## Example
///
/// ```rust
/// use portfolio_core_view::{Scheduler, Step};
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(100, [Step::after(600, "enter"), Step::after(650, "show")]);
///
/// assert_eq!(scheduler.next_due(), Some(700));
/// assert!(scheduler.pop_due(699).is_none());
/// assert_eq!(scheduler.pop_due(800).map(|f| f.action), Some("enter"));
/// assert_eq!(scheduler.pop_due(800).map(|f| f.action), Some("show"));
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    /// Sorted by `(due_ms, seq)`
    pending: Vec<Pending<A>>,
    next_seq: u64,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Arm a plan relative to `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, steps: impl IntoIterator<Item = Step<A>>) {
        for step in steps {
            let due_ms = now_ms.saturating_add(step.delay_ms);
            let seq = self.next_seq;
            self.next_seq += 1;
            let at = self
                .pending
                .partition_point(|p| (p.due_ms, p.seq) <= (due_ms, seq));
            self.pending.insert(
                at,
                Pending {
                    due_ms,
                    seq,
                    action: step.action,
                },
            );
        }
    }

    /// Drop every pending step. Returns how many were dropped.
    pub fn cancel_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            trace!(dropped, "cancelled pending steps");
        }
        dropped
    }

    /// Deadline of the earliest pending step.
    #[inline]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|p| p.due_ms)
    }

    /// Remove and return the earliest step if it is due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<A>> {
        if self.next_due()? > now_ms {
            return None;
        }
        let p = self.pending.remove(0);
        Some(Fired {
            due_ms: p.due_ms,
            action: p.action,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
