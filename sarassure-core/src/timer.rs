//! Deferred callbacks as explicit, cancellable timer handles.
//!
//! The queue has no clock of its own. The owner feeds it the current time
//! (taken from input event timestamps or an explicit tick) and drains
//! whatever became due, so behaviour is deterministic and replayable.

/// Handle to a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<K> {
    handle: TimerHandle,
    kind: K,
    deadline_ms: u64,
}

/// A set of pending timers keyed by deadline.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    next_id: u64,
    scheduled: Vec<Scheduled<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            scheduled: Vec::new(),
        }
    }
}

impl<K: Copy> TimerQueue<K> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `deadline_ms`.
    pub fn schedule(&mut self, kind: K, deadline_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.scheduled.push(Scheduled {
            handle,
            kind,
            deadline_ms,
        });
        handle
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.handle != handle);
        self.scheduled.len() != before
    }

    /// Cancel every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.scheduled.len();
        self.scheduled.clear();
        count
    }

    /// Whether `handle` is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.scheduled.iter().any(|s| s.handle == handle)
    }

    /// Earliest pending deadline, for hosts that need to arm a wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduled.iter().map(|s| s.deadline_ms).min()
    }

    /// Remove and return the earliest timer due at `now_ms`.
    ///
    /// Timers with equal deadlines fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, K)> {
        let index = self
            .scheduled
            .iter()
            .enumerate()
            .filter(|(_, s)| s.deadline_ms <= now_ms)
            .min_by_key(|(_, s)| (s.deadline_ms, s.handle.0))
            .map(|(i, _)| i)?;
        let fired = self.scheduled.remove(index);
        Some((fired.handle, fired.kind))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}
