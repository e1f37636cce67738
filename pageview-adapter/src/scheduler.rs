use alloc::vec::Vec;

/// A pending deferred task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer<T> {
    pub token: T,
    pub deadline_ms: u64,
}

/// Deferred tasks keyed by token, driven by an injected clock.
///
/// At most one timer exists per token. Nothing runs on its own: the owner polls
/// [`Scheduler::take_due`] with the current time.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    // Sorted by deadline; ties keep scheduling order.
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { timers: Vec::new() }
    }
}

impl<T: Copy + PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Schedules `token` to fire `delay_ms` after `now_ms`, replacing any pending timer
    /// with the same token.
    ///
    /// Returns the deadline.
    pub fn schedule(&mut self, token: T, now_ms: u64, delay_ms: u64) -> u64 {
        self.cancel(token);
        let deadline_ms = now_ms.saturating_add(delay_ms);
        let at = self.timers.partition_point(|t| t.deadline_ms <= deadline_ms);
        self.timers.insert(at, Timer { token, deadline_ms });
        deadline_ms
    }

    /// Cancels the pending timer for `token`. Returns whether one existed.
    pub fn cancel(&mut self, token: T) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.token != token);
        self.timers.len() != before
    }

    pub fn is_pending(&self, token: T) -> bool {
        self.timers.iter().any(|t| t.token == token)
    }

    pub fn deadline(&self, token: T) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.token == token)
            .map(|t| t.deadline_ms)
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.first().map(|t| t.deadline_ms)
    }

    /// Removes and returns every token due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<T> {
        let due = self.timers.partition_point(|t| t.deadline_ms <= now_ms);
        self.timers.drain(..due).map(|t| t.token).collect()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
