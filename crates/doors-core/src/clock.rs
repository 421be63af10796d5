#![forbid(unsafe_code)]

//! Host-driven time.
//!
//! The core never reads a wall clock. The host reports the current monotonic
//! time on every call and the core keeps it in a [`DeterministicClock`];
//! one-shot delays are held in a [`TimerQueue`] until the host polls past
//! their deadline. This keeps the door transition testable without sleeping.

use core::time::Duration;

/// Monotonic clock advanced explicitly by the host.
///
/// Reports that would move time backwards are ignored.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock to `now` unless that would go backwards.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }
}

/// Fire-once timers ordered by deadline.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    // Sorted by deadline; ties keep insertion order.
    entries: Vec<(Duration, A)>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, action: A) {
        let at = self.entries.partition_point(|(due, _)| *due <= deadline);
        self.entries.insert(at, (deadline, action));
    }

    /// Remove and return every action whose deadline is `<= now`, in order.
    pub fn take_due(&mut self, now: Duration) -> Vec<A> {
        let split = self.entries.partition_point(|(due, _)| *due <= now);
        self.entries.drain(..split).map(|(_, action)| action).collect()
    }

    /// Drop every pending action matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&A) -> bool) {
        self.entries.retain(|(_, action)| !pred(action));
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|(due, _)| *due)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
