#![forbid(unsafe_code)]

//! Recurring frame callbacks as an explicit run handle.
//!
//! A browser animation loop reschedules itself from inside every callback.
//! [`RunLoop`] holds the handle of the callback currently queued: `Some` while
//! running, `None` while idle. Starting an already running loop and stopping
//! an idle one are both no-ops, so there is never more than one callback in
//! flight.

/// Something that can queue a single frame callback and cancel it.
///
/// The callback itself is owned by the implementor; the loop only tracks
/// handles.
pub trait FrameScheduler {
    type Handle;

    /// Queue the callback for the next frame. `None` if the host refused.
    fn schedule(&mut self) -> Option<Self::Handle>;

    /// Cancel a queued callback.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Running flag plus the handle of the queued callback.
#[derive(Debug)]
pub struct RunLoop<H> {
    handle: Option<H>,
}

impl<H> Default for RunLoop<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> RunLoop<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Queue the first callback. Returns `false` if already running or the
    /// host refused to schedule.
    pub fn start<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Handle = H>,
    {
        if self.handle.is_some() {
            return false;
        }
        self.handle = scheduler.schedule();
        self.handle.is_some()
    }

    /// Cancel the queued callback. Returns `false` if already idle.
    pub fn stop<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Handle = H>,
    {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    /// Called at the top of every frame callback.
    ///
    /// Returns `false` for a callback that fired after the loop was stopped;
    /// otherwise queues the next frame and returns `true`.
    pub fn on_frame<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Handle = H>,
    {
        if self.handle.is_none() {
            return false;
        }
        self.handle = scheduler.schedule();
        true
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingScheduler;
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut sched = CountingScheduler::default();
        let mut run = RunLoop::new();
        assert!(run.start(&mut sched));
        assert!(!run.start(&mut sched));
        assert_eq!(sched.queued.len(), 1);
        assert!(run.is_running());
    }

    #[test]
    fn stop_cancels_and_is_idempotent() {
        let mut sched = CountingScheduler::default();
        let mut run = RunLoop::new();
        assert!(!run.stop(&mut sched));
        run.start(&mut sched);
        assert!(run.stop(&mut sched));
        assert!(sched.queued.is_empty());
        assert_eq!(sched.cancelled, vec![1]);
        assert!(!run.stop(&mut sched));
    }

    #[test]
    fn frames_reschedule_while_running() {
        let mut sched = CountingScheduler::default();
        let mut run = RunLoop::new();
        run.start(&mut sched);
        for _ in 0..5 {
            assert!(sched.fire().is_some());
            assert!(run.on_frame(&mut sched));
            assert_eq!(sched.queued.len(), 1);
        }
    }

    #[test]
    fn stale_callback_is_ignored() {
        let mut sched = CountingScheduler::default();
        let mut run = RunLoop::new();
        run.start(&mut sched);
        run.stop(&mut sched);
        assert!(!run.on_frame(&mut sched));
        assert!(sched.queued.is_empty());
    }

    #[test]
    fn refused_schedule_leaves_loop_idle() {
        let mut sched = CountingScheduler {
            refuse: true,
            ..CountingScheduler::default()
        };
        let mut run: RunLoop<u32> = RunLoop::new();
        assert!(!run.start(&mut sched));
        assert!(!run.is_running());
    }
}
