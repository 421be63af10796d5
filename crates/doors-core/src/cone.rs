#![forbid(unsafe_code)]

//! Light-cone marker: a dot riding a sine wave while playing.
//!
//! State machine: `Idle` (no queued frame) and `Running` (one queued frame
//! that advances the clock and requeues itself). Play while running and pause
//! while idle do nothing. The clock `t` survives a pause.

use crate::config::ConeConfig;
use crate::frame::{FrameScheduler, RunLoop};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConeState {
    Idle,
    Running,
}

/// Marker position for clock value `t`.
#[must_use]
pub fn marker_y(t: f64, config: &ConeConfig) -> f64 {
    config.baseline - (t.sin() * config.amplitude + config.amplitude)
}

/// Attribute text for a marker position (two decimals).
#[must_use]
pub fn format_marker(y: f64) -> String {
    format!("{y:.2}")
}

/// Cone animation controller, generic over the host's frame handle.
#[derive(Debug)]
pub struct ConeAnimation<H> {
    config: ConeConfig,
    t: f64,
    run: RunLoop<H>,
}

impl<H> ConeAnimation<H> {
    #[must_use]
    pub fn new(config: ConeConfig) -> Self {
        Self {
            config,
            t: 0.0,
            run: RunLoop::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> ConeState {
        if self.run.is_running() {
            ConeState::Running
        } else {
            ConeState::Idle
        }
    }

    /// Current clock value.
    #[must_use]
    pub const fn t(&self) -> f64 {
        self.t
    }

    /// Marker position for the current clock.
    #[must_use]
    pub fn marker_y(&self) -> f64 {
        marker_y(self.t, &self.config)
    }

    /// Start advancing. Returns whether a new loop was started.
    pub fn play<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Handle = H>,
    {
        let started = self.run.start(scheduler);
        if started {
            crate::debug!(t = self.t, "cone: play");
        }
        started
    }

    /// Stop advancing. Returns whether a running loop was stopped.
    pub fn pause<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Handle = H>,
    {
        let stopped = self.run.stop(scheduler);
        if stopped {
            crate::debug!(t = self.t, "cone: pause");
        }
        stopped
    }

    /// Frame callback body: advance the clock and return the new marker y.
    ///
    /// `None` for a callback that arrives after a pause.
    pub fn frame<S>(&mut self, scheduler: &mut S) -> Option<f64>
    where
        S: FrameScheduler<Handle = H>,
    {
        if !self.run.on_frame(scheduler) {
            return None;
        }
        self.t += self.config.step;
        Some(self.marker_y())
    }
}
