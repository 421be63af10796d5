#![forbid(unsafe_code)]

//! Binary observation: a box that reads as a superposition until observed.
//!
//! Every observation draws a fresh outcome. The box never returns to the
//! unresolved reading short of a reload.

use crate::rng::RandomSource;

/// Text shown before the first observation.
pub const UNRESOLVED_TEXT: &str = "superposition: |alive〉 + |dead〉";
/// Text shown after an observation that came up alive.
pub const ALIVE_TEXT: &str = "collapsed: |alive〉";
/// Text shown after an observation that came up dead.
pub const DEAD_TEXT: &str = "collapsed: |dead〉";

/// A resolved outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Alive,
    Dead,
}

impl Outcome {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Alive => ALIVE_TEXT,
            Self::Dead => DEAD_TEXT,
        }
    }
}

/// Observation state plus its randomness.
#[derive(Debug, Clone)]
pub struct BinaryState<R> {
    outcome: Option<Outcome>,
    observations: u64,
    rng: R,
}

impl<R: RandomSource> BinaryState<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            outcome: None,
            observations: 0,
            rng,
        }
    }

    #[must_use]
    pub const fn is_observed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Last resolved outcome, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub const fn observations(&self) -> u64 {
        self.observations
    }

    /// Text for the status display.
    #[must_use]
    pub fn text(&self) -> &'static str {
        self.outcome.map_or(UNRESOLVED_TEXT, Outcome::text)
    }

    /// Observe: draw a new outcome with even odds.
    pub fn observe(&mut self) -> Outcome {
        let outcome = if self.rng.chance(0.5) {
            Outcome::Alive
        } else {
            Outcome::Dead
        };
        self.outcome = Some(outcome);
        self.observations += 1;
        crate::debug!(?outcome, n = self.observations, "observed");
        outcome
    }
}
