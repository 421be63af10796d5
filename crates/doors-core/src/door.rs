#![forbid(unsafe_code)]

//! Door transition: two panels that slide apart on load and shut before the
//! browser leaves the page.
//!
//! [`DoorTransition`] is host-driven. Each call carries the host's monotonic
//! time and returns the [`DoorEffect`]s to apply right now; delayed work sits
//! in a timer queue until [`DoorTransition::poll`] is called at or after
//! [`DoorTransition::next_deadline`].
//!
//! Pages without a door element still route navigation through here; the
//! transition then navigates immediately.

use core::time::Duration;

use crate::clock::{DeterministicClock, TimerQueue};
use crate::config::DoorConfig;

/// Transform applied to both panels when closing.
pub const CLOSED_TRANSFORM: &str = "translateX(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    /// The page has no door element.
    Absent,
    /// Door present, not yet asked to open.
    Shut,
    /// Open scheduled.
    Opening,
    Open,
    /// Panels closing; navigation scheduled.
    Closing,
}

/// Side effect for the host to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorEffect {
    /// Add the opened class to the frame.
    Open,
    /// Slide both panels back to center over `transition`.
    ClosePanels { transition: Duration },
    /// Point the browser at the URL.
    Navigate(String),
}

impl DoorEffect {
    /// CSS `transition` value for [`DoorEffect::ClosePanels`].
    #[must_use]
    pub fn transition_css(transition: Duration) -> String {
        format!("transform {}s ease", transition.as_secs_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Open,
    Navigate(String),
}

/// Door state machine.
#[derive(Debug, Clone)]
pub struct DoorTransition {
    config: DoorConfig,
    state: DoorState,
    clock: DeterministicClock,
    timers: TimerQueue<Pending>,
}

impl DoorTransition {
    /// Create the controller. `door_present` is whether the page has a door
    /// element at all.
    #[must_use]
    pub fn new(config: DoorConfig, door_present: bool) -> Self {
        Self {
            config,
            state: if door_present {
                DoorState::Shut
            } else {
                DoorState::Absent
            },
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> DoorState {
        self.state
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self.state, DoorState::Absent)
    }

    /// Last time reported by the host.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest time at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Page finished loading: schedule the open.
    ///
    /// Call once the first frame has been produced so the closed styles are
    /// on screen before the transition starts.
    pub fn on_load(&mut self, now: Duration) -> Vec<DoorEffect> {
        self.clock.set(now);
        if self.state != DoorState::Shut {
            return Vec::new();
        }
        let deadline = self.clock.now() + self.config.open_delay();
        self.timers.schedule(deadline, Pending::Open);
        self.state = DoorState::Opening;
        crate::debug!(?deadline, "door: open scheduled");
        // A zero delay opens right away.
        self.fire_due()
    }

    /// Leave the page for `target`, closing the door first when there is one.
    ///
    /// Requests made while a close is already under way are ignored: the
    /// first navigation wins.
    pub fn navigate(&mut self, now: Duration, target: impl Into<String>) -> Vec<DoorEffect> {
        self.clock.set(now);
        let target = target.into();
        match self.state {
            DoorState::Absent => {
                crate::debug!(%target, "door: absent, navigating directly");
                vec![DoorEffect::Navigate(target)]
            }
            DoorState::Closing => {
                crate::debug!(%target, "door: already closing, request ignored");
                Vec::new()
            }
            DoorState::Shut | DoorState::Opening | DoorState::Open => {
                self.timers.cancel_where(|p| *p == Pending::Open);
                let deadline = self.clock.now() + self.config.navigate_delay();
                crate::debug!(%target, ?deadline, "door: closing");
                self.timers.schedule(deadline, Pending::Navigate(target));
                self.state = DoorState::Closing;
                let mut effects = vec![DoorEffect::ClosePanels {
                    transition: self.config.close_transition(),
                }];
                effects.extend(self.fire_due());
                effects
            }
        }
    }

    /// Fire every timer due at `now`.
    pub fn poll(&mut self, now: Duration) -> Vec<DoorEffect> {
        self.clock.set(now);
        self.fire_due()
    }

    fn fire_due(&mut self) -> Vec<DoorEffect> {
        self.timers
            .take_due(self.clock.now())
            .into_iter()
            .map(|pending| match pending {
                Pending::Open => {
                    self.state = DoorState::Open;
                    DoorEffect::Open
                }
                Pending::Navigate(target) => DoorEffect::Navigate(target),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn door() -> DoorTransition {
        DoorTransition::new(DoorConfig::default(), true)
    }

    #[test]
    fn opens_after_delay() {
        let mut d = door();
        assert!(d.on_load(ms(16)).is_empty());
        assert_eq!(d.state(), DoorState::Opening);
        assert_eq!(d.next_deadline(), Some(ms(76)));
        assert!(d.poll(ms(75)).is_empty());
        assert_eq!(d.poll(ms(76)), vec![DoorEffect::Open]);
        assert_eq!(d.state(), DoorState::Open);
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn on_load_twice_schedules_once() {
        let mut d = door();
        d.on_load(ms(0));
        d.on_load(ms(1));
        assert_eq!(d.poll(ms(100)), vec![DoorEffect::Open]);
    }

    #[test]
    fn absent_door_does_nothing_on_load() {
        let mut d = DoorTransition::new(DoorConfig::default(), false);
        assert!(d.on_load(ms(0)).is_empty());
        assert_eq!(d.next_deadline(), None);
        assert_eq!(d.state(), DoorState::Absent);
    }

    #[test]
    fn absent_door_navigates_immediately() {
        let mut d = DoorTransition::new(DoorConfig::default(), false);
        assert_eq!(
            d.navigate(ms(5), "next.html"),
            vec![DoorEffect::Navigate("next.html".into())]
        );
    }

    #[test]
    fn navigate_closes_then_leaves_after_delay() {
        let mut d = door();
        d.on_load(ms(0));
        d.poll(ms(60));
        assert_eq!(
            d.navigate(ms(1000), "death.html"),
            vec![DoorEffect::ClosePanels {
                transition: ms(600)
            }]
        );
        assert_eq!(d.state(), DoorState::Closing);
        assert!(d.poll(ms(1609)).is_empty());
        assert_eq!(
            d.poll(ms(1610)),
            vec![DoorEffect::Navigate("death.html".into())]
        );
    }

    #[test]
    fn navigate_while_opening_cancels_open() {
        let mut d = door();
        d.on_load(ms(0));
        d.navigate(ms(10), "x.html");
        assert_eq!(d.poll(ms(10_000)), vec![DoorEffect::Navigate("x.html".into())]);
    }

    #[test]
    fn first_navigation_wins() {
        let mut d = door();
        d.navigate(ms(0), "first.html");
        assert!(d.navigate(ms(100), "second.html").is_empty());
        assert_eq!(
            d.poll(ms(700)),
            vec![DoorEffect::Navigate("first.html".into())]
        );
    }

    #[test]
    fn zero_delays_fire_inline() {
        let cfg = DoorConfig {
            open_delay_ms: 0,
            close_transition_ms: 0,
            navigate_delay_ms: 0,
        };
        let mut d = DoorTransition::new(cfg, true);
        assert_eq!(d.on_load(ms(0)), vec![DoorEffect::Open]);
        assert_eq!(
            d.navigate(ms(0), "a"),
            vec![
                DoorEffect::ClosePanels {
                    transition: Duration::ZERO
                },
                DoorEffect::Navigate("a".into()),
            ]
        );
    }

    #[test]
    fn transition_css_matches_stylesheet_syntax() {
        assert_eq!(DoorEffect::transition_css(ms(600)), "transform 0.6s ease");
        assert_eq!(DoorEffect::transition_css(ms(1000)), "transform 1s ease");
    }
}
