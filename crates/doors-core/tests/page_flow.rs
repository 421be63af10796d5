//! End-to-end page lifecycle against a simulated host: load, open, mount the
//! page widget, follow a link, leave.

use core::time::Duration;

use doors_core::config::DoorConfig;
use doors_core::door::{DoorEffect, DoorState, DoorTransition};
use doors_core::links;
use doors_core::page::{self, WidgetInitializers};
use doors_core::{DoorsConfig, DoorsError, Result};
use pretty_assertions::assert_eq;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Host that records what the page would look like.
#[derive(Default)]
struct FakePage {
    frame_open: bool,
    panel_transition: Option<String>,
    location: Option<String>,
    mounted: Vec<&'static str>,
    missing: Option<&'static str>,
}

impl FakePage {
    fn apply(&mut self, effects: Vec<DoorEffect>) {
        for effect in effects {
            match effect {
                DoorEffect::Open => self.frame_open = true,
                DoorEffect::ClosePanels { transition } => {
                    self.panel_transition = Some(DoorEffect::transition_css(transition));
                }
                DoorEffect::Navigate(url) => {
                    assert!(self.location.is_none(), "left the page twice");
                    self.location = Some(url);
                }
            }
        }
    }

    fn mount(&mut self, widget: &'static str) -> Result<&'static str> {
        if self.missing == Some(widget) {
            return Err(DoorsError::MissingElement {
                widget,
                element: "canvas",
            });
        }
        self.mounted.push(widget);
        Ok(widget)
    }
}

impl WidgetInitializers for FakePage {
    type Mounted = &'static str;

    fn garden(&mut self) -> Result<&'static str> {
        self.mount("garden")
    }
    fn dissolve(&mut self) -> Result<&'static str> {
        self.mount("dissolve")
    }
    fn observer(&mut self) -> Result<&'static str> {
        self.mount("observer")
    }
    fn cone(&mut self) -> Result<&'static str> {
        self.mount("cone")
    }
    fn toggle(&mut self) -> Result<&'static str> {
        self.mount("toggle")
    }
}

#[test]
fn full_visit_with_door() {
    let config = DoorsConfig::from_json("").unwrap();
    let mut host = FakePage::default();
    let mut door = DoorTransition::new(config.door.clone(), true);

    host.apply(door.on_load(ms(16)));
    assert!(!host.frame_open);
    host.apply(door.poll(ms(76)));
    assert!(host.frame_open);

    assert_eq!(page::dispatch(Some("life"), &mut host), Some("garden"));
    assert_eq!(host.mounted, vec!["garden"]);

    host.apply(links::activate(&mut door, ms(5_000), Some("death.html"), Some("index.html")));
    assert_eq!(host.panel_transition.as_deref(), Some("transform 0.6s ease"));
    assert_eq!(host.location, None);

    // A second click during the close is ignored.
    host.apply(links::activate(&mut door, ms(5_100), None, Some("index.html")));
    host.apply(door.poll(ms(5_609)));
    assert_eq!(host.location, None);
    host.apply(door.poll(ms(5_610)));
    assert_eq!(host.location.as_deref(), Some("death.html"));
}

#[test]
fn doorless_page_leaves_immediately() {
    let mut host = FakePage::default();
    let mut door = DoorTransition::new(DoorConfig::default(), false);
    host.apply(door.on_load(ms(0)));
    assert_eq!(door.state(), DoorState::Absent);

    host.apply(links::activate(&mut door, ms(1), Some(""), Some("index.html")));
    assert_eq!(host.location.as_deref(), Some("index.html"));
    assert_eq!(host.panel_transition, None);
}

#[test]
fn click_before_open_skips_the_open() {
    let mut host = FakePage::default();
    let mut door = DoorTransition::new(DoorConfig::default(), true);
    host.apply(door.on_load(ms(0)));
    host.apply(links::activate(&mut door, ms(30), Some("time.html"), None));
    host.apply(door.poll(ms(1_000)));
    assert!(!host.frame_open);
    assert_eq!(host.location.as_deref(), Some("time.html"));
}

#[test]
fn page_missing_an_element_has_no_widget() {
    let mut host = FakePage {
        missing: Some("dissolve"),
        ..FakePage::default()
    };
    assert_eq!(page::dispatch(Some("death"), &mut host), None);
    assert!(host.mounted.is_empty());

    assert_eq!(page::dispatch(Some("index"), &mut host), None);
    assert_eq!(page::dispatch(None, &mut host), None);
    assert!(host.mounted.is_empty());
}

#[test]
fn configured_delays_drive_the_door() {
    let config = DoorsConfig::from_json(
        r#"{ "door": { "open_delay_ms": 0, "navigate_delay_ms": 100, "close_transition_ms": 90 } }"#,
    )
    .unwrap();
    let mut host = FakePage::default();
    let mut door = DoorTransition::new(config.door, true);
    host.apply(door.on_load(ms(0)));
    assert!(host.frame_open);
    host.apply(door.navigate(ms(10), "paradox.html"));
    assert_eq!(host.panel_transition.as_deref(), Some("transform 0.09s ease"));
    host.apply(door.poll(ms(110)));
    assert_eq!(host.location.as_deref(), Some("paradox.html"));
}
