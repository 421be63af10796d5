#![forbid(unsafe_code)]

//! Navigation triggers: links whose default navigation is replaced by the
//! door transition.

use core::time::Duration;

use crate::door::{DoorEffect, DoorTransition};

/// Pick the destination for a trigger.
///
/// An explicit override wins; an empty or blank override falls back to the
/// natural target. Blank targets count as missing.
#[must_use]
pub fn resolve_target(explicit: Option<&str>, natural: Option<&str>) -> Option<String> {
    explicit
        .filter(|s| !s.trim().is_empty())
        .or(natural)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Handle a trigger activation.
///
/// The caller has already suppressed the default action. With a target the
/// request goes through the door; without one nothing happens.
pub fn activate(
    door: &mut DoorTransition,
    now: Duration,
    explicit: Option<&str>,
    natural: Option<&str>,
) -> Vec<DoorEffect> {
    match resolve_target(explicit, natural) {
        Some(target) => door.navigate(now, target),
        None => {
            crate::debug!("link: activated without a target");
            Vec::new()
        }
    }
}
