//! WASM frontend for the doors site.
//!
//! Binds the `doors-core` state machines to the live document:
//! - the door transition on every page (open on load, close before leaving),
//! - `[data-next]` links routed through the door,
//! - the widget selected by `<body data-page>`,
//! - browser console logging for everything above.
//!
//! The module boots itself on load; `navigate(url)` is exported for scripts
//! that want a door transition without a link.

pub mod console;

#[cfg(target_arch = "wasm32")]
mod boot;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod door_host;
#[cfg(target_arch = "wasm32")]
mod widgets;

#[cfg(target_arch = "wasm32")]
pub use boot::{navigate, start};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
pub fn start() {}

/// Native stub; there is no page to leave.
#[cfg(not(target_arch = "wasm32"))]
pub fn navigate(_url: &str) {}
