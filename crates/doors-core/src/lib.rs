#![forbid(unsafe_code)]

//! Host-independent core for the doors site: the door transition, link
//! mediation, and the five per-page widgets.
//!
//! Design goals (shared with the web frontend):
//! - **Host-driven**: the embedding environment supplies time, frames, input
//!   values, randomness and drawing surfaces; nothing here touches the DOM.
//! - **Deterministic**: with a seeded [`rng::Xorshift64`] and explicit clock
//!   values every widget is reproducible, so behaviour is tested natively.
//! - **One owner per widget**: each widget is a plain struct created at mount
//!   time; there is no module-level state.

pub mod clock;
pub mod cone;
pub mod config;
pub mod dissolve;
pub mod door;
pub mod error;
pub mod frame;
pub mod garden;
pub mod ids;
pub mod links;
pub mod logging;
pub mod observer;
pub mod page;
pub mod rng;
pub mod surface;
pub mod toggle;

pub use config::DoorsConfig;
pub use error::{DoorsError, Result};
pub use page::PageKind;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
