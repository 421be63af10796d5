#![forbid(unsafe_code)]

//! Event logging for the core.
//!
//! With the `tracing` feature the five event macros are re-exported here and
//! at the crate root. Without it, same-named no-op macros are exported so
//! call sites compile unchanged and the wasm bundle carries no logging code.
//!
//! Only events are covered, no spans: every core call is a short synchronous
//! step driven by the host (a frame, a click, a timer poll), so there is no
//! long-running scope worth entering. Call sites use `crate::debug!(..)` and
//! friends; the web crate installs the subscriber.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
