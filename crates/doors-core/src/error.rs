#![forbid(unsafe_code)]

//! Error type shared by the core and the web frontend.
//!
//! Nothing here is ever shown to the visitor. A missing element is the normal
//! way for a page to opt out of a widget, so the dispatcher treats
//! [`DoorsError::MissingElement`] as a quiet skip rather than a fault.

/// Errors produced while configuring or mounting page behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorsError {
    /// A widget could not find one of the elements it needs.
    MissingElement {
        /// Widget that was being mounted.
        widget: &'static str,
        /// Id or selector that did not resolve.
        element: &'static str,
    },
    /// The embedded configuration document was rejected.
    Config(String),
    /// The host environment raised an exception.
    Host(String),
}

impl DoorsError {
    /// Whether this error only means "the page does not use this widget".
    #[must_use]
    pub const fn is_missing_element(&self) -> bool {
        matches!(self, Self::MissingElement { .. })
    }
}

impl core::fmt::Display for DoorsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingElement { widget, element } => {
                write!(f, "{widget}: required element `{element}` not found")
            }
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for DoorsError {}

impl From<serde_json::Error> for DoorsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, DoorsError>;
