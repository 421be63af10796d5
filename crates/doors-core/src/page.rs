#![forbid(unsafe_code)]

//! Page kinds and the widget dispatch.
//!
//! The body's page identifier selects at most one widget. The mapping is an
//! exhaustive match over [`PageKind`], so adding a page without wiring its
//! widget does not compile.

use core::fmt;

use crate::error::Result;

/// Every page that carries a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// `life`: particle garden.
    Life,
    /// `death`: entropy dissolve.
    Death,
    /// `quantum`: binary observation.
    Quantum,
    /// `time`: light-cone animation.
    Time,
    /// `paradox`: interpretation toggle.
    Paradox,
}

impl PageKind {
    pub const ALL: [Self; 5] = [
        Self::Life,
        Self::Death,
        Self::Quantum,
        Self::Time,
        Self::Paradox,
    ];

    /// Look up an identifier. Matching is exact.
    #[must_use]
    pub fn from_identifier(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.identifier() == id)
    }

    /// The `data-page` value for this kind.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Life => "life",
            Self::Death => "death",
            Self::Quantum => "quantum",
            Self::Time => "time",
            Self::Paradox => "paradox",
        }
    }

    /// Name of the widget mounted on this page, for logs and errors.
    #[must_use]
    pub const fn widget(self) -> &'static str {
        match self {
            Self::Life => "garden",
            Self::Death => "dissolve",
            Self::Quantum => "observer",
            Self::Time => "cone",
            Self::Paradox => "toggle",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// One constructor per widget. The host implements this against its DOM.
pub trait WidgetInitializers {
    /// Handle that keeps a mounted widget alive.
    type Mounted;

    fn garden(&mut self) -> Result<Self::Mounted>;
    fn dissolve(&mut self) -> Result<Self::Mounted>;
    fn observer(&mut self) -> Result<Self::Mounted>;
    fn cone(&mut self) -> Result<Self::Mounted>;
    fn toggle(&mut self) -> Result<Self::Mounted>;
}

/// Whether boot can run right away for a `document.readyState` value.
///
/// Only a document still parsing (`loading`) has to wait for
/// `DOMContentLoaded`; `interactive` and `complete` boot immediately.
#[must_use]
pub fn ready_to_boot(ready_state: &str) -> bool {
    ready_state != crate::ids::DOCUMENT_LOADING
}

/// Run the initializer for `kind`.
pub fn mount<I: WidgetInitializers>(kind: PageKind, init: &mut I) -> Result<I::Mounted> {
    match kind {
        PageKind::Life => init.garden(),
        PageKind::Death => init.dissolve(),
        PageKind::Quantum => init.observer(),
        PageKind::Time => init.cone(),
        PageKind::Paradox => init.toggle(),
    }
}

/// Select and mount the widget for a page identifier.
///
/// Unknown or missing identifiers mount nothing. Initializer failures are
/// logged and swallowed: a page missing an element simply has no widget.
pub fn dispatch<I: WidgetInitializers>(identifier: Option<&str>, init: &mut I) -> Option<I::Mounted> {
    let Some(id) = identifier else {
        crate::debug!("page: no identifier, no widget");
        return None;
    };
    let Some(kind) = PageKind::from_identifier(id) else {
        crate::debug!(id, "page: unrecognized identifier, no widget");
        return None;
    };
    match mount(kind, init) {
        Ok(mounted) => {
            crate::info!(page = %kind, widget = kind.widget(), "page: widget mounted");
            Some(mounted)
        }
        Err(err) => {
            if err.is_missing_element() {
                crate::debug!(page = %kind, %err, "page: widget skipped");
            } else {
                crate::warn!(page = %kind, %err, "page: widget failed to mount");
            }
            None
        }
    }
}
