//! The markup contract: ids, selectors, attributes and classes the page is
//! expected to provide.

/// Door frame selector.
pub const DOOR_FRAME: &str = ".doorframe";
/// Left panel, inside the frame.
pub const DOOR_LEFT: &str = ".left";
/// Right panel, inside the frame.
pub const DOOR_RIGHT: &str = ".right";
/// Class added to the frame once open.
pub const DOOR_OPEN_CLASS: &str = "open";

/// Navigation triggers.
pub const NAV_TRIGGER: &str = "[data-next]";
/// Explicit destination on a trigger.
pub const NAV_TARGET_ATTR: &str = "data-next";
/// Natural destination on a trigger.
pub const NAV_HREF_ATTR: &str = "href";

/// `document.readyState` while the markup is still being parsed.
pub const DOCUMENT_LOADING: &str = "loading";

/// Body attribute selecting the page's widget.
pub const PAGE_ATTR: &str = "data-page";

/// Optional `<script type="application/json">` with config overrides.
pub const CONFIG_SCRIPT: &str = "doors-config";

pub const GARDEN_CANVAS: &str = "garden";
pub const GARDEN_GROWTH: &str = "growth";

pub const DISSOLVE_CANVAS: &str = "entropyCanvas";
pub const DISSOLVE_ENTROPY: &str = "entropy";

pub const OBSERVER_STATE: &str = "state";
pub const OBSERVER_BUTTON: &str = "observe";

pub const CONE_SURFACE: &str = "lightcone";
pub const CONE_PLAY: &str = "play";
pub const CONE_PAUSE: &str = "pause";
/// Marker selector, looked up inside the cone surface.
pub const CONE_MARKER: &str = "#now";
/// Marker attribute receiving the y position.
pub const CONE_MARKER_ATTR: &str = "cy";

pub const TOGGLE_CHECKBOX: &str = "interpToggle";
pub const TOGGLE_MANY_WORLDS: &str = "manyworlds";
pub const TOGGLE_COPENHAGEN: &str = "copenhagen";
