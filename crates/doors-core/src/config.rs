#![forbid(unsafe_code)]

//! Tunables for the door transition and the widgets.
//!
//! Every field has a default matching the shipped look. A page may override any
//! subset by embedding a JSON object (see [`crate::ids::CONFIG_SCRIPT`]):
//!
//! ```json
//! { "door": { "navigate_delay_ms": 900 }, "garden": { "hue_min": 20 } }
//! ```
//!
//! Unknown keys are rejected so a typo shows up in the console instead of
//! silently doing nothing.

use core::time::Duration;

use serde::Deserialize;

use crate::error::{DoorsError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorsConfig {
    pub door: DoorConfig,
    pub garden: GardenConfig,
    pub dissolve: DissolveConfig,
    pub cone: ConeConfig,
}

impl DoorsConfig {
    /// Parse and validate a JSON override document.
    ///
    /// A blank document yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a widget misbehave.
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, what: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(DoorsError::Config(what.to_owned()))
            }
        }

        check(
            self.garden.growth_divisor > 0.0,
            "garden.growth_divisor must be positive",
        )?;
        check(self.garden.max_spawn >= 1, "garden.max_spawn must be at least 1")?;
        check(
            self.garden.life_min > 0.0 && self.garden.life_range >= 0.0,
            "garden.life_min must be positive and garden.life_range non-negative",
        )?;
        check(
            self.garden.min_height >= 0.0 && self.garden.height_ratio >= 0.0,
            "garden sizing must be non-negative",
        )?;
        check(
            self.dissolve.min_height >= 0.0 && self.dissolve.height_ratio >= 0.0,
            "dissolve sizing must be non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&self.dissolve.max_erase),
            "dissolve.max_erase must be within [0, 1]",
        )?;
        check(
            self.dissolve.radius_ratio >= 0.0,
            "dissolve.radius_ratio must be non-negative",
        )?;
        check(
            crate::surface::Rgb::from_hex(&self.dissolve.color).is_some(),
            "dissolve.color must be a #rrggbb or #rgb hex color",
        )?;
        check(self.cone.step.is_finite(), "cone.step must be finite")?;
        Ok(())
    }
}

/// Door open/close timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorConfig {
    /// Delay between the first frame and the `open` class being applied.
    pub open_delay_ms: u64,
    /// CSS transition length used when the panels slide shut.
    pub close_transition_ms: u64,
    /// Delay between the close starting and the browser navigating.
    pub navigate_delay_ms: u64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            open_delay_ms: 60,
            close_transition_ms: 600,
            navigate_delay_ms: 610,
        }
    }
}

impl DoorConfig {
    #[must_use]
    pub const fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }

    #[must_use]
    pub const fn close_transition(&self) -> Duration {
        Duration::from_millis(self.close_transition_ms)
    }

    #[must_use]
    pub const fn navigate_delay(&self) -> Duration {
        Duration::from_millis(self.navigate_delay_ms)
    }
}

/// Particle garden spawn and render parameters.
///
/// Speeds are in CSS pixels per frame, lifetimes in frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GardenConfig {
    pub min_height: f64,
    pub height_ratio: f64,
    /// Particles start up to this far below the bottom edge.
    pub spawn_jitter_y: f64,
    /// Full width of the horizontal velocity band, centered on zero.
    pub drift_x: f64,
    pub rise_min: f64,
    pub rise_range: f64,
    pub life_min: f64,
    pub life_range: f64,
    pub hue_min: f64,
    pub hue_range: f64,
    pub saturation: f64,
    pub lightness: f64,
    /// Spawn count is `round(1 + growth / growth_divisor)`.
    pub growth_divisor: f64,
    /// Upper bound on particles spawned in one frame.
    pub max_spawn: usize,
    /// Particles above this line are culled.
    pub cull_y: f64,
    pub base_radius: f64,
    /// Extra radius reached as a particle fades out.
    pub fade_growth: f64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            min_height: 260.0,
            height_ratio: 0.5,
            spawn_jitter_y: 30.0,
            drift_x: 0.4,
            rise_min: 0.6,
            rise_range: 0.9,
            life_min: 260.0,
            life_range: 240.0,
            hue_min: 160.0,
            hue_range: 60.0,
            saturation: 90.0,
            lightness: 70.0,
            growth_divisor: 6.0,
            max_spawn: 200,
            cull_y: -10.0,
            base_radius: 2.0,
            fade_growth: 3.0,
        }
    }
}

/// Dissolve widget shape and erase parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DissolveConfig {
    pub min_height: f64,
    pub height_ratio: f64,
    /// Circle radius as a fraction of the shorter surface side.
    pub radius_ratio: f64,
    pub color: String,
    /// Erase probability at entropy level 100.
    pub max_erase: f64,
}

impl Default for DissolveConfig {
    fn default() -> Self {
        Self {
            min_height: 220.0,
            height_ratio: 0.45,
            radius_ratio: 0.18,
            color: "#4ee2c0".to_owned(),
            max_erase: 0.9,
        }
    }
}

/// Cone marker motion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConeConfig {
    /// Clock increment per frame.
    pub step: f64,
    /// Marker y when the wave sits at its lowest point.
    pub baseline: f64,
    pub amplitude: f64,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            step: 0.01,
            baseline: 160.0,
            amplitude: 60.0,
        }
    }
}
