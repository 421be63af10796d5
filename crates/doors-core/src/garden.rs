#![forbid(unsafe_code)]

//! Particle garden: short-lived motes rising from the bottom edge.
//!
//! Every frame clears the surface, spawns `round(1 + growth / divisor)` new
//! particles along the bottom edge, then integrates, draws and culls the
//! whole set. A growth of zero still spawns one particle per frame.
//!
//! Ages and lifetimes are counted in frames, not seconds: the garden moves at
//! whatever rate the host delivers animation frames.

use crate::config::GardenConfig;
use crate::rng::RandomSource;
use crate::surface::{DrawSurface, Paint, SurfaceSize};

/// One rising particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Frames lived so far.
    pub age: u32,
    /// Frames until fully faded.
    pub lifetime: f64,
    pub hue: f64,
}

impl Particle {
    /// Integrate one frame.
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.age = self.age.saturating_add(1);
    }

    /// Opacity in `[0, 1]`, falling linearly with age.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        (1.0 - f64::from(self.age) / self.lifetime).max(0.0)
    }

    /// Whether the particle should leave the active set.
    #[must_use]
    pub fn is_spent(&self, cull_y: f64) -> bool {
        f64::from(self.age) > self.lifetime || self.y < cull_y
    }
}

/// Number of particles spawned per frame for a growth value.
///
/// Negative or non-finite growth counts as zero, so the result is never
/// below one. The result is capped at `max_spawn` (itself at least one).
#[must_use]
pub fn spawn_count(growth: f64, divisor: f64, max_spawn: usize) -> usize {
    let growth = if growth.is_finite() {
        growth.max(0.0)
    } else {
        0.0
    };
    let cap = max_spawn.max(1);
    let n = (1.0 + growth / divisor).round();
    if n >= cap as f64 { cap } else { (n as usize).max(1) }
}

/// Read a growth slider value; anything unparsable is zero.
#[must_use]
pub fn parse_growth(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
        .unwrap_or(0.0)
}

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub spawned: usize,
    pub culled: usize,
    pub live: usize,
}

/// The garden's particle set and spawn parameters.
#[derive(Debug, Clone)]
pub struct ParticleGarden<R> {
    config: GardenConfig,
    size: SurfaceSize,
    particles: Vec<Particle>,
    rng: R,
    frames: u64,
}

impl<R: RandomSource> ParticleGarden<R> {
    #[must_use]
    pub fn new(config: GardenConfig, size: SurfaceSize, rng: R) -> Self {
        Self {
            config,
            size,
            particles: Vec::new(),
            rng,
            frames: 0,
        }
    }

    /// Adopt a new surface size. Live particles keep their positions.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Append `count` freshly randomized particles.
    pub fn spawn(&mut self, count: usize) {
        let cfg = &self.config;
        let rng = &mut self.rng;
        self.particles.reserve(count);
        for _ in 0..count {
            let x = rng.next_f64() * self.size.css_width;
            let y = self.size.css_height + rng.next_f64() * cfg.spawn_jitter_y;
            let vx = (rng.next_f64() - 0.5) * cfg.drift_x;
            let vy = -(cfg.rise_min + rng.next_f64() * cfg.rise_range);
            let lifetime = cfg.life_min + rng.next_f64() * cfg.life_range;
            let hue = cfg.hue_min + rng.next_f64() * cfg.hue_range;
            self.particles.push(Particle {
                x,
                y,
                vx,
                vy,
                age: 0,
                lifetime,
                hue,
            });
        }
    }

    /// Run one animation frame at the given growth rate.
    pub fn frame(&mut self, growth: f64, surface: &mut impl DrawSurface) -> FrameStats {
        surface.clear();

        let spawned = spawn_count(growth, self.config.growth_divisor, self.config.max_spawn);
        self.spawn(spawned);

        let cfg = &self.config;
        // Newest first, so older motes paint over fresh ones.
        for p in self.particles.iter_mut().rev() {
            p.step();
            let alpha = p.alpha();
            let paint = Paint::Hsla {
                hue: p.hue,
                saturation: cfg.saturation,
                lightness: cfg.lightness,
                alpha,
            };
            let radius = cfg.base_radius + (1.0 - alpha) * cfg.fade_growth;
            surface.fill_circle(p.x, p.y, radius, &paint);
        }

        let before = self.particles.len();
        let cull_y = cfg.cull_y;
        self.particles.retain(|p| !p.is_spent(cull_y));
        self.frames += 1;

        FrameStats {
            spawned,
            culled: before - self.particles.len(),
            live: self.particles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Xorshift64;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        circles: Vec<(f64, f64, f64, Paint)>,
    }

    impl DrawSurface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
            self.circles.push((x, y, radius, *paint));
        }
    }

    fn garden() -> ParticleGarden<Xorshift64> {
        ParticleGarden::new(
            GardenConfig::default(),
            SurfaceSize::logical(400.0, 260.0),
            Xorshift64::new(11),
        )
    }

    #[test]
    fn spawn_count_formula() {
        assert_eq!(spawn_count(0.0, 6.0, 200), 1);
        assert_eq!(spawn_count(2.9, 6.0, 200), 1);
        assert_eq!(spawn_count(3.0, 6.0, 200), 2);
        assert_eq!(spawn_count(6.0, 6.0, 200), 2);
        assert_eq!(spawn_count(50.0, 6.0, 200), 9);
        assert_eq!(spawn_count(100.0, 6.0, 200), 18);
    }

    #[test]
    fn spawn_count_floor_for_bad_input() {
        assert_eq!(spawn_count(-40.0, 6.0, 200), 1);
        assert_eq!(spawn_count(f64::NAN, 6.0, 200), 1);
        assert_eq!(spawn_count(f64::INFINITY, 6.0, 200), 1);
    }

    #[test]
    fn spawn_count_is_capped() {
        assert_eq!(spawn_count(1e300, 6.0, 200), 200);
        assert_eq!(spawn_count(f64::MAX, 6.0, 200), 200);
        assert_eq!(spawn_count(1194.0, 6.0, 200), 200);
        assert_eq!(spawn_count(1e9, 6.0, 0), 1);
    }

    #[test]
    fn huge_growth_frame_spawns_at_most_the_cap() {
        let mut g = garden();
        let mut surface = Recorder::default();
        let stats = g.frame(parse_growth("1e300"), &mut surface);
        assert_eq!(stats.spawned, GardenConfig::default().max_spawn);
        assert_eq!(g.particles().len(), stats.spawned);
    }

    #[test]
    fn parse_growth_handles_junk() {
        assert_eq!(parse_growth("42"), 42.0);
        assert_eq!(parse_growth(" 7.5 "), 7.5);
        assert_eq!(parse_growth(""), 0.0);
        assert_eq!(parse_growth("lots"), 0.0);
        assert_eq!(parse_growth("NaN"), 0.0);
    }

    #[test]
    fn spawned_particles_respect_ranges() {
        let mut g = garden();
        g.spawn(500);
        for p in g.particles() {
            assert!((0.0..400.0).contains(&p.x));
            assert!((260.0..290.0).contains(&p.y));
            assert!((-0.2..0.2).contains(&p.vx));
            assert!(p.vy <= -0.6 && p.vy > -1.5);
            assert!((260.0..500.0).contains(&p.lifetime));
            assert!((160.0..220.0).contains(&p.hue));
            assert_eq!(p.age, 0);
        }
    }

    #[test]
    fn frame_clears_spawns_and_draws_every_particle() {
        let mut g = garden();
        let mut surface = Recorder::default();
        let stats = g.frame(0.0, &mut surface);
        assert_eq!(stats, FrameStats { spawned: 1, culled: 0, live: 1 });
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 1);

        let stats = g.frame(60.0, &mut surface);
        assert_eq!(stats.spawned, 11);
        assert_eq!(surface.circles.len(), 12);
        assert_eq!(g.frames(), 2);
    }

    #[test]
    fn first_frame_paint_is_nearly_opaque_and_small() {
        let mut g = garden();
        let mut surface = Recorder::default();
        g.frame(0.0, &mut surface);
        let (_, _, radius, paint) = surface.circles[0];
        let Paint::Hsla {
            saturation,
            lightness,
            alpha,
            ..
        } = paint
        else {
            panic!("garden paints in hsla");
        };
        assert_eq!((saturation, lightness), (90.0, 70.0));
        assert!(alpha > 0.99);
        assert!(radius > 2.0 && radius < 2.02);
    }

    #[test]
    fn particle_removed_once_age_exceeds_lifetime() {
        let mut p = Particle {
            x: 0.0,
            y: 100.0,
            vx: 0.0,
            vy: 0.0,
            age: 0,
            lifetime: 3.0,
            hue: 180.0,
        };
        for _ in 0..3 {
            p.step();
            assert!(!p.is_spent(-10.0));
        }
        assert_eq!(p.alpha(), 0.0);
        p.step();
        assert!(p.is_spent(-10.0));
    }

    #[test]
    fn particle_removed_above_top_edge() {
        let p = Particle {
            x: 0.0,
            y: -10.5,
            vx: 0.0,
            vy: -1.0,
            age: 1,
            lifetime: 400.0,
            hue: 180.0,
        };
        assert!(p.is_spent(-10.0));
        let at_line = Particle { y: -10.0, ..p };
        assert!(!at_line.is_spent(-10.0));
    }

    #[test]
    fn population_reaches_steady_state() {
        let mut g = garden();
        let mut surface = Recorder::default();
        let mut total_spawned = 0;
        let mut total_culled = 0;
        for _ in 0..2_000 {
            let stats = g.frame(30.0, &mut surface);
            total_spawned += stats.spawned;
            total_culled += stats.culled;
        }
        assert_eq!(total_spawned - total_culled, g.particles().len());
        // Everything rising at >= 0.6 px/frame from <= 290 px is gone by frame ~500.
        assert!(g.particles().iter().all(|p| p.age < 500));
        assert!(total_culled > 0);
    }

    #[test]
    fn resize_changes_spawn_band() {
        let mut g = garden();
        g.resize(SurfaceSize::logical(50.0, 1000.0));
        g.spawn(100);
        assert!(g.particles().iter().all(|p| p.x < 50.0 && p.y >= 1000.0));
    }
}
