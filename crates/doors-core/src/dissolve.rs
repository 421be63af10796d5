#![forbid(unsafe_code)]

//! Entropy dissolve: a solid disc with pixels punched out at random.
//!
//! Redraws happen only when the entropy control changes (or the surface is
//! resized); there is no frame loop. Each redraw starts from a fresh disc, so
//! lowering the level restores pixels.

use crate::config::DissolveConfig;
use crate::error::Result;
use crate::rng::RandomSource;
use crate::surface::{Paint, PixelBuffer, PixelSurface, Rgb, SurfaceSize};

/// Highest entropy level the control produces.
pub const MAX_LEVEL: u8 = 100;

/// Probability of erasing an opaque pixel at `level`.
///
/// Linear in the level and capped at `max_erase`, so even level 100 leaves
/// some of the shape standing when `max_erase < 1`.
#[must_use]
pub fn erase_probability(level: u8, max_erase: f64) -> f64 {
    f64::from(level.min(MAX_LEVEL)) / f64::from(MAX_LEVEL) * max_erase
}

/// Parse the entropy control's value the way a base-10 integer read does:
/// leading whitespace and sign allowed, digits up to the first non-digit.
///
/// Unparsable input is `0`; the result is clamped to `0..=100`.
#[must_use]
pub fn parse_level(raw: &str) -> u8 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return 0;
    }
    match digits[..end].parse::<u64>() {
        Ok(v) => v.min(u64::from(MAX_LEVEL)) as u8,
        // Too many digits for u64 is still "more than 100".
        Err(_) => MAX_LEVEL,
    }
}

/// Zero the alpha of each opaque pixel with probability `p`.
///
/// One uniform draw per opaque pixel. Returns the number of pixels erased.
pub fn dissolve(pixels: &mut PixelBuffer, p: f64, rng: &mut impl RandomSource) -> usize {
    if p <= 0.0 {
        return 0;
    }
    let mut erased = 0;
    for px in pixels.data_mut().chunks_exact_mut(4) {
        if px[3] > 0 && rng.next_f64() < p {
            px[3] = 0;
            erased += 1;
        }
    }
    erased
}

/// Outcome of one redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DissolveStats {
    /// Opaque pixels after the disc was drawn.
    pub opaque: usize,
    /// Pixels erased by the dissolve pass.
    pub erased: usize,
}

/// The dissolve widget's state.
#[derive(Debug, Clone)]
pub struct DissolveWidget<R> {
    config: DissolveConfig,
    color: Rgb,
    size: SurfaceSize,
    level: u8,
    rng: R,
}

impl<R: RandomSource> DissolveWidget<R> {
    /// Create the widget at level 0. An unparsable color falls back to the
    /// default teal.
    #[must_use]
    pub fn new(config: DissolveConfig, size: SurfaceSize, rng: R) -> Self {
        let color = Rgb::from_hex(&config.color).unwrap_or(Rgb::new(0x4e, 0xe2, 0xc0));
        Self {
            config,
            color,
            size,
            level: 0,
            rng,
        }
    }

    /// Level used by the last draw.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// Disc radius for the current size.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size.shorter_side() * self.config.radius_ratio
    }

    /// Draw the disc and dissolve it at `level` (clamped to `0..=100`).
    pub fn draw(&mut self, level: u8, surface: &mut impl PixelSurface) -> Result<DissolveStats> {
        self.level = level.min(MAX_LEVEL);

        surface.clear();
        let (cx, cy) = self.size.center();
        surface.fill_circle(cx, cy, self.radius(), &Paint::Solid(self.color));

        let mut pixels = surface.read_pixels()?;
        if pixels.is_empty() {
            return Ok(DissolveStats::default());
        }
        let opaque = pixels.opaque_count();
        let p = erase_probability(self.level, self.config.max_erase);
        let erased = dissolve(&mut pixels, p, &mut self.rng);
        if erased > 0 {
            surface.write_pixels(&pixels)?;
        }
        Ok(DissolveStats { opaque, erased })
    }

    /// Draw again at the current level, e.g. after a resize.
    pub fn redraw(&mut self, surface: &mut impl PixelSurface) -> Result<DissolveStats> {
        self.draw(self.level, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Xorshift64;
    use crate::surface::DrawSurface;

    fn widget(w: f64, h: f64) -> (DissolveWidget<Xorshift64>, PixelBuffer) {
        let size = SurfaceSize::logical(w, h);
        let buf = PixelBuffer::new(w as u32, h as u32);
        (
            DissolveWidget::new(DissolveConfig::default(), size, Xorshift64::new(5)),
            buf,
        )
    }

    #[test]
    fn probability_is_linear_and_capped() {
        assert_eq!(erase_probability(0, 0.9), 0.0);
        assert!((erase_probability(50, 0.9) - 0.45).abs() < 1e-12);
        assert!((erase_probability(100, 0.9) - 0.9).abs() < 1e-12);
        assert!((erase_probability(250, 0.9) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn parse_level_follows_integer_prefix_rules() {
        assert_eq!(parse_level("0"), 0);
        assert_eq!(parse_level("37"), 37);
        assert_eq!(parse_level("  42px"), 42);
        assert_eq!(parse_level("+9"), 9);
        assert_eq!(parse_level("12.9"), 12);
        assert_eq!(parse_level("-5"), 0);
        assert_eq!(parse_level("abc"), 0);
        assert_eq!(parse_level(""), 0);
        assert_eq!(parse_level("100"), 100);
        assert_eq!(parse_level("250"), 100);
        assert_eq!(parse_level("99999999999999999999999"), 100);
    }

    #[test]
    fn level_zero_leaves_disc_intact() {
        let (mut w, mut buf) = widget(200.0, 120.0);
        let stats = w.draw(0, &mut buf).unwrap();
        assert_eq!(stats.erased, 0);
        assert!(stats.opaque > 0);
        assert_eq!(buf.opaque_count(), stats.opaque);
    }

    #[test]
    fn full_entropy_still_leaves_survivors() {
        let (mut w, mut buf) = widget(400.0, 300.0);
        let stats = w.draw(100, &mut buf).unwrap();
        let survivors = buf.opaque_count();
        assert_eq!(survivors, stats.opaque - stats.erased);
        assert!(survivors > 0, "max_erase 0.9 must leave pixels");
        let ratio = stats.erased as f64 / stats.opaque as f64;
        assert!((ratio - 0.9).abs() < 0.05, "erase ratio {ratio}");
    }

    #[test]
    fn each_draw_starts_from_a_fresh_disc() {
        let (mut w, mut buf) = widget(200.0, 200.0);
        let full = w.draw(0, &mut buf).unwrap().opaque;
        w.draw(90, &mut buf).unwrap();
        assert!(buf.opaque_count() < full);
        w.draw(0, &mut buf).unwrap();
        assert_eq!(buf.opaque_count(), full);
        assert_eq!(w.level(), 0);
    }

    #[test]
    fn disc_is_centered_with_configured_radius() {
        let (mut w, mut buf) = widget(300.0, 100.0);
        assert!((w.radius() - 18.0).abs() < 1e-9);
        w.draw(0, &mut buf).unwrap();
        assert_eq!(buf.pixel(150, 50), Some([0x4e, 0xe2, 0xc0, 255]));
        assert_eq!(buf.pixel(150, 10).map(|p| p[3]), Some(0));
    }

    #[test]
    fn dissolve_only_touches_opaque_pixels() {
        let mut buf = PixelBuffer::new(10, 10);
        buf.fill_circle(5.0, 5.0, 3.0, &Paint::Solid(Rgb::new(1, 2, 3)));
        let opaque = buf.opaque_count();
        let mut rng = Xorshift64::new(1);
        let erased = dissolve(&mut buf, 1.0, &mut rng);
        assert_eq!(erased, opaque);
        assert_eq!(buf.opaque_count(), 0);
    }

    #[test]
    fn empty_surface_is_a_no_op() {
        let (mut w, mut buf) = widget(0.0, 0.0);
        assert_eq!(w.draw(80, &mut buf).unwrap(), DissolveStats::default());
    }

    #[test]
    fn redraw_reuses_level() {
        let (mut w, mut buf) = widget(100.0, 100.0);
        w.draw(100, &mut buf).unwrap();
        let stats = w.redraw(&mut buf).unwrap();
        assert!(stats.erased > 0);
        assert_eq!(w.level(), 100);
    }
}
