#![forbid(unsafe_code)]

//! Drawing surfaces.
//!
//! Widgets draw through [`DrawSurface`] (clear + filled circles) and, for the
//! dissolve effect, [`PixelSurface`] (RGBA readback/writeback). The browser
//! implements both on a 2D canvas context; [`PixelBuffer`] is a software
//! implementation used natively.
//!
//! Drawing coordinates are CSS pixels. Pixel readback is in device pixels,
//! i.e. the canvas backing store.

use crate::error::{DoorsError, Result};

/// Canvas geometry after fitting to the layout width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Drawing width in CSS pixels.
    pub css_width: f64,
    /// Drawing height in CSS pixels.
    pub css_height: f64,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    /// Fit a canvas laid out `client_width` CSS pixels wide.
    ///
    /// Height is `max(min_height, client_width * height_ratio)`. A missing or
    /// nonsensical pixel ratio counts as `1`.
    #[must_use]
    pub fn fit(client_width: f64, pixel_ratio: f64, min_height: f64, height_ratio: f64) -> Self {
        let css_width = if client_width.is_finite() {
            client_width.max(0.0)
        } else {
            0.0
        };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            css_width,
            css_height: min_height.max(css_width * height_ratio),
            pixel_ratio,
        }
    }

    /// Size in CSS pixels with a 1:1 pixel ratio.
    #[must_use]
    pub const fn logical(css_width: f64, css_height: f64) -> Self {
        Self {
            css_width,
            css_height,
            pixel_ratio: 1.0,
        }
    }

    /// Backing store width (what `canvas.width` is set to).
    #[must_use]
    pub fn backing_width(&self) -> u32 {
        to_backing(self.css_width * self.pixel_ratio)
    }

    /// Backing store height (what `canvas.height` is set to).
    #[must_use]
    pub fn backing_height(&self) -> u32 {
        to_backing(self.css_height * self.pixel_ratio)
    }

    /// Center of the drawing area in CSS pixels.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.css_width / 2.0, self.css_height / 2.0)
    }

    #[must_use]
    pub fn shorter_side(&self) -> f64 {
        self.css_width.min(self.css_height)
    }
}

// Canvas dimension assignment truncates toward zero.
fn to_backing(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`.
    #[must_use]
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
        match hex.len() {
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::new(byte(0)?, byte(2)?, byte(4)?))
            }
            3 => Some(Self::new(
                nibble(0)? * 0x11,
                nibble(1)? * 0x11,
                nibble(2)? * 0x11,
            )),
            _ => None,
        }
    }

    /// Convert HSL (hue in degrees, saturation/lightness in percent).
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f64| {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };
        Self::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A fill style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Opaque solid color.
    Solid(Rgb),
    /// HSL color with alpha in `[0, 1]`.
    Hsla {
        hue: f64,
        saturation: f64,
        lightness: f64,
        alpha: f64,
    },
}

impl Paint {
    /// CSS color string for `fillStyle`.
    #[must_use]
    pub fn to_css(&self) -> String {
        match *self {
            Self::Solid(rgb) => rgb.to_hex(),
            Self::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => format!("hsla({hue}, {saturation}%, {lightness}%, {alpha})"),
        }
    }

    /// Straight (non-premultiplied) RGBA.
    #[must_use]
    pub fn to_rgba(&self) -> [u8; 4] {
        match *self {
            Self::Solid(Rgb { r, g, b }) => [r, g, b, 255],
            Self::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => {
                let Rgb { r, g, b } = Rgb::from_hsl(hue, saturation, lightness);
                let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                [r, g, b, a]
            }
        }
    }
}

/// Minimal vector drawing used by the widgets.
pub trait DrawSurface {
    /// Clear the whole drawing area to transparent.
    fn clear(&mut self);

    /// Fill a circle centered at (`x`, `y`) in CSS pixels.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint);
}

/// Surfaces whose pixels can be read back and replaced.
pub trait PixelSurface: DrawSurface {
    /// Snapshot the backing store.
    fn read_pixels(&mut self) -> Result<PixelBuffer>;

    /// Replace the backing store contents.
    fn write_pixels(&mut self, pixels: &PixelBuffer) -> Result<()>;
}

/// Row-major RGBA pixels, 4 bytes per pixel, straight alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Transparent buffer of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap raw RGBA bytes (e.g. from `getImageData`).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(DoorsError::Host(format!(
                "pixel data has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGBA at (`x`, `y`), or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    #[must_use]
    pub fn opaque_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let dst = &mut self.data[i..i + 4];
        let sa = f64::from(src[3]) / 255.0;
        if sa <= 0.0 {
            return;
        }
        let da = f64::from(dst[3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let sc = f64::from(src[c]);
            let dc = f64::from(dst[c]);
            dst[c] = ((sc * sa + dc * da * (1.0 - sa)) / out_a).round() as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }
}

impl DrawSurface for PixelBuffer {
    fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Coverage is decided per pixel center; no anti-aliasing.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
        if radius.is_nan() || radius <= 0.0 || self.data.is_empty() {
            return;
        }
        let rgba = paint.to_rgba();
        let r2 = radius * radius;
        let x0 = (x - radius).floor().max(0.0) as u32;
        let y0 = (y - radius).floor().max(0.0) as u32;
        let x1 = ((x + radius).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((y + radius).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            let dy = f64::from(py) + 0.5 - y;
            for px in x0..x1 {
                let dx = f64::from(px) + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, rgba);
                }
            }
        }
    }
}

impl PixelSurface for PixelBuffer {
    fn read_pixels(&mut self) -> Result<PixelBuffer> {
        Ok(self.clone())
    }

    fn write_pixels(&mut self, pixels: &PixelBuffer) -> Result<()> {
        if pixels.width != self.width || pixels.height != self.height {
            return Err(DoorsError::Host(format!(
                "cannot write {}x{} pixels into {}x{} buffer",
                pixels.width, pixels.height, self.width, self.height
            )));
        }
        self.data.copy_from_slice(&pixels.data);
        Ok(())
    }
}
