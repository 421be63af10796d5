#![forbid(unsafe_code)]

//! 2D canvas as a [`DrawSurface`] / [`PixelSurface`].
//!
//! Drawing happens in CSS pixels: after [`CanvasSurface::fit`] the context
//! transform scales by the device pixel ratio. Pixel readback always covers
//! the whole backing store.

use std::f64::consts::TAU;

use doors_core::surface::{DrawSurface, Paint, PixelBuffer, PixelSurface, SurfaceSize};
use doors_core::{DoorsError, Result};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, Window};

use crate::dom::js_error;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: SurfaceSize,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, widget: &'static str) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| DoorsError::Host(format!("{widget}: no 2d context")))?;
        Ok(Self {
            canvas,
            ctx,
            size: SurfaceSize::logical(0.0, 0.0),
        })
    }

    /// Size the backing store from the element's layout width.
    pub fn fit(&mut self, window: &Window, min_height: f64, height_ratio: f64) -> SurfaceSize {
        let size = SurfaceSize::fit(
            f64::from(self.canvas.client_width()),
            window.device_pixel_ratio(),
            min_height,
            height_ratio,
        );
        self.canvas.set_width(size.backing_width());
        self.canvas.set_height(size.backing_height());
        let dpr = size.pixel_ratio;
        if let Err(err) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            tracing::warn!(error = %js_error(err), "canvas: set_transform failed");
        }
        self.size = size;
        size
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.css_width, self.size.css_height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: &Paint) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&paint.to_css());
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

impl PixelSurface for CanvasSurface {
    fn read_pixels(&mut self) -> Result<PixelBuffer> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if w == 0 || h == 0 {
            return Ok(PixelBuffer::new(0, 0));
        }
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, f64::from(w), f64::from(h))
            .map_err(js_error)?;
        PixelBuffer::from_rgba(image.width(), image.height(), image.data().0)
    }

    fn write_pixels(&mut self, pixels: &PixelBuffer) -> Result<()> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(pixels.data()),
            pixels.width(),
            pixels.height(),
        )
        .map_err(js_error)?;
        self.ctx.put_image_data(&image, 0.0, 0.0).map_err(js_error)
    }
}
