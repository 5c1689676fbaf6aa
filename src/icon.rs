//! The rendered tray icon.
//!
//! A [`RenderedIcon`] is the finished surface handed back to the caller,
//! together with the pixel ratio it was drawn at. Callers either encode it
//! as PNG or pass the raw RGBA buffer to their tray library.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::error::{ComposeError, Result};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A finished tray icon.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    /// Straight-alpha RGBA pixels.
    data: RgbaImage,

    /// The display scale factor the icon was drawn for.
    ///
    /// The logical size of the icon is `dimensions / scale`, which is what
    /// a native image handle should be created with.
    scale: f32,
}

impl RenderedIcon {
    /// Wraps an RGBA image drawn at the given scale.
    pub fn new(data: RgbaImage, scale: f32) -> Self {
        Self { data, scale }
    }

    /// Converts a finished drawing surface.
    pub(crate) fn from_pixmap(pixmap: &Pixmap, scale: f32) -> Self {
        Self::new(pixmap_to_rgba_image(pixmap), scale)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the display scale factor.
    pub fn pixel_ratio(&self) -> f32 {
        self.scale
    }

    /// Returns the logical size of the icon (dimensions / scale).
    ///
    /// A 32x32 icon drawn at 2x has a logical size of 16x16.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }

    /// Borrows the pixels.
    pub fn rgba(&self) -> &RgbaImage {
        &self.data
    }

    /// Returns the pixel at (`x`, `y`) as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.data.width() && y < self.data.height()).then(|| self.data.get_pixel(x, y).0)
    }

    /// Consumes the icon, returning the raw row-major RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.data.into_raw()
    }

    /// Encodes the icon as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.data
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ComposeError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *out = Rgba([r, g, b, a]);
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
