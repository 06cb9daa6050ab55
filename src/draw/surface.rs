use crate::draw::model::Color;
use anyhow::{anyhow, Result};
use image::RgbaImage;

pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (400, 500);
pub const DEFAULT_MAX_CANVAS_WIDTH: u32 = 600;

/// Canvas dimensions for a reference photo: the natural size, scaled down to
/// `max_width` (keeping the aspect ratio) when the photo is wider.
pub fn canvas_size_for_reference(natural: (u32, u32), max_width: u32) -> (u32, u32) {
    let (width, height) = natural;
    if width == 0 || height == 0 {
        return DEFAULT_CANVAS_SIZE;
    }
    let max_width = max_width.max(1);
    if width <= max_width {
        return (width, height);
    }
    let aspect = width as f64 / height as f64;
    let scaled_height = (max_width as f64 / aspect).round().max(1.0) as u32;
    (max_width, scaled_height)
}

/// RGBA8 raster that strokes are rasterized into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CanvasSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(anyhow!(
                "pixel buffer of {} bytes does not match {width}x{height}",
                pixels.len()
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) * 4) as usize;
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_rgba_array());
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Overwrites every pixel from `source`; returns false on a size mismatch.
    pub fn copy_from(&mut self, source: &[u8]) -> bool {
        if source.len() != self.pixels.len() {
            return false;
        }
        self.pixels.copy_from_slice(source);
        true
    }

    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}
