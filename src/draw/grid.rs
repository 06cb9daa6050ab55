use crate::draw::model::Color;
use crate::draw::render::blend_pixel;
use crate::draw::surface::CanvasSurface;

pub const MIN_GRID_DIVISIONS: u32 = 2;
pub const MAX_GRID_DIVISIONS: u32 = 8;

/// N x N proportion grid laid over the display (never exported).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    pub divisions: u32,
    pub opacity: f32,
}

impl Default for GridOverlay {
    fn default() -> Self {
        Self {
            divisions: 3,
            opacity: 0.3,
        }
    }
}

impl GridOverlay {
    pub fn new(divisions: u32, opacity: f32) -> Self {
        Self {
            divisions: divisions.clamp(MIN_GRID_DIVISIONS, MAX_GRID_DIVISIONS),
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Interior line offsets `(i + 1) * extent / divisions` for `i` in `0..divisions - 1`.
    pub fn line_offsets(&self, extent: u32) -> Vec<f32> {
        (1..self.divisions)
            .map(|i| i as f32 * extent as f32 / self.divisions as f32)
            .collect()
    }

    pub fn draw(&self, target: &mut CanvasSurface) {
        let (width, height) = target.size();
        let alpha = (self.opacity * 255.0).round() as u8;
        let ink = Color::rgba(0, 0, 0, alpha);

        for x in self.line_offsets(width) {
            let column = (x.floor() as u32).min(width - 1);
            for y in 0..height {
                blend_at(target, column, y, ink);
            }
        }
        for y in self.line_offsets(height) {
            let row = (y.floor() as u32).min(height - 1);
            for x in 0..width {
                blend_at(target, x, row, ink);
            }
        }
    }
}

fn blend_at(target: &mut CanvasSurface, x: u32, y: u32, ink: Color) {
    let blended = blend_pixel(target.pixel(x, y), ink);
    let idx = ((y * target.width() + x) * 4) as usize;
    target.pixels_mut()[idx..idx + 4].copy_from_slice(&blended.to_rgba_array());
}
