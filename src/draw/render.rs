use crate::draw::model::{Color, CompositeOp, Point, StrokeDescriptor, Tool};
use crate::draw::surface::CanvasSurface;
use std::f32::consts::TAU;

const MIN_ELLIPSE_SEGMENTS: usize = 12;
const MAX_ELLIPSE_SEGMENTS: usize = 4096;

/// Pixel bounds on a surface, half-open on the right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRect {
    /// Bounds of a padded segment clipped to a `width` x `height` surface.
    /// Endpoints may lie arbitrarily far outside it. Returns `None` when
    /// nothing of the segment can touch the surface.
    pub fn around_segment(start: Point, end: Point, pad: f32, width: u32, height: u32) -> Option<Self> {
        let x0 = clip_edge((start.x.min(end.x) - pad).floor(), width);
        let y0 = clip_edge((start.y.min(end.y) - pad).floor(), height);
        let x1 = clip_edge((start.x.max(end.x) + pad).ceil() + 1.0, width);
        let y1 = clip_edge((start.y.max(end.y) + pad).ceil() + 1.0, height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Clamps before the cast so far-off coordinates never reach integer math.
fn clip_edge(value: f32, extent: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, extent as f32) as u32
}

/// Ellipse inscribed in the bounding box of two drag points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl EllipseShape {
    pub fn from_drag(start: Point, current: Point) -> Self {
        Self {
            center: Point::new((start.x + current.x) / 2.0, (start.y + current.y) / 2.0),
            radius_x: (current.x - start.x).abs() / 2.0,
            radius_y: (current.y - start.y).abs() / 2.0,
        }
    }

    /// Closed polyline approximation; the first point is repeated at the end.
    pub fn outline(&self) -> Vec<Point> {
        let circumference = TAU * self.radius_x.max(self.radius_y);
        let steps = (circumference.ceil() as usize).clamp(MIN_ELLIPSE_SEGMENTS, MAX_ELLIPSE_SEGMENTS);
        (0..=steps)
            .map(|step| {
                let t = (step % steps) as f32 / steps as f32 * TAU;
                Point::new(
                    self.center.x + self.radius_x * t.cos(),
                    self.center.y + self.radius_y * t.sin(),
                )
            })
            .collect()
    }

    /// Bounding box corners.
    pub fn bounds(&self) -> (Point, Point) {
        (
            Point::new(self.center.x - self.radius_x, self.center.y - self.radius_y),
            Point::new(self.center.x + self.radius_x, self.center.y + self.radius_y),
        )
    }

    fn is_degenerate(&self) -> bool {
        self.radius_x <= f32::EPSILON && self.radius_y <= f32::EPSILON
    }
}

/// Strokes one path segment with round caps. A zero-length segment leaves a dot.
pub fn stroke_segment(
    surface: &mut CanvasSurface,
    start: Point,
    end: Point,
    descriptor: &StrokeDescriptor,
) -> Option<DirtyRect> {
    let radius = descriptor.width.max(1) as f32 / 2.0;
    let (width, height) = surface.size();
    let clip = DirtyRect::around_segment(start, end, radius + 1.0, width, height)?;

    let radius_sq = f64::from(radius) * f64::from(radius);
    let pixels = surface.pixels_mut();
    for y in clip.y..(clip.y + clip.height) {
        for x in clip.x..(clip.x + clip.width) {
            let center = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            if point_segment_distance_sq(center, start, end) <= radius_sq {
                let idx = ((y * width + x) * 4) as usize;
                composite_pixel(&mut pixels[idx..idx + 4], descriptor.color, descriptor.op);
            }
        }
    }
    Some(clip)
}

pub fn stroke_polyline(
    surface: &mut CanvasSurface,
    points: &[Point],
    descriptor: &StrokeDescriptor,
) {
    for segment in points.windows(2) {
        let _ = stroke_segment(surface, segment[0], segment[1], descriptor);
    }
}

pub fn stroke_ellipse(surface: &mut CanvasSurface, ellipse: EllipseShape, descriptor: &StrokeDescriptor) {
    if ellipse.is_degenerate() {
        return;
    }
    let (width, height) = surface.size();
    let (top_left, bottom_right) = ellipse.bounds();
    let pad = descriptor.width.max(1) as f32 / 2.0 + 1.0;
    if DirtyRect::around_segment(top_left, bottom_right, pad, width, height).is_none() {
        return;
    }
    stroke_polyline(surface, &ellipse.outline(), descriptor);
}

/// Draws the line or ellipse a shape gesture describes. Pen descriptors draw nothing.
pub fn stroke_shape(surface: &mut CanvasSurface, descriptor: &StrokeDescriptor, start: Point, end: Point) {
    match descriptor.tool {
        Tool::Line => {
            let _ = stroke_segment(surface, start, end, descriptor);
        }
        Tool::Ellipse => stroke_ellipse(surface, EllipseShape::from_drag(start, end), descriptor),
        Tool::Pen => {}
    }
}

pub fn composite_pixel(dst: &mut [u8], color: Color, op: CompositeOp) {
    match op {
        CompositeOp::SourceOver => {
            let bottom = Color::rgba(dst[0], dst[1], dst[2], dst[3]);
            let blended = blend_pixel(bottom, color);
            dst.copy_from_slice(&blended.to_rgba_array());
        }
        CompositeOp::DestinationOut => {
            let keep = 1.0 - color.a as f32 / 255.0;
            let alpha = (dst[3] as f32 * keep).round().clamp(0.0, 255.0) as u8;
            if alpha == 0 {
                dst.copy_from_slice(&[0, 0, 0, 0]);
            } else {
                dst[3] = alpha;
            }
        }
    }
}

/// Straight-alpha "over" operator.
pub fn blend_pixel(bottom: Color, top: Color) -> Color {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

/// Computed in `f64`: endpoints far off the surface would otherwise lose
/// the sub-pixel precision the coverage test needs.
fn point_segment_distance_sq(point: (f64, f64), start: Point, end: Point) -> f64 {
    let (sx, sy) = (f64::from(start.x), f64::from(start.y));
    let vx = f64::from(end.x) - sx;
    let vy = f64::from(end.y) - sy;
    let wx = point.0 - sx;
    let wy = point.1 - sy;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = point.0 - (sx + vx * t);
    let dy = point.1 - (sy + vy * t);
    dx * dx + dy * dy
}
