use crate::draw::gesture::GestureSession;
use crate::draw::model::{Point, StrokeDescriptor, Tool};
use crate::draw::render::{stroke_segment, stroke_shape};
use crate::draw::surface::CanvasSurface;
use tracing::debug;

#[derive(Debug)]
struct ActiveStroke {
    descriptor: StrokeDescriptor,
    start: Point,
    last: Point,
    shape_end: Option<Point>,
    _session: GestureSession,
}

/// Per-gesture state machine: idle until pointer-down, active until
/// pointer-up. Pen strokes rasterize into the committed surface as they go;
/// line and ellipse strokes only touch the preview layer until they finish.
#[derive(Debug, Default)]
pub struct StrokeInput {
    active: Option<ActiveStroke>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEffect {
    Ignored,
    Committed,
    Preview,
}

impl StrokeInput {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn descriptor(&self) -> Option<&StrokeDescriptor> {
        self.active.as_ref().map(|stroke| &stroke.descriptor)
    }

    pub fn begin(&mut self, descriptor: StrokeDescriptor, point: Point, session: GestureSession) {
        debug!(tool = ?descriptor.tool, erase = descriptor.is_erase(), x = point.x, y = point.y, "stroke started");
        self.active = Some(ActiveStroke {
            descriptor,
            start: point,
            last: point,
            shape_end: None,
            _session: session,
        });
    }

    /// Pen: strokes the new segment into `surface`. Shapes: rebuilds `preview`
    /// from the committed `surface` and draws the shape on it.
    pub fn extend(
        &mut self,
        point: Point,
        surface: &mut CanvasSurface,
        preview: &mut CanvasSurface,
    ) -> MoveEffect {
        let Some(stroke) = self.active.as_mut() else {
            return MoveEffect::Ignored;
        };
        match stroke.descriptor.tool {
            Tool::Pen => {
                let _ = stroke_segment(surface, stroke.last, point, &stroke.descriptor);
                stroke.last = point;
                MoveEffect::Committed
            }
            Tool::Line | Tool::Ellipse => {
                if preview.size() != surface.size() {
                    *preview = surface.clone();
                } else {
                    preview.copy_from(surface.pixels());
                }
                stroke_shape(preview, &stroke.descriptor, stroke.start, point);
                stroke.last = point;
                stroke.shape_end = Some(point);
                MoveEffect::Preview
            }
        }
    }

    /// Ends the gesture, committing any pending shape into `surface` and
    /// releasing the drag listeners. Returns false when no gesture was active.
    pub fn finish(&mut self, surface: &mut CanvasSurface) -> bool {
        let Some(stroke) = self.active.take() else {
            return false;
        };
        if let Some(end) = stroke.shape_end {
            stroke_shape(surface, &stroke.descriptor, stroke.start, end);
        }
        debug!(tool = ?stroke.descriptor.tool, "stroke finished");
        true
    }

    /// Drops the gesture without committing a pending shape.
    pub fn abandon(&mut self) -> bool {
        self.active.take().is_some()
    }
}
