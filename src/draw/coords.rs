use crate::draw::model::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A position in client (viewport) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientPoint {
    pub x: f32,
    pub y: f32,
}

impl ClientPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { client: ClientPoint },
    Touch { touches: Vec<ClientPoint> },
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self::Mouse {
            client: ClientPoint::new(x, y),
        }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        Self::Touch {
            touches: vec![ClientPoint::new(x, y)],
        }
    }

    pub fn kind(&self) -> PointerKind {
        match self {
            Self::Mouse { .. } => PointerKind::Mouse,
            Self::Touch { .. } => PointerKind::Touch,
        }
    }

    /// Mouse position, or the first active touch.
    pub fn client_point(&self) -> Option<ClientPoint> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// The canvas element's on-screen bounding rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect rendered 1:1 with the surface at the origin.
    pub fn unscaled(size: (u32, u32)) -> Self {
        Self::new(0.0, 0.0, size.0 as f32, size.1 as f32)
    }
}

/// Maps a client point into canvas pixels, correcting for CSS scaling.
///
/// The result is not clamped: drags that leave the element keep producing
/// coordinates outside `[0, width) x [0, height)`.
pub fn map_client_point(client: ClientPoint, rect: CanvasRect, intrinsic: (u32, u32)) -> Option<Point> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    let scale_x = intrinsic.0 as f32 / rect.width;
    let scale_y = intrinsic.1 as f32 / rect.height;
    Some(Point::new(
        (client.x - rect.left) * scale_x,
        (client.y - rect.top) * scale_y,
    ))
}

pub fn map_pointer(input: &PointerInput, rect: CanvasRect, intrinsic: (u32, u32)) -> Option<Point> {
    map_client_point(input.client_point()?, rect, intrinsic)
}
