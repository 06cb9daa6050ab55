use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Eraser strokes are this many times wider than the nominal brush size.
pub const ERASER_WIDTH_MULTIPLIER: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Pen,
    Line,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOp {
    SourceOver,
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_owned(),
            other => return Err(anyhow!("unsupported color length {other} in {value:?}")),
        };
        let bytes = hex::decode(&expanded).with_context(|| format!("parse color {value:?}"))?;
        let alpha = bytes.get(3).copied().unwrap_or(255);
        Ok(Self::rgba(bytes[0], bytes[1], bytes[2], alpha))
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{}", hex::encode([self.r, self.g, self.b]))
        } else {
            format!("#{}", hex::encode(self.to_rgba_array()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Live tool selection as the toolbar sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub tool: Tool,
    pub eraser: bool,
    pub color: Color,
    pub brush_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            eraser: false,
            color: Color::BLACK,
            brush_size: 3,
        }
    }
}

impl ToolState {
    pub fn descriptor(&self) -> StrokeDescriptor {
        let brush_size = self.brush_size.max(1);
        if self.eraser && self.tool == Tool::Pen {
            StrokeDescriptor {
                tool: Tool::Pen,
                color: Color::BLACK,
                nominal_width: brush_size,
                width: brush_size * ERASER_WIDTH_MULTIPLIER,
                op: CompositeOp::DestinationOut,
            }
        } else {
            StrokeDescriptor {
                tool: self.tool,
                color: self.color,
                nominal_width: brush_size,
                width: brush_size,
                op: CompositeOp::SourceOver,
            }
        }
    }
}

/// Everything a gesture needs to rasterize, frozen at pointer-down so tool
/// switches mid-gesture cannot alter the stroke in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeDescriptor {
    pub tool: Tool,
    pub color: Color,
    pub nominal_width: u32,
    pub width: u32,
    pub op: CompositeOp,
}

impl StrokeDescriptor {
    pub fn is_erase(&self) -> bool {
        self.op == CompositeOp::DestinationOut
    }
}
