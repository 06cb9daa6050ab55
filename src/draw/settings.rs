use crate::draw::grid::{GridOverlay, MAX_GRID_DIVISIONS, MIN_GRID_DIVISIONS};
use crate::draw::model::{Color, Tool, ToolState};
use crate::draw::surface::DEFAULT_MAX_CANVAS_WIDTH;
use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 20;
const MIN_GRID_OPACITY: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawSettings {
    #[serde(default)]
    pub tool: Tool,
    #[serde(default = "default_brush_size")]
    pub brush_size: u32,
    #[serde(default = "default_brush_color", deserialize_with = "deserialize_color")]
    pub brush_color: Color,
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f32,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_grid_opacity")]
    pub grid_opacity: f32,
    #[serde(default = "default_max_canvas_width")]
    pub max_canvas_width: u32,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

/// Colors are written as structs but older files stored CSS hex strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorWire {
    Hex(String),
    Rgba(Color),
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    match ColorWire::deserialize(deserializer)? {
        ColorWire::Rgba(color) => Ok(color),
        ColorWire::Hex(value) => Color::from_hex(&value).map_err(serde::de::Error::custom),
    }
}

impl DrawSettings {
    /// Clamps every field into its supported range. Returns true when
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();
        self.brush_size = self.brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        self.overlay_opacity = clamp_unit(self.overlay_opacity, default_overlay_opacity(), 0.0);
        self.grid_size = self.grid_size.clamp(MIN_GRID_DIVISIONS, MAX_GRID_DIVISIONS);
        self.grid_opacity = clamp_unit(self.grid_opacity, default_grid_opacity(), MIN_GRID_OPACITY);
        self.max_canvas_width = self.max_canvas_width.max(1);
        if self.export_dir.trim().is_empty() {
            self.export_dir = default_export_dir();
        }
        *self != before
    }

    pub fn tool_state(&self) -> ToolState {
        ToolState {
            tool: self.tool,
            eraser: false,
            color: self.brush_color,
            brush_size: self.brush_size,
        }
    }

    pub fn grid(&self) -> Option<GridOverlay> {
        self.show_grid
            .then(|| GridOverlay::new(self.grid_size, self.grid_opacity))
    }
}

fn clamp_unit(value: f32, fallback: f32, min: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, 1.0)
    }
}

fn default_brush_size() -> u32 {
    3
}

fn default_brush_color() -> Color {
    Color::BLACK
}

fn default_overlay_opacity() -> f32 {
    0.3
}

fn default_grid_size() -> u32 {
    3
}

fn default_grid_opacity() -> f32 {
    0.3
}

fn default_max_canvas_width() -> u32 {
    DEFAULT_MAX_CANVAS_WIDTH
}

fn default_export_dir() -> String {
    "drawings".to_owned()
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_size: default_brush_size(),
            brush_color: default_brush_color(),
            overlay_opacity: default_overlay_opacity(),
            show_grid: false,
            grid_size: default_grid_size(),
            grid_opacity: default_grid_opacity(),
            max_canvas_width: default_max_canvas_width(),
            export_dir: default_export_dir(),
        }
    }
}
