use crate::draw::coords::{CanvasRect, PointerInput};
use crate::draw::engine::DrawingSurface;
use crate::draw::model::{Color, Tool};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded user action. Points are in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Tool(Tool),
    Eraser(bool),
    Color(String),
    Size(u32),
    Stroke(Vec<[f32; 2]>),
    Undo,
    Redo,
    Clear,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptAction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read stroke script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parse stroke script {}", path.display()))
}

/// Feeds `actions` through `engine` as an unscaled canvas would see them.
pub fn replay(engine: &mut DrawingSurface, actions: &[ScriptAction]) -> Result<()> {
    for (index, action) in actions.iter().enumerate() {
        match action {
            ScriptAction::Tool(tool) => engine.set_tool(*tool),
            ScriptAction::Eraser(on) => engine.set_eraser(*on),
            ScriptAction::Color(value) => {
                let color = Color::from_hex(value)
                    .with_context(|| format!("action {index}: bad color {value:?}"))?;
                engine.set_color(color);
            }
            ScriptAction::Size(size) => engine.set_brush_size(*size),
            ScriptAction::Stroke(points) => replay_stroke(engine, index, points)?,
            ScriptAction::Undo => {
                engine.undo();
            }
            ScriptAction::Redo => {
                engine.redo();
            }
            ScriptAction::Clear => {
                engine.clear();
            }
        }
    }
    tracing::debug!(
        actions = actions.len(),
        history = engine.history().len(),
        "script replayed"
    );
    Ok(())
}

fn replay_stroke(engine: &mut DrawingSurface, index: usize, points: &[[f32; 2]]) -> Result<()> {
    let Some((first, rest)) = points.split_first() else {
        bail!("action {index}: stroke has no points");
    };
    let rect = CanvasRect::unscaled(engine.surface().size());
    engine.pointer_down(&PointerInput::mouse(first[0], first[1]), rect);
    for [x, y] in rest {
        engine.pointer_move(&PointerInput::mouse(*x, *y), rect);
    }
    engine.pointer_up();
    Ok(())
}
