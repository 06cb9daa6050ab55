use crate::draw::composite::{compose_display, compose_export, DisplayOptions, ReferenceLayer};
use crate::draw::coords::{map_pointer, CanvasRect, PointerInput};
use crate::draw::gesture::{DragListeners, GestureSession, NoopListeners};
use crate::draw::history::SnapshotHistory;
use crate::draw::input::{MoveEffect, StrokeInput};
use crate::draw::model::{Color, Tool, ToolState};
use crate::draw::reference::{PhotoProvider, ReferencePhoto};
use crate::draw::save::{encode_png, export_filename, ExportSink};
use crate::draw::settings::{DrawSettings, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::draw::state::PracticeStep;
use crate::draw::surface::{canvas_size_for_reference, CanvasSurface, DEFAULT_CANVAS_SIZE};
use image::RgbaImage;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// One practice session's drawing surface: the committed raster, its
/// snapshot history, the shape preview layer and the active gesture.
///
/// Every operation is a benign no-op when it cannot apply (no gesture, no
/// reference, nothing to undo); none of them return errors.
pub struct DrawingSurface {
    settings: DrawSettings,
    tools: ToolState,
    surface: CanvasSurface,
    preview: CanvasSurface,
    preview_active: bool,
    history: SnapshotHistory,
    input: StrokeInput,
    listeners: Rc<dyn DragListeners>,
    reference: Option<ReferencePhoto>,
    reference_image: Option<RgbaImage>,
    step: PracticeStep,
    answer_overlay: bool,
}

impl DrawingSurface {
    pub fn new(mut settings: DrawSettings, listeners: Rc<dyn DragListeners>) -> Self {
        settings.sanitize();
        let (width, height) = DEFAULT_CANVAS_SIZE;
        let surface = CanvasSurface::new(width, height);
        Self {
            tools: settings.tool_state(),
            settings,
            preview: surface.clone(),
            preview_active: false,
            history: SnapshotHistory::new(&surface),
            surface,
            input: StrokeInput::default(),
            listeners,
            reference: None,
            reference_image: None,
            step: PracticeStep::default(),
            answer_overlay: false,
        }
    }

    pub fn with_settings(settings: DrawSettings) -> Self {
        Self::new(settings, Rc::new(NoopListeners))
    }

    /// Starts a fresh session for `photo`: resized blank surface, single
    /// history entry, any in-flight gesture dropped.
    pub fn load_reference(&mut self, photo: ReferencePhoto) {
        if self.input.abandon() {
            warn!("reference changed during an active gesture; drag listeners released");
        }
        let (width, height) =
            canvas_size_for_reference(photo.natural_size(), self.settings.max_canvas_width);
        self.surface = CanvasSurface::new(width, height);
        self.preview = self.surface.clone();
        self.preview_active = false;
        self.history.reset(&self.surface);
        self.answer_overlay = false;
        self.reference_image = match photo.load() {
            Ok(image) => Some(image),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "reference image failed to load for display");
                None
            }
        };
        info!(
            id = photo.id.as_deref().unwrap_or("unknown"),
            natural = ?photo.natural_size(),
            canvas = ?(width, height),
            "reference photo loaded"
        );
        self.reference = Some(photo);
    }

    /// Loads the provider's photo when it differs from the current one.
    pub fn sync_reference(&mut self, provider: &dyn PhotoProvider) -> bool {
        let Some(photo) = provider.current_photo() else {
            return false;
        };
        if self.reference.as_ref() == Some(&photo) {
            return false;
        }
        self.load_reference(photo);
        true
    }

    pub fn reference(&self) -> Option<&ReferencePhoto> {
        self.reference.as_ref()
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn tools(&self) -> ToolState {
        self.tools
    }

    /// Selecting a drawing tool turns the eraser off.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.tool = tool;
        self.tools.eraser = false;
    }

    /// The eraser is a pen sub-mode.
    pub fn set_eraser(&mut self, eraser: bool) {
        self.tools.eraser = eraser;
        if eraser {
            self.tools.tool = Tool::Pen;
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.color = color;
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.tools.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    pub fn set_overlay_opacity(&mut self, opacity: f32) {
        self.settings.overlay_opacity = opacity;
        self.settings.sanitize();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.settings.show_grid = show;
    }

    pub fn set_grid_size(&mut self, divisions: u32) {
        self.settings.grid_size = divisions;
        self.settings.sanitize();
    }

    pub fn set_grid_opacity(&mut self, opacity: f32) {
        self.settings.grid_opacity = opacity;
        self.settings.sanitize();
    }

    pub fn step(&self) -> PracticeStep {
        self.step
    }

    pub fn set_step(&mut self, step: PracticeStep) {
        self.step = step;
    }

    pub fn answer_overlay(&self) -> bool {
        self.answer_overlay
    }

    pub fn set_answer_overlay(&mut self, on: bool) {
        self.answer_overlay = on;
    }

    pub fn is_drawing(&self) -> bool {
        self.input.is_active()
    }

    pub fn pointer_down(&mut self, event: &PointerInput, rect: CanvasRect) -> bool {
        if self.input.is_active() {
            debug!("pointer-down during an active gesture; finishing it first");
            self.pointer_up();
        }
        let Some(point) = map_pointer(event, rect, self.surface.size()) else {
            return false;
        };
        let session = GestureSession::acquire(self.listeners.clone(), event.kind());
        self.input.begin(self.tools.descriptor(), point, session);
        true
    }

    pub fn pointer_move(&mut self, event: &PointerInput, rect: CanvasRect) -> bool {
        if !self.input.is_active() {
            return false;
        }
        let Some(point) = map_pointer(event, rect, self.surface.size()) else {
            return false;
        };
        let effect = self.input.extend(point, &mut self.surface, &mut self.preview);
        if effect == MoveEffect::Preview {
            self.preview_active = true;
        }
        effect != MoveEffect::Ignored
    }

    /// Finishes the gesture and records one history entry.
    pub fn pointer_up(&mut self) -> bool {
        if !self.input.finish(&mut self.surface) {
            return false;
        }
        self.preview_active = false;
        self.history.capture(&self.surface);
        true
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }

    /// Releases any gesture left active, e.g. when the view goes away.
    pub fn teardown(&mut self) {
        if self.input.abandon() {
            warn!("gesture still active at teardown; drag listeners released");
            self.preview_active = false;
        }
    }

    pub fn clear(&mut self) -> bool {
        self.teardown();
        self.surface.clear();
        self.history.capture(&self.surface);
        true
    }

    pub fn undo(&mut self) -> bool {
        !self.input.is_active() && self.history.undo(&mut self.surface)
    }

    pub fn redo(&mut self) -> bool {
        !self.input.is_active() && self.history.redo(&mut self.surface)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// Committed pixels.
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// What the canvas element should show right now, including any shape preview.
    pub fn visible_pixels(&self) -> &CanvasSurface {
        if self.preview_active {
            &self.preview
        } else {
            &self.surface
        }
    }

    pub fn display_frame(&self) -> CanvasSurface {
        compose_display(
            self.visible_pixels(),
            self.reference_image.as_ref(),
            DisplayOptions {
                step: self.step,
                answer_overlay: self.answer_overlay,
                overlay_opacity: self.settings.overlay_opacity,
                grid: self.settings.grid(),
            },
        )
    }

    /// Flattens and hands the drawing to `sink`. Returns the filename that
    /// was delivered, or `None` when the export was abandoned.
    pub fn export(&self, sink: &mut dyn ExportSink) -> Option<String> {
        let include_reference = self.step.includes_reference(self.answer_overlay);
        let loaded = match (&self.reference, include_reference) {
            (Some(photo), true) => match photo.load() {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "export abandoned: reference failed to load");
                    return None;
                }
            },
            _ => None,
        };
        let layer = loaded.as_ref().map(|image| ReferenceLayer {
            image,
            opacity: self.settings.overlay_opacity,
        });

        let composed = compose_export(&self.surface, layer);
        let Some(image) = composed.to_image() else {
            warn!("export abandoned: composite surface unavailable");
            return None;
        };
        let png = match encode_png(&image) {
            Ok(png) => png,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "export abandoned");
                return None;
            }
        };

        let filename = export_filename(
            self.reference.as_ref().and_then(|photo| photo.id.as_deref()),
            self.step,
        );
        if let Err(err) = sink.deliver(&png, &filename) {
            warn!(error = %format!("{err:#}"), filename = %filename, "export sink rejected drawing");
            return None;
        }
        info!(filename = %filename, bytes = png.len(), with_reference = layer.is_some(), "drawing exported");
        Some(filename)
    }
}

impl Drop for DrawingSurface {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("size", &self.surface.size())
            .field("tools", &self.tools)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("drawing", &self.input.is_active())
            .finish()
    }
}
