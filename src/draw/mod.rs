//! Raster drawing surface for face-gesture practice: pointer mapping, stroke
//! rendering, snapshot undo/redo and flattened PNG export.

pub mod composite;
pub mod coords;
pub mod engine;
pub mod gesture;
pub mod grid;
pub mod history;
pub mod input;
pub mod model;
pub mod reference;
pub mod render;
pub mod save;
pub mod script;
pub mod settings;
pub mod settings_store;
pub mod state;
pub mod surface;

pub use coords::{CanvasRect, ClientPoint, PointerInput, PointerKind};
pub use engine::DrawingSurface;
pub use gesture::{DragListeners, GestureSession, ListenerToken, NoopListeners};
pub use model::{Color, Point, StrokeDescriptor, Tool, ToolState};
pub use reference::{PhotoProvider, ReferencePhoto};
pub use save::{DataUrlSink, DirectorySink, ExportSink};
pub use settings::DrawSettings;
pub use state::PracticeStep;
pub use surface::CanvasSurface;
