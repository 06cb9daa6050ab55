use gesdro::draw::settings_store::{load_from_path, save_to_path, DRAW_SETTINGS_FILE_NAME};
use gesdro::draw::{Color, DrawSettings, DrawingSurface, Tool};

#[test]
fn saved_settings_seed_a_new_surface() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(DRAW_SETTINGS_FILE_NAME);
    let settings = DrawSettings {
        tool: Tool::Ellipse,
        brush_size: 8,
        brush_color: Color::rgba(12, 34, 56, 255),
        max_canvas_width: 320,
        ..DrawSettings::default()
    };
    save_to_path(&path, &settings).expect("save");

    let engine = DrawingSurface::with_settings(load_from_path(&path).expect("load"));
    let tools = engine.tools();
    assert_eq!(tools.tool, Tool::Ellipse);
    assert_eq!(tools.brush_size, 8);
    assert_eq!(tools.color, Color::rgba(12, 34, 56, 255));
    assert!(!tools.eraser);
    assert_eq!(engine.settings().max_canvas_width, 320);
}

#[test]
fn hand_written_file_with_hex_color_and_partial_fields_loads() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(DRAW_SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        r##"{ "brush_color": "#00ff00", "show_grid": true, "grid_size": 1, "overlay_opacity": 0.6 }"##,
    )
    .expect("write");

    let loaded = load_from_path(&path).expect("load");
    assert_eq!(loaded.brush_color, Color::rgba(0, 255, 0, 255));
    assert_eq!(loaded.grid().map(|grid| grid.divisions), Some(2));
    assert!((loaded.overlay_opacity - 0.6).abs() < f32::EPSILON);
    assert_eq!(loaded.brush_size, 3);
}
