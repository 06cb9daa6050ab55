use crate::common::{drag, solid_photo};
use gesdro::draw::{CanvasRect, Color, DrawSettings, DrawingSurface, PointerInput, Tool};

fn engine() -> DrawingSurface {
    DrawingSurface::with_settings(DrawSettings::default())
}

#[test]
fn pen_undo_then_line_discards_redo_branch() {
    let mut engine = engine();
    assert_eq!(engine.surface().size(), (400, 500));

    drag(&mut engine, &[(50.0, 50.0), (150.0, 150.0)]);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.history().cursor(), 1);
    assert_eq!(engine.surface().pixel(100, 100), Color::BLACK);

    assert!(engine.undo());
    assert_eq!(engine.history().cursor(), 0);
    assert!(engine.surface().is_blank());
    assert!(engine.can_redo());

    engine.set_tool(Tool::Line);
    drag(&mut engine, &[(10.0, 10.0), (300.0, 10.0)]);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.history().cursor(), 1);
    assert!(!engine.can_redo());
    assert_eq!(engine.surface().pixel(100, 100), Color::TRANSPARENT);
}

#[test]
fn undo_then_redo_restores_exact_pixels() {
    let mut engine = engine();
    drag(&mut engine, &[(20.0, 20.0), (80.0, 60.0), (120.0, 30.0)]);
    engine.set_color(Color::rgba(200, 10, 10, 255));
    drag(&mut engine, &[(10.0, 200.0), (390.0, 210.0)]);
    let before = engine.surface().clone();

    assert!(engine.undo());
    assert_ne!(engine.surface(), &before);
    assert!(engine.redo());
    assert_eq!(engine.surface(), &before);
    assert!(!engine.redo());
}

#[test]
fn scaled_canvas_maps_client_points_to_intrinsic_pixels() {
    let mut engine = engine();
    let rect = CanvasRect::new(10.0, 20.0, 200.0, 250.0);
    engine.pointer_down(&PointerInput::mouse(35.0, 45.25), rect);
    engine.pointer_move(&PointerInput::mouse(85.0, 45.25), rect);
    engine.pointer_up();

    // canvas segment (50, 50.5) -> (150, 50.5), width 3
    assert_eq!(engine.surface().pixel(100, 49), Color::BLACK);
    assert_eq!(engine.surface().pixel(100, 51), Color::BLACK);
    assert_eq!(engine.surface().pixel(100, 52), Color::TRANSPARENT);
    assert_eq!(engine.surface().pixel(30, 50), Color::TRANSPARENT);
}

#[test]
fn eraser_clears_three_times_the_brush_width() {
    let mut engine = engine();
    engine.set_brush_size(20);
    drag(&mut engine, &[(20.0, 50.5), (180.0, 50.5)]);
    assert_eq!(engine.surface().pixel(100, 40), Color::BLACK);
    assert_eq!(engine.surface().pixel(100, 60), Color::BLACK);

    engine.set_brush_size(5);
    engine.set_eraser(true);
    drag(&mut engine, &[(20.0, 50.5), (180.0, 50.5)]);

    for y in 43..=57 {
        assert_eq!(engine.surface().pixel(100, y), Color::TRANSPARENT, "row {y}");
    }
    assert_eq!(engine.surface().pixel(100, 42), Color::BLACK);
    assert_eq!(engine.surface().pixel(100, 58), Color::BLACK);
}

#[test]
fn eraser_is_ignored_for_shape_tools() {
    let mut engine = engine();
    engine.set_eraser(true);
    assert_eq!(engine.tools().tool, Tool::Pen);
    engine.set_tool(Tool::Line);
    assert!(!engine.tools().eraser);
    drag(&mut engine, &[(10.0, 10.5), (100.0, 10.5)]);
    assert_eq!(engine.surface().pixel(50, 10), Color::BLACK);
}

#[test]
fn ellipse_is_inscribed_in_the_drag_box() {
    let mut engine = engine();
    engine.set_tool(Tool::Ellipse);
    drag(&mut engine, &[(100.0, 100.0), (160.0, 130.0), (200.0, 300.0)]);

    // center (150, 200), radii (50, 100)
    assert_eq!(engine.surface().pixel(100, 199), Color::BLACK);
    assert_eq!(engine.surface().pixel(149, 100), Color::BLACK);
    assert_eq!(engine.surface().pixel(150, 200), Color::TRANSPARENT);
    assert_eq!(engine.surface().pixel(95, 200), Color::TRANSPARENT);
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn shape_preview_is_separate_from_committed_pixels() {
    let mut engine = engine();
    engine.set_tool(Tool::Line);
    let rect = CanvasRect::unscaled(engine.surface().size());
    engine.pointer_down(&PointerInput::mouse(100.5, 10.0), rect);
    engine.pointer_move(&PointerInput::mouse(300.0, 10.5), rect);
    engine.pointer_move(&PointerInput::mouse(100.5, 200.0), rect);

    assert!(engine.surface().is_blank());
    let preview = engine.visible_pixels().clone();
    assert_eq!(preview.pixel(100, 150), Color::BLACK);
    assert_eq!(preview.pixel(200, 10), Color::TRANSPARENT);

    engine.pointer_up();
    assert_eq!(engine.surface(), &preview);
    assert_eq!(engine.visible_pixels(), engine.surface());
}

#[test]
fn loading_a_photo_resizes_and_resets_the_session() {
    let mut engine = engine();
    drag(&mut engine, &[(10.0, 10.0), (50.0, 50.0)]);
    engine.set_answer_overlay(true);

    engine.load_reference(solid_photo("wide", 1200, 800, [0, 0, 255, 255]));
    assert_eq!(engine.surface().size(), (600, 400));
    assert!(engine.surface().is_blank());
    assert_eq!(engine.history().len(), 1);
    assert!(!engine.can_undo());
    assert!(!engine.answer_overlay());

    engine.load_reference(solid_photo("small", 300, 200, [0, 0, 255, 255]));
    assert_eq!(engine.surface().size(), (300, 200));
}

#[test]
fn grid_is_drawn_only_on_the_display_frame() {
    let mut engine = DrawingSurface::with_settings(DrawSettings {
        show_grid: true,
        grid_opacity: 1.0,
        ..DrawSettings::default()
    });
    let frame = engine.display_frame();
    assert_ne!(frame.pixel(133, 10), Color::WHITE);
    assert!(engine.surface().is_blank());

    engine.set_show_grid(false);
    assert_eq!(engine.display_frame().pixel(133, 10), Color::WHITE);
}

#[test]
fn far_off_canvas_pen_drag_paints_the_crossed_row() {
    let mut engine = engine();
    drag(&mut engine, &[(-1.5e9, 10.5), (1.5e9, 10.5)]);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.surface().pixel(0, 10), Color::BLACK);
    assert_eq!(engine.surface().pixel(399, 10), Color::BLACK);
    assert_eq!(engine.surface().pixel(200, 20), Color::TRANSPARENT);
}

#[test]
fn far_ellipse_drag_finishes_with_one_history_entry() {
    let mut engine = engine();
    engine.set_tool(Tool::Ellipse);
    drag(&mut engine, &[(10.0, 10.0), (1e9, 1e9), (1e12, 1e12)]);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.history().cursor(), 1);
    assert!(!engine.is_drawing());
}

#[test]
fn grid_size_and_opacity_follow_live_controls() {
    let mut engine = engine();
    engine.set_show_grid(true);
    engine.set_grid_opacity(1.0);
    engine.set_grid_size(2);
    let halves = engine.display_frame();
    assert_ne!(halves.pixel(200, 10), Color::WHITE);
    assert_eq!(halves.pixel(133, 10), Color::WHITE);

    engine.set_grid_size(4);
    let quarters = engine.display_frame();
    assert_ne!(quarters.pixel(100, 10), Color::WHITE);
    assert_ne!(quarters.pixel(200, 10), Color::WHITE);
    assert_eq!(quarters.pixel(133, 10), Color::WHITE);
}
