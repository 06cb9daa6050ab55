use gesdro::draw::reference::encode_data_uri;
use gesdro::draw::save::encode_png;
use gesdro::draw::{CanvasRect, DrawingSurface, PointerInput, ReferencePhoto};
use image::{Rgba, RgbaImage};

pub fn solid_photo(id: &str, width: u32, height: u32, rgba: [u8; 4]) -> ReferencePhoto {
    let png = encode_png(&RgbaImage::from_pixel(width, height, Rgba(rgba))).expect("encode png");
    ReferencePhoto::from_data_uri(Some(id.to_owned()), encode_data_uri("image/png", &png))
        .expect("reference photo")
}

/// Drags through `points` on a canvas rendered at its intrinsic size.
pub fn drag(engine: &mut DrawingSurface, points: &[(f32, f32)]) {
    let rect = CanvasRect::unscaled(engine.surface().size());
    let (first, rest) = points.split_first().expect("at least one point");
    assert!(engine.pointer_down(&PointerInput::mouse(first.0, first.1), rect));
    for (x, y) in rest {
        engine.pointer_move(&PointerInput::mouse(*x, *y), rect);
    }
    assert!(engine.pointer_up());
}
