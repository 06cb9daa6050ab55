use crate::draw::grid::GridOverlay;
use crate::draw::model::Color;
use crate::draw::render::blend_pixel;
use crate::draw::state::PracticeStep;
use crate::draw::surface::CanvasSurface;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy)]
pub struct ReferenceLayer<'a> {
    pub image: &'a RgbaImage,
    pub opacity: f32,
}

/// Flattened image for download: opaque white, then the optional reference
/// at its opacity, then every drawn pixel at full opacity.
pub fn compose_export(drawing: &CanvasSurface, reference: Option<ReferenceLayer<'_>>) -> CanvasSurface {
    let mut output = CanvasSurface::filled(drawing.width(), drawing.height(), Color::WHITE);
    if let Some(layer) = reference {
        draw_reference(&mut output, layer);
    }
    blend_in_place(&mut output, drawing.pixels(), 1.0);
    output
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub step: PracticeStep,
    pub answer_overlay: bool,
    pub overlay_opacity: f32,
    pub grid: Option<GridOverlay>,
}

/// What the practice view shows: in the tracing step the reference sits
/// under the drawing; in the freehand step it is laid on top only while the
/// answer check is on.
pub fn compose_display(
    drawing: &CanvasSurface,
    reference: Option<&RgbaImage>,
    options: DisplayOptions,
) -> CanvasSurface {
    let mut output = CanvasSurface::filled(drawing.width(), drawing.height(), Color::WHITE);
    let layer = reference.map(|image| ReferenceLayer {
        image,
        opacity: options.overlay_opacity,
    });

    match options.step {
        PracticeStep::Trace => {
            if let Some(layer) = layer {
                draw_reference(&mut output, layer);
            }
            blend_in_place(&mut output, drawing.pixels(), 1.0);
        }
        PracticeStep::Freehand => {
            blend_in_place(&mut output, drawing.pixels(), 1.0);
            if let (Some(layer), true) = (layer, options.answer_overlay) {
                draw_reference(&mut output, layer);
            }
        }
    }

    if let Some(grid) = options.grid {
        grid.draw(&mut output);
    }
    output
}

fn draw_reference(base: &mut CanvasSurface, layer: ReferenceLayer<'_>) {
    let (width, height) = base.size();
    let scaled: Cow<'_, RgbaImage> = if layer.image.dimensions() == (width, height) {
        Cow::Borrowed(layer.image)
    } else {
        Cow::Owned(imageops::resize(layer.image, width, height, FilterType::Triangle))
    };
    blend_in_place(base, scaled.as_raw(), layer.opacity.clamp(0.0, 1.0));
}

fn blend_in_place(base: &mut CanvasSurface, top: &[u8], opacity: f32) {
    debug_assert_eq!(base.pixels().len(), top.len());
    for (dst, src) in base
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(top.chunks_exact(4))
    {
        if src[3] == 0 {
            continue;
        }
        let alpha = (src[3] as f32 * opacity).round().clamp(0.0, 255.0) as u8;
        let blended = blend_pixel(
            Color::rgba(dst[0], dst[1], dst[2], dst[3]),
            Color::rgba(src[0], src[1], src[2], alpha),
        );
        dst.copy_from_slice(&blended.to_rgba_array());
    }
}
