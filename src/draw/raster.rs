use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::{decode::PreparedImage, store::ImageStore},
    draw::{
        surface::{Content, FontRole, ImageId, Primitive, Scene},
        text::{TextEngine, layout_extent},
    },
    foundation::core::{Canvas, Point, Rgba8},
    foundation::error::{BoardError, BoardResult},
    layout::{anchor::Anchor, cell::Cell},
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(idx..idx + 4)
            .and_then(|px| px.try_into().ok())
    }
}

/// Paints every primitive of `scene` in creation order onto a `canvas`-sized frame.
///
/// Text in a role without a registered font and images without an id are skipped.
#[tracing::instrument(skip_all, fields(primitives = scene.len()))]
pub fn rasterize_scene(
    scene: &Scene,
    images: &ImageStore,
    text: &mut TextEngine,
    canvas: Canvas,
    background: Rgba8,
) -> BoardResult<FrameRGBA> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| BoardError::render("canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| BoardError::render("canvas height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(BoardError::render("canvas must be non-empty"));
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    clear_pixmap(&mut pixmap, background.to_premul());

    let mut painter = Painter {
        ctx: vello_cpu::RenderContext::new(width, height),
        images,
        image_cache: HashMap::new(),
        font_cache: HashMap::new(),
    };
    painter.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        background.a,
    ));
    painter.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));

    for (id, primitive) in scene.iter() {
        if let Err(err) = painter.draw(primitive, text) {
            tracing::warn!(?id, %err, "primitive skipped");
        }
    }

    painter.ctx.flush();
    painter.ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

struct Painter<'a> {
    ctx: vello_cpu::RenderContext,
    images: &'a ImageStore,
    image_cache: HashMap<ImageId, vello_cpu::Image>,
    font_cache: HashMap<FontRole, vello_cpu::peniko::FontData>,
}

impl Painter<'_> {
    fn draw(&mut self, primitive: &Primitive, text_engine: &mut TextEngine) -> BoardResult<()> {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match &primitive.content {
            Content::Image(None) => Ok(()),
            Content::Image(Some(id)) => {
                let (paint, w, h) = self.image_paint_for(*id)?;
                let origin = top_left(primitive.at, w, h, primitive.anchor);
                self.ctx
                    .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
                self.ctx.set_paint(paint);
                self.ctx
                    .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
                Ok(())
            }
            Content::Text { text, font, color } => {
                if text.trim().is_empty() {
                    return Ok(());
                }
                let Some(font_data) = self.font_for(*font, text_engine) else {
                    tracing::warn!(?font, "no font registered; text skipped");
                    return Ok(());
                };
                let layout = text_engine.layout(text, *font, *color)?;
                let (w, h) = layout_extent(&layout);
                let origin = top_left(primitive.at, w, h, primitive.anchor);
                self.ctx
                    .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        self.ctx
                            .glyph_run(&font_data)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
        }
    }

    fn image_paint_for(&mut self, id: ImageId) -> BoardResult<(vello_cpu::Image, f64, f64)> {
        let img = self
            .images
            .get(id)
            .ok_or_else(|| BoardError::render(format!("unknown image {id:?}")))?;
        let (w, h) = (f64::from(img.width), f64::from(img.height));
        if let Some(paint) = self.image_cache.get(&id) {
            return Ok((paint.clone(), w, h));
        }

        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(image_to_pixmap(img)?)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(id, paint.clone());
        Ok((paint, w, h))
    }

    fn font_for(
        &mut self,
        role: FontRole,
        text_engine: &TextEngine,
    ) -> Option<vello_cpu::peniko::FontData> {
        if let Some(font) = self.font_cache.get(&role) {
            return Some(font.clone());
        }
        let bytes = text_engine.font_bytes(role)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        self.font_cache.insert(role, font.clone());
        Some(font)
    }
}

fn top_left(at: Point, width: f64, height: f64, anchor: Anchor) -> Point {
    Cell::new(at.x, at.y, width, height, anchor).corner(Anchor::NorthWest)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn image_to_pixmap(img: &PreparedImage) -> BoardResult<vello_cpu::Pixmap> {
    let w: u16 = img
        .width
        .try_into()
        .map_err(|_| BoardError::render("image width exceeds u16"))?;
    let h: u16 = img
        .height
        .try_into()
        .map_err(|_| BoardError::render("image height exceeds u16"))?;
    if img.rgba8_premul.len() != img.width as usize * img.height as usize * 4 {
        return Err(BoardError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = img
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/draw/raster.rs"]
mod tests;
