use std::{collections::BTreeMap, sync::Arc};

use crate::{
    draw::{measure::Measure, surface::FontRole},
    foundation::core::Rgba8,
    foundation::error::{BoardError, BoardResult},
};

struct Face {
    family: String,
    size_px: f32,
    bytes: Arc<Vec<u8>>,
}

/// Parley-backed text shaping and measurement, one registered font per [`FontRole`].
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    faces: BTreeMap<FontRole, Face>,
    font_heights: BTreeMap<FontRole, f64>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: BTreeMap::new(),
            font_heights: BTreeMap::new(),
        }
    }

    /// Registers `font_bytes` at `size_px` for `role`, replacing any earlier font.
    pub fn register(&mut self, role: FontRole, font_bytes: Vec<u8>, size_px: f32) -> BoardResult<()> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoardError::validation(
                "font size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BoardError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoardError::validation("registered font family has no name"))?
            .to_string();

        self.faces.insert(
            role,
            Face {
                family,
                size_px,
                bytes: Arc::new(font_bytes),
            },
        );
        self.font_heights.remove(&role);
        Ok(())
    }

    pub fn has_role(&self, role: FontRole) -> bool {
        self.faces.contains_key(&role)
    }

    pub fn family(&self, role: FontRole) -> Option<&str> {
        self.faces.get(&role).map(|f| f.family.as_str())
    }

    pub fn font_bytes(&self, role: FontRole) -> Option<Arc<Vec<u8>>> {
        self.faces.get(&role).map(|f| f.bytes.clone())
    }

    /// Shapes a single unwrapped block of text in `role`'s font.
    pub fn layout(
        &mut self,
        text: &str,
        role: FontRole,
        brush: Rgba8,
    ) -> BoardResult<parley::Layout<Rgba8>> {
        let face = self
            .faces
            .get(&role)
            .ok_or_else(|| BoardError::render(format!("no font registered for {role:?}")))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(face.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Widest line advance and summed line height of a layout.
pub fn layout_extent(layout: &parley::Layout<Rgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

impl Measure for TextEngine {
    fn text_width(&mut self, text: &str, font: FontRole) -> f64 {
        match self.layout(text, font, Rgba8::default()) {
            Ok(layout) => layout_extent(&layout).0,
            Err(err) => {
                tracing::warn!(%err, "text measured as zero width");
                0.0
            }
        }
    }

    fn font_height(&mut self, font: FontRole) -> f64 {
        if let Some(h) = self.font_heights.get(&font) {
            return *h;
        }
        let h = match self.layout("Hg", font, Rgba8::default()) {
            Ok(layout) => layout
                .lines()
                .map(|line| {
                    let m = line.metrics();
                    f64::from(m.ascent + m.descent)
                })
                .fold(0.0, f64::max),
            Err(err) => {
                tracing::warn!(%err, "font height measured as zero");
                return 0.0;
            }
        };
        self.font_heights.insert(font, h);
        h
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/text.rs"]
mod tests;
