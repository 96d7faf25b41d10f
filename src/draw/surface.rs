use crate::{
    foundation::core::{Point, Rgba8},
    layout::anchor::Anchor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u32);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Title,
    Departure,
    Event,
    Clock,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Title,
        FontRole::Departure,
        FontRole::Event,
        FontRole::Clock,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Text {
        text: String,
        font: FontRole,
        color: Rgba8,
    },
    Image(Option<ImageId>),
}

/// A drawable item: content plus the anchor its position refers to.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub content: Content,
    pub anchor: Anchor,
    pub at: Point,
}

impl Primitive {
    pub fn text(text: impl Into<String>, font: FontRole, color: Rgba8, anchor: Anchor) -> Self {
        Self {
            content: Content::Text {
                text: text.into(),
                font,
                color,
            },
            anchor,
            at: Point::ORIGIN,
        }
    }

    pub fn image(image: Option<ImageId>, anchor: Anchor) -> Self {
        Self {
            content: Content::Image(image),
            anchor,
            at: Point::ORIGIN,
        }
    }

    pub fn text_str(&self) -> Option<&str> {
        match &self.content {
            Content::Text { text, .. } => Some(text),
            Content::Image(_) => None,
        }
    }

    pub fn color(&self) -> Option<Rgba8> {
        match &self.content {
            Content::Text { color, .. } => Some(*color),
            Content::Image(_) => None,
        }
    }

    pub fn image_id(&self) -> Option<ImageId> {
        match &self.content {
            Content::Image(id) => *id,
            Content::Text { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Configure {
    Text(String),
    Image(Option<ImageId>),
    Color(Rgba8),
}

/// Drawing-primitive contract of the host surface.
///
/// Coordinates are absolute. Callers never read primitive state back.
pub trait Surface {
    fn create(&mut self, primitive: Primitive) -> PrimitiveId;

    fn move_to(&mut self, id: PrimitiveId, at: Point);

    fn configure(&mut self, id: PrimitiveId, change: Configure);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub creates: usize,
    pub moves: usize,
    pub configures: usize,
}

/// Retained in-memory surface. Primitives keep creation order, which is paint order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    stats: SceneStats,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(idx, p)| (PrimitiveId(idx as u32), p))
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SceneStats::default();
    }
}

impl Surface for Scene {
    fn create(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.primitives.len() as u32);
        self.primitives.push(primitive);
        self.stats.creates += 1;
        id
    }

    fn move_to(&mut self, id: PrimitiveId, at: Point) {
        let Some(p) = self.primitives.get_mut(id.0 as usize) else {
            tracing::warn!(?id, "move of unknown primitive");
            return;
        };
        p.at = at;
        self.stats.moves += 1;
    }

    fn configure(&mut self, id: PrimitiveId, change: Configure) {
        let Some(p) = self.primitives.get_mut(id.0 as usize) else {
            tracing::warn!(?id, "configure of unknown primitive");
            return;
        };
        match (&mut p.content, change) {
            (Content::Text { text, .. }, Configure::Text(new)) => *text = new,
            (Content::Text { color, .. }, Configure::Color(new)) => *color = new,
            (Content::Image(image), Configure::Image(new)) => *image = new,
            (_, change) => {
                tracing::warn!(?id, ?change, "configure does not apply to primitive kind");
                return;
            }
        }
        self.stats.configures += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/surface.rs"]
mod tests;
