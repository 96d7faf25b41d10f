use crate::{
    board::resources::Resources,
    draw::surface::{Configure, ImageId, Primitive, PrimitiveId, Surface},
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// Fixed box cycling through poster images, each centred in the box.
#[derive(Debug)]
pub struct PosterArtist {
    cell: Cell,
    posters: Vec<ImageId>,
    current: usize,
    image: PrimitiveId,
}

impl PosterArtist {
    pub fn new(surface: &mut dyn Surface, resources: &Resources, anchor: Anchor) -> Self {
        let dims = resources.dims;
        let posters = resources.posters().to_vec();
        let image = surface.create(Primitive::image(posters.first().copied(), Anchor::Center));
        Self {
            cell: Cell::new(0.0, 0.0, dims.poster_width, dims.poster_height, anchor),
            posters,
            current: 0,
            image,
        }
    }

    pub fn primitive(&self) -> PrimitiveId {
        self.image
    }

    pub fn current(&self) -> Option<ImageId> {
        self.posters.get(self.current).copied()
    }

    /// Advances to the next poster, wrapping around. No-op without posters.
    pub fn next_poster(&mut self, surface: &mut dyn Surface) {
        if self.posters.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.posters.len();
        surface.configure(self.image, Configure::Image(self.current()));
    }
}

impl Artist for PosterArtist {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        surface.move_to(self.image, self.cell.corner(Anchor::Center));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artists/poster.rs"]
mod tests;
