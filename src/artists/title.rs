use crate::{
    board::resources::Resources,
    draw::{
        measure::Measure,
        surface::{Configure, FontRole, Primitive, PrimitiveId, Surface},
    },
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// Single line of text in the title font, drawn at the cell's anchor point.
#[derive(Debug)]
pub struct TitleArtist {
    cell: Cell,
    text: PrimitiveId,
    text_anchor: Anchor,
}

impl TitleArtist {
    pub fn new(
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        resources: &Resources,
        text: &str,
        anchor: Anchor,
    ) -> Self {
        let width = measure.text_width(text, FontRole::Title);
        let height = measure.line_height(FontRole::Title);
        let id = surface.create(Primitive::text(
            text,
            FontRole::Title,
            resources.palette.text,
            anchor,
        ));
        Self {
            cell: Cell::new(0.0, 0.0, width, height, anchor),
            text: id,
            text_anchor: anchor,
        }
    }

    pub fn primitive(&self) -> PrimitiveId {
        self.text
    }

    pub fn set_text(&mut self, surface: &mut dyn Surface, text: &str) {
        surface.configure(self.text, Configure::Text(text.to_string()));
    }
}

impl Artist for TitleArtist {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        surface.move_to(self.text, self.cell.corner(self.text_anchor));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artists/title.rs"]
mod tests;
