use crate::{
    board::resources::Resources,
    draw::{
        measure::Measure,
        surface::{FontRole, Primitive, PrimitiveId, Surface},
    },
    foundation::core::Point,
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    /// `DD.MM.`
    pub date: String,
    pub desc: String,
}

/// Date column plus (possibly multi-line) description.
#[derive(Debug)]
pub struct EventArtist {
    cell: Cell,
    date_width: f64,
    date: PrimitiveId,
    desc: PrimitiveId,
}

impl EventArtist {
    pub fn new(
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        resources: &Resources,
        event: &Event,
        anchor: Anchor,
    ) -> Self {
        let font = FontRole::Event;
        let date_width = measure.text_width("00.00.", font);
        let width = date_width + measure.text_width(&event.desc, font);
        let height = measure
            .text_height(&event.date, font)
            .max(measure.text_height(&event.desc, font));
        let color = resources.palette.text;

        Self {
            cell: Cell::new(0.0, 0.0, width, height, anchor),
            date_width,
            date: surface.create(Primitive::text(&event.date, font, color, Anchor::NorthWest)),
            desc: surface.create(Primitive::text(&event.desc, font, color, Anchor::NorthWest)),
        }
    }

    pub fn date(&self) -> PrimitiveId {
        self.date
    }

    pub fn desc(&self) -> PrimitiveId {
        self.desc
    }
}

impl Artist for EventArtist {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        let nw = self.cell.corner(Anchor::NorthWest);
        surface.move_to(self.date, nw);
        surface.move_to(self.desc, Point::new(nw.x + self.date_width, nw.y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artists/event.rs"]
mod tests;
