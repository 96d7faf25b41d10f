use chrono::NaiveTime;

use crate::{
    board::resources::Resources,
    draw::{
        measure::Measure,
        surface::{Configure, FontRole, Primitive, PrimitiveId, Surface},
    },
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// `HH:MM` wall clock.
#[derive(Debug)]
pub struct ClockArtist {
    cell: Cell,
    text: PrimitiveId,
    shown: String,
}

impl ClockArtist {
    pub fn new(
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        resources: &Resources,
        anchor: Anchor,
    ) -> Self {
        let width = measure.text_width("00:00", FontRole::Clock);
        let height = measure.line_height(FontRole::Clock);
        let text = surface.create(Primitive::text(
            "",
            FontRole::Clock,
            resources.palette.text,
            Anchor::Center,
        ));
        Self {
            cell: Cell::new(0.0, 0.0, width, height, anchor),
            text,
            shown: String::new(),
        }
    }

    pub fn primitive(&self) -> PrimitiveId {
        self.text
    }

    /// Shows `now`; the surface is only touched when the minute changed.
    pub fn tick(&mut self, surface: &mut dyn Surface, now: NaiveTime) {
        let text = now.format("%H:%M").to_string();
        if text != self.shown {
            surface.configure(self.text, Configure::Text(text.clone()));
            self.shown = text;
        }
    }
}

impl Artist for ClockArtist {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        surface.move_to(self.text, self.cell.corner(Anchor::Center));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artists/clock.rs"]
mod tests;
