use crate::{
    board::resources::Resources,
    departures::model::Departure,
    draw::{
        measure::{Measure, truncate_to_width},
        surface::{Configure, FontRole, Primitive, PrimitiveId, Surface},
    },
    foundation::core::Point,
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// Shown in place of a departure when a slot has no data.
pub const NO_DATA_TEXT: &str = "could not fetch departure";

const TRUNCATION_MARKER: &str = "...";

#[derive(Clone, Debug, PartialEq)]
enum Shown {
    Nothing,
    NoData,
    Trip(Option<String>),
}

/// One departure row: line icon, direction, minutes left.
///
/// ```text
/// | icon | direction ......... | mm |
/// ```
#[derive(Debug)]
pub struct DepartureArtist {
    cell: Cell,
    icon_width: f64,
    direction_width: f64,
    icon: PrimitiveId,
    direction: PrimitiveId,
    time: PrimitiveId,
    shown: Shown,
}

impl DepartureArtist {
    pub fn new(
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        resources: &Resources,
        anchor: Anchor,
    ) -> Self {
        let dims = resources.dims;
        let time_width = measure.text_width("00", FontRole::Departure);
        let width = dims.icon_width + dims.direction_width + time_width;
        let height = measure.line_height(FontRole::Departure);
        let text = resources.palette.text;

        Self {
            cell: Cell::new(0.0, 0.0, width, height, anchor),
            icon_width: dims.icon_width,
            direction_width: dims.direction_width,
            icon: surface.create(Primitive::image(None, Anchor::Center)),
            direction: surface.create(Primitive::text(
                "",
                FontRole::Departure,
                text,
                Anchor::West,
            )),
            time: surface.create(Primitive::text("", FontRole::Departure, text, Anchor::East)),
            shown: Shown::Nothing,
        }
    }

    pub fn icon(&self) -> PrimitiveId {
        self.icon
    }

    pub fn direction(&self) -> PrimitiveId {
        self.direction
    }

    pub fn time(&self) -> PrimitiveId {
        self.time
    }

    /// Trip id currently displayed, if any.
    pub fn trip_id(&self) -> Option<&str> {
        match &self.shown {
            Shown::Trip(id) => id.as_deref(),
            Shown::Nothing | Shown::NoData => None,
        }
    }

    /// Shows `departure`, or the no-data marker for `None`.
    ///
    /// Icon and direction are reconfigured only when the trip changes; the time
    /// and its colour are refreshed on every call.
    pub fn update_departure(
        &mut self,
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        resources: &Resources,
        departure: Option<&Departure>,
    ) {
        let Some(departure) = departure else {
            self.clear(surface, resources);
            return;
        };

        let same_trip = matches!(
            (&self.shown, &departure.id),
            (Shown::Trip(Some(shown)), Some(id)) if shown == id
        );
        if !same_trip {
            self.shown = Shown::Trip(departure.id.clone());
            let icon = resources.icon_for(&departure.line, &departure.product);
            surface.configure(self.icon, Configure::Image(icon));
            let direction = truncate_to_width(
                measure,
                &departure.direction,
                FontRole::Departure,
                self.direction_width,
                TRUNCATION_MARKER,
            );
            surface.configure(self.direction, Configure::Text(direction));
            surface.configure(self.direction, Configure::Color(resources.palette.text));
        }

        let color = if departure.reachable {
            resources.palette.text
        } else {
            resources.palette.no_time
        };
        surface.configure(self.time, Configure::Text(departure.minutes_text()));
        surface.configure(self.time, Configure::Color(color));
    }

    fn clear(&mut self, surface: &mut dyn Surface, resources: &Resources) {
        self.shown = Shown::NoData;
        surface.configure(self.icon, Configure::Image(None));
        surface.configure(self.direction, Configure::Text(NO_DATA_TEXT.to_string()));
        surface.configure(self.direction, Configure::Color(resources.palette.error));
        surface.configure(self.time, Configure::Text(" ".to_string()));
    }
}

impl Artist for DepartureArtist {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        let x = self.cell.x_at(Anchor::West);
        let y = self.cell.y_at(Anchor::West);
        surface.move_to(self.icon, Point::new(x + self.icon_width / 2.0, y));
        surface.move_to(self.direction, Point::new(x + self.icon_width, y));
        surface.move_to(self.time, Point::new(x + self.cell.width(), y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artists/departure.rs"]
mod tests;
