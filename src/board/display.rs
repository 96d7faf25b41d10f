//! Display root: the stations grid next to the info column.
//!
//! ```text
//! +------------------------------+---------------+
//! | Title                        |     12:34     |
//! | dep  dep  ...                | 24.12. Event  |
//! | Title                        |   +-------+   |
//! | dep  dep  ...                |   |poster |   |
//! +------------------------------+---------------+
//! ```

use chrono::{DateTime, FixedOffset, NaiveTime};

use crate::{
    artists::{
        clock::ClockArtist,
        departure::DepartureArtist,
        event::{Event, EventArtist},
        poster::PosterArtist,
        title::TitleArtist,
    },
    board::{config::BoardConfig, resources::Resources, schedule::Task},
    departures::{
        model::Station,
        pipeline::{DirectionFilter, fill_slots, station_departures},
        source::DepartureSource,
    },
    draw::{measure::Measure, surface::Surface},
    foundation::core::{Point, Size},
    foundation::error::{BoardError, BoardResult},
    layout::{
        anchor::Anchor,
        cascade::{Artist, EditGeometry, Resize},
        cell::Cell,
        grid::{Grid, GridArtist, GridSlot},
        stack::Stack,
    },
};

/// Child of the stations grid.
pub enum StationItem {
    Title(TitleArtist),
    Departures(Stack<DepartureArtist>),
}

/// Child of the info column.
pub enum InfoItem {
    Clock(ClockArtist),
    Event(EventArtist),
    Poster(PosterArtist),
}

/// The two columns of the root grid.
pub enum Panel {
    Stations(GridArtist<StationItem>),
    Info(Stack<InfoItem>),
}

macro_rules! delegate_artist {
    ($ty:ident { $($variant:ident),+ }) => {
        impl Artist for $ty {
            fn cell(&self) -> &Cell {
                match self {
                    $(Self::$variant(a) => a.cell(),)+
                }
            }

            fn cell_mut(&mut self) -> &mut Cell {
                match self {
                    $(Self::$variant(a) => a.cell_mut(),)+
                }
            }

            fn place(&mut self, surface: &mut dyn Surface) {
                match self {
                    $(Self::$variant(a) => a.place(surface),)+
                }
            }
        }
    };
}

delegate_artist!(StationItem { Title, Departures });
delegate_artist!(InfoItem { Clock, Event, Poster });
delegate_artist!(Panel { Stations, Info });

const STATIONS: usize = 0;
const INFO: usize = 1;

struct StationView {
    station: Station,
    /// Slots of the station's departure stacks in the stations grid, left to right.
    stacks: Vec<usize>,
}

/// Root of the display tree. Owns the layout, the artists and the resources.
pub struct Board {
    root: GridArtist<Panel>,
    stations: Vec<StationView>,
    clock: Option<usize>,
    poster: Option<usize>,
    resources: Resources,
    filter: DirectionFilter,
}

impl Board {
    /// Builds the tree for `config` and places it on a canvas-sized root.
    pub fn build(
        config: &BoardConfig,
        resources: Resources,
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
    ) -> BoardResult<Self> {
        let width = f64::from(config.canvas.width);
        let height = f64::from(config.canvas.height);

        let (stations_grid, stations) =
            build_stations(config, &resources, surface, measure)?;
        let (info, clock, poster) = build_info(&config.events, &resources, surface, measure);

        let root_cell = Cell::new(0.0, 0.0, width, height, Anchor::NorthWest);
        let grid = Grid::new(root_cell, vec![height], config.columns.clone())?
            .with_padding(config.padding.col, 0.0);
        let mut root = GridArtist::new(grid);
        root.insert(
            GridSlot::at(0, STATIONS).stretched(),
            Panel::Stations(stations_grid),
        )?;
        root.insert(
            GridSlot::at(0, INFO).anchored(Anchor::North),
            Panel::Info(info),
        )?;

        let mut board = Self {
            root,
            stations,
            clock,
            poster,
            resources,
            filter: config.direction_filter.clone(),
        };
        board.resize(surface, width, height)?;
        Ok(board)
    }

    pub fn root(&self) -> &GridArtist<Panel> {
        &self.root
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().map(|v| &v.station)
    }

    /// New overall size: the root is re-laid out with exactly one cascade.
    #[tracing::instrument(skip(self, surface))]
    pub fn resize(&mut self, surface: &mut dyn Surface, width: f64, height: f64) -> BoardResult<()> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(BoardError::validation(format!(
                "board size must be finite and >= 0, got {width}x{height}"
            )));
        }
        let mut handle = Resize::new(&mut self.root, surface);
        let mut lock = handle.lock();
        lock.update(|root| -> BoardResult<()> {
            root.grid_mut().set_row(0, height)?;
            let cell = root.cell_mut();
            cell.set_size(Size::new(width, height));
            cell.set_corner(Anchor::NorthWest, Point::ORIGIN);
            Ok(())
        })
    }

    /// Runs the pipeline for every station, then updates every departure row.
    ///
    /// Returns the number of stations that had data.
    #[tracing::instrument(skip_all, fields(stations = self.stations.len(), now = %now))]
    pub fn refresh_departures(
        &mut self,
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        source: &mut dyn DepartureSource,
        now: DateTime<FixedOffset>,
    ) -> usize {
        let ordered: Vec<Option<Vec<_>>> = self
            .stations
            .iter()
            .map(|view| station_departures(&view.station, source, now, &self.filter))
            .collect();
        let with_data = ordered.iter().filter(|o| o.is_some()).count();

        let Some(Panel::Stations(grid)) = self.root.get_mut(STATIONS) else {
            return with_data;
        };
        for (view, departures) in self.stations.iter().zip(ordered) {
            let mut slots =
                fill_slots(departures.unwrap_or_default(), view.station.slots()).into_iter();
            for idx in &view.stacks {
                let Some(StationItem::Departures(stack)) = grid.get_mut(*idx) else {
                    continue;
                };
                for artist in stack.children_mut() {
                    let departure = slots.next().flatten();
                    artist.update_departure(surface, measure, &self.resources, departure.as_ref());
                }
            }
        }
        with_data
    }

    /// Departure rows of station `index`, in display order.
    pub fn departure_artists(&self, index: usize) -> Vec<&DepartureArtist> {
        let (Some(view), Some(Panel::Stations(grid))) =
            (self.stations.get(index), self.root.get(STATIONS))
        else {
            return Vec::new();
        };
        view.stacks
            .iter()
            .filter_map(|idx| match grid.get(*idx) {
                Some(StationItem::Departures(stack)) => Some(stack.children()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn next_poster(&mut self, surface: &mut dyn Surface) {
        if let Some(InfoItem::Poster(poster)) = self.info_item_mut(self.poster) {
            poster.next_poster(surface);
        }
    }

    pub fn tick_clock(&mut self, surface: &mut dyn Surface, now: NaiveTime) {
        if let Some(InfoItem::Clock(clock)) = self.info_item_mut(self.clock) {
            clock.tick(surface, now);
        }
    }

    /// Runs the tasks a schedule reported as due.
    pub fn run_tasks(
        &mut self,
        tasks: &[Task],
        surface: &mut dyn Surface,
        measure: &mut dyn Measure,
        source: &mut dyn DepartureSource,
        now: DateTime<FixedOffset>,
    ) {
        for task in tasks {
            match task {
                Task::Stations => {
                    self.refresh_departures(surface, measure, source, now);
                }
                Task::Posters => self.next_poster(surface),
                Task::Clock => self.tick_clock(surface, now.time()),
            }
        }
    }

    fn info_item_mut(&mut self, idx: Option<usize>) -> Option<&mut InfoItem> {
        let Some(Panel::Info(stack)) = self.root.get_mut(INFO) else {
            return None;
        };
        stack.children_mut().get_mut(idx?)
    }
}

fn build_stations(
    config: &BoardConfig,
    resources: &Resources,
    surface: &mut dyn Surface,
    measure: &mut dyn Measure,
) -> BoardResult<(GridArtist<StationItem>, Vec<StationView>)> {
    let cols = config
        .stations
        .iter()
        .map(|s| s.departure_cols)
        .max()
        .unwrap_or(1)
        .max(1);
    let rows = vec![0.0; config.stations.len() * 2];
    let grid = Grid::new(Cell::default(), rows, vec![1.0; cols])?
        .with_padding(config.padding.col, config.padding.row);
    let mut grid = GridArtist::new(grid);

    let mut views = Vec::with_capacity(config.stations.len());
    for (i, station) in config.stations.iter().enumerate() {
        let title_row = 2 * i;
        let title = TitleArtist::new(surface, measure, resources, &station.name, config.title_anchor);
        grid.insert(
            GridSlot::at(title_row, 0)
                .span(1, cols)
                .anchored(config.title_anchor),
            StationItem::Title(title),
        )?;

        let mut stacks = Vec::with_capacity(station.departure_cols);
        for col in 0..station.departure_cols {
            let rows = (0..station.departure_rows)
                .map(|_| DepartureArtist::new(surface, measure, resources, Anchor::West))
                .collect();
            let stack = Stack::new(rows, Anchor::West, Anchor::West);
            stacks.push(grid.insert(
                GridSlot::at(title_row + 1, col).anchored(Anchor::West),
                StationItem::Departures(stack),
            )?);
        }
        views.push(StationView {
            station: station.clone(),
            stacks,
        });
    }
    grid.fit_rows()?;
    Ok((grid, views))
}

fn build_info(
    events: &[Event],
    resources: &Resources,
    surface: &mut dyn Surface,
    measure: &mut dyn Measure,
) -> (Stack<InfoItem>, Option<usize>, Option<usize>) {
    let mut items = vec![InfoItem::Clock(ClockArtist::new(
        surface,
        measure,
        resources,
        Anchor::North,
    ))];
    items.extend(events.iter().map(|event| {
        InfoItem::Event(EventArtist::new(
            surface,
            measure,
            resources,
            event,
            Anchor::NorthWest,
        ))
    }));
    let poster = if resources.posters().is_empty() {
        None
    } else {
        items.push(InfoItem::Poster(PosterArtist::new(
            surface,
            resources,
            Anchor::North,
        )));
        Some(items.len() - 1)
    };
    (Stack::new(items, Anchor::North, Anchor::North), Some(0), poster)
}

#[cfg(test)]
#[path = "../../tests/unit/board/display.rs"]
mod tests;
