//! depboard lays out a departure board on a resizable drawing surface.
//!
//! # Pieces
//!
//! 1. **Layout**: [`Cell`] geometry with nine anchors, composed through weighted
//!    [`Grid`]s and vertical [`Stack`]s. Geometry writes go through a [`Resize`]
//!    handle so every descendant is re-placed; [`ResizeLock`] batches writes into
//!    a single cascade.
//! 2. **Departures**: raw feed records are converted, merged, de-duplicated by
//!    trip id and sorted by minutes left ([`order_departures`]).
//! 3. **Board**: [`Board`] owns the display tree (titles, departure rows, clock,
//!    events, posters) and pushes updates to a [`Surface`].
//! 4. **Raster**: [`rasterize_scene`] turns a retained [`Scene`] into premultiplied
//!    RGBA8 pixels on the CPU.
//!
//! The core never performs IO: feeds, fonts and images are handed in already
//! loaded, through [`DepartureSource`] and [`Resources`].
#![forbid(unsafe_code)]

mod artists;
mod assets;
mod board;
mod departures;
mod draw;
mod foundation;
mod layout;

pub use artists::clock::ClockArtist;
pub use artists::departure::{DepartureArtist, NO_DATA_TEXT};
pub use artists::event::{Event, EventArtist};
pub use artists::poster::PosterArtist;
pub use artists::title::TitleArtist;
pub use assets::decode::{PreparedImage, decode_image, decode_thumbnail};
pub use assets::store::ImageStore;
pub use board::config::{BoardConfig, Padding, Periods};
pub use board::display::{Board, InfoItem, Panel, StationItem};
pub use board::resources::{Dimensions, FontSpec, Palette, Resources, register_fonts};
pub use board::schedule::{Schedule, Task};
pub use departures::model::{
    Departure, DepartureQuery, Products, RawDeparture, RawLine, Station, time_is_between,
};
pub use departures::pipeline::{
    DirectionFilter, convert_record, convert_records, dedup_by_id, fill_slots, merge,
    minutes_until, order_departures, sort_by_time, station_departures,
};
pub use departures::source::{DepartureSource, FeedDirSource, StaticSource};
pub use draw::measure::{FixedMeasure, Measure, truncate_to_width};
pub use draw::raster::{FrameRGBA, rasterize_scene};
pub use draw::surface::{
    Configure, Content, FontRole, ImageId, Primitive, PrimitiveId, Scene, SceneStats, Surface,
};
pub use draw::text::{TextEngine, layout_extent};
pub use foundation::core::{Canvas, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{BoardError, BoardResult};
pub use layout::anchor::Anchor;
pub use layout::cascade::{Artist, EditGeometry, Resize, ResizeLock};
pub use layout::cell::Cell;
pub use layout::grid::{Grid, GridArtist, GridSlot, normalize};
pub use layout::stack::Stack;
