use crate::{
    foundation::core::{Point, Rect, Size},
    foundation::error::BoardResult,
    layout::anchor::Anchor,
    layout::grid::Grid,
};

/// Axis-aligned rectangle whose stored `(x, y)` is the point named by `anchor`.
///
/// Corner queries translate from the anchor to the centre and from there to the
/// requested point with one parametric offset per axis (see [`Anchor::fx`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    anchor: Anchor,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, Anchor::Center)
    }
}

fn extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl Cell {
    pub fn new(x: f64, y: f64, width: f64, height: f64, anchor: Anchor) -> Self {
        Self {
            x,
            y,
            width: extent(width),
            height: extent(height),
            anchor,
        }
    }

    /// Cell covering `rect`, described relative to `anchor`.
    pub fn from_rect(rect: Rect, anchor: Anchor) -> Self {
        let rect = rect.abs();
        let mut cell = Self::new(rect.x0, rect.y0, rect.width(), rect.height(), Anchor::NorthWest);
        cell.rebase(anchor);
        cell
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Changes the width keeping the anchor point fixed.
    pub fn set_width(&mut self, width: f64) {
        self.width = extent(width);
    }

    /// Changes the height keeping the anchor point fixed.
    pub fn set_height(&mut self, height: f64) {
        self.height = extent(height);
    }

    pub fn set_size(&mut self, size: Size) {
        self.set_width(size.width);
        self.set_height(size.height);
    }

    /// x coordinate of `corner`.
    pub fn x_at(&self, corner: Anchor) -> f64 {
        if corner == self.anchor {
            return self.x;
        }
        let center = self.x - self.anchor.fx() * self.width;
        center + corner.fx() * self.width
    }

    /// y coordinate of `corner`.
    pub fn y_at(&self, corner: Anchor) -> f64 {
        if corner == self.anchor {
            return self.y;
        }
        let center = self.y - self.anchor.fy() * self.height;
        center + corner.fy() * self.height
    }

    pub fn corner(&self, corner: Anchor) -> Point {
        Point::new(self.x_at(corner), self.y_at(corner))
    }

    /// Moves the cell horizontally so that `corner` lands on `x`.
    pub fn set_x_at(&mut self, corner: Anchor, x: f64) {
        self.x += x - self.x_at(corner);
    }

    /// Moves the cell vertically so that `corner` lands on `y`.
    pub fn set_y_at(&mut self, corner: Anchor, y: f64) {
        self.y += y - self.y_at(corner);
    }

    /// Moves the cell so that `corner` lands on `p`. Size and anchor are unchanged.
    pub fn set_corner(&mut self, corner: Anchor, p: Point) {
        self.set_x_at(corner, p.x);
        self.set_y_at(corner, p.y);
    }

    /// Describes the same rectangle relative to `anchor`.
    pub fn rebase(&mut self, anchor: Anchor) {
        if anchor == self.anchor {
            return;
        }
        let p = self.corner(anchor);
        self.x = p.x;
        self.y = p.y;
        self.anchor = anchor;
    }

    pub fn rebased(mut self, anchor: Anchor) -> Self {
        self.rebase(anchor);
        self
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_points(self.corner(Anchor::NorthWest), self.corner(Anchor::SouthEast))
    }

    /// Scales width and height about the anchor point.
    pub fn scale(&mut self, factor: f64) {
        self.set_width(factor * self.width);
        self.set_height(factor * self.height);
    }

    /// Takes over another cell's rectangle, keeping this cell's anchor.
    pub fn bind_to(&mut self, other: &Cell) {
        *self = other.rebased(self.anchor);
    }

    /// Grid covering the same rectangle, anchored at `anchor`.
    pub fn to_grid(&self, rows: Vec<f64>, weights: Vec<f64>, anchor: Anchor) -> BoardResult<Grid> {
        Grid::new(self.rebased(anchor), rows, weights)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cell.rs"]
mod tests;
