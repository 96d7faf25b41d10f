//! Weighted grid: absolute row heights, relative column weights.

use crate::{
    draw::surface::Surface,
    foundation::core::Rect,
    foundation::error::{BoardError, BoardResult},
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// Normalizes `weights` to sum to one.
pub fn normalize(weights: &[f64]) -> BoardResult<Vec<f64>> {
    if weights.is_empty() {
        return Err(BoardError::empty_axis("no weights given"));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(BoardError::invalid_weight(format!(
            "weights must sum to a positive number, got {total}"
        )));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

fn check_weight(weight: f64) -> BoardResult<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(BoardError::invalid_weight(format!(
            "column weight must be finite and >= 0, got {weight}"
        )));
    }
    Ok(())
}

fn check_row(size: f64) -> BoardResult<()> {
    if !size.is_finite() || size < 0.0 {
        return Err(BoardError::invalid_weight(format!(
            "row size must be finite and >= 0, got {size}"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cell: Cell,
    rows: Vec<f64>,
    weights: Vec<f64>,
    pad_col: f64,
    pad_row: f64,
}

impl Grid {
    pub fn new(cell: Cell, rows: Vec<f64>, weights: Vec<f64>) -> BoardResult<Self> {
        for &w in &weights {
            check_weight(w)?;
        }
        for &r in &rows {
            check_row(r)?;
        }
        Ok(Self {
            cell,
            rows,
            weights,
            pad_col: 0.0,
            pad_row: 0.0,
        })
    }

    /// Padding between adjacent columns and between adjacent rows.
    pub fn with_padding(mut self, pad_col: f64, pad_row: f64) -> Self {
        self.pad_col = pad_col.max(0.0);
        self.pad_row = pad_row.max(0.0);
        self
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn pad_col(&self) -> f64 {
        self.pad_col
    }

    pub fn pad_row(&self) -> f64 {
        self.pad_row
    }

    /// Width left for columns after padding.
    pub fn free_width(&self) -> f64 {
        let gaps = self.weights.len().saturating_sub(1) as f64;
        (self.cell.width() - gaps * self.pad_col).max(0.0)
    }

    /// Total height of all rows including padding.
    pub fn rows_height(&self) -> f64 {
        let gaps = self.rows.len().saturating_sub(1) as f64;
        self.rows.iter().sum::<f64>() + gaps * self.pad_row
    }

    pub fn append_row(&mut self, size: f64) -> BoardResult<()> {
        check_row(size)?;
        self.rows.push(size);
        Ok(())
    }

    pub fn pop_row(&mut self) -> Option<f64> {
        self.rows.pop()
    }

    pub fn set_row(&mut self, row: usize, size: f64) -> BoardResult<()> {
        check_row(size)?;
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(row)
            .ok_or_else(|| BoardError::out_of_range(format!("row {row} of {len}")))?;
        *slot = size;
        Ok(())
    }

    pub fn append_col(&mut self, weight: f64) -> BoardResult<()> {
        check_weight(weight)?;
        self.weights.push(weight);
        Ok(())
    }

    pub fn pop_col(&mut self) -> Option<f64> {
        self.weights.pop()
    }

    /// Fresh cell covering rows `[row, row + row_span)` and columns `[col, col + col_span)`.
    pub fn get_cell(
        &self,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
        anchor: Anchor,
    ) -> BoardResult<Cell> {
        if self.rows.is_empty() {
            return Err(BoardError::empty_axis("grid has no rows"));
        }
        if self.weights.is_empty() {
            return Err(BoardError::empty_axis("grid has no columns"));
        }
        let row_end = span_end(row, row_span, self.rows.len(), "row")?;
        let col_end = span_end(col, col_span, self.weights.len(), "column")?;

        let weights = normalize(&self.weights)?;
        let free = self.free_width();
        let nw = self.cell.corner(Anchor::NorthWest);

        let x0 = nw.x + weights[..col].iter().sum::<f64>() * free + col as f64 * self.pad_col;
        let width = weights[col..col_end].iter().sum::<f64>() * free
            + (col_span - 1) as f64 * self.pad_col;

        let y0 = nw.y + self.rows[..row].iter().sum::<f64>() + row as f64 * self.pad_row;
        let height =
            self.rows[row..row_end].iter().sum::<f64>() + (row_span - 1) as f64 * self.pad_row;

        Ok(Cell::from_rect(
            Rect::new(x0, y0, x0 + width, y0 + height),
            anchor,
        ))
    }

    pub fn cell_at(&self, row: usize, col: usize, anchor: Anchor) -> BoardResult<Cell> {
        self.get_cell(row, col, 1, 1, anchor)
    }
}

fn span_end(start: usize, span: usize, len: usize, axis: &str) -> BoardResult<usize> {
    if span == 0 {
        return Err(BoardError::out_of_range(format!("{axis} span must be >= 1")));
    }
    match start.checked_add(span) {
        Some(end) if end <= len => Ok(end),
        _ => Err(BoardError::out_of_range(format!(
            "{axis} {start} with span {span} exceeds {len} {axis}s"
        ))),
    }
}

/// Where a child sits in a [`GridArtist`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSlot {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    /// The child's point placed on the same point of its sub-cell.
    pub anchor: Anchor,
    /// Child takes the sub-cell's size on every placement.
    pub stretch: bool,
}

impl GridSlot {
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            anchor: Anchor::NorthWest,
            stretch: false,
        }
    }

    pub fn span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn stretched(mut self) -> Self {
        self.stretch = true;
        self
    }
}

/// A [`Grid`] that owns children and re-places them on every cascade.
pub struct GridArtist<A: Artist = Box<dyn Artist>> {
    grid: Grid,
    slots: Vec<(GridSlot, A)>,
}

impl<A: Artist> GridArtist<A> {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            slots: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row/column edits go through here; wrap in a [`crate::Resize`] to cascade.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Adds a child; the slot must fit the current rows and columns.
    pub fn insert(&mut self, slot: GridSlot, artist: A) -> BoardResult<usize> {
        self.grid
            .get_cell(slot.row, slot.col, slot.row_span, slot.col_span, slot.anchor)?;
        self.slots.push((slot, artist));
        Ok(self.slots.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = (&GridSlot, &A)> {
        self.slots.iter().map(|(s, a)| (s, a))
    }

    pub fn artists_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.slots.iter_mut().map(|(_, a)| a)
    }

    pub fn get(&self, idx: usize) -> Option<&A> {
        self.slots.get(idx).map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut A> {
        self.slots.get_mut(idx).map(|(_, a)| a)
    }

    /// Sets each row to the tallest single-row child starting in it.
    ///
    /// Rows without such a child keep their size.
    pub fn fit_rows(&mut self) -> BoardResult<()> {
        let mut heights = vec![None::<f64>; self.grid.rows().len()];
        for (slot, artist) in &self.slots {
            if slot.row_span != 1 || slot.stretch {
                continue;
            }
            if let Some(h) = heights.get_mut(slot.row) {
                let child = artist.cell().height();
                *h = Some(h.map_or(child, |cur| cur.max(child)));
            }
        }
        for (row, h) in heights.into_iter().enumerate() {
            if let Some(h) = h {
                self.grid.set_row(row, h)?;
            }
        }
        Ok(())
    }
}

impl<A: Artist> Artist for GridArtist<A> {
    fn cell(&self) -> &Cell {
        self.grid.cell()
    }

    fn cell_mut(&mut self) -> &mut Cell {
        self.grid.cell_mut()
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        for (slot, artist) in &mut self.slots {
            let sub = match self
                .grid
                .get_cell(slot.row, slot.col, slot.row_span, slot.col_span, slot.anchor)
            {
                Ok(sub) => sub,
                Err(err) => {
                    tracing::warn!(%err, ?slot, "grid slot no longer fits, child left in place");
                    continue;
                }
            };
            let cell = artist.cell_mut();
            if slot.stretch {
                cell.set_size(sub.size());
            }
            cell.set_corner(slot.anchor, sub.corner(slot.anchor));
            artist.place(surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
