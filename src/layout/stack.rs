use crate::{
    draw::surface::Surface,
    layout::{anchor::Anchor, cascade::Artist, cell::Cell},
};

/// Vertical stack of children aligned to one edge.
///
/// The size is taken from the children once, in [`Stack::new`]. Later changes
/// to a child's footprint do not resize the stack; call [`Stack::remeasure`].
pub struct Stack<A: Artist = Box<dyn Artist>> {
    cell: Cell,
    flush: Anchor,
    children: Vec<A>,
}

impl<A: Artist> Stack<A> {
    pub fn new(children: Vec<A>, flush: Anchor, anchor: Anchor) -> Self {
        let mut stack = Self {
            cell: Cell::new(0.0, 0.0, 0.0, 0.0, anchor),
            flush,
            children,
        };
        stack.remeasure();
        stack
    }

    pub fn flush(&self) -> Anchor {
        self.flush
    }

    pub fn children(&self) -> &[A] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [A] {
        &mut self.children
    }

    /// Height = sum of child heights, width = widest child (0 when empty).
    pub fn remeasure(&mut self) {
        let height: f64 = self.children.iter().map(|c| c.cell().height()).sum();
        let width = self
            .children
            .iter()
            .map(|c| c.cell().width())
            .fold(0.0, f64::max);
        self.cell.set_width(width);
        self.cell.set_height(height);
    }
}

impl<A: Artist> Artist for Stack<A> {
    fn cell(&self) -> &Cell {
        &self.cell
    }

    fn cell_mut(&mut self) -> &mut Cell {
        &mut self.cell
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        let x = self.cell.x_at(self.flush);
        let mut y = self.cell.y_at(Anchor::North);
        for child in &mut self.children {
            let cell = child.cell_mut();
            cell.set_x_at(self.flush, x);
            cell.set_y_at(Anchor::North, y);
            y += cell.height();
            child.place(surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;
