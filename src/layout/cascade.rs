//! Resize cascade: geometry writes re-place an artist and everything below it.
//!
//! A [`Resize`] handle fires the artist's [`Artist::place`] after every
//! mutation. [`Resize::lock`] hands out a [`ResizeLock`] that suppresses those
//! calls and fires exactly one placement when it is dropped, on every exit path.
//! The lock borrows the handle mutably and offers no `lock` of its own, so
//! nested acquisition does not type-check.

use crate::{
    draw::surface::Surface,
    foundation::core::{Point, Size},
    layout::{anchor::Anchor, cell::Cell},
};

/// An element with geometry that pushes its placement to a [`Surface`].
pub trait Artist {
    fn cell(&self) -> &Cell;

    /// Raw geometry access. Writes through this do not cascade on their own.
    fn cell_mut(&mut self) -> &mut Cell;

    /// Recomputes child and primitive coordinates from the current cell.
    fn place(&mut self, surface: &mut dyn Surface);
}

impl<A: Artist + ?Sized> Artist for Box<A> {
    fn cell(&self) -> &Cell {
        (**self).cell()
    }

    fn cell_mut(&mut self) -> &mut Cell {
        (**self).cell_mut()
    }

    fn place(&mut self, surface: &mut dyn Surface) {
        (**self).place(surface)
    }
}

/// Geometry mutations shared by [`Resize`] and [`ResizeLock`].
pub trait EditGeometry {
    type Target: Artist + ?Sized;

    /// Runs `f` on the artist, then cascades (or defers, when locked).
    fn update<R>(&mut self, f: impl FnOnce(&mut Self::Target) -> R) -> R;

    fn set_x(&mut self, x: f64) {
        self.update(|a| a.cell_mut().set_x(x))
    }

    fn set_y(&mut self, y: f64) {
        self.update(|a| a.cell_mut().set_y(y))
    }

    fn set_width(&mut self, width: f64) {
        self.update(|a| a.cell_mut().set_width(width))
    }

    fn set_height(&mut self, height: f64) {
        self.update(|a| a.cell_mut().set_height(height))
    }

    fn set_size(&mut self, size: Size) {
        self.update(|a| a.cell_mut().set_size(size))
    }

    fn set_corner(&mut self, corner: Anchor, p: Point) {
        self.update(|a| a.cell_mut().set_corner(corner, p))
    }

    fn scale(&mut self, factor: f64) {
        self.update(|a| a.cell_mut().scale(factor))
    }

    fn bind_to(&mut self, other: &Cell) {
        self.update(|a| a.cell_mut().bind_to(other))
    }
}

/// Unlocked mutation handle: every write re-places the artist immediately.
pub struct Resize<'a, A: Artist + ?Sized> {
    artist: &'a mut A,
    surface: &'a mut dyn Surface,
}

impl<'a, A: Artist + ?Sized> Resize<'a, A> {
    pub fn new(artist: &'a mut A, surface: &'a mut dyn Surface) -> Self {
        Self { artist, surface }
    }

    pub fn artist(&self) -> &A {
        &*self.artist
    }

    /// Fires one placement without changing geometry.
    pub fn place(&mut self) {
        self.artist.place(&mut *self.surface);
    }

    /// Suppresses placement until the returned guard is dropped.
    pub fn lock(&mut self) -> ResizeLock<'_, A> {
        ResizeLock {
            artist: &mut *self.artist,
            surface: &mut *self.surface,
        }
    }
}

impl<A: Artist + ?Sized> EditGeometry for Resize<'_, A> {
    type Target = A;

    fn update<R>(&mut self, f: impl FnOnce(&mut A) -> R) -> R {
        let out = f(&mut *self.artist);
        self.artist.place(&mut *self.surface);
        out
    }
}

/// Scoped batch of mutations; one placement fires on drop.
pub struct ResizeLock<'a, A: Artist + ?Sized> {
    artist: &'a mut A,
    surface: &'a mut dyn Surface,
}

impl<A: Artist + ?Sized> ResizeLock<'_, A> {
    pub fn artist(&self) -> &A {
        &*self.artist
    }
}

impl<A: Artist + ?Sized> EditGeometry for ResizeLock<'_, A> {
    type Target = A;

    fn update<R>(&mut self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut *self.artist)
    }
}

impl<A: Artist + ?Sized> Drop for ResizeLock<'_, A> {
    fn drop(&mut self) {
        self.artist.place(&mut *self.surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cascade.rs"]
mod tests;
