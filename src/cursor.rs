//! Viewport-relative cursor positions.
//!
//! A [`Cursor`] is a plain (row, column) pair. Rows are signed: the enclosing
//! display scrolls over time, and a label pushed above the visible window has
//! a negative row. Several labels rendering onto one physical row share a
//! single position through [`SharedCursor`], so each observes the column
//! advances of its siblings.

use std::sync::Arc;

use parking_lot::Mutex;

/// A (row, column) position in viewport-relative coordinates.
///
/// `row` may be negative, meaning the position has scrolled above the visible
/// viewport. `col` is the current horizontal offset in terminal columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Row within the visible window; negative when scrolled above it.
    pub row: i32,
    /// Horizontal offset in columns.
    pub col: u16,
}

impl Cursor {
    /// Create a cursor at the given position.
    #[must_use]
    pub const fn new(row: i32, col: u16) -> Self {
        Self { row, col }
    }

    /// The top-left corner of the viewport.
    #[must_use]
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// A cloneable, shared handle to a [`Cursor`].
///
/// The owning layout hands the same handle to every label that writes on one
/// physical row. Each access locks for the duration of a single read or
/// write, never across calls, so a redraw pass always sees the current
/// position even after siblings have moved it.
///
/// # Example
///
/// ```
/// use liveline::cursor::{Cursor, SharedCursor};
///
/// let pos = SharedCursor::at(3, 0);
/// let sibling = pos.clone();
/// sibling.set_col(10);
/// assert_eq!(pos.get(), Cursor::new(3, 10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedCursor(Arc<Mutex<Cursor>>);

impl SharedCursor {
    /// Create a shared handle from an initial cursor.
    #[must_use]
    pub fn new(cursor: Cursor) -> Self {
        Self(Arc::new(Mutex::new(cursor)))
    }

    /// Create a shared handle at the given position.
    #[must_use]
    pub fn at(row: i32, col: u16) -> Self {
        Self::new(Cursor::new(row, col))
    }

    /// Snapshot the current position.
    #[must_use]
    pub fn get(&self) -> Cursor {
        *self.0.lock()
    }

    /// Current row.
    #[must_use]
    pub fn row(&self) -> i32 {
        self.0.lock().row
    }

    /// Current column.
    #[must_use]
    pub fn col(&self) -> u16 {
        self.0.lock().col
    }

    /// Replace the whole position.
    pub fn set(&self, cursor: Cursor) {
        *self.0.lock() = cursor;
    }

    /// Set the row, keeping the column.
    pub fn set_row(&self, row: i32) {
        self.0.lock().row = row;
    }

    /// Set the column, keeping the row.
    pub fn set_col(&self, col: u16) {
        self.0.lock().col = col;
    }

    /// Add a signed delta to the row.
    pub fn adjust_row(&self, delta: i32) {
        self.0.lock().row += delta;
    }

    /// True if both handles point at the same underlying cursor.
    #[must_use]
    pub fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = SharedCursor::at(5, 0);
        let b = a.clone();
        b.set_col(7);
        b.adjust_row(-2);
        assert_eq!(a.get(), Cursor::new(3, 7));
        assert!(a.same_handle(&b));
    }

    #[test]
    fn independent_handles_do_not_share() {
        let a = SharedCursor::at(1, 1);
        let b = SharedCursor::at(1, 1);
        b.set_col(9);
        assert_eq!(a.col(), 1);
        assert!(!a.same_handle(&b));
    }

    #[test]
    fn row_may_go_negative() {
        let pos = SharedCursor::at(0, 0);
        pos.adjust_row(-3);
        assert_eq!(pos.row(), -3);
    }
}
