use std::collections::HashSet;

use crate::grid::Cell;

/// Cells currently claimed by the snake body and every live apple or barrier.
///
/// Only consulted when choosing where to put a relocated entity; movement
/// itself never checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    cells: HashSet<Cell>,
}

impl OccupancyIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `cell` as taken. Returns false if it already was.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for OccupancyIndex {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for OccupancyIndex {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}
