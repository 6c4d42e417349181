use rand::Rng;

use crate::config::{GridSize, CELL_SIZE_PX};
use crate::input::Direction;
use crate::occupancy::OccupancyIndex;

/// Rejection-sampling attempts before falling back to scanning every cell.
const RANDOM_CELL_ATTEMPTS: usize = 64;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`, without wrapping.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Coordinate space of the playing field: dimensions and wrap-around arithmetic.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cell_size_px: u16,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        debug_assert!(size.width > 0 && size.height > 0);

        Self {
            size,
            cell_size_px: CELL_SIZE_PX,
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        i32::from(self.size.width)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        i32::from(self.size.height)
    }

    /// Pixel edge length of one cell in the reference layout.
    #[must_use]
    pub fn cell_size_px(&self) -> u16 {
        self.cell_size_px
    }

    /// Cell where every round starts.
    #[must_use]
    pub fn center(&self) -> Cell {
        Cell::new(self.width() / 2, self.height() / 2)
    }

    /// Returns true when `cell` lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width() && cell.y < self.height()
    }

    /// Returns `cell` wrapped into bounds on both axes.
    #[must_use]
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: wrap_axis(cell.x, self.width()),
            y: wrap_axis(cell.y, self.height()),
        }
    }

    /// Draws a uniformly random cell that is not in `occupied`.
    ///
    /// # Panics
    ///
    /// Panics when `occupied` covers the whole grid. The engine never places
    /// more entities than the grid holds, so reaching this is a logic error.
    #[must_use]
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &OccupancyIndex,
    ) -> Cell {
        for _ in 0..RANDOM_CELL_ATTEMPTS {
            let candidate = Cell::new(
                rng.gen_range(0..self.width()),
                rng.gen_range(0..self.height()),
            );
            if !occupied.contains(candidate) {
                return candidate;
            }
        }

        // Crowded board: pick among the remaining free cells directly.
        let free: Vec<Cell> = self
            .cells()
            .filter(|cell| !occupied.contains(*cell))
            .collect();

        assert!(
            !free.is_empty(),
            "random_free_cell: no free cells on the board ({}×{})",
            self.size.width,
            self.size.height,
        );

        free[rng.gen_range(0..free.len())]
    }

    /// Iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::occupancy::OccupancyIndex;

    use super::{Cell, Grid};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn wrapping_keeps_coordinates_inside_bounds() {
        let grid = grid(10, 8);

        assert_eq!(grid.wrap(Cell::new(-1, 3)), Cell::new(9, 3));
        assert_eq!(grid.wrap(Cell::new(4, 8)), Cell::new(4, 0));
        assert_eq!(grid.wrap(Cell::new(10, -1)), Cell::new(0, 7));
        assert_eq!(grid.wrap(Cell::new(3, 3)), Cell::new(3, 3));
    }

    #[test]
    fn stepping_off_each_edge_reenters_opposite_edge() {
        let grid = grid(32, 24);

        let right = grid.wrap(Cell::new(31, 5).step(Direction::Right));
        let left = grid.wrap(Cell::new(0, 5).step(Direction::Left));
        let up = grid.wrap(Cell::new(7, 0).step(Direction::Up));
        let down = grid.wrap(Cell::new(7, 23).step(Direction::Down));

        assert_eq!(right, Cell::new(0, 5));
        assert_eq!(left, Cell::new(31, 5));
        assert_eq!(up, Cell::new(7, 23));
        assert_eq!(down, Cell::new(7, 0));
    }

    #[test]
    fn reference_grid_center() {
        let grid = grid(32, 24);

        assert_eq!(grid.center(), Cell::new(16, 12));
        assert_eq!(grid.cell_size_px(), 20);
    }

    #[test]
    fn random_free_cell_avoids_occupied_cells() {
        let grid = grid(8, 6);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: OccupancyIndex = (0..8).map(|x| Cell::new(x, 0)).collect();

        for _ in 0..200 {
            let cell = grid.random_free_cell(&mut rng, &occupied);
            assert!(grid.contains(cell));
            assert!(!occupied.contains(cell));
        }
    }

    #[test]
    fn random_free_cell_finds_the_last_free_cell() {
        let grid = grid(4, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let hole = Cell::new(3, 2);
        let occupied: OccupancyIndex = grid.cells().filter(|cell| *cell != hole).collect();

        assert_eq!(grid.random_free_cell(&mut rng, &occupied), hole);
    }

    #[test]
    fn random_free_cell_can_use_the_border() {
        let grid = grid(3, 3);
        let mut rng = StdRng::seed_from_u64(3);
        let occupied: OccupancyIndex = [Cell::new(1, 1)].into_iter().collect();

        let on_border = (0..100)
            .map(|_| grid.random_free_cell(&mut rng, &occupied))
            .any(|cell| cell.x == 0 || cell.y == 0);

        assert!(on_border);
    }

    #[test]
    #[should_panic(expected = "no free cells")]
    fn random_free_cell_panics_on_full_grid() {
        let grid = grid(2, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let occupied: OccupancyIndex = grid.cells().collect();

        let _ = grid.random_free_cell(&mut rng, &occupied);
    }
}
