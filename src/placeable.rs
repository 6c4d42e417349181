use rand::Rng;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::config::{APPLE_COLOR, POISON_COLOR, ROCK_COLOR};
use crate::grid::{Cell, Grid};
use crate::occupancy::OccupancyIndex;

/// What a one-cell entity does when the snake reaches it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PlaceableKind {
    Apple,
    Barrier(BarrierKind),
}

/// Entity occupying exactly one cell that can be moved to a free cell.
pub trait Placeable {
    fn position(&self) -> Cell;

    fn color(&self) -> Color;

    fn kind(&self) -> PlaceableKind;

    fn place_at(&mut self, cell: Cell);

    /// Moves to a random cell outside `occupied` and returns the previous cell.
    fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        occupied: &OccupancyIndex,
    ) -> Cell {
        let previous = self.position();
        self.place_at(grid.random_free_cell(rng, occupied));
        previous
    }
}

/// Food: reaching it grows the snake by one segment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns an apple in an unoccupied cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: &Grid, occupied: &OccupancyIndex) -> Self {
        Self::new(grid.random_free_cell(rng, occupied))
    }
}

impl Placeable for Apple {
    fn position(&self) -> Cell {
        self.position
    }

    fn color(&self) -> Color {
        APPLE_COLOR
    }

    fn kind(&self) -> PlaceableKind {
        PlaceableKind::Apple
    }

    fn place_at(&mut self, cell: Cell) {
        self.position = cell;
    }
}

/// Obstacle flavour.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BarrierKind {
    /// Cuts the snake back to its head.
    Rock,
    /// Takes one segment off the tail.
    Poison,
}

impl BarrierKind {
    /// Picks rock or poison with equal odds.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Rock
        } else {
            Self::Poison
        }
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Rock => ROCK_COLOR,
            Self::Poison => POISON_COLOR,
        }
    }
}

/// Whether a triggered barrier keeps its kind when it moves.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarrierRespawn {
    /// Same kind and color at the new cell.
    KeepKind,
    /// Fresh random kind at the new cell.
    #[default]
    Reroll,
}

/// Obstacle cell that shortens the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Barrier {
    position: Cell,
    kind: BarrierKind,
}

impl Barrier {
    #[must_use]
    pub fn new(position: Cell, kind: BarrierKind) -> Self {
        Self { position, kind }
    }

    /// Spawns a barrier of random kind in an unoccupied cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: &Grid, occupied: &OccupancyIndex) -> Self {
        let position = grid.random_free_cell(rng, occupied);
        Self::new(position, BarrierKind::random(rng))
    }

    #[must_use]
    pub fn barrier_kind(&self) -> BarrierKind {
        self.kind
    }

    /// Relocates after being triggered, re-rolling the kind when `policy` says so.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        occupied: &OccupancyIndex,
        policy: BarrierRespawn,
    ) -> Cell {
        let previous = self.relocate(rng, grid, occupied);
        if policy == BarrierRespawn::Reroll {
            self.kind = BarrierKind::random(rng);
        }
        previous
    }
}

impl Placeable for Barrier {
    fn position(&self) -> Cell {
        self.position
    }

    fn color(&self) -> Color {
        self.kind.color()
    }

    fn kind(&self) -> PlaceableKind {
        PlaceableKind::Barrier(self.kind)
    }

    fn place_at(&mut self, cell: Cell) {
        self.position = cell;
    }
}
