use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use crate::config::SNAKE_COLOR_CHART;
use crate::grid::{Cell, Grid};
use crate::input::{direction_change_is_valid, Direction};

/// Mutable snake state and movement buffering behavior.
///
/// `length` is the target body length. Collision handling changes it between
/// ticks and the body catches up: growth is realised by keeping the tail,
/// shrinking by dropping tail segments straight away.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
    last_erased: Vec<Cell>,
    color: Color,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction, color: Color) -> Self {
        Self::from_segments(vec![start], direction, color)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction, color: Color) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head");

        Self {
            length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            last_erased: Vec::new(),
            color,
        }
    }

    /// Stages a direction for the next tick, last write wins.
    ///
    /// A reversal of the committed direction is silently dropped, so the head
    /// can never turn back into the neck.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Applies one movement step: commit the staged turn, advance the head
    /// with wrap-around and drop the tail beyond the target length.
    pub fn tick(&mut self, grid: &Grid) {
        self.last_erased.clear();

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = grid.wrap(self.head().step(self.direction));
        self.body.push_front(next_head);
        self.trim_to_length();
    }

    /// Raises the target length by one.
    ///
    /// The extra segment is the tail cell that would otherwise be dropped:
    /// if this tick already dropped it, it is put back now, else the next
    /// tick keeps it.
    pub fn grow(&mut self) {
        self.length += 1;

        if self.body.len() < self.length {
            if let Some(tail) = self.last_erased.pop() {
                self.body.push_back(tail);
            }
        }
    }

    /// Lowers the target length by one (never below one) and trims the tail now.
    pub fn shrink_by_one(&mut self) {
        self.length = self.length.saturating_sub(1).max(1);
        self.trim_to_length();
    }

    /// Cuts the snake back to its head.
    pub fn truncate_to_head(&mut self) {
        self.length = 1;
        self.trim_to_length();
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Starts over as a single segment at `start`, heading in a random
    /// direction with a freshly picked color.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, start: Cell) {
        self.body.clear();
        self.body.push_front(start);
        self.length = 1;
        self.pending_direction = None;
        self.last_erased.clear();
        self.direction = random_direction(rng);
        self.color = random_color(rng);
    }

    fn trim_to_length(&mut self) {
        while self.body.len() > self.length {
            if let Some(tail) = self.body.pop_back() {
                self.last_erased.push(tail);
            }
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the length the body is kept at.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.length
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Cells given up during the current tick, tail first.
    #[must_use]
    pub fn last_erased(&self) -> &[Cell] {
        &self.last_erased
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

/// Picks one of the four directions uniformly.
#[must_use]
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

/// Picks a body color from [`SNAKE_COLOR_CHART`].
#[must_use]
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    SNAKE_COLOR_CHART
        .choose(rng)
        .copied()
        .unwrap_or(SNAKE_COLOR_CHART[0])
}
