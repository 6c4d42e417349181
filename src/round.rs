use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Color;

use crate::config::{GameConfig, GridSize};
use crate::grid::{Cell, Grid};
use crate::input::{Direction, GameInput};
use crate::occupancy::OccupancyIndex;
use crate::placeable::{Apple, Barrier, BarrierKind, BarrierRespawn, Placeable, PlaceableKind};
use crate::snake::{random_color, Snake};

/// Lifecycle flag checked by the outer driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundStatus {
    Running,
    Paused,
    Stopped,
}

/// What happened during one [`RoundController::step`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TickOutcome {
    pub ate: bool,
    pub barrier_hits: Vec<BarrierKind>,
    pub reset: bool,
}

/// Barrier as seen by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BarrierView {
    pub cell: Cell,
    pub kind: BarrierKind,
    pub color: Color,
}

/// Read-only picture of the board after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,
    pub snake_segments: Vec<Cell>,
    pub snake_color: Color,
    pub head_direction: Direction,
    pub apple: (Cell, Color),
    pub barriers: Vec<BarrierView>,
    /// Cells that became empty this tick.
    pub erased_cells: Vec<Cell>,
    /// Set after a reset (and before the first tick): repaint everything.
    pub full_repaint_requested: bool,
    pub status: RoundStatus,
    pub round: u32,
    pub tick: u64,
}

/// Orchestrates one round: input, movement, collisions, respawns, resets.
#[derive(Debug, Clone)]
pub struct RoundController {
    pub snake: Snake,
    pub apple: Apple,
    pub barriers: Vec<Barrier>,
    grid: Grid,
    occupancy: OccupancyIndex,
    erased: Vec<Cell>,
    full_repaint: bool,
    status: RoundStatus,
    barrier_respawn: BarrierRespawn,
    round: u32,
    tick_count: u64,
    rng: StdRng,
}

impl RoundController {
    /// Creates a round from validated settings.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_rng(
            Grid::new(config.grid_size()),
            config.barrier_count,
            config.barrier_respawn,
            rng,
        )
    }

    /// Creates a deterministic round with the default barrier setup.
    #[must_use]
    pub fn new_with_seed(size: GridSize, seed: u64) -> Self {
        let config = GameConfig {
            grid_width: size.width,
            grid_height: size.height,
            seed: Some(seed),
            ..GameConfig::default()
        };
        Self::new(&config)
    }

    fn with_rng(
        grid: Grid,
        barrier_count: usize,
        barrier_respawn: BarrierRespawn,
        mut rng: StdRng,
    ) -> Self {
        let color = random_color(&mut rng);
        let snake = Snake::new(grid.center(), Direction::Right, color);

        let mut occupancy: OccupancyIndex = snake.segments().copied().collect();
        let apple = Apple::spawn(&mut rng, &grid, &occupancy);
        occupancy.insert(apple.position());

        let mut barriers = Vec::with_capacity(barrier_count);
        for _ in 0..barrier_count {
            let barrier = Barrier::spawn(&mut rng, &grid, &occupancy);
            occupancy.insert(barrier.position());
            barriers.push(barrier);
        }

        Self {
            snake,
            apple,
            barriers,
            grid,
            occupancy,
            erased: Vec::new(),
            full_repaint: true,
            status: RoundStatus::Running,
            barrier_respawn,
            round: 1,
            tick_count: 0,
            rng,
        }
    }

    /// Stages a turn for the next step.
    ///
    /// Reversals are dropped silently, as is any turn while the round is not
    /// running.
    pub fn submit_direction(&mut self, direction: Direction) {
        if self.status != RoundStatus::Running {
            return;
        }
        self.snake.set_pending_direction(direction);
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.submit_direction(direction),
            GameInput::Pause => {
                self.status = match self.status {
                    RoundStatus::Running => RoundStatus::Paused,
                    RoundStatus::Paused => RoundStatus::Running,
                    RoundStatus::Stopped => RoundStatus::Stopped,
                };
            }
            GameInput::Quit => self.stop(),
        }
    }

    pub fn stop(&mut self) {
        if self.status != RoundStatus::Stopped {
            info!(
                "stopping after {} ticks in round {}, length {}",
                self.tick_count,
                self.round,
                self.snake.target_length()
            );
        }
        self.status = RoundStatus::Stopped;
    }

    /// Advances the simulation by one tick.
    ///
    /// Order: move, eat, barriers (only for snakes longer than one),
    /// self-collision reset, then refresh occupancy and erased cells.
    pub fn step(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        self.full_repaint = false;
        self.erased.clear();
        if self.status != RoundStatus::Running {
            return outcome;
        }

        self.tick_count += 1;
        self.snake.tick(&self.grid);

        if self.snake.head() == self.apple.position() {
            self.apply_contact(self.apple.kind());
            let occupied = self.current_occupancy();
            let eaten_at = self.apple.relocate(&mut self.rng, &self.grid, &occupied);
            debug!(
                "apple eaten at {eaten_at:?}, length {}, next apple at {:?}",
                self.snake.target_length(),
                self.apple.position()
            );
            outcome.ate = true;
        }

        if self.snake.target_length() > 1 {
            self.resolve_barriers(&mut outcome);
        }

        if self.snake.check_self_collision() {
            self.reset_round();
            outcome.reset = true;
        }

        self.occupancy = self.current_occupancy();
        self.erased = self
            .snake
            .last_erased()
            .iter()
            .copied()
            .filter(|cell| !self.occupancy.contains(*cell))
            .collect();

        outcome
    }

    fn resolve_barriers(&mut self, outcome: &mut TickOutcome) {
        for index in 0..self.barriers.len() {
            let position = self.barriers[index].position();
            if !self.snake.occupies(position) {
                continue;
            }

            let kind = self.barriers[index].barrier_kind();
            self.apply_contact(self.barriers[index].kind());

            let occupied = self.current_occupancy();
            self.barriers[index].respawn(
                &mut self.rng,
                &self.grid,
                &occupied,
                self.barrier_respawn,
            );
            debug!(
                "{kind:?} hit at {position:?}, length {}, barrier moved to {:?}",
                self.snake.target_length(),
                self.barriers[index].position()
            );
            outcome.barrier_hits.push(kind);
        }
    }

    /// What the snake does when it touches an entity of `kind`.
    fn apply_contact(&mut self, kind: PlaceableKind) {
        match kind {
            PlaceableKind::Apple => self.snake.grow(),
            PlaceableKind::Barrier(BarrierKind::Rock) => self.snake.truncate_to_head(),
            PlaceableKind::Barrier(BarrierKind::Poison) => self.snake.shrink_by_one(),
        }
    }

    fn reset_round(&mut self) {
        info!(
            "round {} over: bit itself at length {}",
            self.round,
            self.snake.target_length()
        );

        self.snake.reset(&mut self.rng, self.grid.center());

        let occupied = self.current_occupancy();
        self.apple.relocate(&mut self.rng, &self.grid, &occupied);
        for index in 0..self.barriers.len() {
            let occupied = self.current_occupancy();
            self.barriers[index].respawn(
                &mut self.rng,
                &self.grid,
                &occupied,
                self.barrier_respawn,
            );
        }

        self.round += 1;
        self.full_repaint = true;
    }

    fn current_occupancy(&self) -> OccupancyIndex {
        let mut occupied: OccupancyIndex = self.snake.segments().copied().collect();
        occupied.insert(self.apple.position());
        occupied.extend(self.barriers.iter().map(Placeable::position));
        occupied
    }

    /// Copies out everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.size(),
            snake_segments: self.snake.segments().copied().collect(),
            snake_color: self.snake.color(),
            head_direction: self.snake.direction(),
            apple: (self.apple.position(), self.apple.color()),
            barriers: self
                .barriers
                .iter()
                .map(|barrier| BarrierView {
                    cell: barrier.position(),
                    kind: barrier.barrier_kind(),
                    color: barrier.color(),
                })
                .collect(),
            erased_cells: self.erased.clone(),
            full_repaint_requested: self.full_repaint,
            status: self.status,
            round: self.round,
            tick: self.tick_count,
        }
    }

    /// Cells claimed at the end of the last step.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
