use toroidal_snake::config::{GameConfig, GridSize};
use toroidal_snake::grid::Cell;
use toroidal_snake::input::{Direction, GameInput};
use toroidal_snake::placeable::{Apple, Barrier, BarrierKind, BarrierRespawn, Placeable};
use toroidal_snake::round::{RoundController, RoundStatus};
use toroidal_snake::snake::Snake;

const COLOR: ratatui::style::Color = ratatui::style::Color::Rgb(255, 255, 0);

#[test]
fn stepwise_eating_wrapping_and_poison() {
    let mut state = RoundController::new_with_seed(
        GridSize {
            width: 6,
            height: 4,
        },
        42,
    );
    state.snake = Snake::new(Cell::new(4, 1), Direction::Right, COLOR);
    state.apple = Apple::new(Cell::new(5, 1));
    state.barriers = vec![Barrier::new(Cell::new(0, 2), BarrierKind::Poison)];

    // Eat at the right edge.
    let outcome = state.step();
    assert!(outcome.ate);
    assert_eq!(state.snake.target_length(), 2);
    assert_eq!(state.snake.head(), Cell::new(5, 1));

    // Park the relocated apple out of the way for the rest of the run.
    state.apple = Apple::new(Cell::new(2, 3));

    // Wrap through the right edge, then turn down onto the poison.
    state.step();
    assert_eq!(state.snake.head(), Cell::new(0, 1));

    state.apply_input(GameInput::Direction(Direction::Down));
    let outcome = state.step();
    assert_eq!(outcome.barrier_hits, vec![BarrierKind::Poison]);
    assert_eq!(state.snake.head(), Cell::new(0, 2));
    assert_eq!(state.snake.target_length(), 1);
    assert_eq!(state.snake.len(), 1);
    assert_ne!(state.barriers[0].position(), Cell::new(0, 2));
    assert_eq!(state.status(), RoundStatus::Running);
}

#[test]
fn same_seed_replays_identically() {
    let config = GameConfig {
        grid_width: 10,
        grid_height: 8,
        seed: Some(2024),
        barrier_respawn: BarrierRespawn::KeepKind,
        ..GameConfig::default()
    };
    let mut first = RoundController::new(&config);
    let mut second = RoundController::new(&config);
    let turns = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    for tick in 0..300 {
        if tick % 7 == 0 {
            let turn = turns[(tick / 7) % turns.len()];
            first.submit_direction(turn);
            second.submit_direction(turn);
        }

        assert_eq!(first.step(), second.step());
        assert_eq!(first.snapshot(), second.snapshot());
    }
}

#[test]
fn keep_kind_policy_preserves_barrier_kinds_across_hits() {
    let config = GameConfig {
        seed: Some(5),
        barrier_count: 1,
        barrier_respawn: BarrierRespawn::KeepKind,
        ..GameConfig::default()
    };
    let mut state = RoundController::new(&config);
    state.snake = Snake::from_segments(
        vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)],
        Direction::Right,
        COLOR,
    );
    state.apple = Apple::new(Cell::new(20, 20));
    state.barriers = vec![Barrier::new(Cell::new(4, 3), BarrierKind::Poison)];

    state.step();

    assert_eq!(state.barriers[0].barrier_kind(), BarrierKind::Poison);
    assert_eq!(state.snake.target_length(), 2);
}
