//! Tick-driven Snake on a wrap-around grid, with apples that grow the snake
//! and rock/poison barriers that shorten it.
//!
//! [`round::RoundController`] is the engine; everything under
//! [`renderer`], [`terminal_runtime`] and [`input::InputHandler`] is the
//! terminal shell around it.

pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod logging;
pub mod occupancy;
pub mod placeable;
pub mod renderer;
pub mod round;
pub mod snake;
pub mod terminal_runtime;
