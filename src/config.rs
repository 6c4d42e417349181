use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::placeable::BarrierRespawn;

const APP_DIR_NAME: &str = "toroidal-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Playing field width in pixels of the reference layout.
pub const SCREEN_WIDTH_PX: u16 = 640;

/// Playing field height in pixels of the reference layout.
pub const SCREEN_HEIGHT_PX: u16 = 480;

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE_PX: u16 = 20;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = SCREEN_WIDTH_PX / CELL_SIZE_PX;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = SCREEN_HEIGHT_PX / CELL_SIZE_PX;

/// Simulation cadence.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Upper bound accepted for `ticks_per_second`.
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// Number of barriers live during a round.
pub const DEFAULT_BARRIER_COUNT: usize = 3;

pub const BOARD_BACKGROUND_COLOR: Color = Color::Rgb(0, 0, 0);
pub const BORDER_COLOR: Color = Color::Rgb(93, 216, 228);
pub const APPLE_COLOR: Color = Color::Rgb(255, 0, 0);
pub const POISON_COLOR: Color = Color::Rgb(0, 255, 0);
pub const ROCK_COLOR: Color = Color::Rgb(192, 192, 192);
pub const HUD_TEXT_COLOR: Color = Color::Rgb(93, 216, 228);

/// Body colors a snake may be given at the start of each round.
pub const SNAKE_COLOR_CHART: [Color; 4] = [
    Color::Rgb(255, 255, 0),
    Color::Rgb(255, 0, 255),
    Color::Rgb(0, 0, 255),
    Color::Rgb(0, 255, 255),
];

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// User-tunable settings, read from a JSON file and overridable from the CLI.
///
/// Every field is optional in the file; absent fields keep their defaults.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub ticks_per_second: u32,
    pub barrier_count: usize,
    /// Fixed RNG seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
    pub barrier_respawn: BarrierRespawn,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            barrier_count: DEFAULT_BARRIER_COUNT,
            seed: None,
            barrier_respawn: BarrierRespawn::default(),
        }
    }
}

impl GameConfig {
    /// Loads settings from the platform config directory.
    ///
    /// Returns defaults when no config file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from `path`, treating a missing file as "all defaults".
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(ConfigError::Invalid(format!(
                "ticks_per_second must be within 1..={MAX_TICKS_PER_SECOND}, got {}",
                self.ticks_per_second
            )));
        }

        // Snake head and apple plus every barrier, with room left to move.
        let fits = self
            .barrier_count
            .checked_add(3)
            .is_some_and(|required| required <= self.grid_size().total_cells());
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "a {}x{} grid cannot hold {} barriers",
                self.grid_width, self.grid_height, self.barrier_count
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    /// Wall-clock time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

/// Returns the platform-correct config file path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
