use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::LoggingError;

const LOG_FILE_NAME: &str = "toroidal-snake.log";

/// Log file used when none is given on the command line.
///
/// The terminal owns stdout while the game runs, so logs always go to a file.
#[must_use]
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Installs a global `log` backend writing to `path`, truncating any previous run.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}
