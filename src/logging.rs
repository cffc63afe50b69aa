use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::config::{data_dir, AppConfig};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "SATSANG_LOG";

const LOG_FILE_NAME: &str = "satsang-manager.log";

/// Install the global logger, appending to a file in the data directory.
///
/// The terminal is in raw mode on the alternate screen while the app runs, so
/// nothing may be written to stdout or stderr. Returns `None` when the
/// platform has no data directory, in which case logging stays disabled.
pub fn init(config: &AppConfig) -> Result<Option<PathBuf>> {
    let Some(dir) = data_dir() else {
        return Ok(None);
    };
    init_in(config, &dir).map(Some)
}

fn init_in(config: &AppConfig, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).context("failed to create log directory")?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::new()
        .parse_filters(&config.log_level)
        .parse_env(Env::new().filter(LOG_ENV))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .context("failed to install logger")?;

    Ok(path)
}
