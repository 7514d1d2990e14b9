//! File logging setup.
//!
//! Library code logs through the `log` macros; this module installs a `fern`
//! dispatcher writing them to a file when logging is enabled in the config.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{Config, LoggingConfig};
use crate::constants::LOG_FILE_NAME;

/// Format a record the way it appears in the log file.
pub fn format_line(time: &str, level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{time} {level:<5} {target}] {message}")
}

/// Default log file location inside the data directory.
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(Config::get_data_dir()?.join(LOG_FILE_NAME))
}

/// Install the global logger. Returns the log file path when logging is enabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }
    let path = get_log_file_path()?;
    init_with_path(config, path.clone())?;
    Ok(Some(path))
}

/// Install the global logger writing to `path`.
pub fn init_with_path(config: &LoggingConfig, path: PathBuf) -> Result<()> {
    let level = config.level_filter()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            out.finish(format_args!(
                "{}",
                format_line(&time, record.level(), record.target(), message)
            ))
        })
        .level(level)
        .level_for("reqwest", log::LevelFilter::Warn)
        .level_for("hyper_util", log::LevelFilter::Warn)
        .chain(file)
        .apply()
        .context("Logger already initialized")?;

    Ok(())
}
