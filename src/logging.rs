//! File logging for the terminal binary.
//!
//! The terminal is in raw mode on the alternate screen while playing, so
//! nothing may go to stdout or stderr. Logs go to a file, and only when
//! `BLOCKFALL_LOG_PATH` names one.

use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// Log file path. Logging is off when unset.
pub const LOG_PATH_ENV: &str = "BLOCKFALL_LOG_PATH";
/// Level filter (`error`..`trace`), `info` by default.
pub const LOG_LEVEL_ENV: &str = "BLOCKFALL_LOG_LEVEL";

/// Initialize logging from the environment. Returns whether a logger was installed.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV) else {
        return Ok(false);
    };
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::Info);
    init_log(level, path)?;
    Ok(true)
}

/// Send every record at or above `level` to the file at `file_path`.
pub fn init_log(level: LevelFilter, file_path: impl AsRef<std::path::Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} {t} {m}{n}",
        )))
        .build(file_path)
        .with_context(|| format!("opening log file {}", file_path.display()))?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
