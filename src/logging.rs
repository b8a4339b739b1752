use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Settings;

/// Initializes daily-rolling file logging under `~/.twindir/logs`.
///
/// The TUI owns stdout/stderr, so logs only ever go to the file. Returns the
/// appender guard, which must stay alive for the duration of the program, or
/// `None` when no log directory is available (logging is then disabled, not
/// fatal).
pub fn init() -> Option<WorkerGuard> {
    let log_dir: PathBuf = Settings::config_dir()?.join("logs");
    fs::create_dir_all(&log_dir).ok()?;

    let file = rolling::daily(&log_dir, "twindir.log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();
    Some(guard)
}
