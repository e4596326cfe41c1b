//! Logging setup for the Strand CLI

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use strand_core::config::constants::LOG_DIR;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate unique log file path based on current directory, PID, and timestamp
pub fn get_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let current_dir = std::env::current_dir()?;
    let folder_name = current_dir
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("unknown"))
        .to_string_lossy();

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let pid = std::process::id();

    let logs_dir = std::env::current_exe()?
        .parent()
        .ok_or("Cannot get executable parent directory")?
        .join(LOG_DIR);

    std::fs::create_dir_all(&logs_dir)?;

    let log_filename = format!("{folder_name}_{pid}_{timestamp}.log");
    Ok(logs_dir.join(log_filename))
}

/// Create log file with proper options
pub fn create_log_file() -> Result<std::fs::File, Box<dyn std::error::Error>> {
    let log_path = get_log_file_path()?;

    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    Ok(log_file)
}

/// Console logging on stderr (RUST_LOG, default info) plus a debug-level log file.
///
/// Stdout is reserved for pipeline output. If the log file cannot be created
/// only console logging is installed.
pub fn init() {
    let file_layer = create_log_file().ok().map(|log_file| {
        fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(file_layer)
        .init();
}
