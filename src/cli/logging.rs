//! Logging initialization

use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on debug flag
///
/// Logs always go to stderr. With `debug`, the level defaults to `debug` and a
/// copy is written to a temporary file whose path is returned.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
        return None;
    }

    let log_path = tempfile::Builder::new()
        .prefix("ads-dashboard-")
        .suffix(".log")
        .tempfile()
        .and_then(|f| f.keep().map_err(|e| e.error))
        .map(|(_, path)| path)
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("ads-dashboard-{}.log", std::process::id()))
        });

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_path.display(), e);
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
            return None;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(Mutex::new(file)))
        .with_env_filter(filter)
        .with_ansi(false) // shared with the log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(log_path)
}
