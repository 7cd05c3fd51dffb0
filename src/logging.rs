use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_DIR_ENV_VAR;

const DEFAULT_DIRECTIVE: &str = "csv_cleaner=info";

/// Initializes logging: human-readable lines on stderr, plus daily-rotated
/// JSON files when `CSV_CLEANER_LOG_DIR` is set.
///
/// Stdout is left alone since cleaned CSV may be streamed there. Keep the
/// returned guard alive until exit so buffered file logs get flushed.
pub fn init_logging(verbose: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "csv_cleaner=debug" } else { DEFAULT_DIRECTIVE })
    });

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => {
            // Fall back to console-only logging if the directory is unusable
            if let Err(e) = fs::create_dir_all(&dir) {
                eprintln!("could not create log directory '{}': {}", dir, e);
                (None, None)
            } else {
                let file_appender = tracing_appender::rolling::daily(&dir, "csv_cleaner.log");
                let (writer, guard) = tracing_appender::non_blocking(file_appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
