//! Logging Infrastructure
//!
//! `RUST_LOG` takes precedence over the configured level.
//! With a log directory the output goes to a daily rolling file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "directory-server";

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Initialize the logger with optional file output
pub fn init_logger(log_level: &str, log_dir: Option<&str>) -> std::io::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        std::fs::create_dir_all(log_path)?;
        let file_appender = tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX);
        subscriber.with_ansi(false).with_writer(file_appender).init();
        return Ok(());
    }

    subscriber.init();
    Ok(())
}
