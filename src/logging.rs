use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config;

/// `RUST_LOG` may be a bare level, which is scoped to this crate, or a full set of
/// directives, which is used as given.
fn filter_directives(rust_log: Option<&str>, default_level: &str) -> String {
    const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(level) if LEVELS.contains(&level.to_ascii_lowercase().as_str()) => {
            format!("warn,board={level}")
        }
        Some(spec) => spec.to_string(),
        None => format!("warn,board={default_level}"),
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    EnvFilter::try_new(filter_directives(rust_log.as_deref(), default_level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(None, default_level)))
}

/// The TUI owns the terminal, so logs go to a file under the data dir.
pub fn init_file() -> Result<()> {
    let path = config::log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(env_filter("info")),
        )
        .init();
    Ok(())
}

/// Subcommands print their results on stdout; only warnings and errors reach stderr by default.
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter("warn")),
        )
        .init();
}
