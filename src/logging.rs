//! tracing setup for apps embedding the core.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::app::LogConfig;

/// Keeps the non-blocking file writer alive; logs stop flushing once dropped.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `config.filter`.
///
/// With `config.dir` set, logs go to a daily rolling `drawbridge.log` there,
/// or under the system temp dir when that directory cannot be created;
/// otherwise to stderr. Returns `None` if a subscriber was already installed
/// or no log directory is usable.
pub fn init(config: &LogConfig) -> Option<LoggingGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let (guard, log_dir) = match &config.dir {
        Some(dir) => {
            let dir = resolve_log_dir(dir)?;
            let file_appender = tracing_appender::rolling::daily(&dir, "drawbridge.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            );
            if subscriber.try_init().is_err() {
                return None;
            }
            (Some(guard), Some(dir))
        }
        None => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            );
            if subscriber.try_init().is_err() {
                return None;
            }
            (None, None)
        }
    };

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = ?log_dir, "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

fn resolve_log_dir(dir: &Path) -> Option<PathBuf> {
    std::fs::create_dir_all(dir)
        .map(|_| dir.to_path_buf())
        .or_else(|_| {
            let dir = std::env::temp_dir().join("drawbridge").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok::<_, std::io::Error>(dir)
        })
        .ok()
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
