//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr so stdout stays clean for command output
//! and the MCP stdio transport. When a log directory is configured, events are
//! also written as daily-rotated JSONL files.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Environment variable naming the JSONL log directory.
const LOG_DIR_ENV: &str = "READABLY_LOG_DIR";

/// File name prefix for rotated log files.
const LOG_FILE_PREFIX: &str = "readably.jsonl";

/// Where log output is written.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Directory for JSONL log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Build from the environment, falling back to the configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_dir }
    }
}

/// Level directive for the given CLI flags.
///
/// `--quiet` wins over `--verbose`.
fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build a filter from `RUST_LOG`, or from the CLI flags when it is unset.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(quiet, verbose, default_level)))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    stderr_filter: EnvFilter,
    file_filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match config.log_dir {
        Some(ref dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_directive(true, 3, "info"), "error");
    }

    #[test]
    fn default_level_used_without_flags() {
        assert_eq!(level_directive(false, 0, "warn"), "warn");
        assert_eq!(level_directive(false, 0, "debug"), "debug");
    }

    #[test]
    fn verbose_count_raises_level() {
        assert_eq!(level_directive(false, 1, "warn"), "info");
        assert_eq!(level_directive(false, 2, "warn"), "debug");
        assert_eq!(level_directive(false, 5, "warn"), "trace");
    }

    #[test]
    fn config_log_dir_used_as_fallback() {
        if std::env::var_os(LOG_DIR_ENV).is_some() {
            return;
        }
        let config = ObservabilityConfig::from_env_with_overrides(Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }
}
