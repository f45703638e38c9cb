//! Log setup.
//!
//! The TUI owns stdout/stderr while running, so logs go to a daily rolling
//! file under `$SUBCHAT_HOME/logs/`. The filter comes from `SUBCHAT_LOG`,
//! then `log_level` in config, then `info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::paths;

/// Env var holding a log filter directive.
pub const LOG_ENV: &str = "SUBCHAT_LOG";

/// Log file name prefix (the appender adds the date suffix).
pub const LOG_FILE_NAME: &str = "subchat.log";

const DEFAULT_DIRECTIVE: &str = "info";

/// Initializes the global subscriber writing to `$SUBCHAT_HOME/logs`.
///
/// Keep the returned guard alive for the process lifetime; dropping it
/// flushes and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(config_level: Option<&str>) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), config_level)
}

/// Same as [`init`] with an explicit log directory.
pub fn init_in(dir: &Path, config_level: Option<&str>) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive = filter_directive(std::env::var(LOG_ENV).ok().as_deref(), config_level);
    let filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .context("Failed to build log filter")?
        .add_directive(
            "hyper=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

/// Picks the first non-empty directive: env, then config, then `info`.
pub fn filter_directive(env_value: Option<&str>, config_value: Option<&str>) -> String {
    [env_value, config_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_order() {
        assert_eq!(filter_directive(Some("debug"), Some("warn")), "debug");
        assert_eq!(filter_directive(Some(" "), Some("warn")), "warn");
        assert_eq!(filter_directive(None, None), "info");
    }
}
