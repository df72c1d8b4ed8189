//! Tracing/logging initialization.
//!
//! Filter directives come from `SLOTMASTER_LOG`, then `RUST_LOG`, then
//! default to `info`. Whichever subscriber is installed first wins.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for this workspace.
pub const LOG_ENV: &str = "SLOTMASTER_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Resolve the filter from the environment.
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok(), std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_from(workspace: Option<String>, rust_log: Option<String>) -> EnvFilter {
    [workspace, rust_log]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// JSON logs + timestamps.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact, human-readable logs.
pub fn init_pretty() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn max_level(workspace: Option<&str>, rust_log: Option<&str>) -> Option<LevelFilter> {
        filter_from(workspace.map(str::to_string), rust_log.map(str::to_string)).max_level_hint()
    }

    #[test]
    fn workspace_variable_wins_over_rust_log() {
        assert_eq!(max_level(Some("slotmaster_infra=debug"), Some("warn")), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn falls_back_to_rust_log_then_info() {
        assert_eq!(max_level(None, Some("warn")), Some(LevelFilter::WARN));
        assert_eq!(max_level(Some("  "), None), Some(LevelFilter::INFO));
        assert_eq!(max_level(None, None), Some(LevelFilter::INFO));
    }

    #[test]
    fn unparsable_directives_are_skipped() {
        assert_eq!(max_level(Some("slotmaster=verbose"), Some("error")), Some(LevelFilter::ERROR));
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        init_pretty();
        ::tracing::info!("still logging");
    }
}
