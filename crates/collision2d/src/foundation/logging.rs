//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::config::CollisionConfig;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging, returning an error if a logger is already installed
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::try_init()
}

/// Initialize logging with the filter configured in `config`
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_with_config(config: &CollisionConfig) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = CollisionConfig::default();
        // Another test may already own the global logger; only the second call is certain to fail.
        let _ = init_with_config(&config);
        assert!(try_init().is_err());
    }
}
