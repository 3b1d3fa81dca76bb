use crate::config::LoggingConfig;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set. Calling this twice is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
