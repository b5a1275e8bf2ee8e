//! Subscriber setup for the engine's `tracing` events

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter used when `RUST_LOG` is unset or invalid
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::new(verbosity.log_level())
}

/// Install a stderr `fmt` subscriber; `RUST_LOG` wins over verbosity.
///
/// A second call is a no-op.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_follows_verbosity() {
        assert_eq!(default_filter(Verbosity::Quiet).to_string(), "error");
        assert_eq!(default_filter(Verbosity::Verbose).to_string(), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::Normal);
        init(Verbosity::Debug);
    }
}
