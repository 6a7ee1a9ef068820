//! Tracing subscriber setup
//!
//! The host owns stdout for its plugin protocol, so logs always go to stderr.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, ignoring a subscriber that is already set
///
/// `RUST_LOG` takes precedence; otherwise `debug` when `verbose`, else `info`.
#[inline]
pub fn init_logging(verbose: bool) {
    if try_init_logging(verbose).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if:
/// - A global subscriber has already been installed
#[inline]
pub fn try_init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_logging(false);
        init_logging(true);
        assert!(try_init_logging(false).is_err());
    }
}
