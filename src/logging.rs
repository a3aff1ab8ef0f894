//! Tracing setup for the `dynvec` binary.
//!
//! Filtering is controlled with the `DYNVEC_LOG` environment variable using
//! the [`EnvFilter`] directive syntax. When it is unset the `-v` count picks
//! the level. Logs go to stderr so they never mix with scenario output.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

pub const ENV_FILTER: &str = "DYNVEC_LOG";

pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn filter_for(verbose: u8) -> EnvFilter {
    match std::env::var(ENV_FILTER) {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::new(level_for(verbose)),
    }
}

/// Installs the global subscriber. Call once, from `main`.
pub fn setup_tracing(verbose: u8) -> Result<(), TryInitError> {
    let stderr_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_filter(filter_for(verbose));

    Registry::default().with(stderr_layer).try_init()
}
