//! Subscriber setup for binaries embedding the library.
//!
//! Library code logs through both `log` and `tracing`; `log` records are
//! bridged into the tracing subscriber installed here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs the global subscriber and the `log` bridge.
///
/// `RUST_LOG` overrides `default_level`. Returns `false` when a subscriber
/// was already installed, in which case the first one stays in place.
pub fn init_logging(default_level: &str, format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    match result {
        Ok(()) => true,
        Err(_) => {
            tracing::debug!("Logging already initialized");
            false
        }
    }
}
