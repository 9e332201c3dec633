//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the `info` default filter and plain-text output
pub fn init_tracing() {
    init_tracing_with("info", false);
}

/// Initialize tracing
///
/// `RUST_LOG` wins over `default_filter` when set. With `json` the fmt layer
/// emits one JSON object per event. Calling this twice is a no-op.
pub fn init_tracing_with(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
