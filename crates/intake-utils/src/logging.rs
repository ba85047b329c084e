//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// Respects `RUST_LOG` when set, otherwise logs at `info`.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Initialize tracing subscriber with an explicit fallback filter
///
/// `RUST_LOG` still wins when present; `fallback` is used otherwise.
pub fn init_tracing_with(fallback: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
