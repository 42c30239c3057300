//! # Logging Setup
//!
//! Environment-aware `tracing` initialization for binaries embedding the
//! engine. The engine itself only emits events; calling this is optional and
//! a host with its own subscriber can skip it entirely.

use std::sync::OnceLock;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize a console tracing subscriber with an environment-driven
/// filter. Reads `SCOPE_ENGINE_LOG` first, then falls back to a default per
/// `APP_ENV`. Safe to call more than once, and tolerant of a subscriber
/// already installed by the host.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env("SCOPE_ENGINE_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(&environment())));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_filter(filter),
        );

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already initialized");
        }
    });
}

fn environment() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}
