//! Tracing initialization for embedders and tests

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console tracing with an env-filter override.
///
/// Embedding applications that already install their own subscriber should
/// skip this; calling it twice is harmless (the second call is ignored).
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nextup_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .try_init();
}
