//! Opt-in tracing subscriber bootstrap.
//!
//! The library crates only emit `tracing` events; embedding applications
//! normally install their own subscriber. This helper covers binaries and
//! test harnesses that want a sensible default sink.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber honoring `RUST_LOG`.
///
/// Defaults to `verdant=info` when `RUST_LOG` is unset. Calling this more
/// than once (or after another subscriber is installed) is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("verdant=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
