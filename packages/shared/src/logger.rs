//! Tracing subscriber bootstrap.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global `fmt` subscriber for the given binary.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to the binary
/// and to the `parlor_*` crates, with everything else kept at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{crate_name}={default_level},parlor_server={default_level},parlor_shared={default_level},tower_http={default_level}"
        ))
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if let Err(e) = result {
        // Already installed (e.g. by an integration test harness)
        tracing::debug!("Logger already initialized: {}", e);
    }
}
