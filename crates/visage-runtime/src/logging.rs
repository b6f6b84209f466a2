//! Log subscriber setup for binaries and demos
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! the host's decision. Filtering follows `RUST_LOG`, falling back to the
//! given default directive.

use tracing_subscriber::EnvFilter;

/// Install a formatted stderr subscriber
///
/// Returns false when a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
