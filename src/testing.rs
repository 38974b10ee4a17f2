//! Helpers for tests that generate fixtures.

/// Install a `tracing` subscriber that writes through the test harness.
///
/// The filter comes from `RUST_LOG` (default `info`). Safe to call from every
/// test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}
