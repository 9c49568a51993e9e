// src/logging.rs
// =============================================================================
// Diagnostics go to stderr through `tracing`, so they never mix with the
// per-link lines and final report we print on stdout.
//
// The level comes from RUST_LOG, e.g. `RUST_LOG=readme_auditor=debug`.
// Without it we log at `info`, which still shows rate-limit warnings.
// =============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init so a second call (e.g. from tests) is a no-op instead of a panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
