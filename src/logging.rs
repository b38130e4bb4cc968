//! `tracing` subscriber setup.
//!
//! The library only emits events; binaries and tests decide where they go.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directives (default: `info`), e.g.
///   `RUST_LOG=u_wave=debug`
///
/// A subscriber that is already installed is left in place.
///
/// # Examples
/// ```no_run
/// use u_wave::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init();
}

/// Debug-level subscriber writing through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
