//! Logging configuration for the demo.
//!
//! Thin wrapper over `log` + `env_logger`. Records go to stderr, keeping
//! the result line on stdout clean.
//!
//! Levels as used here:
//! - `error!` - fatal diagnostics
//! - `warn!`  - recoverable oddities
//! - `info!`  - phase progress and the selected device
//! - `debug!` - per-step detail (backend probes, buffer sizes, grid sizing)

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging from the `RUST_LOG` environment variable.
///
/// Defaults to `warn` when `RUST_LOG` is unset. Only initializes once;
/// subsequent calls are no-ops.
pub fn init_from_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    });
}

/// Initialize logging for tests.
///
/// `try_init` tolerates the logger already being set by another test in
/// the same binary.
pub fn init_test() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .is_test(true)
        .try_init();
}
