//! Logging setup
//!
//! The crate logs through the `log` facade; binaries pick the backend.
//! These helpers install `env_logger`, which honours `RUST_LOG`.

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Install `env_logger` with its defaults
pub fn init() {
    env_logger::init();
}

/// Install `env_logger`, using `level` unless `RUST_LOG` says otherwise
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_with_level(level: LevelFilter) {
    let installed = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
    if installed.is_err() {
        log::debug!("Logger already installed; keeping it");
    }
}
