//! Logger setup.

use std::env;

use log::LevelFilter;

/// Initialize the logger.
///
/// `debug` forces debug level; otherwise `RUST_LOG` is honoured when set,
/// and only warnings are shown by default.
pub fn init_logger(debug: bool) {
    let log_level = if debug {
        LevelFilter::Debug
    } else if env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new().filter_level(log_level).init();
}
