//! Logger bootstrap for the headless runner and tests.
use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Initializes the global logger.
///
/// Only this crate's records are shown by default: `debug` and above when
/// `verbose` is set, `info` and above otherwise. `RUST_LOG` still overrides
/// the filter.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let filter = format!("{}={level}", env!("CARGO_CRATE_NAME"));
    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));
    builder.format_timestamp_millis();

    // A second call from another test finds the logger already installed.
    if builder.try_init().is_err() {
        debug!("logger already initialised; keeping the existing one");
    }
}
