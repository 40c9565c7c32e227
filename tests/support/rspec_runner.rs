//! Drives the platform behaviour suites.
//!
//! Every suite shares one [`HeadlessApp`](super::headless_app::HeadlessApp)
//! handle between its examples, so examples must not overlap: each one
//! ticks the app and then inspects positions that the next one builds on.

use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use rspec::report::Report;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// Runs the examples of `suite` one after another in declaration order.
///
/// rspec catches failing examples itself; this turns any failure into a
/// failure of the surrounding `#[test]`.
///
/// # Panics
/// Panics when the runner cannot be configured or any example fails.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let runner = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .map(|config| Runner::new(config, vec![Arc::new(Logger::new(io::stdout()))]))
        .unwrap_or_else(|e| panic!("cannot configure the platform suites: {e}"));

    let report = runner.run(suite);
    assert!(
        report.is_success(),
        "a platform behaviour example failed; see the rspec log above"
    );
}
