//! The sample scenarios load and run cleanly.

#[path = "support/headless_app.rs"]
#[expect(dead_code, reason = "scenarios spawn through Scenario::spawn")]
mod headless_app;

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use headless_app::HeadlessApp;
use rstest::rstest;
use shuttle::{InvalidPlatform, Scenario, ScenarioError};

fn scenario_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn load(name: &str) -> Scenario {
    Scenario::load(&scenario_path(name)).unwrap_or_else(|e| panic!("{name}: {e}"))
}

#[rstest]
#[case::elevator("elevator.json")]
#[case::shuttle_loop("shuttle_loop.json")]
fn sample_platforms_are_accepted(#[case] name: &str) {
    let app = HeadlessApp::new();
    let spawned = load(name).spawn(app.lock().world_mut());

    app.tick(60);

    assert!(app.component::<InvalidPlatform>(spawned.platform).is_none());
}

#[test]
fn elevator_rider_keeps_its_offset() {
    let app = HeadlessApp::new();
    let spawned = load("elevator.json").spawn(app.lock().world_mut());
    let rider = spawned.passengers[0];

    for _ in 0..6 {
        app.tick(10);
        let platform = app.position(spawned.platform);
        let passenger = app.position(rider);
        assert_relative_eq!(passenger.x, platform.x, epsilon = 1e-4);
        assert_relative_eq!(passenger.y - platform.y, 0.75, epsilon = 1e-3);
    }
}

#[test]
fn missing_files_report_io_errors() {
    let result = Scenario::load(&scenario_path("does_not_exist.json"));
    assert!(matches!(result, Err(ScenarioError::Io(_))));
}
