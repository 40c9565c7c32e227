//! Journey-level tests for the waypoint planner.
//! Covers the easing curve, looping and bouncing paths, pauses, and idle ticks.
use approx::assert_relative_eq;
use glam::Vec2;
use rstest::rstest;
use shuttle::{ease, PathSettings, TravelDirection, WaypointPlanner};

fn linear(cyclical: bool, speed: f32, wait_time: f32) -> PathSettings {
    PathSettings {
        cyclical,
        inverted_start: false,
        ease_amount: 0.0,
        speed,
        wait_time,
    }
}

fn planner(points: &[Vec2], settings: PathSettings) -> WaypointPlanner {
    WaypointPlanner::new(points, Vec2::ZERO, settings)
        .unwrap_or_else(|e| panic!("path should be valid: {e}"))
}

#[rstest]
#[case::linear(0.0)]
#[case::gentle(0.5)]
#[case::default_max(2.0)]
#[case::beyond_authoring_range(3.5)]
fn ease_pins_ends_and_midpoint(#[case] amount: f32) {
    assert_relative_eq!(ease(0.0, amount), 0.0);
    assert_relative_eq!(ease(1.0, amount), 1.0);
    assert_relative_eq!(ease(0.5, amount), 0.5);
}

#[rstest]
#[case::linear(0.0)]
#[case::gentle(0.5)]
#[case::strong(2.0)]
fn ease_never_decreases(#[case] amount: f32) {
    let mut previous = 0.0;
    for step in 0_u8..=100 {
        let eased = ease(f32::from(step) / 100.0, amount);
        assert!(
            eased >= previous,
            "ease({step}%) = {eased} fell below {previous}"
        );
        previous = eased;
    }
}

#[test]
fn two_point_loop_stays_on_its_segment() {
    let start = Vec2::ZERO;
    let end = Vec2::new(3.0, 1.0);
    let mut planner = planner(
        &[start, end],
        PathSettings {
            ease_amount: 1.0,
            ..linear(true, 0.7, 0.2)
        },
    );

    let mut position = start;
    let mut now = 0.0;
    for _ in 0..500 {
        now += 0.13;
        position += planner.advance(0.13, now, position);

        assert!(planner.cursor().from_index() <= 1);
        let along = (position - start).dot(end - start) / (end - start).length_squared();
        let off_line = (position - start).perp_dot(end - start).abs();
        assert!((-1e-4..=1.0 + 1e-4).contains(&along), "left the segment: {position:?}");
        assert!(off_line < 1e-3, "drifted off the segment: {position:?}");
    }
}

#[test]
fn bouncing_path_retraces_its_steps() {
    let points = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
    let mut planner = planner(&points, linear(false, 1.0, 0.0));
    let dt = 0.25;

    let mut position = Vec2::ZERO;
    let mut now = 0.0;
    let mut arrivals = Vec::new();
    let mut flips = 0;
    let mut direction = planner.direction();

    for _ in 0..16 {
        let before = planner.cursor().from_index();
        now += dt;
        let step = planner.advance(dt, now, position);
        assert!(step.length() <= dt + 1e-5, "platform jumped by {step:?}");
        position += step;

        if planner.cursor().from_index() != before {
            arrivals.push(planner.cursor().from_index());
        }
        if planner.direction() != direction {
            flips += 1;
            direction = planner.direction();
        }
        if arrivals.len() == 2 {
            assert_eq!(flips, 1, "the far end should flip direction exactly once");
            assert_eq!(planner.direction(), TravelDirection::Backward);
        }
    }

    assert_eq!(arrivals, vec![1, 2, 1, 0]);
    assert_eq!(flips, 2);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
}

#[test]
fn zero_dt_changes_nothing() {
    let points = [Vec2::ZERO, Vec2::new(4.0, 0.0)];
    let mut planner = planner(&points, linear(false, 1.0, 0.0));
    let mut position = Vec2::ZERO;
    position += planner.advance(0.5, 0.5, position);

    let cursor = *planner.cursor();
    let step = planner.advance(0.0, 0.5, position);

    assert_eq!(step, Vec2::ZERO);
    assert_eq!(*planner.cursor(), cursor);
}

#[test]
fn platform_pauses_then_retreats() {
    let points = [Vec2::ZERO, Vec2::new(5.0, 0.0)];
    let mut planner = planner(&points, linear(false, 5.0, 1.0));
    let mut position = Vec2::ZERO;

    position += planner.advance(1.0, 1.0, position);
    assert_eq!(position, Vec2::new(5.0, 0.0));
    assert!(planner.is_idle(1.5));
    assert_relative_eq!(planner.time_until_move(1.5), 0.5);
    assert_eq!(planner.advance(0.5, 1.5, position), Vec2::ZERO);

    let retreat = planner.advance(1.0, 2.0, position);
    assert!(retreat.x < 0.0, "expected to head back, got {retreat:?}");
    assert_eq!(retreat.y, 0.0);
    assert_eq!(planner.direction(), TravelDirection::Forward);
}

#[test]
fn steep_easing_keeps_every_step_finite() {
    let points = [Vec2::ZERO, Vec2::new(4.0, 0.0)];
    let settings = PathSettings {
        ease_amount: 200.0,
        ..linear(false, 1.0, 0.0)
    };
    assert!(settings.validate().is_ok());
    let mut planner = planner(&points, settings);

    let mut position = Vec2::ZERO;
    let mut now = 0.0;
    let mut trail = Vec::new();
    for _ in 0..8 {
        now += 0.5;
        let step = planner.advance(0.5, now, position);
        assert!(step.is_finite(), "non-finite step {step:?} at t={now}");
        position += step;
        trail.push(position.x);
    }

    // Halfway through the segment the curve sits exactly at its midpoint.
    assert_relative_eq!(trail[3], 2.0);
    assert_relative_eq!(position.x, 4.0);
}
