//! The headless runner steps by exactly the requested duration.
use std::time::Duration;

use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::rstest;
use shuttle::{headless_app, PlatformCollider, PlatformConfig, PlatformSettings};

fn platform_x(app: &App, platform: Entity) -> f32 {
    app.world()
        .get::<Transform>(platform)
        .map(|transform| transform.translation.x)
        .unwrap_or_else(|| panic!("platform lost its Transform"))
}

#[rstest]
#[case::sixtieth(Duration::from_secs_f32(1.0 / 60.0))]
#[case::at_default_cap(Duration::from_millis(250))]
#[case::whole_second(Duration::from_secs(1))]
#[case::long(Duration::from_secs(3))]
fn every_update_advances_by_the_step(#[case] step: Duration) {
    let mut app = headless_app(step);
    for _ in 0..3 {
        app.update();
        let delta = app.world().resource::<Time>().delta_secs();
        assert_relative_eq!(delta, step.as_secs_f32(), epsilon = 1e-6);
    }
}

#[test]
fn one_second_steps_reach_the_far_waypoint_then_return() {
    let mut app = headless_app(Duration::from_secs(1));
    let config = PlatformConfig {
        wait_time: 1.0,
        ..PlatformConfig::new(&[Vec2::ZERO, Vec2::new(5.0, 0.0)], 5.0)
    };
    let platform = app
        .world_mut()
        .spawn((
            PlatformSettings(config),
            PlatformCollider {
                half_extents: Vec2::new(1.0, 0.25),
            },
            Transform::default(),
        ))
        .id();

    app.update();
    assert_relative_eq!(platform_x(&app, platform), 5.0, epsilon = 1e-5);

    app.update();
    assert!(
        platform_x(&app, platform) < 5.0,
        "platform should head back once its pause ends"
    );
}
