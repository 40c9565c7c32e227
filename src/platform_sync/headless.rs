//! A windowless app stepping the platform plugin at a fixed rate.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use log::debug;

use super::plugin::ShuttlePlugin;

/// Builds an app with [`MinimalPlugins`] and [`ShuttlePlugin`] whose clock
/// advances by exactly `step` on every [`App::update`].
///
/// The virtual clock's delta cap is raised to `step` so long steps are not
/// truncated. The returned app has already run one warm-up update, which
/// Bevy spends with a zero delta; every later update advances by `step`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bevy::prelude::*;
/// use shuttle::headless_app;
///
/// let mut app = headless_app(Duration::from_secs(1));
/// app.update();
/// let delta = app.world().resource::<Time>().delta_secs();
/// assert!((delta - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn headless_app(step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(ShuttlePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    if let Some(mut virtual_time) = app.world_mut().get_resource_mut::<Time<Virtual>>() {
        if virtual_time.max_delta() < step {
            virtual_time.set_max_delta(step);
        }
    }

    app.update();
    debug!("headless app ready; stepping {step:?} per update");
    app
}
