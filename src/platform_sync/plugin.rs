//! Bevy plugin wiring platform systems into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::config::ConfigError;

use super::systems::{
    advance_platforms_system, forget_removed_passengers_system, init_platforms_system,
};

/// Event raised when a platform's configuration is rejected.
///
/// The platform stays where it was spawned; the surrounding simulation
/// carries on.
#[derive(Event, Debug, Clone, Copy, PartialEq, Error)]
#[error("platform {platform:?} rejected: {reason}")]
pub struct PlatformRejected {
    /// The rejected platform.
    pub platform: Entity,
    /// Why it was rejected.
    pub reason: ConfigError,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_rejected_platform(event: On<PlatformRejected>) {
    let PlatformRejected { platform, reason } = event.event();
    error!("platform {platform:?} will not move: {reason}");
}

/// Bevy plugin installing the platform systems.
#[derive(Default)]
pub struct ShuttlePlugin;

impl Plugin for ShuttlePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_rejected_platform);
        app.add_systems(
            Update,
            (
                init_platforms_system,
                forget_removed_passengers_system,
                advance_platforms_system,
            )
                .chain(),
        );
    }
}
