//! Systems that build, tick and tidy up platforms.

use bevy::prelude::*;
use log::{debug, error, trace};

use crate::components::{
    EntityPlatformController, InvalidPlatform, MovingPlatform, PassengerCollider,
    PassengerMotor, PlatformCollider, PlatformSettings,
};
use crate::platform::TickStep;

use super::plugin::PlatformRejected;
use super::snapshot::{PassengerQuery, PassengerSnapshot, TransformMover};

/// Builds a controller for every newly configured platform.
///
/// Platforms whose configuration is rejected receive [`InvalidPlatform`]
/// and a [`PlatformRejected`] event instead, and are never ticked.
pub fn init_platforms_system(
    mut commands: Commands,
    pending: Query<
        (Entity, &PlatformSettings, &PlatformCollider, &Transform),
        (Without<MovingPlatform>, Without<InvalidPlatform>),
    >,
) {
    for (entity, settings, collider, transform) in &pending {
        let start = transform.translation.truncate();
        match EntityPlatformController::new(&settings.0, start, collider.bounds_at(start)) {
            Ok(controller) => {
                commands.entity(entity).insert(MovingPlatform { controller });
            }
            Err(reason) => {
                commands.entity(entity).insert(InvalidPlatform { reason });
                commands.trigger(PlatformRejected {
                    platform: entity,
                    reason,
                });
            }
        }
    }
}

/// Advances every running platform and moves its passengers.
pub fn advance_platforms_system(
    time: Res<Time>,
    mut platforms: Query<(Entity, &mut MovingPlatform, &PlatformCollider, &mut Transform)>,
    mut passengers: PassengerQuery<'_, '_>,
) {
    let step = TickStep {
        dt: time.delta_secs(),
        now: time.elapsed_secs(),
    };

    for (entity, mut platform, collider, mut transform) in &mut platforms {
        let snapshot = PassengerSnapshot::capture(&passengers);
        let mut position = transform.translation.truncate();
        let bounds = collider.bounds_at(position);
        let mut mover = TransformMover::new(&mut passengers);

        match platform
            .controller
            .tick(&mut position, bounds, step, &snapshot, &mut mover)
        {
            Ok(report) => {
                transform.translation.x = position.x;
                transform.translation.y = position.y;
                trace!(
                    "platform {entity:?} at {:?}; {} of {} passengers detected",
                    report.position,
                    report.movements.len(),
                    snapshot.len()
                );
            }
            Err(failure) => error!("platform {entity:?} skipped a tick: {failure}"),
        }
    }
}

/// Evicts cached controller bindings for passengers that lost their
/// collider or motor, or were despawned.
pub fn forget_removed_passengers_system(
    mut removed_colliders: RemovedComponents<PassengerCollider>,
    mut removed_motors: RemovedComponents<PassengerMotor>,
    mut platforms: Query<&mut MovingPlatform>,
) {
    for passenger in removed_colliders.read().chain(removed_motors.read()) {
        for mut platform in &mut platforms {
            if platform.controller.forget_passenger(passenger) {
                debug!("forgot controller binding for removed passenger {passenger:?}");
            }
        }
    }
}
