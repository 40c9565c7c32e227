//! Collision and movement adapters over the passenger query.

use bevy::prelude::*;
use log::warn;

use crate::collision::{CollisionLayers, CollisionQuery, RayHit};
use crate::components::{MovingPlatform, PassengerCollider, PassengerMotor};
use crate::geometry::Aabb2;
use crate::transport::PassengerMover;

/// Every passenger, excluding platforms themselves.
pub type PassengerQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static PassengerCollider,
        &'static mut Transform,
        Option<&'static mut PassengerMotor>,
    ),
    Without<MovingPlatform>,
>;

/// Passenger colliders frozen at the start of a platform's tick.
#[derive(Debug, Default)]
pub struct PassengerSnapshot {
    colliders: Vec<(Entity, Aabb2, CollisionLayers)>,
}

impl PassengerSnapshot {
    /// Records the current bounds of every passenger.
    #[must_use]
    pub fn capture(passengers: &PassengerQuery<'_, '_>) -> Self {
        Self {
            colliders: passengers
                .iter()
                .map(|(entity, collider, transform, _)| {
                    (
                        entity,
                        collider.bounds_at(transform.translation.truncate()),
                        collider.layers,
                    )
                })
                .collect(),
        }
    }

    /// Number of captured colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` when no passengers were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl CollisionQuery for PassengerSnapshot {
    type Body = Entity;

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit<Entity>> {
        self.colliders
            .iter()
            .filter(|(_, _, layers)| layers.intersects(mask))
            .filter_map(|(entity, bounds, _)| {
                bounds
                    .ray_distance(origin, direction, max_distance)
                    .map(|distance| (*entity, distance))
            })
            .min_by(|(_, near), (_, far)| near.total_cmp(far))
            .map(|(body, distance)| RayHit {
                body,
                distance,
                point: origin + direction * distance,
            })
    }
}

/// Moves passengers by translating their `Transform`.
///
/// Only entities with a [`PassengerMotor`] can be moved, including ones whose
/// binding was cached before the motor was removed. The motor's `grounded`
/// flag mirrors the platform's `standing_on_platform` verdict.
pub struct TransformMover<'q, 'w, 's> {
    passengers: &'q mut PassengerQuery<'w, 's>,
}

impl<'q, 'w, 's> TransformMover<'q, 'w, 's> {
    /// Wraps the passenger query for one platform tick.
    pub const fn new(passengers: &'q mut PassengerQuery<'w, 's>) -> Self {
        Self { passengers }
    }
}

impl PassengerMover<Entity> for TransformMover<'_, '_, '_> {
    type Controller = Entity;

    fn controller(&self, body: Entity) -> Option<Entity> {
        self.passengers
            .get(body)
            .ok()
            .and_then(|(entity, _, _, motor)| motor.map(|_| entity))
    }

    fn move_passenger(&mut self, controller: Entity, displacement: Vec2, standing_on_platform: bool) {
        let Ok((_, _, mut transform, motor)) = self.passengers.get_mut(controller) else {
            warn!("passenger {controller:?} vanished before it could be moved");
            return;
        };
        let Some(mut motor) = motor else {
            warn!("passenger {controller:?} lost its motor; leaving it in place");
            return;
        };
        transform.translation += displacement.extend(0.0);
        motor.grounded = standing_on_platform;
    }
}
