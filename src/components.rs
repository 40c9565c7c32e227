//! ECS components for platforms and passengers.
//! Colliders are boxes centred on the entity's `Transform` translation.
use bevy::prelude::*;

use crate::collision::CollisionLayers;
use crate::config::{ConfigError, PlatformConfig};
use crate::geometry::Aabb2;
use crate::platform::PlatformController;

/// Platform controller keyed by passenger entity, moving passengers via
/// their own entity.
pub type EntityPlatformController = PlatformController<Entity, Entity>;

/// Authored configuration for a platform that has not been built yet.
///
/// Replaced by [`MovingPlatform`] once validated, or by
/// [`InvalidPlatform`] when rejected.
#[derive(Component, Debug, Clone)]
pub struct PlatformSettings(pub PlatformConfig);

/// A validated, running platform.
#[derive(Component, Debug)]
pub struct MovingPlatform {
    /// The platform's planner and transport.
    pub controller: EntityPlatformController,
}

/// Marks a platform whose configuration was rejected. It never moves.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct InvalidPlatform {
    /// Why the platform was rejected.
    pub reason: ConfigError,
}

/// Box collider for a platform.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlatformCollider {
    /// Half the collider's width and height.
    pub half_extents: Vec2,
}

impl PlatformCollider {
    /// World-space bounds when centred on `center`.
    #[must_use]
    pub fn bounds_at(&self, center: Vec2) -> Aabb2 {
        Aabb2::from_center_half_extents(center, self.half_extents)
    }
}

/// Box collider for anything a platform may carry or push.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PassengerCollider {
    /// Half the collider's width and height.
    pub half_extents: Vec2,
    /// Layers the collider occupies.
    pub layers: CollisionLayers,
}

impl PassengerCollider {
    /// World-space bounds when centred on `center`.
    #[must_use]
    pub fn bounds_at(&self, center: Vec2) -> Aabb2 {
        Aabb2::from_center_half_extents(center, self.half_extents)
    }
}

/// Movement capability for a passenger.
///
/// Passengers without one are still detected, but cannot be moved.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassengerMotor {
    /// Set when a platform carried the passenger on its last move.
    pub grounded: bool,
}
