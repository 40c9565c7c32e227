//! The collision-query boundary between platforms and the host world.
//!
//! Platforms never own the colliders they cast against. The host implements
//! [`CollisionQuery`] (a physics backend, an ECS snapshot, a test fake) and
//! the transport engine asks it one ray at a time.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use log::warn;
use serde::Deserialize;

use crate::ALL_LAYERS;

/// Bitmask of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    /// Mask matching every layer.
    pub const ALL: Self = Self(ALL_LAYERS);
    /// Mask matching nothing.
    pub const NONE: Self = Self(0);

    /// Returns `true` when the masks share at least one layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use shuttle::CollisionLayers;
    /// assert!(CollisionLayers(0b0110).intersects(CollisionLayers(0b0100)));
    /// assert!(!CollisionLayers(0b0001).intersects(CollisionLayers(0b0010)));
    /// ```
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// First collider struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<B> {
    /// Handle of the struck collider.
    pub body: B,
    /// Distance from the ray origin; zero when the origin starts on or inside
    /// the collider.
    pub distance: f32,
    /// World-space contact point.
    pub point: Vec2,
}

impl<B: Debug> RayHit<B> {
    /// Rejects hits a well-behaved backend would never report.
    ///
    /// Negative or non-finite distances and non-finite contact points are
    /// logged and discarded.
    #[must_use]
    pub fn validated(self) -> Option<Self> {
        if !self.distance.is_finite() || self.distance < 0.0 || !self.point.is_finite() {
            warn!(
                "discarding malformed ray hit on {:?}: distance {}, point {:?}",
                self.body, self.distance, self.point
            );
            return None;
        }
        Some(self)
    }
}

/// Raycasts against the host's colliders.
pub trait CollisionQuery {
    /// Stable handle identifying a collider's owner.
    type Body: Copy + Eq + Hash + Debug;

    /// Casts a ray of `max_distance` from `origin` along the unit `direction`,
    /// considering only colliders on a layer in `mask`.
    ///
    /// Must report a distance of zero when `origin` already lies on the
    /// struck surface.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit<Self::Body>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::negative(-0.1, Vec2::ZERO)]
    #[case::nan_distance(f32::NAN, Vec2::ZERO)]
    #[case::infinite_distance(f32::INFINITY, Vec2::ZERO)]
    #[case::nan_point(0.5, Vec2::new(f32::NAN, 0.0))]
    fn malformed_hits_are_discarded(#[case] distance: f32, #[case] point: Vec2) {
        let hit = RayHit {
            body: 1_u32,
            distance,
            point,
        };
        assert!(hit.validated().is_none());
    }

    #[test]
    fn contact_hits_survive_validation() {
        let hit = RayHit {
            body: 1_u32,
            distance: 0.0,
            point: Vec2::ONE,
        };
        assert_eq!(hit.validated(), Some(hit));
    }

    #[test]
    fn layers_default_to_everything() {
        assert!(CollisionLayers::default().intersects(CollisionLayers(1 << 7)));
        assert!(!CollisionLayers::NONE.intersects(CollisionLayers::ALL));
    }
}
