//! A collision query that answers from a script instead of geometry.

use glam::Vec2;
use shuttle::{CollisionLayers, CollisionQuery, RayHit};

/// Returns a fixed hit for every ray cast in a matching direction.
///
/// Useful for hits no real geometry would produce: one body struck by two
/// different passes, or malformed distances from a misbehaving backend.
#[derive(Clone, Debug, Default)]
pub struct ScriptedHits {
    answers: Vec<(Vec2, RayHit<u32>)>,
}

impl ScriptedHits {
    /// Answer rays cast along `direction` with `body` at `distance`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use shuttle::{CollisionLayers, CollisionQuery};
    /// use test_utils::ScriptedHits;
    /// let hits = ScriptedHits::default().on(Vec2::Y, 7, 0.5);
    /// let hit = hits.raycast(Vec2::ZERO, Vec2::Y, 1.0, CollisionLayers::ALL);
    /// assert_eq!(hit.map(|h| h.body), Some(7));
    /// assert!(hits.raycast(Vec2::ZERO, Vec2::X, 1.0, CollisionLayers::ALL).is_none());
    /// ```
    pub fn on(mut self, direction: Vec2, body: u32, distance: f32) -> Self {
        self.answers.push((
            direction,
            RayHit {
                body,
                distance,
                point: direction * distance,
            },
        ));
        self
    }
}

impl CollisionQuery for ScriptedHits {
    type Body = u32;

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        _max_distance: f32,
        _mask: CollisionLayers,
    ) -> Option<RayHit<u32>> {
        self.answers
            .iter()
            .find(|(scripted, _)| *scripted == direction)
            .map(|(_, hit)| RayHit {
                point: origin + hit.point,
                ..*hit
            })
    }
}
