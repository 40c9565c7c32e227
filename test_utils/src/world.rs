//! A tiny in-memory world of box colliders.

use std::cell::Cell;

use glam::Vec2;
use shuttle::{Aabb2, CollisionLayers, CollisionQuery, PassengerMover, RayHit};

/// Identifier of a body in a [`FakeWorld`].
pub type BodyId = u32;

/// A box collider that may or may not be movable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FakeBody {
    pub id: BodyId,
    pub bounds: Aabb2,
    pub layers: CollisionLayers,
    pub movable: bool,
}

impl FakeBody {
    /// Create a movable body on layer 1.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use test_utils::FakeBody;
    /// let body = FakeBody::new(3, Vec2::ZERO, Vec2::ONE);
    /// assert!(body.movable);
    /// ```
    pub fn new(id: BodyId, min: Vec2, max: Vec2) -> Self {
        Self {
            id,
            bounds: Aabb2::new(min, max),
            layers: CollisionLayers(1),
            movable: true,
        }
    }

    /// The same body without a movement controller.
    pub fn immovable(self) -> Self {
        Self {
            movable: false,
            ..self
        }
    }

    /// The same body on other layers.
    pub fn on_layers(self, layers: CollisionLayers) -> Self {
        Self { layers, ..self }
    }
}

/// One call to [`PassengerMover::move_passenger`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveRecord {
    pub body: BodyId,
    pub displacement: Vec2,
    pub standing_on_platform: bool,
}

/// Bodies that answer raycasts and translate when moved.
#[derive(Clone, Debug, Default)]
pub struct FakeWorld {
    pub bodies: Vec<FakeBody>,
    pub moves: Vec<MoveRecord>,
    /// Controller lookups served; the transport caches bindings so this
    /// only grows on first contact.
    pub lookups: Cell<usize>,
}

impl FakeWorld {
    /// Create a world holding `bodies`.
    pub fn with_bodies(bodies: impl IntoIterator<Item = FakeBody>) -> Self {
        Self {
            bodies: bodies.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Current bounds of `id`.
    ///
    /// # Panics
    /// Panics if no such body exists.
    pub fn bounds(&self, id: BodyId) -> Aabb2 {
        self.bodies
            .iter()
            .find(|body| body.id == id)
            .map(|body| body.bounds)
            .unwrap_or_else(|| panic!("no body {id}"))
    }

    /// Bodies moved, in call order.
    pub fn moved_ids(&self) -> Vec<BodyId> {
        self.moves.iter().map(|record| record.body).collect()
    }
}

impl CollisionQuery for FakeWorld {
    type Body = BodyId;

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit<BodyId>> {
        self.bodies
            .iter()
            .filter(|body| body.layers.intersects(mask))
            .filter_map(|body| {
                body.bounds
                    .ray_distance(origin, direction, max_distance)
                    .map(|distance| (body.id, distance))
            })
            .min_by(|(_, near), (_, far)| near.total_cmp(far))
            .map(|(body, distance)| RayHit {
                body,
                distance,
                point: origin + direction * distance,
            })
    }
}

impl PassengerMover<BodyId> for FakeWorld {
    type Controller = BodyId;

    fn controller(&self, body: BodyId) -> Option<BodyId> {
        self.lookups.set(self.lookups.get() + 1);
        self.bodies
            .iter()
            .find(|candidate| candidate.id == body && candidate.movable)
            .map(|candidate| candidate.id)
    }

    fn move_passenger(&mut self, controller: BodyId, displacement: Vec2, standing_on_platform: bool) {
        if let Some(body) = self.bodies.iter_mut().find(|body| body.id == controller) {
            body.bounds = body.bounds.translated(displacement);
        }
        self.moves.push(MoveRecord {
            body: controller,
            displacement,
            standing_on_platform,
        });
    }
}
