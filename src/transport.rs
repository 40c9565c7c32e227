//! Passenger transport.
//!
//! Each tick a platform casts rays out of its edges to find everything it is
//! about to carry, push or pinch, and works out how far each of those
//! passengers must move so it ends up flush with the platform instead of
//! sinking into it or lagging behind.
//!
//! Detection runs three passes, always in this order:
//!
//! 1. **Vertical**: rays leave the edge facing the vertical motion. Things
//!    above a rising platform are lifted (and carried sideways); things below
//!    a falling one are pushed down.
//! 2. **Horizontal**: rays leave the leading side edge and shove whatever is
//!    beside the platform.
//! 3. **Ride**: short rays leave the top edge while the platform falls or
//!    moves purely sideways, catching riders the vertical pass cannot see.
//!
//! A passenger is claimed by the first pass that hits it. Riders found by the
//! third pass move after the platform; everything else moves before it.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use hashbrown::{HashMap, HashSet};
use log::{trace, warn};
use thiserror::Error;

use crate::collision::{CollisionLayers, CollisionQuery, RayHit};
use crate::raycast_grid::RaycastGrid;
use crate::vector_math::axis_sign;

/// Moves passengers through the host world.
///
/// The transport engine never edits passenger positions itself: it resolves
/// a controller for each passenger once and hands it the displacement. The
/// implementation is expected to run its own collision resolution.
pub trait PassengerMover<B> {
    /// Handle for a passenger's movement capability.
    type Controller: Copy;

    /// Looks up the movement capability attached to `body`, if any.
    fn controller(&self, body: B) -> Option<Self::Controller>;

    /// Moves a passenger by `displacement`.
    ///
    /// `standing_on_platform` tells the controller to treat the passenger as
    /// grounded this tick.
    fn move_passenger(
        &mut self,
        controller: Self::Controller,
        displacement: Vec2,
        standing_on_platform: bool,
    );
}

/// Failures scoped to a single passenger for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError<B: Debug> {
    /// The passenger was detected but nothing can move it.
    #[error("passenger {passenger:?} has no movement controller")]
    MissingCapability {
        /// The passenger that could not be moved.
        passenger: B,
    },
}

/// How one passenger must move this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerMovement<B> {
    /// The detected passenger.
    pub passenger: B,
    /// Displacement to apply.
    pub displacement: Vec2,
    /// Whether the passenger rides on top of the platform.
    pub standing_on_platform: bool,
    /// Whether to move the passenger before the platform itself moves.
    pub move_before_platform: bool,
}

/// When, relative to the platform's own translation, a batch of passengers
/// moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    /// Pushed or lifted passengers, cleared out of the platform's way.
    BeforePlatform,
    /// Riders, carried once the platform has settled.
    AfterPlatform,
}

impl MovePhase {
    /// Returns `true` when `movement` belongs to this phase.
    #[must_use]
    pub const fn includes<B>(self, movement: &PassengerMovement<B>) -> bool {
        match self {
            Self::BeforePlatform => movement.move_before_platform,
            Self::AfterPlatform => !movement.move_before_platform,
        }
    }
}

/// Passenger-to-controller bindings remembered between ticks.
///
/// Bindings are created on a passenger's first successful lookup and live
/// until [`ControllerCache::forget`] removes them. Failed lookups are not remembered.
#[derive(Debug, Clone)]
pub struct ControllerCache<B, C> {
    bindings: HashMap<B, C>,
}

impl<B, C> Default for ControllerCache<B, C> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<B: Copy + Eq + Hash, C: Copy> ControllerCache<B, C> {
    /// Returns the cached controller for `body`, running `lookup` on a miss.
    pub fn resolve(&mut self, body: B, lookup: impl FnOnce(B) -> Option<C>) -> Option<C> {
        if let Some(controller) = self.bindings.get(&body) {
            return Some(*controller);
        }
        let controller = lookup(body)?;
        self.bindings.insert(body, controller);
        Some(controller)
    }

    /// Drops the binding for `body`. Returns `true` if one existed.
    pub fn forget(&mut self, body: B) -> bool {
        self.bindings.remove(&body).is_some()
    }

    /// Number of cached bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns `true` when `body` has a cached binding.
    #[must_use]
    pub fn contains(&self, body: B) -> bool {
        self.bindings.contains_key(&body)
    }
}

/// Detects and moves a platform's passengers.
#[derive(Debug, Clone)]
pub struct PassengerTransport<B, C> {
    mask: CollisionLayers,
    skin_width: f32,
    cache: ControllerCache<B, C>,
}

impl<B, C> PassengerTransport<B, C>
where
    B: Copy + Eq + Hash + Debug,
    C: Copy,
{
    /// Creates a transport probing `mask` from a grid inset by `skin_width`.
    #[must_use]
    pub fn new(mask: CollisionLayers, skin_width: f32) -> Self {
        Self {
            mask,
            skin_width,
            cache: ControllerCache::default(),
        }
    }

    /// Layers this transport can move.
    #[must_use]
    pub const fn mask(&self) -> CollisionLayers {
        self.mask
    }

    /// Controller bindings gathered so far.
    #[must_use]
    pub const fn cache(&self) -> &ControllerCache<B, C> {
        &self.cache
    }

    /// Forgets the controller binding for a passenger that no longer exists.
    pub fn forget(&mut self, body: B) -> bool {
        self.cache.forget(body)
    }

    /// Works out which passengers move this tick and by how much.
    ///
    /// `displacement` is the platform's own movement for the tick and `grid`
    /// must be computed from its bounds before that movement. Each passenger
    /// appears at most once in the result.
    pub fn compute<Q>(
        &self,
        displacement: Vec2,
        grid: &RaycastGrid,
        collisions: &Q,
    ) -> Vec<PassengerMovement<B>>
    where
        Q: CollisionQuery<Body = B>,
    {
        let mut movements = Vec::new();
        if !displacement.is_finite() {
            warn!("ignoring non-finite platform displacement {displacement:?}");
            return movements;
        }

        let mut claimed = HashSet::new();
        let skin = self.skin_width;
        let Vec2 { x: dx, y: dy } = displacement;
        let direction_x = axis_sign(dx);
        let direction_y = axis_sign(dy);

        if dy != 0.0 {
            let length = dy.abs() + skin;
            let start = if direction_y < 0.0 {
                grid.origins.bottom_left
            } else {
                grid.origins.top_left
            };
            let lifting = direction_y > 0.0;
            for origin in grid.column_origins(start) {
                let Some(hit) = self.cast_ray(collisions, origin, Vec2::Y * direction_y, length) else {
                    continue;
                };
                if claimed.insert(hit.body) {
                    movements.push(PassengerMovement {
                        passenger: hit.body,
                        displacement: Vec2::new(
                            if lifting { dx } else { 0.0 },
                            dy - (hit.distance - skin) * direction_y,
                        ),
                        standing_on_platform: lifting,
                        move_before_platform: true,
                    });
                }
            }
        }

        if dx != 0.0 {
            let length = dx.abs() + skin;
            let start = if direction_x < 0.0 {
                grid.origins.bottom_left
            } else {
                grid.origins.bottom_right
            };
            for origin in grid.row_origins(start) {
                let Some(hit) = self.cast_ray(collisions, origin, Vec2::X * direction_x, length) else {
                    continue;
                };
                if claimed.insert(hit.body) {
                    movements.push(PassengerMovement {
                        passenger: hit.body,
                        displacement: Vec2::new(dx - (hit.distance - skin) * direction_x, -skin),
                        standing_on_platform: false,
                        move_before_platform: true,
                    });
                }
            }
        }

        if dy < 0.0 || (dy == 0.0 && dx != 0.0) {
            let length = skin * 2.0;
            for origin in grid.column_origins(grid.origins.top_left) {
                let Some(hit) = self.cast_ray(collisions, origin, Vec2::Y, length) else {
                    continue;
                };
                if claimed.insert(hit.body) {
                    movements.push(PassengerMovement {
                        passenger: hit.body,
                        displacement,
                        standing_on_platform: true,
                        move_before_platform: false,
                    });
                }
            }
        }

        trace!(
            "platform displacement {displacement:?} affects {} passengers",
            movements.len()
        );
        movements
    }

    /// Moves every passenger in `movements` that belongs to `phase`.
    ///
    /// Passengers without a movement controller are skipped and reported;
    /// the rest still move.
    pub fn apply<M>(
        &mut self,
        movements: &[PassengerMovement<B>],
        phase: MovePhase,
        mover: &mut M,
    ) -> Vec<TransportError<B>>
    where
        M: PassengerMover<B, Controller = C>,
    {
        let mut failures = Vec::new();
        for movement in movements.iter().filter(|movement| phase.includes(movement)) {
            match self
                .cache
                .resolve(movement.passenger, |body| mover.controller(body))
            {
                Some(controller) => mover.move_passenger(
                    controller,
                    movement.displacement,
                    movement.standing_on_platform,
                ),
                None => {
                    let failure = TransportError::MissingCapability {
                        passenger: movement.passenger,
                    };
                    warn!("{failure}");
                    failures.push(failure);
                }
            }
        }
        failures
    }

    fn cast_ray<Q>(&self, collisions: &Q, origin: Vec2, direction: Vec2, length: f32) -> Option<RayHit<B>>
    where
        Q: CollisionQuery<Body = B>,
    {
        collisions
            .raycast(origin, direction, length, self.mask)
            .and_then(RayHit::validated)
            .filter(|hit| hit.distance > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_remembers_successful_lookups_only() {
        let mut cache: ControllerCache<u32, u32> = ControllerCache::default();
        assert_eq!(cache.resolve(1, |_| None), None);
        assert!(cache.is_empty());

        assert_eq!(cache.resolve(1, |body| Some(body * 10)), Some(10));
        assert_eq!(cache.resolve(1, |_| Some(99)), Some(10));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn forgetting_evicts_a_binding() {
        let mut cache: ControllerCache<u32, u32> = ControllerCache::default();
        let _bound = cache.resolve(4, Some);
        assert!(cache.contains(4));
        assert!(cache.forget(4));
        assert!(!cache.forget(4));
        assert!(!cache.contains(4));
    }

    #[test]
    fn transport_casts_only_against_its_mask() {
        let transport: PassengerTransport<u32, u32> =
            PassengerTransport::new(CollisionLayers(0b110), 0.125);
        assert_eq!(transport.mask(), CollisionLayers(0b110));
        assert!(transport.mask().intersects(CollisionLayers(0b010)));
        assert!(!transport.mask().intersects(CollisionLayers(0b001)));
    }

    #[test]
    fn phases_split_movements() {
        let movement = PassengerMovement {
            passenger: 1_u32,
            displacement: Vec2::X,
            standing_on_platform: true,
            move_before_platform: false,
        };
        assert!(MovePhase::AfterPlatform.includes(&movement));
        assert!(!MovePhase::BeforePlatform.includes(&movement));
    }
}
