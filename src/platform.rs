//! A waypoint-following platform with optional passenger transport.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use log::{debug, warn};

use crate::collision::CollisionQuery;
use crate::config::{ConfigError, PlatformConfig};
use crate::geometry::{Aabb2, GeometryError};
use crate::raycast_grid::{GridSettings, RaycastGrid};
use crate::transport::{
    MovePhase, PassengerMovement, PassengerMover, PassengerTransport, TransportError,
};
use crate::vector_math::vec_finite_or_zero;
use crate::waypoints::WaypointPlanner;

/// Timing for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStep {
    /// Seconds since the previous step.
    pub dt: f32,
    /// Absolute simulation time, in seconds.
    pub now: f32,
}

/// What happened during one [`PlatformController::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport<B: Debug> {
    /// Platform position after the tick.
    pub position: Vec2,
    /// Distance the platform travelled.
    pub displacement: Vec2,
    /// Every passenger detected this tick.
    pub movements: Vec<PassengerMovement<B>>,
    /// Passengers that were detected but could not be moved.
    pub failures: Vec<TransportError<B>>,
}

impl<B: Copy + Eq + Debug> TickReport<B> {
    /// Passengers that actually moved.
    pub fn displaced(&self) -> impl Iterator<Item = B> + '_ {
        self.movements
            .iter()
            .map(|movement| movement.passenger)
            .filter(|passenger| {
                !self.failures.iter().any(|failure| match failure {
                    TransportError::MissingCapability { passenger: missing } => {
                        missing == passenger
                    }
                })
            })
    }
}

/// Drives one platform: plans its motion and, when it carries passengers,
/// moves them around its own translation.
///
/// `B` identifies passenger colliders and `C` their movement controllers.
#[derive(Debug, Clone)]
pub struct PlatformController<B, C> {
    planner: WaypointPlanner,
    grid_settings: GridSettings,
    transport: Option<PassengerTransport<B, C>>,
}

impl<B, C> PlatformController<B, C>
where
    B: Copy + Eq + Hash + Debug,
    C: Copy,
{
    /// Validates `config` and builds a platform starting at `start` with
    /// collider `bounds`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any invalid field or when `bounds`
    /// cannot host a raycast grid.
    pub fn new(config: &PlatformConfig, start: Vec2, bounds: Aabb2) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid_settings = config.grid_settings();
        RaycastGrid::compute(bounds, &grid_settings)?;
        let planner = WaypointPlanner::new(&config.local_waypoints(), start, config.path_settings())?;
        let transport = config
            .carries_passengers
            .then(|| PassengerTransport::new(config.passenger_mask, config.skin_width));

        debug!(
            "platform ready at {start:?} with {} waypoints (carrying layers: {:?})",
            planner.path().points().len(),
            transport.as_ref().map(PassengerTransport::mask)
        );

        Ok(Self {
            planner,
            grid_settings,
            transport,
        })
    }

    /// The motion planner.
    #[must_use]
    pub const fn planner(&self) -> &WaypointPlanner {
        &self.planner
    }

    /// Passenger transport, when attached.
    #[must_use]
    pub const fn transport(&self) -> Option<&PassengerTransport<B, C>> {
        self.transport.as_ref()
    }

    /// Forgets the cached controller for a passenger that has been destroyed.
    pub fn forget_passenger(&mut self, body: B) -> bool {
        self.transport
            .as_mut()
            .is_some_and(|transport| transport.forget(body))
    }

    /// Runs one simulation step.
    ///
    /// `position` is the platform's current position and is updated in place
    /// between moving the "before" passengers and the "after" passengers.
    /// `bounds` is the platform's collider at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] when `bounds` can no longer host a raycast
    /// grid. Nothing moves in that case.
    pub fn tick<Q, M>(
        &mut self,
        position: &mut Vec2,
        bounds: Aabb2,
        step: TickStep,
        collisions: &Q,
        mover: &mut M,
    ) -> Result<TickReport<B>, GeometryError>
    where
        Q: CollisionQuery<Body = B>,
        M: PassengerMover<B, Controller = C>,
    {
        let grid = RaycastGrid::compute(bounds, &self.grid_settings)?;
        let planned = self.planner.advance(step.dt, step.now, *position);
        let displacement = vec_finite_or_zero(planned);
        if displacement != planned {
            warn!("platform at {position:?} planned a non-finite move {planned:?}; holding still");
        }

        let Some(transport) = self.transport.as_mut() else {
            *position += displacement;
            return Ok(TickReport {
                position: *position,
                displacement,
                movements: Vec::new(),
                failures: Vec::new(),
            });
        };

        let movements = transport.compute(displacement, &grid, collisions);
        let mut failures = transport.apply(&movements, MovePhase::BeforePlatform, mover);
        *position += displacement;
        failures.extend(transport.apply(&movements, MovePhase::AfterPlatform, mover));

        if !failures.is_empty() {
            warn!(
                "{} of {} passengers could not be moved this tick",
                failures.len(),
                movements.len()
            );
        }

        Ok(TickReport {
            position: *position,
            displacement,
            movements,
            failures,
        })
    }
}
