#![cfg_attr(docsrs, feature(doc_cfg))]
//! Kinematic platforms that follow waypoints and carry their passengers.
//!
//! The engine is split the same way a platform's tick is: a
//! [`RaycastGrid`] is derived from the platform's collider, the
//! [`WaypointPlanner`] decides how far the platform moves, and the
//! [`PassengerTransport`] works out who moves with it and when. A
//! [`PlatformController`] ties the three together, and [`ShuttlePlugin`]
//! runs controllers inside a Bevy app.
pub mod collision;
pub mod components;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod logging;
pub mod numeric;
pub mod platform;
pub mod platform_sync;
pub mod raycast_grid;
pub mod scenario;
pub mod transport;
pub mod vector_math;
pub mod waypoints;
pub use constants::*;

// Re-export commonly used items
pub use collision::{CollisionLayers, CollisionQuery, RayHit};
pub use components::{
    EntityPlatformController, InvalidPlatform, MovingPlatform, PassengerCollider, PassengerMotor,
    PlatformCollider, PlatformSettings,
};
pub use config::{ConfigError, PlatformConfig};
pub use geometry::{Aabb2, GeometryError};
pub use logging::init as init_logging;
pub use numeric::ease;
pub use platform::{PlatformController, TickReport, TickStep};
pub use platform_sync::{headless_app, PlatformRejected, ShuttlePlugin};
pub use raycast_grid::{GridSettings, RaySpacing, RaycastGrid, RaycastOrigins};
pub use scenario::{PassengerSpec, Scenario, ScenarioEntities, ScenarioError};
pub use transport::{
    ControllerCache, MovePhase, PassengerMovement, PassengerMover, PassengerTransport,
    TransportError,
};
pub use vector_math::{axis_sign, vec_finite_or_zero};
pub use waypoints::{PathCursor, PathSettings, TravelDirection, WaypointPath, WaypointPlanner};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use shuttle::prelude::*;
    //! ```

    pub use crate::Aabb2;
    pub use crate::CollisionLayers;
    pub use crate::CollisionQuery;
    pub use crate::PassengerMover;
    pub use crate::PlatformConfig;
    pub use crate::PlatformController;
    pub use crate::ShuttlePlugin;
    pub use crate::TickStep;
    pub use glam::Vec2;
}
