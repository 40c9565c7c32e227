//! Authored platform configuration.
//!
//! [`PlatformConfig`] is what a level designer writes, usually as JSON. It is
//! validated once, before the platform's first tick; a platform whose
//! configuration is rejected never moves.

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::collision::CollisionLayers;
use crate::geometry::GeometryError;
use crate::raycast_grid::GridSettings;
use crate::waypoints::PathSettings;
use crate::{DISTANCE_BETWEEN_RAYS, MIN_RAY_COUNT, SKIN_WIDTH};

/// Reasons a platform refuses to start.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// A path needs somewhere to go.
    #[error("a path needs at least two waypoints, found {count}")]
    TooFewWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
    /// A waypoint has a NaN or infinite coordinate.
    #[error("waypoint {index} is not finite")]
    NonFiniteWaypoint {
        /// Index of the offending waypoint.
        index: usize,
    },
    /// Speed must be positive and finite.
    #[error("speed must be positive, got {speed}")]
    InvalidSpeed {
        /// Configured speed.
        speed: f32,
    },
    /// Pauses cannot run backwards.
    #[error("wait time must not be negative, got {wait_time}")]
    NegativeWaitTime {
        /// Configured wait time.
        wait_time: f32,
    },
    /// Easing strength must be zero or more.
    #[error("ease amount must not be negative, got {ease_amount}")]
    NegativeEaseAmount {
        /// Configured ease amount.
        ease_amount: f32,
    },
    /// Skin width must be zero or more.
    #[error("skin width must not be negative, got {skin_width}")]
    NegativeSkinWidth {
        /// Configured skin width.
        skin_width: f32,
    },
    /// Ray separation must be positive and finite.
    #[error("ray separation must be positive, got {ray_separation}")]
    InvalidRaySeparation {
        /// Configured separation.
        ray_separation: f32,
    },
    /// Ray counts below two leave the spacing undefined.
    #[error("minimum ray count must be at least {}, got {min_ray_count}", MIN_RAY_COUNT)]
    RayCountTooSmall {
        /// Configured minimum.
        min_ray_count: u16,
    },
    /// The platform's collider cannot host a raycast grid.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Everything needed to build a platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Waypoints relative to the platform's starting position.
    pub waypoints: Vec<[f32; 2]>,
    /// Loop instead of bouncing at the ends.
    #[serde(default)]
    pub cyclical: bool,
    /// Travel the waypoints backwards from the start.
    #[serde(default)]
    pub inverted_start: bool,
    /// Strength of the ease-in/ease-out.
    #[serde(default)]
    pub ease_amount: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Pause at each waypoint, in seconds.
    #[serde(default)]
    pub wait_time: f32,
    /// Inset applied to the platform's bounds before casting.
    #[serde(default = "default_skin_width")]
    pub skin_width: f32,
    /// Target distance between rays.
    #[serde(default = "default_ray_separation")]
    pub ray_separation: f32,
    /// Lower bound on rays per edge.
    #[serde(default = "default_min_ray_count")]
    pub min_ray_count: u16,
    /// Layers the platform can carry or push.
    #[serde(default)]
    pub passenger_mask: CollisionLayers,
    /// Attach passenger transport; without it the platform only moves itself.
    #[serde(default = "default_carries_passengers")]
    pub carries_passengers: bool,
}

const fn default_skin_width() -> f32 {
    SKIN_WIDTH
}

const fn default_ray_separation() -> f32 {
    DISTANCE_BETWEEN_RAYS
}

const fn default_min_ray_count() -> u16 {
    MIN_RAY_COUNT
}

const fn default_carries_passengers() -> bool {
    true
}

impl PlatformConfig {
    /// A bouncing, linear, passenger-carrying configuration with default
    /// grid settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use shuttle::PlatformConfig;
    /// let config = PlatformConfig::new(&[Vec2::ZERO, Vec2::new(5.0, 0.0)], 5.0);
    /// assert!(config.validate().is_ok());
    /// assert_eq!(config.local_waypoints()[1], Vec2::new(5.0, 0.0));
    /// ```
    #[must_use]
    pub fn new(waypoints: &[Vec2], speed: f32) -> Self {
        Self {
            waypoints: waypoints.iter().map(|point| point.to_array()).collect(),
            cyclical: false,
            inverted_start: false,
            ease_amount: 0.0,
            speed,
            wait_time: 0.0,
            skin_width: SKIN_WIDTH,
            ray_separation: DISTANCE_BETWEEN_RAYS,
            min_ray_count: MIN_RAY_COUNT,
            passenger_mask: CollisionLayers::ALL,
            carries_passengers: true,
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] for malformed input or unknown
    /// fields. Semantic checks are left to [`Self::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Waypoints as vectors.
    #[must_use]
    pub fn local_waypoints(&self) -> Vec<Vec2> {
        self.waypoints.iter().copied().map(Vec2::from_array).collect()
    }

    /// Motion parameters for the planner.
    #[must_use]
    pub const fn path_settings(&self) -> PathSettings {
        PathSettings {
            cyclical: self.cyclical,
            inverted_start: self.inverted_start,
            ease_amount: self.ease_amount,
            speed: self.speed,
            wait_time: self.wait_time,
        }
    }

    /// Grid parameters for the transport engine.
    #[must_use]
    pub const fn grid_settings(&self) -> GridSettings {
        GridSettings {
            skin_width: self.skin_width,
            ray_separation: self.ray_separation,
            min_ray_count: self.min_ray_count,
        }
    }

    /// Checks every field that does not depend on the platform's bounds.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                count: self.waypoints.len(),
            });
        }
        if let Some(index) = self
            .waypoints
            .iter()
            .position(|point| !point.iter().all(|coordinate| coordinate.is_finite()))
        {
            return Err(ConfigError::NonFiniteWaypoint { index });
        }
        self.path_settings().validate()?;
        if !(self.skin_width.is_finite() && self.skin_width >= 0.0) {
            return Err(ConfigError::NegativeSkinWidth {
                skin_width: self.skin_width,
            });
        }
        if !(self.ray_separation.is_finite() && self.ray_separation > 0.0) {
            return Err(ConfigError::InvalidRaySeparation {
                ray_separation: self.ray_separation,
            });
        }
        if self.min_ray_count < MIN_RAY_COUNT {
            return Err(ConfigError::RayCountTooSmall {
                min_ray_count: self.min_ray_count,
            });
        }
        Ok(())
    }
}
