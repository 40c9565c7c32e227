//! Waypoint path planning.
//!
//! A [`WaypointPlanner`] walks a platform along a fixed sequence of absolute
//! points, one segment at a time. Each segment is eased with
//! [`ease`](crate::numeric::ease) and followed by a pause. Non-cyclical paths
//! bounce between their ends by flipping the travel direction; the point
//! sequence itself is never reordered after construction.

use glam::Vec2;
use log::debug;

use crate::config::ConfigError;
use crate::numeric::ease;
use crate::SEGMENT_EPSILON;

/// Motion parameters for a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSettings {
    /// Loop from the last point back to the first instead of bouncing.
    pub cyclical: bool,
    /// Start at the last point and travel the sequence backwards.
    pub inverted_start: bool,
    /// Strength of the ease-in/ease-out; zero is linear.
    pub ease_amount: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Pause, in seconds, after arriving at each waypoint.
    pub wait_time: f32,
}

impl PathSettings {
    /// Rejects settings that cannot drive a platform.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed { speed: self.speed });
        }
        if !(self.wait_time.is_finite() && self.wait_time >= 0.0) {
            return Err(ConfigError::NegativeWaitTime {
                wait_time: self.wait_time,
            });
        }
        if !(self.ease_amount.is_finite() && self.ease_amount >= 0.0) {
            return Err(ConfigError::NegativeEaseAmount {
                ease_amount: self.ease_amount,
            });
        }
        Ok(())
    }
}

/// Which way along the point sequence the platform is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl TravelDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Absolute waypoints plus the motion parameters that drive them.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    points: Vec<Vec2>,
    settings: PathSettings,
}

impl WaypointPath {
    /// Materialises `local_points` relative to `origin`.
    ///
    /// # Errors
    ///
    /// Fails when fewer than two points are supplied, any point is not
    /// finite, or [`PathSettings::validate`] rejects `settings`.
    pub fn from_local(
        local_points: &[Vec2],
        origin: Vec2,
        settings: PathSettings,
    ) -> Result<Self, ConfigError> {
        if local_points.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                count: local_points.len(),
            });
        }
        if let Some(index) = local_points.iter().position(|point| !point.is_finite()) {
            return Err(ConfigError::NonFiniteWaypoint { index });
        }
        settings.validate()?;

        Ok(Self {
            points: local_points.iter().map(|point| *point + origin).collect(),
            settings,
        })
    }

    /// The absolute points in authored order.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Motion parameters.
    #[must_use]
    pub const fn settings(&self) -> &PathSettings {
        &self.settings
    }

    fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    fn next_index(&self, from: usize, direction: TravelDirection) -> usize {
        let len = self.points.len();
        match direction {
            TravelDirection::Forward => (from + 1) % len,
            TravelDirection::Backward => (from + len - 1) % len,
        }
    }
}

/// Where the platform is along its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCursor {
    from_index: usize,
    progress: f32,
    direction: TravelDirection,
    next_move_time: f32,
}

impl PathCursor {
    /// Index of the waypoint most recently departed.
    #[must_use]
    pub const fn from_index(&self) -> usize {
        self.from_index
    }

    /// Un-eased fraction of the current segment already travelled.
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Current travel direction.
    #[must_use]
    pub const fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// Time before which the platform stays parked.
    #[must_use]
    pub const fn next_move_time(&self) -> f32 {
        self.next_move_time
    }
}

/// Advances a platform along a [`WaypointPath`].
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPlanner {
    path: WaypointPath,
    cursor: PathCursor,
}

impl WaypointPlanner {
    /// Builds a planner for a platform starting at `origin`.
    ///
    /// # Errors
    ///
    /// See [`WaypointPath::from_local`].
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use shuttle::{PathSettings, WaypointPlanner};
    /// let settings = PathSettings {
    ///     cyclical: false,
    ///     inverted_start: false,
    ///     ease_amount: 0.0,
    ///     speed: 2.0,
    ///     wait_time: 0.0,
    /// };
    /// let local = [Vec2::ZERO, Vec2::new(4.0, 0.0)];
    /// let mut planner = WaypointPlanner::new(&local, Vec2::new(1.0, 1.0), settings).unwrap();
    /// let step = planner.advance(0.5, 0.5, Vec2::new(1.0, 1.0));
    /// assert_eq!(step, Vec2::new(1.0, 0.0));
    /// ```
    pub fn new(
        local_points: &[Vec2],
        origin: Vec2,
        settings: PathSettings,
    ) -> Result<Self, ConfigError> {
        let path = WaypointPath::from_local(local_points, origin, settings)?;
        let (from_index, direction) = if settings.inverted_start {
            (path.last_index(), TravelDirection::Backward)
        } else {
            (0, TravelDirection::Forward)
        };
        Ok(Self {
            path,
            cursor: PathCursor {
                from_index,
                progress: 0.0,
                direction,
                next_move_time: 0.0,
            },
        })
    }

    /// The path being followed.
    #[must_use]
    pub const fn path(&self) -> &WaypointPath {
        &self.path
    }

    /// Current cursor state.
    #[must_use]
    pub const fn cursor(&self) -> &PathCursor {
        &self.cursor
    }

    /// Current travel direction.
    #[must_use]
    pub const fn direction(&self) -> TravelDirection {
        self.cursor.direction
    }

    /// Returns `true` while the platform is pausing at a waypoint.
    #[must_use]
    pub fn is_idle(&self, now: f32) -> bool {
        now < self.cursor.next_move_time()
    }

    /// Seconds until the current pause ends; zero while travelling.
    #[must_use]
    pub fn time_until_move(&self, now: f32) -> f32 {
        (self.cursor.next_move_time() - now).max(0.0)
    }

    /// Progress through the current segment as a rounded percentage.
    #[must_use]
    pub fn percent_journeyed(&self) -> f32 {
        (self.cursor.progress * 100.0).round()
    }

    /// Advances the cursor by `dt` seconds and returns the displacement that
    /// takes the platform from `current_position` to its new place on the
    /// path.
    ///
    /// Returns zero while pausing, and for a non-positive or non-finite `dt`
    /// without touching the cursor. The platform never overshoots the
    /// segment's end; arriving starts the next pause.
    pub fn advance(&mut self, dt: f32, now: f32, current_position: Vec2) -> Vec2 {
        if self.is_idle(now) || !(dt.is_finite() && dt > 0.0) {
            return Vec2::ZERO;
        }

        let from_index = self.cursor.from_index % self.path.points.len();
        let to_index = self.path.next_index(from_index, self.cursor.direction);
        let (Some(&from), Some(&to)) = (
            self.path.points.get(from_index),
            self.path.points.get(to_index),
        ) else {
            return Vec2::ZERO;
        };

        let segment_length = from.distance(to);
        self.cursor.progress = if segment_length <= SEGMENT_EPSILON {
            debug!("waypoints {from_index} and {to_index} coincide; completing segment");
            1.0
        } else {
            (self.cursor.progress + dt * self.path.settings().speed / segment_length).clamp(0.0, 1.0)
        };

        let eased = ease(self.cursor.progress, self.path.settings().ease_amount);
        let target = from.lerp(to, eased);

        if self.cursor.progress >= 1.0 {
            self.arrive(to_index, now);
        }

        target - current_position
    }

    fn arrive(&mut self, index: usize, now: f32) {
        self.cursor.progress = 0.0;
        self.cursor.from_index = index;

        if !self.path.settings().cyclical {
            let at_end = match self.cursor.direction {
                TravelDirection::Forward => index >= self.path.last_index(),
                TravelDirection::Backward => index == 0,
            };
            if at_end {
                self.cursor.direction = self.cursor.direction.reversed();
                debug!(
                    "reached end waypoint {index}; now travelling {:?}",
                    self.cursor.direction
                );
            }
        }

        self.cursor.next_move_time = now + self.path.settings().wait_time;
        debug!(
            "arrived at waypoint {index}; resuming at {}",
            self.cursor.next_move_time
        );
    }
}
