//! Axis-aligned boxes and the ray test used against them.
//!
//! [`Aabb2`] is the only shape the engine understands: platforms and
//! passengers translate but never rotate, so their world-space bounds stay
//! axis-aligned.

use glam::Vec2;
use thiserror::Error;

/// Rays whose component along an axis is below this are treated as parallel
/// to that axis.
const PARALLEL_EPSILON: f32 = 1e-9;

/// Geometry that cannot host a raycast grid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Removing the skin from both sides left no width or height.
    #[error("bounds collapse to {width}x{height} after removing a skin of {skin_width}")]
    DegenerateBounds {
        /// Inset width.
        width: f32,
        /// Inset height.
        height: f32,
        /// Skin removed from every side.
        skin_width: f32,
    },
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb2 {
    /// Bottom-left corner.
    pub min: Vec2,
    /// Top-right corner.
    pub max: Vec2,
}

impl Aabb2 {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box centred on `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use shuttle::Aabb2;
    /// let bounds = Aabb2::from_center_half_extents(Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.25));
    /// assert_eq!(bounds.min, Vec2::new(0.5, 0.75));
    /// assert_eq!(bounds.max, Vec2::new(1.5, 1.25));
    /// ```
    #[must_use]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrinks the box by `margin` on every side.
    #[must_use]
    pub fn inset(&self, margin: f32) -> Self {
        let offset = Vec2::splat(margin);
        Self {
            min: self.min + offset,
            max: self.max - offset,
        }
    }

    /// Moves the box by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Distance along `direction` at which a ray from `origin` enters the box.
    ///
    /// `direction` must be a unit vector. Returns `Some(0.0)` when the origin
    /// already lies inside or on the boundary, and `None` when the box is not
    /// reached within `max_distance`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use shuttle::Aabb2;
    /// let bounds = Aabb2::new(Vec2::new(0.0, 2.0), Vec2::new(1.0, 3.0));
    /// let hit = bounds.ray_distance(Vec2::new(0.5, 0.0), Vec2::Y, 5.0);
    /// assert_eq!(hit, Some(2.0));
    /// assert_eq!(bounds.ray_distance(Vec2::new(0.5, 0.0), Vec2::Y, 1.0), None);
    /// ```
    #[must_use]
    pub fn ray_distance(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let mut entry = 0.0_f32;
        let mut exit = max_distance;
        let slabs = [
            (origin.x, direction.x, self.min.x, self.max.x),
            (origin.y, direction.y, self.min.y, self.max.y),
        ];

        for (start, step, low, high) in slabs {
            if step.abs() < PARALLEL_EPSILON {
                if start < low || start > high {
                    return None;
                }
                continue;
            }
            let to_low = (low - start) / step;
            let to_high = (high - start) / step;
            let (near, far) = if to_low <= to_high {
                (to_low, to_high)
            } else {
                (to_high, to_low)
            };
            entry = entry.max(near);
            exit = exit.min(far);
            if entry > exit {
                return None;
            }
        }

        Some(entry)
    }
}
