//! Ray origins and spacing derived from a collider's bounds.
//!
//! Every collision query a platform makes starts from this grid: the four
//! corners of its bounds pulled in by the skin width, with rays fanned out
//! along each edge at a roughly constant separation.

use glam::Vec2;

use crate::geometry::{Aabb2, GeometryError};
use crate::numeric::round_to_ray_count;
use crate::{DISTANCE_BETWEEN_RAYS, MIN_RAY_COUNT, SKIN_WIDTH};

/// Inputs controlling how densely a collider is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Inset applied to every side before placing rays.
    pub skin_width: f32,
    /// Target distance between neighbouring rays.
    pub ray_separation: f32,
    /// Lower bound for the computed ray counts; values below two are raised
    /// to two.
    pub min_ray_count: u16,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            skin_width: SKIN_WIDTH,
            ray_separation: DISTANCE_BETWEEN_RAYS,
            min_ray_count: MIN_RAY_COUNT,
        }
    }
}

/// Corners of the skin-inset bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaycastOrigins {
    /// Inset bottom-left corner.
    pub bottom_left: Vec2,
    /// Inset bottom-right corner.
    pub bottom_right: Vec2,
    /// Inset top-left corner.
    pub top_left: Vec2,
    /// Inset top-right corner.
    pub top_right: Vec2,
}

impl RaycastOrigins {
    /// Computes the inset corners of `bounds`.
    #[must_use]
    pub fn from_bounds(bounds: Aabb2, skin_width: f32) -> Self {
        let inset = bounds.inset(skin_width);
        Self {
            bottom_left: inset.min,
            bottom_right: Vec2::new(inset.max.x, inset.min.y),
            top_left: Vec2::new(inset.min.x, inset.max.y),
            top_right: inset.max,
        }
    }
}

/// How many rays fit along each edge and how far apart they sit.
///
/// Horizontal rays leave the left and right edges, so their count and
/// spacing follow the collider's height; vertical rays follow its width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaySpacing {
    /// Rays cast from each side edge.
    pub horizontal_count: u16,
    /// Rays cast from the top or bottom edge.
    pub vertical_count: u16,
    /// Vertical distance between horizontal rays.
    pub horizontal_spacing: f32,
    /// Horizontal distance between vertical rays.
    pub vertical_spacing: f32,
}

impl RaySpacing {
    /// Derives ray counts and spacing for `bounds`.
    ///
    /// The computed counts never drop below `min_ray_count` (itself raised to
    /// [`MIN_RAY_COUNT`]) so the spacing division is always defined.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateBounds`] when the inset bounds have
    /// no positive width or height.
    pub fn from_bounds(
        bounds: Aabb2,
        skin_width: f32,
        ray_separation: f32,
        min_ray_count: u16,
    ) -> Result<Self, GeometryError> {
        let size = bounds.inset(skin_width).size();
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(GeometryError::DegenerateBounds {
                width: size.x,
                height: size.y,
                skin_width,
            });
        }

        let minimum = min_ray_count.max(MIN_RAY_COUNT);
        let horizontal_count = round_to_ray_count(size.y, ray_separation, minimum);
        let vertical_count = round_to_ray_count(size.x, ray_separation, minimum);

        Ok(Self {
            horizontal_count,
            vertical_count,
            horizontal_spacing: size.y / f32::from(horizontal_count - 1),
            vertical_spacing: size.x / f32::from(vertical_count - 1),
        })
    }
}

/// Origins and spacing for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaycastGrid {
    /// Inset corners.
    pub origins: RaycastOrigins,
    /// Ray counts and spacing.
    pub spacing: RaySpacing,
}

impl RaycastGrid {
    /// Computes the grid for `bounds`.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from [`RaySpacing::from_bounds`].
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use shuttle::{Aabb2, GridSettings, RaycastGrid};
    /// let bounds = Aabb2::new(Vec2::ZERO, Vec2::new(2.0, 1.0));
    /// let grid = RaycastGrid::compute(bounds, &GridSettings::default()).unwrap();
    /// assert_eq!(grid.spacing.vertical_count, 7);
    /// assert_eq!(grid.spacing.horizontal_count, 3);
    /// assert_eq!(grid.origins.top_left, Vec2::new(0.125, 0.875));
    /// ```
    pub fn compute(bounds: Aabb2, settings: &GridSettings) -> Result<Self, GeometryError> {
        let spacing = RaySpacing::from_bounds(
            bounds,
            settings.skin_width,
            settings.ray_separation,
            settings.min_ray_count,
        )?;
        Ok(Self {
            origins: RaycastOrigins::from_bounds(bounds, settings.skin_width),
            spacing,
        })
    }

    /// Origins of the vertical rays, walking right from `start`.
    pub fn column_origins(&self, start: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.spacing.vertical_count)
            .map(move |column| start + Vec2::X * (self.spacing.vertical_spacing * f32::from(column)))
    }

    /// Origins of the horizontal rays, walking up from `start`.
    pub fn row_origins(&self, start: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.spacing.horizontal_count)
            .map(move |row| start + Vec2::Y * (self.spacing.horizontal_spacing * f32::from(row)))
    }
}
