//! Tuning constants shared by the raycast grid, planner and transport.

/// Distance the ray origins are pulled inside a collider's bounds.
pub const SKIN_WIDTH: f32 = 0.125;
/// Target distance between neighbouring rays along one edge.
pub const DISTANCE_BETWEEN_RAYS: f32 = 0.25;
/// Fewest rays cast along any edge.
///
/// Spacing divides by `count - 1`, so anything below two would leave it
/// undefined.
pub const MIN_RAY_COUNT: u16 = 2;
/// Segments shorter than this complete on the tick they start.
pub const SEGMENT_EPSILON: f32 = 1e-6;
/// Collision mask matching every layer.
pub const ALL_LAYERS: u32 = u32::MAX;
/// Layer passengers occupy unless a scenario says otherwise.
pub const DEFAULT_PASSENGER_LAYER: u32 = 1;
/// Step used by the headless runner when none is supplied.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;
