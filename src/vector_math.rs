//! Small vector helpers for axis-aligned ray work.
use glam::Vec2;

/// Returns `-1.0` for negative values and `1.0` otherwise.
///
/// Zero counts as positive, so a platform at rest on one axis still picks a
/// definite edge to cast from.
///
/// # Examples
/// ```
/// use shuttle::vector_math::axis_sign;
/// assert_eq!(axis_sign(-0.3), -1.0);
/// assert_eq!(axis_sign(0.0), 1.0);
/// assert_eq!(axis_sign(2.0), 1.0);
/// ```
#[must_use]
pub fn axis_sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Returns `vector` unchanged when both components are finite, else zero.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use shuttle::vec_finite_or_zero;
/// assert_eq!(vec_finite_or_zero(Vec2::new(1.0, -2.0)), Vec2::new(1.0, -2.0));
/// assert_eq!(vec_finite_or_zero(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
/// ```
#[must_use]
pub fn vec_finite_or_zero(vector: Vec2) -> Vec2 {
    if vector.is_finite() {
        vector
    } else {
        Vec2::ZERO
    }
}
