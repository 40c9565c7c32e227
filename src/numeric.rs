//! Numeric helpers used by the raycast grid and the waypoint planner.
//!
//! These keep the float-to-integer conversions and the easing curve in one
//! place so the call-sites stay free of casts.

/// Rounds `length / separation` to a ray count of at least `minimum`.
///
/// Non-finite estimates (a zero separation, for instance) fall back to
/// `minimum`. The result saturates at `u16::MAX`.
///
/// # Examples
///
/// ```
/// use shuttle::numeric::round_to_ray_count;
/// assert_eq!(round_to_ray_count(1.75, 0.25, 2), 7);
/// assert_eq!(round_to_ray_count(0.1, 0.25, 2), 2);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The estimate is clamped into the u16 domain before casting."
)]
#[must_use]
pub fn round_to_ray_count(length: f32, separation: f32, minimum: u16) -> u16 {
    let estimate = (length / separation).round();
    if !estimate.is_finite() {
        return minimum;
    }
    estimate.clamp(f32::from(minimum), f32::from(u16::MAX)) as u16
}

/// Symmetric ease-in/ease-out curve over `progress` in `[0, 1]`.
///
/// Evaluates `x^a / (x^a + (1 - x)^a)` with `a = ease_amount + 1`. An
/// `ease_amount` of zero yields linear motion; larger values hold back near
/// both ends of the segment. Inputs outside `[0, 1]` are clamped first.
///
/// The curve is computed as `1 / (1 + ((1 - x) / x)^a)` so steep curves
/// saturate to 0 or 1 instead of dividing two underflowed powers.
///
/// # Examples
///
/// ```
/// use shuttle::numeric::ease;
/// assert_eq!(ease(0.0, 2.0), 0.0);
/// assert_eq!(ease(0.5, 2.0), 0.5);
/// assert_eq!(ease(1.0, 2.0), 1.0);
/// assert!((ease(0.25, 0.0) - 0.25).abs() < 1e-6);
/// assert_eq!(ease(0.5, 200.0), 0.5);
/// ```
#[must_use]
pub fn ease(progress: f32, ease_amount: f32) -> f32 {
    let x = progress.clamp(0.0, 1.0);
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let exponent = ease_amount.max(0.0) + 1.0;
    1.0 / (1.0 + ((1.0 - x) / x).powf(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::exact(1.75, 0.25, 7)]
    #[case::rounds_up(0.9, 0.25, 4)]
    #[case::clamped_to_minimum(0.2, 0.25, 2)]
    #[case::zero_separation(1.0, 0.0, 2)]
    fn ray_counts(#[case] length: f32, #[case] separation: f32, #[case] expected: u16) {
        assert_eq!(round_to_ray_count(length, separation, 2), expected);
    }

    #[test]
    fn larger_ease_amounts_hold_back_early_progress() {
        let gentle = ease(0.2, 0.5);
        let strong = ease(0.2, 2.0);
        assert!(strong < gentle, "{strong} should trail {gentle}");
        assert_relative_eq!(ease(0.2, 0.0), 0.2, epsilon = 1e-6);
    }

    #[rstest]
    #[case::early(0.05)]
    #[case::quarter(0.25)]
    #[case::middle(0.5)]
    #[case::late(0.95)]
    fn steep_curves_stay_finite(#[case] progress: f32) {
        let eased = ease(progress, 200.0);
        assert!(eased.is_finite(), "ease({progress}, 200) = {eased}");
        assert!((0.0..=1.0).contains(&eased));
    }

    #[test]
    fn ease_clamps_out_of_range_progress() {
        assert_relative_eq!(ease(-0.5, 1.0), 0.0);
        assert_relative_eq!(ease(1.5, 1.0), 1.0);
    }
}
