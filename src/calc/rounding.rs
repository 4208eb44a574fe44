//! Presentation rounding, applied once when a result is constructed.

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// ```
/// use solar_audit::calc::rounding::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(4.49), 4.0);
/// ```
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds to `decimals` places by scaling, rounding half-up, and unscaling.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Rounds half-up to a whole number of currency or energy units.
///
/// Saturates at the `i64` range; NaN maps to 0.
pub fn round_whole(value: f64) -> i64 {
    round_half_up(value) as i64
}
