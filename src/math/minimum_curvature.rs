//! Minimum-curvature survey equations.
//!
//! Angle convention: inclination and azimuth are taken in degrees (survey
//! convention) and converted to radians internally. Doglegs returned by
//! [`dogleg`] are in radians; trajectory stations store the value in
//! degrees and convert once at that boundary.

use crate::error::{GeometryError, Result};

/// Direction sample at a measured depth: the scalar inputs the
/// minimum-curvature equations need from one survey station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSample {
    /// Measured depth.
    pub md: f64,
    /// Inclination in degrees, 0 = vertical.
    pub inc: f64,
    /// Azimuth in degrees.
    pub azi: f64,
}

impl DirectionSample {
    /// Creates a new direction sample.
    #[must_use]
    pub fn new(md: f64, inc: f64, azi: f64) -> Self {
        Self { md, inc, azi }
    }
}

/// Computes the dogleg angle between two station directions, in radians.
///
/// Returns exactly 0 when both inclination and azimuth are unchanged.
/// The acos argument is clamped to `[-1, 1]` to absorb floating-point
/// overshoot on nearly-parallel directions.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn dogleg(inc1: f64, inc2: f64, azi1: f64, azi2: f64) -> f64 {
    if inc1 == inc2 && azi1 == azi2 {
        return 0.0;
    }
    let (i1, i2) = (inc1.to_radians(), inc2.to_radians());
    let da = (azi2 - azi1).to_radians();
    let inner = i1.cos() * i2.cos() + i1.sin() * i2.sin() * da.cos();
    inner.clamp(-1.0, 1.0).acos()
}

/// Minimum-curvature ratio factor for a dogleg in radians.
///
/// Returns exactly 1 at `dl = 0`, removing the 0/0 singularity; the
/// factor tends to 1 as `dl` tends to 0.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn ratio_factor(dl: f64) -> f64 {
    if dl == 0.0 {
        1.0
    } else {
        (dl / 2.0).tan() / (dl / 2.0)
    }
}

/// Advances the north coordinate from `p1` to `p2` with the
/// minimum-curvature method. `dl` is the dogleg in radians and must be
/// the same value fed to [`advance_east`] and [`advance_tvd`] for this
/// station pair.
#[must_use]
pub fn advance_north(north_prev: f64, p1: DirectionSample, p2: DirectionSample, dl: f64) -> f64 {
    let rf = ratio_factor(dl);
    let delta = 0.5
        * (p2.md - p1.md)
        * (p1.inc.to_radians().sin() * p1.azi.to_radians().cos()
            + p2.inc.to_radians().sin() * p2.azi.to_radians().cos())
        * rf;
    north_prev + delta
}

/// Advances the east coordinate from `p1` to `p2` with the
/// minimum-curvature method.
#[must_use]
pub fn advance_east(east_prev: f64, p1: DirectionSample, p2: DirectionSample, dl: f64) -> f64 {
    let rf = ratio_factor(dl);
    let delta = 0.5
        * (p2.md - p1.md)
        * (p1.inc.to_radians().sin() * p1.azi.to_radians().sin()
            + p2.inc.to_radians().sin() * p2.azi.to_radians().sin())
        * rf;
    east_prev + delta
}

/// Advances the true vertical depth from `p1` to `p2` with the
/// minimum-curvature method. The azimuth term drops out.
#[must_use]
pub fn advance_tvd(tvd_prev: f64, p1: DirectionSample, p2: DirectionSample, dl: f64) -> f64 {
    let rf = ratio_factor(dl);
    let delta = 0.5 * (p2.md - p1.md) * (p1.inc.to_radians().cos() + p2.inc.to_radians().cos()) * rf;
    tvd_prev + delta
}

/// Normalizes a dogleg (in degrees) to a fixed depth resolution.
///
/// # Errors
///
/// Returns an error for a zero or negative depth interval: no station
/// pair may share a measured depth.
pub fn dogleg_severity(dl: f64, delta_md: f64, resolution: f64) -> Result<f64> {
    if delta_md <= 0.0 {
        return Err(GeometryError::ZeroLengthInterval.into());
    }
    Ok(dl * resolution / delta_md)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    #[test]
    fn dogleg_identical_directions_is_zero() {
        for (inc, azi) in [(0.0, 0.0), (37.5, 128.0), (90.0, 270.0)] {
            assert_eq!(dogleg(inc, inc, azi, azi), 0.0);
        }
    }

    #[test]
    fn dogleg_right_angle_turn() {
        // Vertical to horizontal is a 90 degree dogleg regardless of azimuth.
        let dl = dogleg(0.0, 90.0, 0.0, 45.0);
        assert!((dl - std::f64::consts::FRAC_PI_2).abs() < TOL, "dl={dl}");
    }

    #[test]
    fn dogleg_pure_azimuth_turn() {
        // 30 degrees of azimuth change at 90 degrees inclination is a 30
        // degree dogleg.
        let dl = dogleg(90.0, 90.0, 0.0, 30.0);
        assert!((dl.to_degrees() - 30.0).abs() < 1e-9, "dl={}", dl.to_degrees());
    }

    #[test]
    fn dogleg_clamps_acos_argument() {
        // Nearly identical directions must not produce NaN from acos
        // overshoot.
        let dl = dogleg(45.0, 45.000_000_000_000_01, 90.0, 90.0);
        assert!(dl.is_finite());
        assert!(dl < 1e-6);
    }

    #[test]
    fn ratio_factor_is_one_at_zero() {
        assert_eq!(ratio_factor(0.0), 1.0);
    }

    #[test]
    fn ratio_factor_is_continuous_near_zero() {
        assert_relative_eq!(ratio_factor(1e-8), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ratio_factor(1e-4), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn ratio_factor_quarter_circle() {
        let dl = std::f64::consts::FRAC_PI_2;
        assert_relative_eq!(ratio_factor(dl), (dl / 2.0).tan() / (dl / 2.0), epsilon = TOL);
        assert!(ratio_factor(dl) > 1.0);
    }

    #[test]
    fn advance_tvd_vertical_segment() {
        let p1 = DirectionSample::new(100.0, 0.0, 0.0);
        let p2 = DirectionSample::new(130.0, 0.0, 0.0);
        let tvd = advance_tvd(100.0, p1, p2, 0.0);
        assert!((tvd - 130.0).abs() < TOL, "tvd={tvd}");
        assert!(advance_north(0.0, p1, p2, 0.0).abs() < TOL);
        assert!(advance_east(0.0, p1, p2, 0.0).abs() < TOL);
    }

    #[test]
    fn advance_hold_segment_matches_line() {
        // Constant direction at 30 degrees inclination, azimuth 60.
        let p1 = DirectionSample::new(0.0, 30.0, 60.0);
        let p2 = DirectionSample::new(10.0, 30.0, 60.0);
        let north = advance_north(0.0, p1, p2, 0.0);
        let east = advance_east(0.0, p1, p2, 0.0);
        let tvd = advance_tvd(0.0, p1, p2, 0.0);
        let sin_i = 30f64.to_radians().sin();
        assert_relative_eq!(north, 10.0 * sin_i * 60f64.to_radians().cos(), epsilon = TOL);
        assert_relative_eq!(east, 10.0 * sin_i * 60f64.to_radians().sin(), epsilon = TOL);
        assert_relative_eq!(tvd, 10.0 * 30f64.to_radians().cos(), epsilon = TOL);
    }

    #[test]
    fn advance_quarter_circle_lands_on_radius() {
        // A 90 degree build over an arc of length r*pi/2 must land at
        // (north, tvd) = (r, r).
        let radius = 100.0;
        let arc = radius * std::f64::consts::FRAC_PI_2;
        let p1 = DirectionSample::new(0.0, 0.0, 0.0);
        let p2 = DirectionSample::new(arc, 90.0, 0.0);
        let dl = dogleg(p1.inc, p2.inc, p1.azi, p2.azi);
        assert_relative_eq!(advance_north(0.0, p1, p2, dl), radius, epsilon = 1e-9);
        assert_relative_eq!(advance_tvd(0.0, p1, p2, dl), radius, epsilon = 1e-9);
        assert!(advance_east(0.0, p1, p2, dl).abs() < TOL);
    }

    #[test]
    fn dogleg_severity_normalizes() {
        let dls = dogleg_severity(3.0, 90.0, 30.0).unwrap();
        assert!((dls - 1.0).abs() < TOL, "dls={dls}");
    }

    #[test]
    fn dogleg_severity_rejects_zero_interval() {
        assert!(dogleg_severity(1.0, 0.0, 30.0).is_err());
        assert!(dogleg_severity(1.0, -5.0, 30.0).is_err());
    }
}
