//! Arbitrary-point interpolation along a survey station list.
//!
//! Straight intervals (hold, vertical) interpolate linearly in measured
//! depth. Curved intervals scale the pair's dogleg by the depth fraction
//! and blend the bracketing direction vectors spherically before
//! re-running the minimum-curvature advance at the local dogleg.

use crate::error::{RangeError, Result};
use crate::math::minimum_curvature::{
    advance_east, advance_north, advance_tvd, dogleg_severity, DirectionSample,
};
use crate::math::Vector3;
use crate::trajectory::{PointType, SectionType, Station};

/// Interpolates a station at `target_md` along a strictly-increasing
/// station list. An exact measured-depth hit returns that station
/// unchanged.
///
/// # Errors
///
/// Returns an error when `target_md` is negative or beyond the last
/// station.
#[allow(clippy::float_cmp)]
pub fn interpolate(target_md: f64, stations: &[Station], dls_resolution: f64) -> Result<Station> {
    if target_md < 0.0 {
        return Err(RangeError::NegativeDepth { depth: target_md }.into());
    }
    let max = stations.last().map_or(0.0, |s| s.md);
    if target_md > max {
        return Err(RangeError::MdBeyondTrajectory { md: target_md, max }.into());
    }

    let mut bracket = None;
    for (idx, point) in stations.iter().enumerate() {
        if point.md == target_md {
            return Ok(point.clone());
        }
        if idx + 1 < stations.len() && point.md < target_md && target_md < stations[idx + 1].md {
            bracket = Some((point, &stations[idx + 1]));
            break;
        }
    }
    // The range checks above guarantee a bracketing pair exists.
    let Some((p1, p2)) = bracket else {
        return Err(RangeError::MdBeyondTrajectory { md: target_md, max }.into());
    };
    interpolate_between(target_md, p1, p2, dls_resolution)
}

/// Interpolates a station strictly inside the interval `(p1, p2)`.
///
/// The interpolation policy follows the terminal station's section
/// type: hold and vertical intervals are linear; anything else is a
/// curved interval.
pub(crate) fn interpolate_between(
    target_md: f64,
    p1: &Station,
    p2: &Station,
    dls_resolution: f64,
) -> Result<Station> {
    let dl_local = (target_md - p1.md) * p2.dl / (p2.md - p1.md);
    match p2.section {
        SectionType::Hold => Ok(hold_point(target_md, dl_local, p1, p2)),
        SectionType::Vertical => Ok(vertical_point(target_md, dl_local, p1)),
        // A nominally curved interval with no dogleg is a straight line;
        // the spherical blend would divide by sin(0).
        _ if p2.dl == 0.0 => Ok(hold_point(target_md, dl_local, p1, p2)),
        _ => curved_point(target_md, dl_local, p1, p2, dls_resolution),
    }
}

/// Linear interpolation along a straight inclined interval.
fn hold_point(target_md: f64, dl_local: f64, p1: &Station, p2: &Station) -> Station {
    let span = p2.md - p1.md;
    let f = (target_md - p1.md) / span;
    Station {
        md: target_md,
        inc: p1.inc,
        azi: p1.azi,
        tvd: p1.tvd + f * (p2.tvd - p1.tvd),
        north: p1.north + f * (p2.north - p1.north),
        east: p1.east + f * (p2.east - p1.east),
        dl: dl_local,
        dls: 0.0,
        section: p2.section,
        point: PointType::Interpolated,
    }
}

/// Interpolation inside a vertical interval: tvd tracks md one to one,
/// the horizontal position stays put.
fn vertical_point(target_md: f64, dl_local: f64, p1: &Station) -> Station {
    Station {
        md: target_md,
        inc: p1.inc,
        azi: p1.azi,
        tvd: p1.tvd + (target_md - p1.md),
        north: p1.north,
        east: p1.east,
        dl: dl_local,
        dls: 0.0,
        section: SectionType::Vertical,
        point: PointType::Interpolated,
    }
}

/// Interpolation inside a build/drop/horizontal-curve interval.
fn curved_point(
    target_md: f64,
    dl_local: f64,
    p1: &Station,
    p2: &Station,
    dls_resolution: f64,
) -> Result<Station> {
    let delta_md = target_md - p1.md;
    let dls = dogleg_severity(dl_local, delta_md, dls_resolution)?;
    let (inc, azi) = blend_direction(p1, p2, dl_local);

    let dl_rad = dl_local.to_radians();
    let s1 = p1.sample();
    let s2 = DirectionSample::new(target_md, inc, azi);
    Ok(Station {
        md: target_md,
        inc,
        azi,
        tvd: advance_tvd(p1.tvd, s1, s2, dl_rad),
        north: advance_north(p1.north, s1, s2, dl_rad),
        east: advance_east(p1.east, s1, s2, dl_rad),
        dl: dl_local,
        dls,
        section: p2.section,
        point: PointType::Interpolated,
    })
}

/// Unit direction vector of a station as (north, east, vertical)
/// components.
fn direction_vector(inc: f64, azi: f64) -> Vector3 {
    let (i, a) = (inc.to_radians(), azi.to_radians());
    Vector3::new(i.sin() * a.cos(), i.sin() * a.sin(), i.cos())
}

/// Spherically blends the bracketing directions at a local dogleg and
/// recovers inclination and azimuth in degrees.
#[allow(clippy::float_cmp)]
fn blend_direction(p1: &Station, p2: &Station, dl_local: f64) -> (f64, f64) {
    let total = p2.dl.to_radians();
    let local = dl_local.to_radians();
    let d1 = direction_vector(p1.inc, p1.azi);
    let d2 = direction_vector(p2.inc, p2.azi);
    let blended = (d1 * (total - local).sin() + d2 * local.sin()) / total.sin();
    let (n, e, v) = (blended.x, blended.y, blended.z);

    // Equal endpoint angles are copied through: recovering them from the
    // blend would only add numerical noise (and divides by zero at
    // inc = 90 or inc = 0).
    let inc = if p1.inc == p2.inc {
        p1.inc
    } else {
        (n.hypot(e) / v).atan().to_degrees()
    };
    let azi = if p1.azi == p2.azi {
        p1.azi
    } else {
        let raw = ((e / n).atan() + std::f64::consts::TAU) % std::f64::consts::TAU;
        adjust_azimuth(raw.to_degrees(), p1.azi, p2.azi)
    };
    (inc, azi)
}

/// Snaps a raw arctangent azimuth into the angular range bounded by the
/// bracketing stations, nudging by 90 degrees at most three times.
///
/// The single-argument arctangent loses the quadrant; this bounded
/// correction recovers it for swings within one interpolation interval.
/// Beyond three nudges the value is accepted as-is (best effort): an
/// interval whose azimuth crosses several quadrant boundaries can still
/// land outside the bracket.
fn adjust_azimuth(mut azi: f64, azi1: f64, azi2: f64) -> f64 {
    let (lo, hi) = if azi1 <= azi2 { (azi1, azi2) } else { (azi2, azi1) };
    let mut count = 1;
    while !(lo..=hi).contains(&azi) {
        if azi > hi {
            azi -= 90.0;
        } else {
            azi += 90.0;
        }
        count += 1;
        if count == 4 {
            break;
        }
    }
    azi
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::math::minimum_curvature::dogleg;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn station(
        md: f64,
        inc: f64,
        azi: f64,
        tvd: f64,
        north: f64,
        east: f64,
        dl: f64,
        section: SectionType,
    ) -> Station {
        Station {
            md,
            inc,
            azi,
            tvd,
            north,
            east,
            dl,
            dls: 0.0,
            section,
            point: PointType::Survey,
        }
    }

    fn vertical_pair() -> Vec<Station> {
        vec![
            Station::surface(),
            station(100.0, 0.0, 0.0, 100.0, 0.0, 0.0, 0.0, SectionType::Vertical),
        ]
    }

    #[test]
    fn rejects_negative_and_overdeep_md() {
        let stations = vertical_pair();
        assert!(interpolate(-1.0, &stations, 30.0).is_err());
        assert!(interpolate(100.1, &stations, 30.0).is_err());
    }

    #[test]
    fn exact_hit_returns_the_station_unchanged() {
        let stations = vertical_pair();
        let p = interpolate(100.0, &stations, 30.0).unwrap();
        assert_eq!(p, stations[1]);
        assert_eq!(p.point, PointType::Survey);
    }

    #[test]
    fn vertical_interval_advances_tvd_only() {
        let stations = vertical_pair();
        let p = interpolate(42.5, &stations, 30.0).unwrap();
        assert_eq!(p.point, PointType::Interpolated);
        assert!((p.tvd - 42.5).abs() < TOL);
        assert!(p.north.abs() < TOL);
        assert!(p.east.abs() < TOL);
        assert_eq!(p.inc, 0.0);
        assert_eq!(p.azi, 0.0);
        assert_eq!(p.dls, 0.0);
    }

    #[test]
    fn hold_interval_interpolates_on_the_chord() {
        // A straight 30 degree hold from (0,0,0) to a point 100 md away.
        let sin_i = 30f64.to_radians().sin();
        let cos_i = 30f64.to_radians().cos();
        let p2 = station(
            200.0,
            30.0,
            45.0,
            100.0 + 100.0 * cos_i,
            100.0 * sin_i * 45f64.to_radians().cos(),
            100.0 * sin_i * 45f64.to_radians().sin(),
            0.0,
            SectionType::Hold,
        );
        let p1 = station(100.0, 30.0, 45.0, 100.0, 0.0, 0.0, 0.0, SectionType::Hold);
        let stations = vec![Station::surface(), p1.clone(), p2.clone()];
        let mid = interpolate(150.0, &stations, 30.0).unwrap();
        assert_relative_eq!(mid.north, 0.5 * (p1.north + p2.north), epsilon = TOL);
        assert_relative_eq!(mid.east, 0.5 * (p1.east + p2.east), epsilon = TOL);
        assert_relative_eq!(mid.tvd, 0.5 * (p1.tvd + p2.tvd), epsilon = TOL);
        assert_eq!(mid.inc, 30.0);
        assert_eq!(mid.azi, 45.0);
        assert_eq!(mid.dls, 0.0);
    }

    #[test]
    fn curved_interval_blends_inclination() {
        // Quarter-circle build from vertical to horizontal, radius 100.
        let radius = 100.0;
        let arc = radius * std::f64::consts::FRAC_PI_2;
        let dl = dogleg(0.0, 90.0, 0.0, 0.0).to_degrees();
        let p1 = Station::surface();
        let p2 = station(arc, 90.0, 0.0, radius, radius, 0.0, dl, SectionType::BuildUp);
        let stations = vec![p1, p2];

        let mid = interpolate(arc / 2.0, &stations, 30.0).unwrap();
        assert_relative_eq!(mid.inc, 45.0, epsilon = 1e-6);
        assert_eq!(mid.azi, 0.0);
        assert_eq!(mid.point, PointType::Interpolated);
        assert_eq!(mid.section, SectionType::BuildUp);
        // Exact circle geometry at 45 degrees of sweep.
        let theta = 45f64.to_radians();
        assert_relative_eq!(mid.tvd, radius * theta.sin(), epsilon = 1e-6);
        assert_relative_eq!(mid.north, radius * (1.0 - theta.cos()), epsilon = 1e-6);
        assert!(mid.east.abs() < TOL);
    }

    #[test]
    fn curved_interval_scales_dogleg_by_depth_fraction() {
        let radius = 100.0;
        let arc = radius * std::f64::consts::FRAC_PI_2;
        let dl = 90.0;
        let p2 = station(arc, 90.0, 0.0, radius, radius, 0.0, dl, SectionType::BuildUp);
        let stations = vec![Station::surface(), p2];
        let third = interpolate(arc / 3.0, &stations, 30.0).unwrap();
        assert_relative_eq!(third.dl, 30.0, epsilon = 1e-9);
        let expected_dls = 30.0 * 30.0 / (arc / 3.0);
        assert_relative_eq!(third.dls, expected_dls, epsilon = 1e-9);
    }

    #[test]
    fn straight_interval_with_curved_label_falls_back_to_linear() {
        // Horizontal run: section Horizontal but zero dogleg.
        let p1 = station(100.0, 90.0, 0.0, 50.0, 10.0, 0.0, 90.0, SectionType::BuildUp);
        let p2 = station(200.0, 90.0, 0.0, 50.0, 110.0, 0.0, 0.0, SectionType::Horizontal);
        let stations = vec![Station::surface(), p1, p2];
        let mid = interpolate(150.0, &stations, 30.0).unwrap();
        assert_relative_eq!(mid.north, 60.0, epsilon = TOL);
        assert_relative_eq!(mid.tvd, 50.0, epsilon = TOL);
        assert_eq!(mid.inc, 90.0);
    }

    #[test]
    fn curved_interval_with_azimuth_turn_stays_in_bracket() {
        // Horizontal curve turning from azimuth 10 to 80 degrees.
        let dl = dogleg(90.0, 90.0, 10.0, 80.0).to_degrees();
        let p1 = station(0.0, 90.0, 10.0, 100.0, 0.0, 0.0, 0.0, SectionType::Horizontal);
        let p2 = station(100.0, 90.0, 80.0, 100.0, 50.0, 60.0, dl, SectionType::BuildUp);
        let stations = vec![p1, p2];
        let mid = interpolate(50.0, &stations, 30.0).unwrap();
        assert!((10.0..=80.0).contains(&mid.azi), "azi={}", mid.azi);
        assert_relative_eq!(mid.azi, 45.0, epsilon = 1e-6);
        assert_eq!(mid.inc, 90.0);
    }

    #[test]
    fn adjust_azimuth_nudges_into_bracket() {
        assert!((adjust_azimuth(95.0, 0.0, 45.0) - 5.0).abs() < TOL);
        assert!((adjust_azimuth(300.0, 340.0, 355.0) - 345.0).abs() < 1e-9);
        // In range already: untouched.
        assert!((adjust_azimuth(30.0, 0.0, 45.0) - 30.0).abs() < TOL);
    }

    #[test]
    fn adjust_azimuth_gives_up_after_three_nudges() {
        // 350 is more than three 90 degree steps above the bracket; the
        // correction stops and the raw-ish value passes through.
        let adjusted = adjust_azimuth(350.0, 0.0, 10.0);
        assert!((adjusted - 80.0).abs() < TOL, "adjusted={adjusted}");
    }
}
