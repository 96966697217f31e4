//! Two-point connector: a single-curve path from a kickoff point to a
//! target point.
//!
//! The connector compares the vertical and horizontal displacement of
//! the target and picks one of three arc regimes, then hands the
//! resulting md/inclination/azimuth profile to the survey loader in
//! non-equidistant mode, so arrival at the target position is exact up
//! to the minimum-curvature integration.

use tracing::debug;

use crate::error::{InputError, Result};
use crate::math::linspace;
use crate::survey::{SurveyLoader, SurveyStation};
use crate::trajectory::{StartOffset, Trajectory, TrajectoryInfo};

/// A position a connector runs between.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConnectorPoint {
    pub north: f64,
    pub east: f64,
    pub tvd: f64,
}

impl ConnectorPoint {
    #[must_use]
    pub fn new(north: f64, east: f64, tvd: f64) -> Self {
        Self { north, east, tvd }
    }
}

/// Builds a connector trajectory from a kickoff point down to a target
/// point.
#[derive(Debug, Clone)]
pub struct TwoPointConnector {
    kickoff: ConnectorPoint,
    target: ConnectorPoint,
    inner_points: usize,
    info: TrajectoryInfo,
}

impl TwoPointConnector {
    /// Creates a connector with the default 20 stations along the
    /// curved zone.
    #[must_use]
    pub fn new(kickoff: ConnectorPoint, target: ConnectorPoint) -> Self {
        Self {
            kickoff,
            target,
            inner_points: 20,
            info: TrajectoryInfo::default(),
        }
    }

    /// Number of stations generated inside the curved zone.
    #[must_use]
    pub fn inner_points(mut self, count: usize) -> Self {
        self.inner_points = count;
        self
    }

    /// Replaces the trajectory metadata block.
    #[must_use]
    pub fn info(mut self, info: TrajectoryInfo) -> Self {
        self.info = info;
        self
    }

    /// Builds the connector trajectory.
    ///
    /// # Errors
    ///
    /// Returns an error when the kickoff tvd is negative or the target
    /// does not lie below the kickoff.
    #[allow(clippy::float_cmp)]
    pub fn connect(&self) -> Result<Trajectory> {
        if self.kickoff.tvd < 0.0 {
            return Err(InputError::NegativeKickoff {
                tvd: self.kickoff.tvd,
            }
            .into());
        }
        let dv = self.target.tvd - self.kickoff.tvd;
        if dv <= 0.0 {
            return Err(InputError::TargetAboveKickoff {
                target: self.target.tvd,
                kickoff: self.kickoff.tvd,
            }
            .into());
        }
        let dn = self.target.north - self.kickoff.north;
        let de = self.target.east - self.kickoff.east;
        let dh = dn.hypot(de);
        let azimuth = horizontal_azimuth(dn, de);
        debug!(dv, dh, azimuth, "connecting two points");

        // Straight vertical drop to the kickoff depth first; a kickoff
        // at the surface starts curving immediately.
        let mut records = vec![SurveyStation::new(0.0, 0.0, 0.0)];
        if self.kickoff.tvd > 0.0 {
            records.push(SurveyStation::new(self.kickoff.tvd, 0.0, 0.0));
        }

        #[allow(clippy::cast_precision_loss)]
        let steps = (self.inner_points + 1) as f64;
        if dh == 0.0 {
            // No horizontal displacement: keep drilling straight down.
            records.push(SurveyStation::new(self.target.tvd, 0.0, 0.0));
        } else if dv == dh {
            // One quarter circle lands exactly on the target.
            self.push_arc_records(&mut records, dh, 90.0, steps, azimuth);
        } else if dv < dh {
            // Quarter circle of radius dv, then a horizontal run.
            self.push_arc_records(&mut records, dv, 90.0, steps, azimuth);
            let last_md = records.last().map_or(0.0, |r| r.md);
            records.push(SurveyStation::new(last_md + (dh - dv), 90.0, azimuth));
        } else {
            // An arc through both points without overshoot: lands at an
            // inclination short of horizontal.
            let radius = (dh * dh + dv * dv) / (2.0 * dh);
            let theta = (dv / radius).asin().to_degrees();
            self.push_arc_records(&mut records, radius, theta, steps, azimuth);
        }

        SurveyLoader::new(records)
            .equidistant(false)
            .start(StartOffset {
                north: self.kickoff.north,
                east: self.kickoff.east,
                depth: 0.0,
            })
            .info(self.info)
            .load()
    }

    /// Appends evenly swept stations along a circular arc of the given
    /// radius, from vertical to `theta` degrees of inclination.
    fn push_arc_records(
        &self,
        records: &mut Vec<SurveyStation>,
        radius: f64,
        theta: f64,
        steps: f64,
        azimuth: f64,
    ) {
        let arc = radius * theta.to_radians();
        let start_md = self.kickoff.tvd;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = steps as usize;
        let md = linspace(start_md + arc / steps, start_md + arc, count);
        let inc = linspace(theta / steps, theta, count);
        for (&m, &i) in md.iter().zip(inc.iter()) {
            records.push(SurveyStation::new(m, i, azimuth));
        }
    }
}

/// Azimuth of a horizontal displacement vector, quadrant-aware and
/// normalized into `[0, 360)`. A zero vector maps to azimuth 0.
#[allow(clippy::float_cmp)]
fn horizontal_azimuth(dn: f64, de: f64) -> f64 {
    if dn != 0.0 && de != 0.0 {
        let beta = (dn / de).atan().to_degrees();
        if de > 0.0 {
            90.0 - beta
        } else {
            270.0 - beta
        }
    } else if dn == 0.0 {
        if de > 0.0 {
            90.0
        } else if de < 0.0 {
            270.0
        } else {
            0.0
        }
    } else if dn > 0.0 {
        0.0
    } else {
        180.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::trajectory::PointType;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-6;

    fn assert_connects(kickoff: ConnectorPoint, target: ConnectorPoint) -> Trajectory {
        let well = TwoPointConnector::new(kickoff, target).connect().unwrap();
        let first = &well.stations()[0];
        assert_relative_eq!(first.north, kickoff.north, epsilon = TOL);
        assert_relative_eq!(first.east, kickoff.east, epsilon = TOL);
        let last = well.stations().last().unwrap();
        assert_relative_eq!(last.north, target.north, epsilon = TOL);
        assert_relative_eq!(last.east, target.east, epsilon = TOL);
        assert_relative_eq!(last.tvd, target.tvd, epsilon = TOL);
        for pair in well.stations().windows(2) {
            assert!(pair[1].md > pair[0].md, "md must increase");
        }
        well
    }

    #[test]
    fn equal_vertical_and_horizontal_displacement() {
        // dv == dh == 500: a single quarter circle.
        let well = assert_connects(
            ConnectorPoint::new(0.0, 0.0, 300.0),
            ConnectorPoint::new(0.0, -500.0, 800.0),
        );
        let last = well.stations().last().unwrap();
        assert_relative_eq!(last.inc, 90.0, epsilon = TOL);
        assert_relative_eq!(last.azi, 270.0, epsilon = TOL);
    }

    #[test]
    fn offset_kickoff_quarter_circle() {
        assert_connects(
            ConnectorPoint::new(50.0, 20.0, 300.0),
            ConnectorPoint::new(0.0, -500.0, 800.0),
        );
    }

    #[test]
    fn vertical_smaller_than_horizontal_adds_a_lateral() {
        let well = assert_connects(
            ConnectorPoint::new(-35.0, 21.0, 300.0),
            ConnectorPoint::new(-100.0, 800.0, 800.0),
        );
        let last = well.stations().last().unwrap();
        assert_relative_eq!(last.inc, 90.0, epsilon = TOL);
    }

    #[test]
    fn vertical_larger_than_horizontal_lands_short_of_horizontal() {
        let well = assert_connects(
            ConnectorPoint::new(100.0, -48.0, 300.0),
            ConnectorPoint::new(500.0, 0.0, 1900.0),
        );
        let last = well.stations().last().unwrap();
        assert!(last.inc < 90.0, "inc={}", last.inc);
        assert!(last.inc > 0.0);
    }

    #[test]
    fn zero_horizontal_displacement_stays_vertical() {
        let well = assert_connects(
            ConnectorPoint::new(10.0, 10.0, 200.0),
            ConnectorPoint::new(10.0, 10.0, 900.0),
        );
        let last = well.stations().last().unwrap();
        assert_relative_eq!(last.inc, 0.0, epsilon = TOL);
        assert_relative_eq!(last.md, 900.0, epsilon = TOL);
    }

    #[test]
    fn target_above_kickoff_is_rejected() {
        let result = TwoPointConnector::new(
            ConnectorPoint::new(0.0, 0.0, 800.0),
            ConnectorPoint::new(100.0, 0.0, 300.0),
        )
        .connect();
        assert!(result.is_err());
    }

    #[test]
    fn azimuth_quadrants() {
        assert_relative_eq!(horizontal_azimuth(0.0, 100.0), 90.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(0.0, -100.0), 270.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(100.0, 0.0), 0.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(-100.0, 0.0), 180.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(100.0, 100.0), 45.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(-100.0, 100.0), 135.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(-100.0, -100.0), 225.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(100.0, -100.0), 315.0, epsilon = TOL);
        assert_relative_eq!(horizontal_azimuth(0.0, 0.0), 0.0, epsilon = TOL);
    }

    #[test]
    fn round_trip_through_the_survey_loader() {
        // Reloading a connector's own stations must reproduce its
        // geometry.
        let well = TwoPointConnector::new(
            ConnectorPoint::new(0.0, 0.0, 300.0),
            ConnectorPoint::new(0.0, -500.0, 800.0),
        )
        .connect()
        .unwrap();
        let records: Vec<SurveyStation> = well
            .stations()
            .iter()
            .map(|s| SurveyStation::new(s.md, s.inc, s.azi))
            .collect();
        let reloaded = SurveyLoader::new(records).equidistant(false).load().unwrap();
        assert_eq!(reloaded.len(), well.len());
        let (a, b) = (
            well.stations().last().unwrap(),
            reloaded.stations().last().unwrap(),
        );
        assert_relative_eq!(a.md, b.md, epsilon = TOL);
        assert_relative_eq!(a.inc, b.inc, epsilon = TOL);
        assert_relative_eq!(a.azi, b.azi, epsilon = TOL);
        let max_dls = |t: &Trajectory| {
            t.stations()
                .iter()
                .map(|s| s.dls)
                .fold(0.0_f64, f64::max)
        };
        assert_relative_eq!(max_dls(&well), max_dls(&reloaded), epsilon = TOL);
        // Positions integrate from the origin instead of the kickoff
        // offset, so only the deltas agree.
        assert_relative_eq!(
            b.east - reloaded.stations()[0].east,
            a.east - well.stations()[0].east,
            epsilon = TOL
        );
    }

    #[test]
    fn connector_stations_are_survey_points() {
        let well = TwoPointConnector::new(
            ConnectorPoint::new(0.0, 0.0, 100.0),
            ConnectorPoint::new(300.0, 400.0, 600.0),
        )
        .inner_points(10)
        .connect()
        .unwrap();
        assert!(well.stations().iter().all(|s| s.point == PointType::Survey));
        // Curved zone gets the requested resolution: 2 lead stations
        // plus 11 arc stations.
        assert_eq!(well.len(), 13);
    }
}
