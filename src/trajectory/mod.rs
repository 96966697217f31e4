mod section;
mod station;

pub use section::SectionType;
pub use station::{PointType, Station};

use serde::{Deserialize, Serialize};

use crate::error::{RangeError, Result};
use crate::math::{interpolate, round_to};

/// Measurement system tag carried by a trajectory. The core performs no
/// unit conversion; the tag travels with the station records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    #[serde(rename = "metric")]
    Metric,
    #[serde(rename = "english")]
    English,
}

/// Well environment tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WellType {
    #[serde(rename = "onshore")]
    Onshore,
    #[default]
    #[serde(rename = "offshore")]
    Offshore,
}

/// Trajectory-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryInfo {
    /// Depth window the dogleg severity is normalized to, e.g. 30 m.
    #[serde(rename = "dlsResolution")]
    pub dls_resolution: f64,
    pub units: Units,
    #[serde(rename = "wellType")]
    pub well_type: WellType,
}

impl Default for TrajectoryInfo {
    fn default() -> Self {
        Self {
            dls_resolution: 30.0,
            units: Units::Metric,
            well_type: WellType::Offshore,
        }
    }
}

/// Geographic surface location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Depth reference datum for the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellReference {
    /// Rotary kelly bushing elevation above the datum.
    pub rkb: f64,
    /// Water depth below the datum, for offshore wells.
    pub water_depth: Option<f64>,
}

/// Initial translation applied to every derived station.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StartOffset {
    pub north: f64,
    pub east: f64,
    pub depth: f64,
}

/// Which depth axis a [`Trajectory::get_point`] lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthType {
    Md,
    Tvd,
}

/// Bisection steps before a TVD lookup gives up refining and accepts
/// the closest interpolated station.
const MAX_BISECTIONS: usize = 64;

/// An ordered, fully-computed wellbore path.
///
/// Owns its stations exclusively; the station list is immutable after
/// construction. Location and reference datum metadata may be appended
/// later without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    stations: Vec<Station>,
    info: TrajectoryInfo,
    location: Option<Location>,
    reference: Option<WellReference>,
}

impl Trajectory {
    pub(crate) fn new(stations: Vec<Station>, info: TrajectoryInfo) -> Self {
        Self {
            stations,
            info,
            location: None,
            reference: None,
        }
    }

    /// Read-only view of the ordered station list.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn info(&self) -> &TrajectoryInfo {
        &self.info
    }

    /// Number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Measured depth of the deepest station, 0 for an empty trajectory.
    #[must_use]
    pub fn md_total(&self) -> f64 {
        self.stations.last().map_or(0.0, |s| s.md)
    }

    /// Deepest true vertical depth reached by any station.
    #[must_use]
    pub fn tvd_max(&self) -> f64 {
        self.stations.iter().map(|s| s.tvd).fold(0.0, f64::max)
    }

    /// Looks up a station at the given depth, interpolating between
    /// stations where necessary.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative depth or a depth beyond the
    /// trajectory extent.
    pub fn get_point(&self, depth: f64, depth_type: DepthType) -> Result<Station> {
        match depth_type {
            DepthType::Md => interpolate::interpolate(depth, &self.stations, self.info.dls_resolution),
            DepthType::Tvd => self.point_at_tvd(depth),
        }
    }

    /// Sets the geographic surface location, decimal degrees.
    pub fn set_location(&mut self, lat: f64, lon: f64) {
        self.location = Some(Location { lat, lon });
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Sets the depth reference datum.
    pub fn set_reference(&mut self, reference: WellReference) {
        self.reference = Some(reference);
    }

    #[must_use]
    pub fn reference(&self) -> Option<&WellReference> {
        self.reference.as_ref()
    }

    /// TVD lookup: exact matches compare at two decimal places; interior
    /// depths bisect on md until the interpolated tvd matches the target
    /// at two decimals.
    #[allow(clippy::float_cmp)]
    fn point_at_tvd(&self, tvd: f64) -> Result<Station> {
        if tvd < 0.0 {
            return Err(RangeError::NegativeDepth { depth: tvd }.into());
        }
        let max = self.tvd_max();
        if tvd > max {
            return Err(RangeError::TvdBeyondTrajectory { tvd, max }.into());
        }

        let mut bracket = None;
        for (idx, point) in self.stations.iter().enumerate() {
            if point.tvd < tvd {
                if idx + 1 < self.stations.len()
                    && round_to(tvd, 2) < round_to(self.stations[idx + 1].tvd, 2)
                {
                    bracket = Some((point, &self.stations[idx + 1]));
                    break;
                }
            } else if round_to(point.tvd, 2) == round_to(tvd, 2) {
                return Ok(point.clone());
            }
        }
        let Some((p1, p2)) = bracket else {
            return Err(RangeError::TvdNotBracketed { tvd }.into());
        };

        if p2.section == SectionType::Vertical {
            // Inside a vertical interval delta tvd equals delta md.
            return self.get_point(p1.md + tvd - p1.tvd, DepthType::Md);
        }

        let (mut a, mut b) = (p1.md, p2.md);
        let mut point = self.get_point(0.5 * (a + b), DepthType::Md)?;
        let mut steps = 0;
        while round_to(point.tvd, 2) != round_to(tvd, 2) {
            if point.tvd < tvd {
                a = point.md;
            } else {
                b = point.md;
            }
            point = self.get_point(0.5 * (a + b), DepthType::Md)?;
            steps += 1;
            if steps == MAX_BISECTIONS {
                break;
            }
        }
        Ok(point)
    }
}
