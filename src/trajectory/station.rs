use serde::{Deserialize, Serialize};

use crate::math::minimum_curvature::DirectionSample;

use super::SectionType;

/// Provenance of a trajectory station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    /// Came from input data or section generation.
    Survey,
    /// Synthesized by depth-based interpolation.
    Interpolated,
}

/// One point along the wellbore.
///
/// The flat record shape (field names included) is the interchange
/// format with collaborators: a trajectory serializes to a list of
/// these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Measured depth from the reference point.
    pub md: f64,
    /// Inclination in degrees, 0 = vertical.
    pub inc: f64,
    /// Azimuth in degrees.
    pub azi: f64,
    /// True vertical depth.
    pub tvd: f64,
    /// Northing relative to the reference point.
    pub north: f64,
    /// Easting relative to the reference point.
    pub east: f64,
    /// Dogleg angle from the previous station, degrees.
    pub dl: f64,
    /// Dogleg severity: `dl` normalized to the trajectory's resolution.
    pub dls: f64,
    /// Geometric section this station belongs to.
    #[serde(rename = "sectionType")]
    pub section: SectionType,
    /// Survey or interpolated.
    #[serde(rename = "pointType")]
    pub point: PointType,
}

impl Station {
    /// The all-zero surface station every synthetic trajectory starts at.
    #[must_use]
    pub fn surface() -> Self {
        Self {
            md: 0.0,
            inc: 0.0,
            azi: 0.0,
            tvd: 0.0,
            north: 0.0,
            east: 0.0,
            dl: 0.0,
            dls: 0.0,
            section: SectionType::Vertical,
            point: PointType::Survey,
        }
    }

    /// The scalar direction inputs of this station, for the
    /// minimum-curvature equations.
    #[must_use]
    pub fn sample(&self) -> DirectionSample {
        DirectionSample::new(self.md, self.inc, self.azi)
    }
}
