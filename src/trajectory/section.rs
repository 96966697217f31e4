use serde::{Deserialize, Serialize};

use crate::math::round_to;

/// Geometric section label for a trajectory station.
///
/// Stations 0 and 1 of a trajectory are always [`SectionType::Vertical`]
/// by convention; every later station is classified from its
/// inclination/TVD relationship with its predecessor only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    #[serde(rename = "vertical")]
    Vertical,
    #[serde(rename = "hold")]
    Hold,
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(rename = "build-up")]
    BuildUp,
    #[serde(rename = "drop-off")]
    DropOff,
}

impl SectionType {
    /// Classifies one station against its predecessor.
    ///
    /// Inclinations are compared at two decimal places; the TVD delta at
    /// nine, so float noise in a flat horizontal run does not read as a
    /// hold.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn classify(inc: f64, prev_inc: f64, tvd: f64, prev_tvd: f64) -> Self {
        if inc == 0.0 {
            return Self::Vertical;
        }
        if round_to(inc, 2) == round_to(prev_inc, 2) {
            if round_to(tvd - prev_tvd, 9) == 0.0 {
                Self::Horizontal
            } else {
                Self::Hold
            }
        } else if inc > prev_inc {
            Self::BuildUp
        } else {
            Self::DropOff
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_inclination_is_vertical() {
        assert_eq!(SectionType::classify(0.0, 5.0, 100.0, 99.0), SectionType::Vertical);
    }

    #[test]
    fn increasing_inclination_is_build_up() {
        assert_eq!(SectionType::classify(12.0, 11.0, 100.0, 99.0), SectionType::BuildUp);
    }

    #[test]
    fn decreasing_inclination_is_drop_off() {
        assert_eq!(SectionType::classify(11.0, 12.0, 100.0, 99.0), SectionType::DropOff);
    }

    #[test]
    fn constant_inclination_with_tvd_change_is_hold() {
        assert_eq!(SectionType::classify(45.0, 45.0, 120.0, 119.3), SectionType::Hold);
    }

    #[test]
    fn constant_inclination_without_tvd_change_is_horizontal() {
        assert_eq!(SectionType::classify(90.0, 90.0, 500.0, 500.0), SectionType::Horizontal);
    }

    #[test]
    fn inclination_compared_at_two_decimals() {
        // 45.001 and 45.004 both round to 45.0: not a build-up.
        assert_eq!(
            SectionType::classify(45.004, 45.001, 120.0, 119.0),
            SectionType::Hold
        );
    }

    #[test]
    fn tvd_noise_below_ninth_decimal_reads_horizontal() {
        assert_eq!(
            SectionType::classify(90.0, 90.0, 500.0 + 1e-12, 500.0),
            SectionType::Horizontal
        );
    }
}
