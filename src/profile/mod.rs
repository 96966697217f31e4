//! Synthetic well-profile construction.
//!
//! Each profile composes a vertical lead-in, circular build/drop arcs
//! and straight holds at unit depth step, then resamples onto the
//! requested station count through the survey loader (positions travel
//! as supplied columns, dogleg and section labels are recomputed on the
//! resampled grid).

mod arc;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::survey::{SurveyLoader, SurveyStation};
use crate::trajectory::{StartOffset, Trajectory, TrajectoryInfo};

use arc::{SectionColumns, STEP};

/// Well profile shape, carrying exactly the parameters its geometry
/// needs. A profile that does not need a parameter cannot be given one.
///
/// Depths are measured depths along the hole; `build_angle` is in
/// degrees from vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Profile {
    /// Straight vertical well.
    Vertical,
    /// Vertical to the kick-off point, build to `build_angle`, tangent
    /// hold to target.
    J { kop: f64, eob: f64, build_angle: f64 },
    /// Build, tangent hold, drop back to vertical, vertical to target.
    S {
        kop: f64,
        eob: f64,
        sod: f64,
        eod: f64,
        build_angle: f64,
    },
    /// Single-curve horizontal: one build straight to 90 degrees, then
    /// a horizontal run to target.
    Horizontal1 { kop: f64, eob: f64 },
    /// Double-curve horizontal: build to `build_angle`, hold, second
    /// build to 90 degrees, horizontal run to target.
    Horizontal2 {
        kop: f64,
        eob: f64,
        kop2: f64,
        eob2: f64,
        build_angle: f64,
    },
}

impl Profile {
    /// Short tag for diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vertical => "V",
            Self::J { .. } => "J",
            Self::S { .. } => "S",
            Self::Horizontal1 { .. } => "H1",
            Self::Horizontal2 { .. } => "H2",
        }
    }
}

/// Builds a synthetic [`Trajectory`] from a [`Profile`] and a target
/// depth.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    profile: Profile,
    target_depth: f64,
    points: usize,
    start: StartOffset,
    change_azimuth: Option<f64>,
    info: TrajectoryInfo,
}

impl ProfileBuilder {
    /// Creates a builder with default options: 100 output points, no
    /// start offset, single-plane azimuth 0.
    #[must_use]
    pub fn new(profile: Profile, target_depth: f64) -> Self {
        Self {
            profile,
            target_depth,
            points: 100,
            start: StartOffset::default(),
            change_azimuth: None,
            info: TrajectoryInfo::default(),
        }
    }

    /// Output station count (default 100).
    #[must_use]
    pub fn points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Initial translation applied to every station.
    #[must_use]
    pub fn start(mut self, start: StartOffset) -> Self {
        self.start = start;
        self
    }

    /// Rotates the whole single-plane design to the given azimuth,
    /// in `[0, 360]` degrees.
    #[must_use]
    pub fn change_azimuth(mut self, degrees: f64) -> Self {
        self.change_azimuth = Some(degrees);
        self
    }

    /// Replaces the trajectory metadata block.
    #[must_use]
    pub fn info(mut self, info: TrajectoryInfo) -> Self {
        self.info = info;
        self
    }

    /// Generates the trajectory.
    ///
    /// # Errors
    ///
    /// Returns an error when the target depth is not positive, the
    /// requested point count is below 2, the profile's section depths
    /// are out of order, a vertical lead-in or arc section spans less
    /// than one unit depth cell, the build angle leaves `(0, 90]`
    /// (strictly below 90 for a double-curve horizontal), or the
    /// azimuth change leaves `[0, 360]`.
    pub fn build(&self) -> Result<Trajectory> {
        self.validate()?;
        debug!(
            profile = self.profile.label(),
            target_depth = self.target_depth,
            points = self.points,
            "building profile"
        );

        let mut columns = self.generate();
        if let Some(azimuth) = self.change_azimuth {
            rotate_horizontal(&mut columns, azimuth);
        }

        let records: Vec<SurveyStation> = (0..columns.len())
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let md = i as f64 * STEP;
                SurveyStation::with_position(
                    md,
                    columns.inc[i],
                    columns.azi[i],
                    columns.tvd[i],
                    columns.north[i],
                    columns.east[i],
                )
            })
            .collect();

        SurveyLoader::new(records)
            .equidistant(true)
            .points(self.points)
            .start(self.start)
            .info(self.info)
            .load()
    }

    fn validate(&self) -> Result<()> {
        if self.target_depth <= 0.0 {
            return Err(InputError::InvalidTargetDepth {
                depth: self.target_depth,
            }
            .into());
        }
        if self.points < 2 {
            return Err(InputError::TooFewPoints {
                points: self.points,
                min: 2,
            }
            .into());
        }
        if let Some(azimuth) = self.change_azimuth {
            if !(0.0..=360.0).contains(&azimuth) {
                return Err(InputError::AzimuthOutOfRange { azimuth }.into());
            }
        }
        let target = self.target_depth;
        match self.profile {
            Profile::Vertical => require_whole_cell("surface", 0.0, "target depth", target),
            Profile::J {
                kop,
                eob,
                build_angle,
            } => {
                require_above("surface", 0.0, "kop", kop)?;
                require_above("kop", kop, "eob", eob)?;
                require_not_below("eob", eob, "target depth", target)?;
                require_whole_cell("surface", 0.0, "kop", kop)?;
                require_whole_cell("kop", kop, "eob", eob)?;
                require_build_angle(build_angle)
            }
            Profile::S {
                kop,
                eob,
                sod,
                eod,
                build_angle,
            } => {
                require_above("surface", 0.0, "kop", kop)?;
                require_above("kop", kop, "eob", eob)?;
                require_not_below("eob", eob, "sod", sod)?;
                require_above("sod", sod, "eod", eod)?;
                require_not_below("eod", eod, "target depth", target)?;
                require_whole_cell("surface", 0.0, "kop", kop)?;
                require_whole_cell("kop", kop, "eob", eob)?;
                require_whole_cell("sod", sod, "eod", eod)?;
                require_build_angle(build_angle)
            }
            Profile::Horizontal1 { kop, eob } => {
                require_above("surface", 0.0, "kop", kop)?;
                require_above("kop", kop, "eob", eob)?;
                require_not_below("eob", eob, "target depth", target)?;
                require_whole_cell("surface", 0.0, "kop", kop)?;
                require_whole_cell("kop", kop, "eob", eob)
            }
            Profile::Horizontal2 {
                kop,
                eob,
                kop2,
                eob2,
                build_angle,
            } => {
                require_above("surface", 0.0, "kop", kop)?;
                require_above("kop", kop, "eob", eob)?;
                require_not_below("eob", eob, "kop2", kop2)?;
                require_above("kop2", kop2, "eob2", eob2)?;
                require_not_below("eob2", eob2, "target depth", target)?;
                require_whole_cell("surface", 0.0, "kop", kop)?;
                require_whole_cell("kop", kop, "eob", eob)?;
                require_whole_cell("kop2", kop2, "eob2", eob2)?;
                // The second curve sweeps build_angle..90: a 90 degree
                // first build leaves it nothing to sweep.
                if build_angle >= 90.0 {
                    return Err(InputError::InvalidBuildAngle { angle: build_angle }.into());
                }
                require_build_angle(build_angle)
            }
        }
    }

    /// Composes the profile's sections at unit depth step.
    ///
    /// Section boundaries round to cumulative cell positions, never to
    /// independent span lengths, so the sections compose to exactly
    /// `target + 1` stations and the closing section length cannot
    /// underflow. Validation guarantees every boundary pair used for an
    /// arc or lead-in spans at least one cell.
    fn generate(&self) -> SectionColumns {
        let target = cells(self.target_depth);
        match self.profile {
            Profile::Vertical => SectionColumns::vertical_lead_in(target),
            Profile::J {
                kop,
                eob,
                build_angle,
            } => {
                let (kop, eob) = (cells(kop), cells(eob));
                let mut columns = SectionColumns::vertical_lead_in(kop);
                columns.push_arc(0.0, build_angle, eob - kop);
                columns.push_hold(target + 1 - columns.len());
                columns
            }
            Profile::S {
                kop,
                eob,
                sod,
                eod,
                build_angle,
            } => {
                let (kop, eob, sod, eod) = (cells(kop), cells(eob), cells(sod), cells(eod));
                let mut columns = SectionColumns::vertical_lead_in(kop);
                columns.push_arc(0.0, build_angle, eob - kop);
                columns.push_hold(sod - eob);
                columns.push_arc(build_angle, 0.0, eod - sod);
                columns.push_vertical(target + 1 - columns.len());
                columns
            }
            Profile::Horizontal1 { kop, eob } => {
                let (kop, eob) = (cells(kop), cells(eob));
                let mut columns = SectionColumns::vertical_lead_in(kop);
                columns.push_arc(0.0, 90.0, eob - kop);
                columns.push_horizontal(target + 1 - columns.len());
                columns
            }
            Profile::Horizontal2 {
                kop,
                eob,
                kop2,
                eob2,
                build_angle,
            } => {
                let (kop, eob, kop2, eob2) =
                    (cells(kop), cells(eob), cells(kop2), cells(eob2));
                let mut columns = SectionColumns::vertical_lead_in(kop);
                columns.push_arc(0.0, build_angle, eob - kop);
                columns.push_hold(kop2 - eob);
                columns.push_arc(build_angle, 90.0, eob2 - kop2);
                columns.push_horizontal(target + 1 - columns.len());
                columns
            }
        }
    }
}

/// Unit cells spanned by a depth interval.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(span: f64) -> usize {
    (span / STEP).round() as usize
}

fn require_above(
    upper_name: &'static str,
    upper: f64,
    lower_name: &'static str,
    lower: f64,
) -> Result<()> {
    if upper < lower {
        Ok(())
    } else {
        Err(InputError::UnorderedSectionDepths {
            upper_name,
            upper,
            lower_name,
            lower,
        }
        .into())
    }
}

fn require_not_below(
    upper_name: &'static str,
    upper: f64,
    lower_name: &'static str,
    lower: f64,
) -> Result<()> {
    if upper <= lower {
        Ok(())
    } else {
        Err(InputError::UnorderedSectionDepths {
            upper_name,
            upper,
            lower_name,
            lower,
        }
        .into())
    }
}

fn require_build_angle(angle: f64) -> Result<()> {
    if angle > 0.0 && angle <= 90.0 {
        Ok(())
    } else {
        Err(InputError::InvalidBuildAngle { angle }.into())
    }
}

/// Lead-in and arc sections need at least one unit cell once their
/// boundaries round to the generation grid; a sub-cell span would
/// produce a zero-station section and silently drop its geometry.
fn require_whole_cell(
    from_name: &'static str,
    from: f64,
    to_name: &'static str,
    to: f64,
) -> Result<()> {
    if cells(to) > cells(from) {
        Ok(())
    } else {
        Err(InputError::SectionTooShort {
            from_name,
            from,
            to_name,
            to,
        }
        .into())
    }
}

/// Rotates the single-plane design to the given azimuth.
///
/// The generated profile accumulates all horizontal displacement on the
/// north column; the rotation redistributes it between north and east
/// per quadrant while the azimuth column takes the uniform shift. The
/// horizontal magnitude is preserved exactly. The surface station keeps
/// azimuth 0.
fn rotate_horizontal(columns: &mut SectionColumns, change: f64) {
    for i in 0..columns.len() {
        if i > 0 {
            columns.azi[i] += change;
        }
        let north = columns.north[i];
        if change <= 90.0 {
            let angle = change.to_radians();
            columns.east[i] = north * angle.sin();
            columns.north[i] = north * angle.cos();
        } else if change <= 180.0 {
            let angle = (change - 90.0).to_radians();
            columns.east[i] = north * angle.cos();
            columns.north[i] = -north * angle.sin();
        } else if change <= 270.0 {
            let angle = (change - 180.0).to_radians();
            columns.east[i] = -north * angle.sin();
            columns.north[i] = -north * angle.cos();
        } else {
            let angle = (change - 270.0).to_radians();
            columns.east[i] = -north * angle.cos();
            columns.north[i] = north * angle.sin();
        }
    }
}
