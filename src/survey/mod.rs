//! Survey loading and resampling.
//!
//! Takes station records already reduced to md/inclination/azimuth
//! (plus optional position columns) and fills in missing position
//! fields with the minimum-curvature method, optionally resampling to
//! an evenly spaced grid and inserting interpolated stations inside
//! curved intervals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InputError, Result};
use crate::math::interpolate::interpolate_between;
use crate::math::minimum_curvature::{
    advance_east, advance_north, advance_tvd, dogleg, dogleg_severity, DirectionSample,
};
use crate::math::{linspace, TOLERANCE};
use crate::trajectory::{
    PointType, SectionType, StartOffset, Station, Trajectory, TrajectoryInfo, Units, WellType,
};

/// One raw survey record handed in by collaborators.
///
/// Column names are assumed normalized upstream; `inclination` and
/// `azimuth` are accepted as aliases for the short forms. Missing
/// md/inc/azi is unrepresentable: a record without them cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub md: f64,
    #[serde(alias = "inclination")]
    pub inc: f64,
    #[serde(alias = "azimuth")]
    pub azi: f64,
    #[serde(default)]
    pub tvd: Option<f64>,
    #[serde(default)]
    pub north: Option<f64>,
    #[serde(default)]
    pub east: Option<f64>,
}

impl SurveyStation {
    /// A record carrying direction only; positions will be derived.
    #[must_use]
    pub fn new(md: f64, inc: f64, azi: f64) -> Self {
        Self {
            md,
            inc,
            azi,
            tvd: None,
            north: None,
            east: None,
        }
    }

    /// A record carrying a full pre-computed position.
    #[must_use]
    pub fn with_position(md: f64, inc: f64, azi: f64, tvd: f64, north: f64, east: f64) -> Self {
        Self {
            md,
            inc,
            azi,
            tvd: Some(tvd),
            north: Some(north),
            east: Some(east),
        }
    }
}

/// Loads a survey into a [`Trajectory`].
///
/// # Phases
///
/// 1. Validate the record list (non-empty, strictly increasing md).
/// 2. Apply the uniform azimuth shift; prepend a surface station when
///    the first record sits below md 0.
/// 3. Resample to an even md grid when equidistant output is requested
///    (azimuth held constant through the first build arc).
/// 4. Derive positions: supplied columns win unless recomputation is
///    forced; missing columns integrate forward by minimum curvature.
/// 5. Insert interpolated stations inside curved intervals.
/// 6. Apply the start offset.
#[derive(Debug, Clone)]
pub struct SurveyLoader {
    stations: Vec<SurveyStation>,
    equidistant: bool,
    points: usize,
    change_azimuth: f64,
    start: StartOffset,
    force_recompute: bool,
    inner_points: usize,
    info: TrajectoryInfo,
}

impl SurveyLoader {
    /// Creates a loader over the given records with default options:
    /// equidistant output at 100 points, no azimuth shift, no offset,
    /// supplied positions trusted.
    #[must_use]
    pub fn new(stations: Vec<SurveyStation>) -> Self {
        Self {
            stations,
            equidistant: true,
            points: 100,
            change_azimuth: 0.0,
            start: StartOffset::default(),
            force_recompute: false,
            inner_points: 0,
            info: TrajectoryInfo::default(),
        }
    }

    /// Resample onto an evenly spaced md grid (default on).
    #[must_use]
    pub fn equidistant(mut self, equidistant: bool) -> Self {
        self.equidistant = equidistant;
        self
    }

    /// Station count of the equidistant grid (default 100).
    #[must_use]
    pub fn points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Adds the given degrees to every station's azimuth before any
    /// position derivation.
    #[must_use]
    pub fn change_azimuth(mut self, degrees: f64) -> Self {
        self.change_azimuth = degrees;
        self
    }

    /// Initial translation applied to every station after computation.
    #[must_use]
    pub fn start(mut self, start: StartOffset) -> Self {
        self.start = start;
        self
    }

    /// Always re-derive tvd/north/east by minimum curvature, discarding
    /// any supplied position columns.
    #[must_use]
    pub fn force_recompute(mut self, force: bool) -> Self {
        self.force_recompute = force;
        self
    }

    /// Number of interpolated stations to insert inside each curved
    /// interval between survey stations.
    #[must_use]
    pub fn inner_points(mut self, count: usize) -> Self {
        self.inner_points = count;
        self
    }

    /// Depth window the dogleg severity is normalized to.
    #[must_use]
    pub fn dls_resolution(mut self, resolution: f64) -> Self {
        self.info.dls_resolution = resolution;
        self
    }

    #[must_use]
    pub fn units(mut self, units: Units) -> Self {
        self.info.units = units;
        self
    }

    #[must_use]
    pub fn well_type(mut self, well_type: WellType) -> Self {
        self.info.well_type = well_type;
        self
    }

    /// Replaces the whole metadata block at once.
    #[must_use]
    pub fn info(mut self, info: TrajectoryInfo) -> Self {
        self.info = info;
        self
    }

    /// Runs the load.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty record list, a negative leading
    /// md, non-increasing md values, or an equidistant grid of fewer
    /// than 2 points.
    pub fn load(&self) -> Result<Trajectory> {
        self.validate()?;
        debug!(
            stations = self.stations.len(),
            equidistant = self.equidistant,
            points = self.points,
            inner_points = self.inner_points,
            "loading survey"
        );

        let mut columns = Columns::from_records(&self.stations, self.change_azimuth);
        columns.prepend_surface();
        if self.equidistant {
            columns = columns.resample(self.points);
        }
        if self.force_recompute {
            columns.tvd = None;
            columns.north = None;
            columns.east = None;
        }

        let mut stations = self.derive_stations(&columns)?;
        if self.inner_points > 0 {
            stations = self.insert_inner_points(&stations)?;
        }
        for station in &mut stations {
            station.north += self.start.north;
            station.east += self.start.east;
            station.tvd += self.start.depth;
        }
        Ok(Trajectory::new(stations, self.info))
    }

    fn validate(&self) -> Result<()> {
        let first = self.stations.first().ok_or(InputError::EmptySurvey)?;
        if first.md < 0.0 {
            return Err(InputError::NegativeMd { md: first.md }.into());
        }
        for (index, pair) in self.stations.windows(2).enumerate() {
            if pair[1].md <= pair[0].md {
                return Err(InputError::NonIncreasingMd {
                    index: index + 1,
                    md: pair[1].md,
                    prev: pair[0].md,
                }
                .into());
            }
        }
        if self.equidistant && self.points < 2 {
            return Err(InputError::TooFewPoints {
                points: self.points,
                min: 2,
            }
            .into());
        }
        Ok(())
    }

    /// Integrates one station after another: positions come from the
    /// supplied columns where present, otherwise from the
    /// minimum-curvature advance seeded at the first station.
    fn derive_stations(&self, columns: &Columns) -> Result<Vec<Station>> {
        let n = columns.md.len();
        let mut stations = Vec::with_capacity(n);
        stations.push(Station {
            md: columns.md[0],
            inc: columns.inc[0],
            azi: columns.azi[0],
            tvd: columns.tvd.as_ref().map_or(0.0, |t| t[0]),
            north: columns.north.as_ref().map_or(0.0, |c| c[0]),
            east: columns.east.as_ref().map_or(0.0, |c| c[0]),
            dl: 0.0,
            dls: 0.0,
            section: SectionType::Vertical,
            point: PointType::Survey,
        });

        for i in 1..n {
            let prev = &stations[i - 1];
            let dl_rad = dogleg(prev.inc, columns.inc[i], prev.azi, columns.azi[i]);
            let dl = dl_rad.to_degrees();
            let s1 = prev.sample();
            let s2 = DirectionSample::new(columns.md[i], columns.inc[i], columns.azi[i]);
            let tvd = columns
                .tvd
                .as_ref()
                .map_or_else(|| advance_tvd(prev.tvd, s1, s2, dl_rad), |t| t[i]);
            let north = columns
                .north
                .as_ref()
                .map_or_else(|| advance_north(prev.north, s1, s2, dl_rad), |c| c[i]);
            let east = columns
                .east
                .as_ref()
                .map_or_else(|| advance_east(prev.east, s1, s2, dl_rad), |c| c[i]);
            let dls = dogleg_severity(dl, columns.md[i] - prev.md, self.info.dls_resolution)?;
            let section = if i == 1 {
                SectionType::Vertical
            } else {
                SectionType::classify(columns.inc[i], prev.inc, tvd, prev.tvd)
            };
            stations.push(Station {
                md: columns.md[i],
                inc: columns.inc[i],
                azi: columns.azi[i],
                tvd,
                north,
                east,
                dl,
                dls,
                section,
                point: PointType::Survey,
            });
        }
        Ok(stations)
    }

    /// Inserts evenly spaced interpolated stations inside each interval
    /// whose curvature leaves the vertical plane of its endpoints. The
    /// terminal station of an expanded interval takes the sub-interval
    /// dogleg, keeping `dl` a previous-station quantity throughout.
    fn insert_inner_points(&self, stations: &[Station]) -> Result<Vec<Station>> {
        let n = self.inner_points;
        let resolution = self.info.dls_resolution;
        let mut out = Vec::with_capacity(stations.len() * (n + 1));
        out.push(stations[0].clone());
        for pair in stations.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            let out_of_plane = p1.inc.to_radians().sin()
                * p2.inc.to_radians().sin()
                * (p2.azi - p1.azi).to_radians().sin();
            if out_of_plane.abs() <= TOLERANCE {
                out.push(p2.clone());
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let dl_unit = p2.dl / (n + 1) as f64;
            let grid = linspace(p1.md, p2.md, n + 2);
            let mut prev_md = p1.md;
            for &md in &grid[1..=n] {
                let mut inner = interpolate_between(md, p1, p2, resolution)?;
                inner.dl = dl_unit;
                inner.dls = dogleg_severity(dl_unit, md - prev_md, resolution)?;
                prev_md = md;
                out.push(inner);
            }
            let mut terminal = p2.clone();
            terminal.dl = dl_unit;
            terminal.dls = dogleg_severity(dl_unit, terminal.md - prev_md, resolution)?;
            out.push(terminal);
        }
        Ok(out)
    }
}

/// Working copies of the survey columns while loading.
#[derive(Debug)]
struct Columns {
    md: Vec<f64>,
    inc: Vec<f64>,
    azi: Vec<f64>,
    tvd: Option<Vec<f64>>,
    north: Option<Vec<f64>>,
    east: Option<Vec<f64>>,
}

impl Columns {
    fn from_records(records: &[SurveyStation], change_azimuth: f64) -> Self {
        let md = records.iter().map(|r| r.md).collect();
        let inc = records.iter().map(|r| r.inc).collect();
        let azi = records.iter().map(|r| r.azi + change_azimuth).collect();
        // A position column only counts when every record carries it.
        let tvd = records
            .iter()
            .map(|r| r.tvd)
            .collect::<Option<Vec<f64>>>();
        let north = records
            .iter()
            .map(|r| r.north)
            .collect::<Option<Vec<f64>>>();
        let east = records
            .iter()
            .map(|r| r.east)
            .collect::<Option<Vec<f64>>>();
        // North and east only make sense together.
        let (north, east) = match (north, east) {
            (Some(n), Some(e)) => (Some(n), Some(e)),
            _ => (None, None),
        };
        Self {
            md,
            inc,
            azi,
            tvd,
            north,
            east,
        }
    }

    /// Prepends the all-zero surface station when the survey starts
    /// below the reference depth.
    fn prepend_surface(&mut self) {
        if self.md[0] > 0.0 {
            self.md.insert(0, 0.0);
            self.inc.insert(0, 0.0);
            self.azi.insert(0, 0.0);
            if let Some(tvd) = &mut self.tvd {
                tvd.insert(0, 0.0);
            }
            if let Some(north) = &mut self.north {
                north.insert(0, 0.0);
            }
            if let Some(east) = &mut self.east {
                east.insert(0, 0.0);
            }
        }
    }

    /// Resamples every column onto an evenly spaced md grid.
    ///
    /// Azimuth is a special case: inside the first build arc it is held
    /// at the arc's initial azimuth instead of linearly interpolated,
    /// since naive interpolation of the doubly-valued azimuth drifts
    /// inside a single arc.
    fn resample(&self, points: usize) -> Self {
        let grid = linspace(0.0, *self.md.last().unwrap_or(&0.0), points);
        let inc = grid.iter().map(|&m| lerp_series(m, &self.md, &self.inc)).collect();
        let azi = self.resample_azimuth(&grid);
        let tvd = self
            .tvd
            .as_ref()
            .map(|col| grid.iter().map(|&m| lerp_series(m, &self.md, col)).collect());
        let north = self
            .north
            .as_ref()
            .map(|col| grid.iter().map(|&m| lerp_series(m, &self.md, col)).collect());
        let east = self
            .east
            .as_ref()
            .map(|col| grid.iter().map(|&m| lerp_series(m, &self.md, col)).collect());
        Self {
            md: grid,
            inc,
            azi,
            tvd,
            north,
            east,
        }
    }

    fn resample_azimuth(&self, grid: &[f64]) -> Vec<f64> {
        let hold = self.first_build_arc();
        grid.iter()
            .map(|&m| match hold {
                Some((lo, hi, value)) if lo < m && m < hi => value,
                _ => lerp_series(m, &self.md, &self.azi),
            })
            .collect()
    }

    /// Locates the first build arc: the md span from the last
    /// zero-inclination station of the leading vertical run to the
    /// station where the inclination stops increasing, with the arc's
    /// initial azimuth. `None` when the survey never leaves vertical or
    /// never starts there.
    fn first_build_arc(&self) -> Option<(f64, f64, f64)> {
        let start = self.inc.iter().position(|&i| i > 0.0)?;
        if start == 0 {
            return None;
        }
        let mut end = start;
        while end + 1 < self.inc.len() && self.inc[end + 1] > self.inc[end] {
            end += 1;
        }
        Some((self.md[start - 1], self.md[end], self.azi[start]))
    }
}

/// Piecewise-linear interpolation of `ys` against strictly increasing
/// `xs`, clamped at the ends.
fn lerp_series(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }
    let hi = xs.partition_point(|&v| v < x);
    let lo = hi - 1;
    let f = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + f * (ys[hi] - ys[lo])
}
