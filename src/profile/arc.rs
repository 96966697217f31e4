//! Constant-curvature section generation at unit depth step.
//!
//! Every synthetic profile is composed from three section kinds: a
//! vertical lead-in, a circular build/drop arc of constant curvature,
//! and a straight hold. Sections accumulate into parallel per-station
//! columns; measured depth is implicit (station index times the unit
//! step).

use crate::math::round_to;

/// Unit depth step every profile generates at before resampling.
pub(crate) const STEP: f64 = 1.0;

/// Parallel per-station columns accumulated while generating a profile.
#[derive(Debug, Default)]
pub(crate) struct SectionColumns {
    pub tvd: Vec<f64>,
    pub north: Vec<f64>,
    pub east: Vec<f64>,
    pub inc: Vec<f64>,
    pub azi: Vec<f64>,
}

impl SectionColumns {
    /// Starts the columns with a vertical lead-in of `steps` unit cells
    /// (`steps + 1` stations, md equal to tvd).
    pub fn vertical_lead_in(steps: usize) -> Self {
        let mut columns = Self::default();
        for i in 0..=steps {
            #[allow(clippy::cast_precision_loss)]
            columns.tvd.push(i as f64 * STEP);
            columns.north.push(0.0);
            columns.east.push(0.0);
            columns.inc.push(0.0);
            columns.azi.push(0.0);
        }
        columns
    }

    /// Number of stations generated so far.
    pub fn len(&self) -> usize {
        self.tvd.len()
    }

    fn last_tvd(&self) -> f64 {
        self.tvd.last().copied().unwrap_or(0.0)
    }

    fn last_north(&self) -> f64 {
        self.north.last().copied().unwrap_or(0.0)
    }

    fn last_inc(&self) -> f64 {
        self.inc.last().copied().unwrap_or(0.0)
    }

    /// Appends a circular arc of constant curvature sweeping the
    /// inclination from `start_inc` to `end_inc` (degrees, either
    /// direction) over `steps` unit cells. Zero cells append nothing.
    ///
    /// Closed-form circle geometry: with sweep increment `dtheta` per
    /// cell the radius is `STEP / dtheta`, and displacements measured
    /// from the arc start are `r * |sin(theta) - sin(theta0)|`
    /// vertically and `r * |cos(theta0) - cos(theta)|` horizontally.
    /// Accumulated tvd/north keep the original two-decimal rounding.
    pub fn push_arc(&mut self, start_inc: f64, end_inc: f64, steps: usize) {
        if steps == 0 {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = steps as f64;
        let sweep = (end_inc - start_inc).to_radians();
        let radius = STEP / (sweep / n).abs();
        let theta0 = start_inc.to_radians();
        let (tvd0, north0) = (self.last_tvd(), self.last_north());

        for i in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f64 / n;
            let theta = theta0 + sweep * fraction;
            let dz = radius * (theta.sin() - theta0.sin()).abs();
            let dh = radius * (theta.cos() - theta0.cos()).abs();
            self.tvd.push(round_to(tvd0 + dz, 2));
            self.north.push(round_to(north0 + dh, 2));
            self.east.push(0.0);
            self.inc.push(start_inc + (end_inc - start_inc) * fraction);
            self.azi.push(0.0);
        }
    }

    /// Appends a straight tangent hold at the current inclination for
    /// `steps` unit cells.
    pub fn push_hold(&mut self, steps: usize) {
        let inc = self.last_inc();
        let dz = STEP * inc.to_radians().cos();
        let dh = STEP * inc.to_radians().sin();
        for _ in 0..steps {
            self.tvd.push(round_to(self.last_tvd() + dz, 2));
            self.north.push(round_to(self.last_north() + dh, 2));
            self.east.push(0.0);
            self.inc.push(inc);
            self.azi.push(0.0);
        }
    }

    /// Appends a horizontal run: tvd flat, north advancing a full step
    /// per cell.
    pub fn push_horizontal(&mut self, steps: usize) {
        let inc = self.last_inc();
        for _ in 0..steps {
            self.tvd.push(self.last_tvd());
            self.north.push(self.last_north() + STEP);
            self.east.push(0.0);
            self.inc.push(inc);
            self.azi.push(0.0);
        }
    }

    /// Appends a vertical tail (inclination back at zero) for `steps`
    /// unit cells.
    pub fn push_vertical(&mut self, steps: usize) {
        for _ in 0..steps {
            self.tvd.push(round_to(self.last_tvd() + STEP, 2));
            self.north.push(self.last_north());
            self.east.push(0.0);
            self.inc.push(0.0);
            self.azi.push(0.0);
        }
    }
}
