use thiserror::Error;

/// Top-level error type for the wellbore trajectory kernel.
#[derive(Debug, Error)]
pub enum WellboreError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while validating caller-supplied data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("survey contains no stations")]
    EmptySurvey,

    #[error("md {md} at station {index} does not exceed the previous md {prev}")]
    NonIncreasingMd { index: usize, md: f64, prev: f64 },

    #[error("md {md} is negative")]
    NegativeMd { md: f64 },

    #[error("target depth {depth} must be positive")]
    InvalidTargetDepth { depth: f64 },

    #[error("build angle {angle} is out of range (0, 90]")]
    InvalidBuildAngle { angle: f64 },

    #[error("{upper_name} = {upper} must lie above {lower_name} = {lower}")]
    UnorderedSectionDepths {
        upper_name: &'static str,
        upper: f64,
        lower_name: &'static str,
        lower: f64,
    },

    #[error("section from {from_name} = {from} to {to_name} = {to} spans less than one unit depth cell")]
    SectionTooShort {
        from_name: &'static str,
        from: f64,
        to_name: &'static str,
        to: f64,
    },

    #[error("azimuth change {azimuth} is out of range [0, 360]")]
    AzimuthOutOfRange { azimuth: f64 },

    #[error("at least {min} output points are required, got {points}")]
    TooFewPoints { points: usize, min: usize },

    #[error("connector target tvd {target} must lie below kickoff tvd {kickoff}")]
    TargetAboveKickoff { target: f64, kickoff: f64 },

    #[error("kickoff tvd {tvd} is negative")]
    NegativeKickoff { tvd: f64 },
}

/// Errors raised by depth-based lookups outside the trajectory extent.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("lookup depth {depth} is negative")]
    NegativeDepth { depth: f64 },

    #[error("md {md} exceeds the deepest station md {max}")]
    MdBeyondTrajectory { md: f64, max: f64 },

    #[error("tvd {tvd} exceeds the deepest station tvd {max}")]
    TvdBeyondTrajectory { tvd: f64, max: f64 },

    #[error("tvd {tvd} is not bracketed by consecutive stations")]
    TvdNotBracketed { tvd: f64 },
}

/// Errors related to degenerate geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length depth interval between survey stations")]
    ZeroLengthInterval,
}

/// Convenience type alias for results using [`WellboreError`].
pub type Result<T> = std::result::Result<T, WellboreError>;
