pub mod interpolate;
pub mod minimum_curvature;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rounds `value` to `digits` decimal places.
#[must_use]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Evenly spaced values from `start` to `end` inclusive.
///
/// Returns `[start]` for `n = 1` and an empty vector for `n = 0`.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let f = i as f64 / last;
                    start + (end - start) * f
                })
                .collect()
        }
    }
}
