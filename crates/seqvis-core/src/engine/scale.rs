use nalgebra::DMatrix;
use serde::Serialize;

/// Upper limits for the color scales of distance and difference panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleBounds {
    pub vmax: f64,
    pub vdiff: f64,
}

/// Percentile of the non-NaN values, interpolating linearly between the closest ranks.
///
/// `p` is clamped to `[0, 100]`; `p = 100` is the maximum. Returns 0.0 when no valid
/// value exists.
pub fn percentile<'a>(values: impl IntoIterator<Item = &'a f64>, p: f64) -> f64 {
    let mut valid: Vec<f64> = values.into_iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.is_empty() {
        return 0.0;
    }
    valid.sort_by(f64::total_cmp);

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let rank = p / 100.0 * (valid.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    valid[lower] + (valid[upper] - valid[lower]) * fraction
}

/// Shared upper limit for distance panels: the largest per-matrix percentile.
///
/// An explicit override always wins. Negative percentiles are kept as they are; an
/// empty matrix list yields 0.0.
pub fn display_bound(matrices: &[&DMatrix<f64>], p: f64, override_value: Option<f64>) -> f64 {
    if let Some(value) = override_value {
        return value;
    }
    matrices
        .iter()
        .map(|m| percentile(m.iter(), p))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Symmetric limit for difference panels: the percentile of absolute differences in
/// both orientations.
pub fn difference_bound(
    diff_ab: &DMatrix<f64>,
    diff_ba: &DMatrix<f64>,
    p: f64,
    override_value: Option<f64>,
) -> f64 {
    if let Some(value) = override_value {
        return value;
    }
    let magnitudes: Vec<f64> = diff_ab.iter().chain(diff_ba.iter()).map(|v| v.abs()).collect();
    percentile(&magnitudes, p)
}
