use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use nalgebra::{DMatrix, Point3};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the symmetric matrix of Euclidean distances between all coordinates.
///
/// Each unordered pair is evaluated once and mirrored, so the result is exactly
/// symmetric with a zero diagonal.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] when `coords` is empty.
pub fn pairwise_distances(
    coords: &[Point3<f64>],
    reporter: &ProgressReporter,
) -> Result<DMatrix<f64>, EngineError> {
    let n = coords.len();
    if n == 0 {
        return Err(EngineError::EmptyStructure);
    }
    debug!(residues = n, "Computing pairwise distance matrix.");
    reporter.report(Progress::TaskStart {
        total_steps: n as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..n;

    #[cfg(feature = "parallel")]
    let iterator = (0..n).into_par_iter();

    let upper_rows: Vec<Vec<f64>> = iterator
        .map(|i| {
            let row = coords[i + 1..]
                .iter()
                .map(|other| nalgebra::distance(&coords[i], other))
                .collect();
            reporter.report(Progress::TaskIncrement);
            row
        })
        .collect();

    let mut matrix = DMatrix::zeros(n, n);
    for (i, row) in upper_rows.into_iter().enumerate() {
        for (offset, d) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            matrix[(i, j)] = d;
            matrix[(j, i)] = d;
        }
    }

    reporter.report(Progress::TaskFinish);
    Ok(matrix)
}
