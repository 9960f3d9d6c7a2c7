use super::distance::pairwise_distances;
use super::error::{EngineError, StructureLoadError};
use super::loader::LoadedStructure;
use super::progress::{Progress, ProgressReporter};
use super::region::{Region, RegionPair};
use nalgebra::DMatrix;
use serde::Serialize;
use tracing::{debug, info};

/// Pairs the i-th chain of structure A with the i-th chain of structure B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMapping {
    pairs: Vec<(String, String)>,
}

impl ChainMapping {
    pub fn new(chains_a: &[String], chains_b: &[String]) -> Result<Self, EngineError> {
        if chains_a.len() != chains_b.len() {
            return Err(EngineError::ChainCountMismatch {
                count_a: chains_a.len(),
                count_b: chains_b.len(),
            });
        }
        let pairs = chains_a
            .iter()
            .cloned()
            .zip(chains_b.iter().cloned())
            .collect();
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelection {
    /// The full structure against itself.
    #[default]
    Default,
    Pairs(Vec<RegionPair>),
}

/// Means of the four sub-matrices of one region pair, ignoring NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionMeans {
    pub a: f64,
    pub b: f64,
    pub ab: f64,
    pub ba: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionDetail {
    pub pair: RegionPair,
    /// `A[rows, cols]`
    pub a_sub: DMatrix<f64>,
    /// `B[rows, cols]`
    pub b_sub: DMatrix<f64>,
    /// `(A - B)[rows, cols]`
    pub ab_sub: DMatrix<f64>,
    /// `(B - A)[cols, rows]`, the reverse orientation.
    pub ba_sub: DMatrix<f64>,
    pub shape: (usize, usize),
    pub means: RegionMeans,
}

#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub dist_a: DMatrix<f64>,
    pub dist_b: DMatrix<f64>,
    pub diff_ab: DMatrix<f64>,
    pub diff_ba: DMatrix<f64>,
    pub region_pairs: Vec<RegionPair>,
    pub is_default_region: bool,
    pub details: Vec<RegionDetail>,
}

impl ComparisonResult {
    pub fn size(&self) -> usize {
        self.dist_a.nrows()
    }
}

/// Checks that both structures have the same chain layout under `mapping`.
pub fn validate_mapping(
    a: &LoadedStructure,
    b: &LoadedStructure,
    mapping: &ChainMapping,
) -> Result<(), EngineError> {
    if a.boundaries.len() != b.boundaries.len() {
        return Err(EngineError::ChainCountMismatch {
            count_a: a.boundaries.len(),
            count_b: b.boundaries.len(),
        });
    }
    for (chain_a, chain_b) in mapping.pairs() {
        let len_a = mapped_chain_len(a, chain_a)?;
        let len_b = mapped_chain_len(b, chain_b)?;
        if len_a != len_b {
            return Err(EngineError::SequenceLengthMismatch {
                chain_a: chain_a.clone(),
                chain_b: chain_b.clone(),
                len_a,
                len_b,
            });
        }
    }
    if a.len() != b.len() {
        return Err(EngineError::SequenceLengthMismatch {
            chain_a: a.boundaries.chain_ids().join(","),
            chain_b: b.boundaries.chain_ids().join(","),
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    Ok(())
}

fn mapped_chain_len(structure: &LoadedStructure, chain: &str) -> Result<usize, EngineError> {
    structure
        .boundaries
        .get(chain)
        .map(|entry| entry.len())
        .ok_or_else(|| {
            StructureLoadError::ChainNotFound {
                chain: chain.to_string(),
                structure: structure.source.clone(),
                available: structure.boundaries.chain_ids().join(", "),
            }
            .into()
        })
}

/// Compares the residue distance maps of two structures position by position.
///
/// # Errors
///
/// Fails on chain layout mismatches (see [`validate_mapping`]), on an empty structure,
/// and with [`EngineError::RegionOutOfBounds`] for regions outside `[0, N-1]`.
pub fn compare(
    a: &LoadedStructure,
    b: &LoadedStructure,
    mapping: &ChainMapping,
    selection: RegionSelection,
    reporter: &ProgressReporter,
) -> Result<ComparisonResult, EngineError> {
    validate_mapping(a, b, mapping)?;
    let n = a.len();
    if n == 0 {
        return Err(EngineError::EmptyStructure);
    }

    let (region_pairs, is_default_region) = match selection {
        RegionSelection::Default => (vec![RegionPair::new(Region::full(n), Region::full(n))], true),
        RegionSelection::Pairs(pairs) => (pairs, false),
    };
    for pair in &region_pairs {
        for region in [pair.rows, pair.cols] {
            if !region.is_within(n) {
                return Err(EngineError::RegionOutOfBounds { region, size: n });
            }
        }
    }

    reporter.report(Progress::Message("Computing distance matrices...".to_string()));
    let dist_a = pairwise_distances(&a.coordinates(), reporter)?;
    let dist_b = pairwise_distances(&b.coordinates(), reporter)?;
    let diff_ab = &dist_a - &dist_b;
    let diff_ba = -&diff_ab;

    let details: Vec<RegionDetail> = region_pairs
        .iter()
        .map(|pair| region_detail(*pair, &dist_a, &dist_b, &diff_ab, &diff_ba))
        .collect();
    for detail in &details {
        debug!(
            rows = %detail.pair.rows,
            cols = %detail.pair.cols,
            mean_ab = detail.means.ab,
            "Region pair summary."
        );
    }

    info!(
        residues = n,
        region_pairs = region_pairs.len(),
        default_region = is_default_region,
        "Structure comparison complete."
    );
    Ok(ComparisonResult {
        dist_a,
        dist_b,
        diff_ab,
        diff_ba,
        region_pairs,
        is_default_region,
        details,
    })
}

fn region_detail(
    pair: RegionPair,
    dist_a: &DMatrix<f64>,
    dist_b: &DMatrix<f64>,
    diff_ab: &DMatrix<f64>,
    diff_ba: &DMatrix<f64>,
) -> RegionDetail {
    let a_sub = submatrix(dist_a, pair.rows, pair.cols);
    let b_sub = submatrix(dist_b, pair.rows, pair.cols);
    let ab_sub = submatrix(diff_ab, pair.rows, pair.cols);
    let ba_sub = submatrix(diff_ba, pair.cols, pair.rows);
    let means = RegionMeans {
        a: nan_mean(&a_sub),
        b: nan_mean(&b_sub),
        ab: nan_mean(&ab_sub),
        ba: nan_mean(&ba_sub),
    };
    RegionDetail {
        pair,
        shape: a_sub.shape(),
        a_sub,
        b_sub,
        ab_sub,
        ba_sub,
        means,
    }
}

fn submatrix(matrix: &DMatrix<f64>, rows: Region, cols: Region) -> DMatrix<f64> {
    matrix
        .view(
            (rows.start as usize, cols.start as usize),
            (rows.len(), cols.len()),
        )
        .into_owned()
}

fn nan_mean(matrix: &DMatrix<f64>) -> f64 {
    let (sum, count) = matrix
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::boundary::ChainBoundaryIndex;
    use crate::engine::loader::ResidueRecord;
    use crate::engine::region::parse_region_pair;
    use crate::core::models::residue::MoleculeType;
    use nalgebra::Point3;

    fn helix_like(chains: &[(&str, usize)], scale: f64) -> LoadedStructure {
        let mut records = Vec::new();
        let mut boundaries = ChainBoundaryIndex::new();
        for (chain, len) in chains {
            for i in 0..*len {
                let k = records.len() as f64;
                records.push(ResidueRecord {
                    chain_id: chain.to_string(),
                    residue_name: "ALA".into(),
                    seq_number: i as isize + 1,
                    insertion_code: String::new(),
                    molecule_type: MoleculeType::Protein,
                    atom_name: "CA".into(),
                    position: Point3::new(k.cos() * 2.3, k.sin() * 2.3, k * 1.5 * scale),
                });
            }
            boundaries.push(chain, *len);
        }
        LoadedStructure {
            source: "test".into(),
            records,
            boundaries,
        }
    }

    fn mapping(a: &[&str], b: &[&str]) -> ChainMapping {
        let a: Vec<String> = a.iter().map(|s| s.to_string()).collect();
        let b: Vec<String> = b.iter().map(|s| s.to_string()).collect();
        ChainMapping::new(&a, &b).unwrap()
    }

    #[test]
    fn chain_mapping_requires_equal_lengths() {
        let result = ChainMapping::new(&["A".into(), "B".into()], &["A".into()]);
        assert!(matches!(
            result,
            Err(EngineError::ChainCountMismatch {
                count_a: 2,
                count_b: 1
            })
        ));
    }

    #[test]
    fn self_comparison_has_zero_differences() {
        let s = helix_like(&[("A", 12)], 1.0);
        let result = compare(
            &s,
            &s,
            &mapping(&["A"], &["A"]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(result.is_default_region);
        assert_eq!(result.region_pairs, vec![RegionPair::new(Region::new(0, 11), Region::new(0, 11))]);
        assert!(result.diff_ab.iter().all(|v| *v == 0.0));
        assert!(result.diff_ba.iter().all(|v| *v == 0.0));
        assert_eq!(result.details[0].shape, (12, 12));
        assert_eq!(result.details[0].means.ab, 0.0);
    }

    #[test]
    fn difference_matrices_are_negations() {
        let a = helix_like(&[("A", 8)], 1.0);
        let b = helix_like(&[("A", 8)], 1.2);
        let result = compare(
            &a,
            &b,
            &mapping(&["A"], &["A"]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.diff_ab, -&result.diff_ba);
        assert!(result.diff_ab[(0, 7)] < 0.0);
        assert_eq!(result.diff_ab[(3, 3)], 0.0);
    }

    #[test]
    fn unequal_chain_lengths_are_rejected() {
        let a = helix_like(&[("A", 200)], 1.0);
        let b = helix_like(&[("A", 180)], 1.0);
        let err = compare(
            &a,
            &b,
            &mapping(&["A"], &["A"]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        )
        .unwrap_err();
        match err {
            EngineError::SequenceLengthMismatch {
                chain_a,
                chain_b,
                len_a,
                len_b,
            } => {
                assert_eq!((chain_a.as_str(), chain_b.as_str()), ("A", "A"));
                assert_eq!((len_a, len_b), (200, 180));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unequal_chain_counts_are_rejected() {
        let a = helix_like(&[("A", 5), ("B", 5)], 1.0);
        let b = helix_like(&[("A", 10)], 1.0);
        let result = compare(
            &a,
            &b,
            &mapping(&["A"], &["A"]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::ChainCountMismatch { .. })
        ));
    }

    #[test]
    fn inter_chain_region_pair_has_transposed_reverse_block() {
        let s = helix_like(&[("A", 100), ("B", 50)], 1.0);
        let pair = parse_region_pair("A:0:99,B:0:49", Some(&s.boundaries)).unwrap();
        let result = compare(
            &s,
            &s,
            &mapping(&["A", "B"], &["A", "B"]),
            RegionSelection::Pairs(vec![pair]),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(!result.is_default_region);
        let detail = &result.details[0];
        assert_eq!(detail.shape, (100, 50));
        assert_eq!(detail.a_sub.shape(), (100, 50));
        assert_eq!(detail.ab_sub.shape(), (100, 50));
        assert_eq!(detail.ba_sub.shape(), (50, 100));
        assert!(detail.ab_sub.iter().all(|v| *v == 0.0));
        assert!(detail.ba_sub.iter().all(|v| *v == 0.0));
        assert_eq!(detail.a_sub[(0, 0)], result.dist_a[(0, 100)]);
    }

    #[test]
    fn regions_outside_structure_are_rejected() {
        let s = helix_like(&[("A", 10)], 1.0);
        let pair = RegionPair::new(Region::new(0, 4), Region::new(5, 10));
        let err = compare(
            &s,
            &s,
            &mapping(&["A"], &["A"]),
            RegionSelection::Pairs(vec![pair]),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        match err {
            EngineError::RegionOutOfBounds { region, size } => {
                assert_eq!(region, Region::new(5, 10));
                assert_eq!(size, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_structures_are_rejected_before_region_checks() {
        let empty = helix_like(&[], 1.0);
        let result = compare(
            &empty,
            &empty,
            &mapping(&[], &[]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::EmptyStructure)));
    }

    #[test]
    fn mapped_chain_missing_from_structure_is_reported() {
        let a = helix_like(&[("A", 6)], 1.0);
        let b = helix_like(&[("B", 6)], 1.0);
        let err = compare(
            &a,
            &b,
            &mapping(&["Z"], &["B"]),
            RegionSelection::Default,
            &ProgressReporter::new(),
        )
        .unwrap_err();
        match err {
            EngineError::StructureLoad {
                source: StructureLoadError::ChainNotFound { chain, available, .. },
            } => {
                assert_eq!(chain, "Z");
                assert_eq!(available, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nan_mean_skips_missing_entries() {
        let m = DMatrix::from_row_slice(1, 3, &[1.0, f64::NAN, 3.0]);
        assert_eq!(nan_mean(&m), 2.0);
        assert!(nan_mean(&DMatrix::from_element(1, 1, f64::NAN)).is_nan());
    }
}
