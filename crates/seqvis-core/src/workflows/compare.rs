use crate::engine::boundary::ChainBoundaryIndex;
use crate::engine::comparison::{ChainMapping, ComparisonResult, RegionSelection, compare};
use crate::engine::config::{ComparisonConfig, RegionRequest};
use crate::engine::error::EngineError;
use crate::engine::loader::{ChainSelection, LoadedStructure, load_structure};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::region::{Region, RegionPair};
use crate::engine::scale::{ScaleBounds, difference_bound, display_bound};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub structure_a: LoadedStructure,
    pub structure_b: LoadedStructure,
    pub mapping: ChainMapping,
    pub result: ComparisonResult,
    pub bounds: ScaleBounds,
}

#[instrument(skip_all, name = "compare_workflow")]
pub fn run(
    config: &ComparisonConfig,
    reporter: &ProgressReporter,
) -> Result<ComparisonReport, EngineError> {
    let mapping = ChainMapping::new(&config.chains_a, &config.chains_b)?;

    // === Phase 1: Load both structures ===
    let (structure_a, structure_b) = reporter.phase("Loading structures", || {
        info!(
            a = %config.structure_a.display(),
            b = %config.structure_b.display(),
            "Loading structures for comparison."
        );
        let a = load_structure(
            &config.structure_a,
            &ChainSelection::Ordered(config.chains_a.clone()),
            &config.load,
        )?;
        let b = load_structure(
            &config.structure_b,
            &ChainSelection::Ordered(config.chains_b.clone()),
            &config.load,
        )?;
        Ok::<_, EngineError>((a, b))
    })?;

    // === Phase 2: Resolve regions and compare ===
    let result = reporter.phase("Comparing structures", || {
        let selection = resolve_regions(
            &config.regions,
            &structure_a.boundaries,
            &structure_b.boundaries,
            structure_a.len(),
        )?;
        compare(&structure_a, &structure_b, &mapping, selection, reporter)
    })?;

    // === Phase 3: Shared color-scale limits ===
    let scale = &config.scale;
    let bounds = ScaleBounds {
        vmax: display_bound(
            &[&result.dist_a, &result.dist_b],
            scale.vmax_percentile,
            scale.vmax,
        ),
        vdiff: difference_bound(
            &result.diff_ab,
            &result.diff_ba,
            scale.vdiff_percentile,
            scale.vdiff,
        ),
    };
    reporter.report(Progress::Message(format!(
        "vmax = {:.2}, vdiff = {:.2}",
        bounds.vmax, bounds.vdiff
    )));

    info!(
        residues = result.size(),
        region_pairs = result.region_pairs.len(),
        vmax = bounds.vmax,
        vdiff = bounds.vdiff,
        "Comparison workflow complete."
    );
    Ok(ComparisonReport {
        structure_a,
        structure_b,
        mapping,
        result,
        bounds,
    })
}

/// Turns a region request into concrete region pairs.
///
/// Row regions resolve against the chains of structure A and column regions against
/// those of structure B; an empty pair list means the full structure.
pub fn resolve_regions(
    request: &RegionRequest,
    boundaries_a: &ChainBoundaryIndex,
    boundaries_b: &ChainBoundaryIndex,
    size: usize,
) -> Result<RegionSelection, EngineError> {
    match request {
        RegionRequest::Full => Ok(RegionSelection::Default),
        RegionRequest::Single {
            first,
            second,
            policy,
        } => {
            let rows = first.resolve(Some(boundaries_a))?;
            let cols: Region = match second {
                Some(spec) => spec.resolve(Some(boundaries_b))?,
                None => policy.apply(rows, size),
            };
            Ok(RegionSelection::Pairs(vec![RegionPair::new(rows, cols)]))
        }
        RegionRequest::Pairs(specs) if specs.is_empty() => Ok(RegionSelection::Default),
        RegionRequest::Pairs(specs) => specs
            .iter()
            .map(|spec| spec.resolve(Some(boundaries_a), Some(boundaries_b)))
            .collect::<Result<Vec<_>, _>>()
            .map(RegionSelection::Pairs),
    }
}
