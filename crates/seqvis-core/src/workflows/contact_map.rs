use crate::core::io::annotations::read_annotations;
use crate::engine::boundary::ChainBoundaryIndex;
use crate::engine::config::ContactMapConfig;
use crate::engine::distance::pairwise_distances;
use crate::engine::error::EngineError;
use crate::engine::loader::{LoadedStructure, load_structure};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scale::display_bound;
use crate::engine::tracks::{AlignedTrack, align_tracks, build_tracks};
use nalgebra::DMatrix;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ContactMapReport {
    pub structure: LoadedStructure,
    pub distances: DMatrix<f64>,
    pub vmax: f64,
    /// Chain blocks derived from the per-residue chain labels.
    pub chain_blocks: ChainBoundaryIndex,
    /// Sorted distinct chain ids that contributed residues.
    pub loaded_chains: Vec<String>,
    pub tracks: Vec<AlignedTrack>,
}

#[instrument(skip_all, name = "contact_map_workflow")]
pub fn run(
    config: &ContactMapConfig,
    reporter: &ProgressReporter,
) -> Result<ContactMapReport, EngineError> {
    // === Phase 1: Load the structure ===
    let structure = reporter.phase("Loading structure", || {
        load_structure(&config.structure, &config.chains, &config.load)
    })?;
    let loaded_chains = structure.loaded_chains();
    info!(chains = ?loaded_chains, residues = structure.len(), "Chains loaded.");

    // === Phase 2: Distance map and display range ===
    let distances = reporter.phase("Computing distance map", || {
        pairwise_distances(&structure.coordinates(), reporter)
    })?;
    let vmax = display_bound(&[&distances], config.vmax_percentile, config.vmax);
    let labels = structure.chain_labels();
    let chain_blocks = ChainBoundaryIndex::from_chain_labels(&labels);

    // === Phase 3: Annotation tracks (optional) ===
    let tracks = match &config.tracks {
        Some(track_config) => reporter.phase("Aligning tracks", || {
            let records = read_annotations(&track_config.annotations)?;
            reporter.report(Progress::Message(format!(
                "Read {} annotation record(s).",
                records.len()
            )));
            let entries = build_tracks(
                &records,
                track_config.colors.as_ref(),
                &track_config.palette,
            )?;
            Ok::<_, EngineError>(align_tracks(&entries, &labels))
        })?,
        None => Vec::new(),
    };

    info!(
        residues = structure.len(),
        vmax,
        tracks = tracks.len(),
        "Contact map workflow complete."
    );
    Ok(ContactMapReport {
        structure,
        distances,
        vmax,
        chain_blocks,
        loaded_chains,
        tracks,
    })
}
