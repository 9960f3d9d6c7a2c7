use crate::error::{CliError, Result};
use nalgebra::DMatrix;
use seqvis::engine::boundary::ChainBoundaryIndex;
use seqvis::engine::comparison::RegionMeans;
use seqvis::engine::region::Region;
use seqvis::engine::scale::ScaleBounds;
use seqvis::engine::tracks::{AlignedTrack, TrackColor, TrackKind};
use seqvis::workflows::compare::ComparisonReport;
use seqvis::workflows::contact_map::ContactMapReport;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Serialize)]
struct RegionSummary {
    rows: Region,
    cols: Region,
    shape: (usize, usize),
    means: RegionMeans,
}

#[derive(Serialize)]
struct ComparisonSummary<'a> {
    structure_a: &'a str,
    structure_b: &'a str,
    chain_pairs: &'a [(String, String)],
    residues: usize,
    chains_a: &'a ChainBoundaryIndex,
    chains_b: &'a ChainBoundaryIndex,
    bounds: &'a ScaleBounds,
    default_region: bool,
    regions: Vec<RegionSummary>,
}

#[derive(Serialize)]
struct TrackSummary<'a> {
    name: &'a str,
    kind: TrackKind,
    color: &'a TrackColor,
    categories: &'a [String],
}

#[derive(Serialize)]
struct ContactMapSummary<'a> {
    structure: &'a str,
    residues: usize,
    vmax: f64,
    loaded_chains: &'a [String],
    chain_blocks: &'a ChainBoundaryIndex,
    tracks: Vec<TrackSummary<'a>>,
}

fn output_error(path: &Path, source: impl Into<anyhow::Error>) -> CliError {
    CliError::Output {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Writes a matrix as comma-separated rows without a header.
pub fn write_matrix_csv(path: &Path, matrix: &DMatrix<f64>) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| output_error(path, e))?;
    for row in matrix.row_iter() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| output_error(path, e))?;
    }
    writer.flush().map_err(|e| output_error(path, e))?;
    debug!(
        "Wrote {}x{} matrix to {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| output_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| output_error(path, e))
}

/// Writes the four comparison matrices, per-region difference blocks and a JSON summary.
pub fn write_comparison(
    report: &ComparisonReport,
    directory: &Path,
    name: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    let result = &report.result;
    let mut written = Vec::new();

    for (suffix, matrix) in [
        ("dist_a", &result.dist_a),
        ("dist_b", &result.dist_b),
        ("diff_ab", &result.diff_ab),
        ("diff_ba", &result.diff_ba),
    ] {
        let path = directory.join(format!("{}_{}.csv", name, suffix));
        write_matrix_csv(&path, matrix)?;
        written.push(path);
    }

    if !result.is_default_region {
        for (i, detail) in result.details.iter().enumerate() {
            for (suffix, matrix) in [("diff_ab", &detail.ab_sub), ("diff_ba", &detail.ba_sub)] {
                let path = directory.join(format!("{}_region{}_{}.csv", name, i + 1, suffix));
                write_matrix_csv(&path, matrix)?;
                written.push(path);
            }
        }
    }

    let summary = ComparisonSummary {
        structure_a: &report.structure_a.source,
        structure_b: &report.structure_b.source,
        chain_pairs: report.mapping.pairs(),
        residues: result.size(),
        chains_a: &report.structure_a.boundaries,
        chains_b: &report.structure_b.boundaries,
        bounds: &report.bounds,
        default_region: result.is_default_region,
        regions: result
            .details
            .iter()
            .map(|detail| RegionSummary {
                rows: detail.pair.rows,
                cols: detail.pair.cols,
                shape: detail.shape,
                means: detail.means,
            })
            .collect(),
    };
    let path = directory.join(format!("{}_summary.json", name));
    write_json(&path, &summary)?;
    written.push(path);

    info!("Wrote {} comparison output file(s).", written.len());
    Ok(written)
}

/// Writes one row per residue with its identity and every aligned track value.
///
/// Categorical tracks get a second `<name>_code` column holding the sorted category index.
pub fn write_residue_table(path: &Path, report: &ContactMapReport) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| output_error(path, e))?;

    let mut header = vec![
        "index".to_string(),
        "chain".to_string(),
        "residue_number".to_string(),
        "insertion_code".to_string(),
        "residue_name".to_string(),
        "atom".to_string(),
    ];
    for track in &report.tracks {
        header.push(track.name.clone());
        if track.kind == TrackKind::Categorical {
            header.push(format!("{}_code", track.name));
        }
    }
    writer
        .write_record(&header)
        .map_err(|e| output_error(path, e))?;

    let codes: Vec<Vec<Option<usize>>> =
        report.tracks.iter().map(AlignedTrack::category_codes).collect();
    for (i, record) in report.structure.records.iter().enumerate() {
        let mut row = vec![
            i.to_string(),
            record.chain_id.clone(),
            record.seq_number.to_string(),
            record.insertion_code.clone(),
            record.residue_name.clone(),
            record.atom_name.clone(),
        ];
        for (track, track_codes) in report.tracks.iter().zip(&codes) {
            row.push(track.display_value(i));
            if track.kind == TrackKind::Categorical {
                row.push(
                    track_codes
                        .get(i)
                        .copied()
                        .flatten()
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                );
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| output_error(path, e))?;
    }
    writer.flush().map_err(|e| output_error(path, e))?;
    Ok(())
}

/// Writes the distance matrix, the per-residue table and a JSON summary.
pub fn write_contact_map(
    report: &ContactMapReport,
    directory: &Path,
    name: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;

    let matrix_path = directory.join(format!("{}_distances.csv", name));
    write_matrix_csv(&matrix_path, &report.distances)?;

    let table_path = directory.join(format!("{}_residues.tsv", name));
    write_residue_table(&table_path, report)?;

    let summary = ContactMapSummary {
        structure: &report.structure.source,
        residues: report.structure.len(),
        vmax: report.vmax,
        loaded_chains: &report.loaded_chains,
        chain_blocks: &report.chain_blocks,
        tracks: report
            .tracks
            .iter()
            .map(|track| TrackSummary {
                name: &track.name,
                kind: track.kind,
                color: &track.color,
                categories: &track.categories,
            })
            .collect(),
    };
    let summary_path = directory.join(format!("{}_contact_map.json", name));
    write_json(&summary_path, &summary)?;

    let written = vec![matrix_path, table_path, summary_path];
    info!("Wrote {} contact map output file(s).", written.len());
    Ok(written)
}
