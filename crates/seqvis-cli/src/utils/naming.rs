use std::path::Path;

/// Job name of a structure file.
///
/// AlphaFold3 server downloads are named `fold_<job>_model_<n>.cif`; for those the
/// `<job>` part is returned, for anything else the file stem.
pub fn job_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string());

    stem.strip_prefix("fold_")
        .and_then(|rest| {
            let (job, model) = rest.rsplit_once("_model_")?;
            let is_model_number = !model.is_empty() && model.chars().all(|c| c.is_ascii_digit());
            (is_model_number && !job.is_empty()).then(|| job.to_string())
        })
        .unwrap_or(stem)
}

/// Base name shared by every output of one comparison run.
pub fn comparison_name(
    structure_a: &Path,
    chains_a: &[String],
    structure_b: &Path,
    chains_b: &[String],
) -> String {
    format!(
        "{}_{}_vs_{}_{}",
        job_name(structure_a),
        chains_a.join("_"),
        job_name(structure_b),
        chains_b.join("_")
    )
}

/// Suffix naming the compared region selection, if one was given.
///
/// Explicit pairs win over single regions, matching how the selection is resolved.
pub fn selection_name(
    region_pairs: &[String],
    region_1: Option<&str>,
    region_2: Option<&str>,
) -> Option<String> {
    let sanitize = |s: &str| s.replace([',', ':'], "-").replace(char::is_whitespace, "");
    if !region_pairs.is_empty() {
        return Some(region_pairs.iter().map(|p| sanitize(p)).collect::<Vec<_>>().join("_"));
    }
    region_1.map(|first| match region_2 {
        Some(second) => format!("{}_vs_{}", sanitize(first), sanitize(second)),
        None => sanitize(first),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn alphafold_file_names_yield_the_job() {
        assert_eq!(
            job_name(Path::new("runs/fold_p53_tetramer_model_0.cif")),
            "p53_tetramer"
        );
        assert_eq!(job_name(Path::new("fold_x_model_12.cif")), "x");
    }

    #[test]
    fn other_file_names_fall_back_to_the_stem() {
        assert_eq!(job_name(Path::new("1abc.pdb")), "1abc");
        assert_eq!(job_name(Path::new("fold_x_model_final.cif")), "fold_x_model_final");
        assert_eq!(job_name(Path::new("fold__model_0.cif")), "fold__model_0");
    }

    #[test]
    fn comparison_name_joins_jobs_and_chains() {
        let name = comparison_name(
            &PathBuf::from("fold_wt_model_0.cif"),
            &["A".to_string(), "B".to_string()],
            &PathBuf::from("mutant.cif"),
            &["C".to_string(), "D".to_string()],
        );
        assert_eq!(name, "wt_A_B_vs_mutant_C_D");
    }

    #[test]
    fn selection_name_prefers_pairs() {
        let pairs = vec!["A:0:9,B:0:4".to_string()];
        assert_eq!(
            selection_name(&pairs, Some("1:5"), None).as_deref(),
            Some("A-0-9-B-0-4")
        );
        assert_eq!(
            selection_name(&[], Some("1:5"), Some("6:9")).as_deref(),
            Some("1-5_vs_6-9")
        );
        assert_eq!(selection_name(&[], None, Some("6:9")), None);
    }
}
