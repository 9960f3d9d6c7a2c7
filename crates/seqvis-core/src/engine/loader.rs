use super::boundary::ChainBoundaryIndex;
use super::error::StructureLoadError;
use crate::core::io::structure::StructureFile;
use crate::core::io::traits::StructureReader;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::{MoleculeType, Residue};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::{
    is_amino_acid, is_dna_nucleotide, is_rna_nucleotide, is_solvent, is_standard_amino_acid,
};
use itertools::Itertools;
use nalgebra::Point3;
use std::path::Path;
use tracing::{debug, info, warn};

const PROTEIN_REPRESENTATIVE: &str = "CA";
const NUCLEIC_REPRESENTATIVE: &str = "C1'";

/// Which chains to extract, and in what order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// Every chain, in file order.
    #[default]
    All,
    /// The listed chains, in the listed order.
    Ordered(Vec<String>),
}

impl ChainSelection {
    /// Parses a comma-separated chain list such as `"A,B"`.
    ///
    /// Blank entries are dropped; an empty list or `"all"` selects every chain.
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("all") {
            return ChainSelection::All;
        }
        let chains: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if chains.is_empty() {
            ChainSelection::All
        } else {
            ChainSelection::Ordered(chains)
        }
    }
}

/// What happens when a selected chain yields no representative atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyChainPolicy {
    #[default]
    Fatal,
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Also treat recognized non-standard amino acids (e.g. MSE) as protein residues.
    pub include_nonstandard: bool,
    pub model_index: usize,
    pub empty_chain_policy: EmptyChainPolicy,
}

/// One residue reduced to its representative atom.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueRecord {
    pub chain_id: String,
    pub residue_name: String,
    pub seq_number: isize,
    pub insertion_code: String,
    pub molecule_type: MoleculeType,
    pub atom_name: String,
    pub position: Point3<f64>,
}

/// Residue records of the selected chains, flattened in selection order.
#[derive(Debug, Clone)]
pub struct LoadedStructure {
    pub source: String,
    pub records: Vec<ResidueRecord>,
    pub boundaries: ChainBoundaryIndex,
}

impl LoadedStructure {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn coordinates(&self) -> Vec<Point3<f64>> {
        self.records.iter().map(|r| r.position).collect()
    }

    pub fn chain_labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.chain_id.as_str()).collect()
    }

    /// Distinct chain ids that contributed residues, sorted.
    pub fn loaded_chains(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.chain_id.clone())
            .unique()
            .sorted()
            .collect()
    }
}

/// Picks the representative atom of a residue and tags its molecule type.
///
/// Solvent and atomless residues yield `None`. Amino acids are represented by CA,
/// nucleotides by C1', and anything else by its first atom.
pub fn classify_residue(
    residue: &Residue,
    include_nonstandard: bool,
) -> Option<(MoleculeType, AtomId)> {
    let name = residue.name.as_str();
    if is_solvent(name) {
        return None;
    }

    let amino_acid = if include_nonstandard {
        is_amino_acid(name)
    } else {
        is_standard_amino_acid(name)
    };
    if amino_acid {
        if let Some(ca) = residue.get_atom_id_by_name(PROTEIN_REPRESENTATIVE) {
            return Some((MoleculeType::Protein, ca));
        }
    }

    if let Some(c1) = residue.get_atom_id_by_name(NUCLEIC_REPRESENTATIVE) {
        let molecule_type = if is_dna_nucleotide(name) {
            MoleculeType::DNA
        } else if is_rna_nucleotide(name) {
            MoleculeType::RNA
        } else {
            MoleculeType::Nucleic
        };
        return Some((molecule_type, c1));
    }

    residue
        .first_atom()
        .map(|atom_id| (MoleculeType::Ligand, atom_id))
}

/// Reads a structure file and extracts the representative residues of the selected chains.
pub fn load_structure(
    path: &Path,
    selection: &ChainSelection,
    options: &LoadOptions,
) -> Result<LoadedStructure, StructureLoadError> {
    let source = path.to_string_lossy().to_string();
    let (system, metadata) = StructureFile::read_model_from_path(path, options.model_index)
        .map_err(|e| StructureLoadError::Read {
            path: source.clone(),
            source: e,
        })?;
    for warning in &metadata.warnings {
        debug!(path = %source, "Parser warning: {}", warning);
    }

    let loaded = extract_representatives(&system, &source, selection, options)?;
    info!(
        path = %source,
        residues = loaded.len(),
        chains = loaded.boundaries.len(),
        "Loaded structure."
    );
    Ok(loaded)
}

/// Extracts representative residues from an in-memory system.
///
/// # Errors
///
/// Fails when a requested chain is absent, when a chain yields no residues under
/// [`EmptyChainPolicy::Fatal`], or when nothing survives at all.
pub fn extract_representatives(
    system: &MolecularSystem,
    source: &str,
    selection: &ChainSelection,
    options: &LoadOptions,
) -> Result<LoadedStructure, StructureLoadError> {
    let chain_ids = resolve_chain_order(system, source, selection)?;

    let mut records = Vec::new();
    let mut boundaries = ChainBoundaryIndex::new();
    for chain_label in &chain_ids {
        let Some(chain_id) = system.find_chain_by_id(chain_label) else {
            continue;
        };
        let before = records.len();
        for (_, residue) in system.residues_of(chain_id) {
            if let Some(record) = representative_record(system, chain_label, residue, options) {
                records.push(record);
            }
        }

        let count = records.len() - before;
        if count == 0 {
            match options.empty_chain_policy {
                EmptyChainPolicy::Fatal => {
                    return Err(StructureLoadError::EmptyChain {
                        chain: chain_label.clone(),
                        structure: source.to_string(),
                    });
                }
                EmptyChainPolicy::Warn => {
                    warn!(
                        chain = %chain_label,
                        structure = %source,
                        "Chain has no residues with a representative atom; skipping."
                    );
                    continue;
                }
            }
        }
        boundaries.push(chain_label, count);
        debug!(chain = %chain_label, residues = count, "Extracted chain.");
    }

    if records.is_empty() {
        return Err(StructureLoadError::NoRepresentativeAtoms {
            structure: source.to_string(),
        });
    }

    Ok(LoadedStructure {
        source: source.to_string(),
        records,
        boundaries,
    })
}

fn resolve_chain_order(
    system: &MolecularSystem,
    source: &str,
    selection: &ChainSelection,
) -> Result<Vec<String>, StructureLoadError> {
    match selection {
        ChainSelection::All => Ok(system.chains_iter().map(|(_, c)| c.id.clone()).collect()),
        ChainSelection::Ordered(requested) => {
            let mut ordered: Vec<String> = Vec::with_capacity(requested.len());
            for chain in requested {
                if system.find_chain_by_id(chain).is_none() {
                    let available = system.chains_iter().map(|(_, c)| c.id.as_str()).join(", ");
                    return Err(StructureLoadError::ChainNotFound {
                        chain: chain.clone(),
                        structure: source.to_string(),
                        available,
                    });
                }
                if ordered.contains(chain) {
                    warn!(chain = %chain, "Chain requested more than once; using first occurrence.");
                    continue;
                }
                ordered.push(chain.clone());
            }
            Ok(ordered)
        }
    }
}

fn representative_record(
    system: &MolecularSystem,
    chain_label: &str,
    residue: &Residue,
    options: &LoadOptions,
) -> Option<ResidueRecord> {
    let (molecule_type, atom_id) = classify_residue(residue, options.include_nonstandard)?;
    let atom = system.atom(atom_id)?;
    Some(ResidueRecord {
        chain_id: chain_label.to_string(),
        residue_name: residue.name.clone(),
        seq_number: residue.number,
        insertion_code: residue.insertion_code_str().to_string(),
        molecule_type,
        atom_name: atom.name.clone(),
        position: atom.position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::structure::test_support::atom_line;
    use crate::core::models::builder::MolecularSystemBuilder;
    use std::fs;
    use tempfile::tempdir;

    fn mixed_system() -> MolecularSystem {
        let mut b = MolecularSystemBuilder::new();
        b.start_chain("A");
        b.start_residue(1, None, "ALA", false).unwrap();
        b.add_atom("N", Point3::new(0.0, 0.0, 0.0)).unwrap();
        b.add_atom("CA", Point3::new(1.0, 0.0, 0.0)).unwrap();
        b.start_residue(2, None, "MSE", true).unwrap();
        b.add_atom("N", Point3::new(2.0, 0.0, 0.0)).unwrap();
        b.add_atom("CA", Point3::new(3.0, 0.0, 0.0)).unwrap();
        b.start_residue(3, None, "HOH", true).unwrap();
        b.add_atom("O", Point3::new(9.0, 9.0, 9.0)).unwrap();

        b.start_chain("B");
        b.start_residue(1, None, "DG", false).unwrap();
        b.add_atom("P", Point3::new(0.0, 5.0, 0.0)).unwrap();
        b.add_atom("C1'", Point3::new(0.0, 6.0, 0.0)).unwrap();
        b.start_residue(2, None, "U", false).unwrap();
        b.add_atom("C1'", Point3::new(0.0, 7.0, 0.0)).unwrap();
        b.start_residue(3, None, "PSU", true).unwrap();
        b.add_atom("C1'", Point3::new(0.0, 8.0, 0.0)).unwrap();

        b.start_chain("C");
        b.start_residue(1, None, "ATP", true).unwrap();
        b.add_atom("PG", Point3::new(4.0, 4.0, 4.0)).unwrap();
        b.add_atom("O1G", Point3::new(5.0, 4.0, 4.0)).unwrap();

        b.start_chain("W");
        b.start_residue(1, None, "WAT", true).unwrap();
        b.add_atom("O", Point3::new(7.0, 7.0, 7.0)).unwrap();
        b.build()
    }

    fn extract(
        system: &MolecularSystem,
        selection: ChainSelection,
        options: LoadOptions,
    ) -> Result<LoadedStructure, StructureLoadError> {
        extract_representatives(system, "test", &selection, &options)
    }

    #[test]
    fn chain_selection_parses_comma_lists() {
        assert_eq!(
            ChainSelection::parse(" A, B ,,C"),
            ChainSelection::Ordered(vec!["A".into(), "B".into(), "C".into()])
        );
        assert_eq!(ChainSelection::parse(""), ChainSelection::All);
        assert_eq!(ChainSelection::parse("ALL"), ChainSelection::All);
    }

    #[test]
    fn classification_follows_representative_priority() {
        let system = mixed_system();
        let warn = LoadOptions {
            empty_chain_policy: EmptyChainPolicy::Warn,
            ..Default::default()
        };
        let loaded = extract(&system, ChainSelection::All, warn).unwrap();

        let summary: Vec<_> = loaded
            .records
            .iter()
            .map(|r| (r.residue_name.as_str(), r.molecule_type, r.atom_name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ALA", MoleculeType::Protein, "CA"),
                ("MSE", MoleculeType::Ligand, "N"),
                ("DG", MoleculeType::DNA, "C1'"),
                ("U", MoleculeType::RNA, "C1'"),
                ("PSU", MoleculeType::Nucleic, "C1'"),
                ("ATP", MoleculeType::Ligand, "PG"),
            ]
        );
    }

    #[test]
    fn include_nonstandard_promotes_modified_amino_acids() {
        let system = mixed_system();
        let options = LoadOptions {
            include_nonstandard: true,
            ..Default::default()
        };
        let loaded = extract(&system, ChainSelection::parse("A"), options).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.records[1].molecule_type, MoleculeType::Protein);
        assert_eq!(loaded.records[1].atom_name, "CA");
        assert_eq!(loaded.records[1].position, Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn ordered_selection_controls_output_order_and_boundaries() {
        let system = mixed_system();
        let loaded = extract(&system, ChainSelection::parse("C,A"), LoadOptions::default()).unwrap();

        assert_eq!(loaded.chain_labels(), vec!["C", "A", "A"]);
        assert_eq!(loaded.boundaries.chain_ids(), vec!["C", "A"]);
        assert_eq!(loaded.boundaries.get("A").unwrap().start, 1);
        assert_eq!(loaded.boundaries.total_len(), loaded.len());
        assert_eq!(loaded.loaded_chains(), vec!["A", "C"]);
    }

    #[test]
    fn missing_chain_is_reported_with_available_chains() {
        let system = mixed_system();
        let err = extract(&system, ChainSelection::parse("A,Z"), LoadOptions::default())
            .unwrap_err();
        match err {
            StructureLoadError::ChainNotFound {
                chain, available, ..
            } => {
                assert_eq!(chain, "Z");
                assert_eq!(available, "A, B, C, W");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_chain_policy_decides_between_error_and_warning() {
        let system = mixed_system();
        let fatal = extract(&system, ChainSelection::parse("A,W"), LoadOptions::default());
        assert!(matches!(
            fatal,
            Err(StructureLoadError::EmptyChain { ref chain, .. }) if chain == "W"
        ));

        let warn = LoadOptions {
            empty_chain_policy: EmptyChainPolicy::Warn,
            ..Default::default()
        };
        let loaded = extract(&system, ChainSelection::parse("A,W"), warn).unwrap();
        assert_eq!(loaded.boundaries.chain_ids(), vec!["A"]);
    }

    #[test]
    fn solvent_only_selection_has_no_representatives() {
        let system = mixed_system();
        let warn = LoadOptions {
            empty_chain_policy: EmptyChainPolicy::Warn,
            ..Default::default()
        };
        let result = extract(&system, ChainSelection::parse("W"), warn);
        assert!(matches!(
            result,
            Err(StructureLoadError::NoRepresentativeAtoms { .. })
        ));
    }

    #[test]
    fn duplicate_chain_request_is_loaded_once() {
        let system = mixed_system();
        let loaded = extract(&system, ChainSelection::parse("A,A"), LoadOptions::default()).unwrap();
        assert_eq!(loaded.boundaries.len(), 1);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn load_structure_reads_pdb_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        let content = [
            atom_line("ATOM", 1, "N", ' ', "GLY", 'A', 1, (0.0, 0.0, 0.0), "N"),
            atom_line("ATOM", 2, "CA", ' ', "GLY", 'A', 1, (1.0, 0.0, 0.0), "C"),
            atom_line("ATOM", 3, "CA", ' ', "LYS", 'A', 2, (4.0, 0.0, 0.0), "C"),
            atom_line("HETATM", 4, "O", ' ', "HOH", 'A', 3, (8.0, 0.0, 0.0), "O"),
            "END".to_string(),
        ]
        .join("\n");
        fs::write(&path, content).unwrap();

        let loaded = load_structure(&path, &ChainSelection::All, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.records[1].residue_name, "LYS");
        assert_eq!(loaded.records[1].seq_number, 2);
        assert!((loaded.coordinates()[1].x - 4.0).abs() < 1e-6);
    }

    #[test]
    fn load_structure_wraps_read_failures() {
        let dir = tempdir().unwrap();
        let result = load_structure(
            &dir.path().join("missing.cif"),
            &ChainSelection::All,
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(StructureLoadError::Read { .. })));
    }
}
