use super::traits::StructureReader;
use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use pdbtbx::{Format, PDBError, ReadOptions, StrictnessLevel};
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StructureFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse structure: {0}")]
    Parse(String),
    #[error("Structure contains no models")]
    NoModel,
    #[error("Model index {index} is out of range; the structure has {available} model(s)")]
    ModelOutOfRange { index: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Mmcif,
    Pdb,
}

impl StructureFormat {
    /// Sniffs the format from file content: mmCIF files open with a `data_` block.
    pub fn detect(content: &str) -> Self {
        let first = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'));
        match first {
            Some(line) if line.starts_with("data_") => StructureFormat::Mmcif,
            _ => StructureFormat::Pdb,
        }
    }
}

impl From<StructureFormat> for Format {
    fn from(format: StructureFormat) -> Self {
        match format {
            StructureFormat::Mmcif => Format::Mmcif,
            StructureFormat::Pdb => Format::Pdb,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureMetadata {
    pub format: StructureFormat,
    pub model_index: usize,
    pub model_count: usize,
    /// Non-fatal diagnostics reported by the parser.
    pub warnings: Vec<String>,
}

/// Reader for mmCIF and PDB coordinate files.
pub struct StructureFile;

impl StructureReader for StructureFile {
    type Metadata = StructureMetadata;
    type Error = StructureFileError;

    /// Reads one model from a structure stream, detecting the format from its content.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `model_index` - Zero-based index of the model to materialize.
    ///
    /// # Errors
    ///
    /// Returns [`StructureFileError::Parse`] when the content cannot be parsed, and
    /// [`StructureFileError::NoModel`] or [`StructureFileError::ModelOutOfRange`] when the
    /// requested model does not exist.
    fn read_model(
        reader: &mut impl BufRead,
        model_index: usize,
    ) -> Result<(MolecularSystem, StructureMetadata), StructureFileError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let format = StructureFormat::detect(&content);

        let (pdb, warnings) = ReadOptions::default()
            .set_format(format.into())
            .set_level(StrictnessLevel::Loose)
            .read_raw(BufReader::new(content.as_bytes()))
            .map_err(|errors| StructureFileError::Parse(join_errors(&errors)))?;

        let model_count = pdb.model_count();
        if model_count == 0 {
            return Err(StructureFileError::NoModel);
        }
        let model = pdb
            .models()
            .nth(model_index)
            .ok_or(StructureFileError::ModelOutOfRange {
                index: model_index,
                available: model_count,
            })?;

        let mut system = MolecularSystem::new();
        for chain in model.chains() {
            let chain_id = system.add_chain(chain.id());
            for residue in chain.residues() {
                let (number, insertion_code) = residue.id();
                let hetero = residue.atoms().any(|atom| atom.hetero());
                let Some(residue_id) = system.add_residue(
                    chain_id,
                    number,
                    insertion_code,
                    residue.name().unwrap_or_default(),
                    hetero,
                ) else {
                    continue;
                };
                for atom in residue.atoms() {
                    let (x, y, z) = atom.pos();
                    let parsed = Atom::new(atom.name(), residue_id, Point3::new(x, y, z))
                        .with_serial(atom.serial_number());
                    system.add_atom_to_residue(residue_id, parsed);
                }
            }
        }

        debug!(
            ?format,
            model_index,
            model_count,
            chains = system.chain_count(),
            residues = system.residue_count(),
            warnings = warnings.len(),
            "Parsed structure model."
        );

        let metadata = StructureMetadata {
            format,
            model_index,
            model_count,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        };
        Ok((system, metadata))
    }
}

fn join_errors(errors: &[PDBError]) -> String {
    if errors.is_empty() {
        return "unknown parser failure".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Formats one fixed-column PDB coordinate record.
    #[allow(clippy::too_many_arguments)]
    pub fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        alt_loc: char,
        res_name: &str,
        chain: char,
        res_seq: isize,
        position: (f64, f64, f64),
        element: &str,
    ) -> String {
        let padded_name = if name.len() < 4 {
            format!(" {:<3}", name)
        } else {
            name.to_string()
        };
        format!(
            "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record,
            serial,
            padded_name,
            alt_loc,
            res_name,
            chain,
            res_seq,
            position.0,
            position.1,
            position.2,
            1.0,
            0.0,
            element
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::atom_line;
    use super::*;
    use std::fs::File;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;

    fn sample_pdb() -> String {
        [
            atom_line("ATOM", 1, "N", ' ', "ALA", 'A', 1, (0.0, 0.0, 0.0), "N"),
            atom_line("ATOM", 2, "CA", ' ', "ALA", 'A', 1, (1.5, 0.0, 0.0), "C"),
            atom_line("ATOM", 3, "CA", 'A', "SER", 'A', 2, (3.0, 1.0, 0.0), "C"),
            atom_line("ATOM", 4, "CA", 'B', "SER", 'A', 2, (3.2, 1.2, 0.0), "C"),
            atom_line("ATOM", 5, "CA", ' ', "GLY", 'B', 1, (9.0, 0.0, 0.0), "C"),
            atom_line("HETATM", 6, "O", ' ', "HOH", 'B', 101, (20.0, 0.0, 0.0), "O"),
            "END".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn detect_recognizes_mmcif_and_pdb_content() {
        assert_eq!(
            StructureFormat::detect("\n# comment\ndata_fold_job\nloop_\n"),
            StructureFormat::Mmcif
        );
        assert_eq!(
            StructureFormat::detect("HEADER    TEST\nATOM      1"),
            StructureFormat::Pdb
        );
        assert_eq!(StructureFormat::detect(""), StructureFormat::Pdb);
    }

    #[test]
    fn first_model_builds_chains_and_residues_in_file_order() {
        let mut reader = Cursor::new(sample_pdb());
        let (system, metadata) = StructureFile::read_first_model(&mut reader).unwrap();

        assert_eq!(metadata.format, StructureFormat::Pdb);
        assert_eq!(metadata.model_index, 0);
        assert_eq!(metadata.model_count, 1);

        let chain_ids: Vec<_> = system.chains_iter().map(|(_, c)| c.id.clone()).collect();
        assert_eq!(chain_ids, vec!["A", "B"]);

        let chain_a = system.find_chain_by_id("A").unwrap();
        let names: Vec<_> = system
            .residues_of(chain_a)
            .map(|(_, r)| r.name.clone())
            .collect();
        assert_eq!(names, vec!["ALA", "SER"]);

        let chain_b = system.find_chain_by_id("B").unwrap();
        let water = system.find_residue(chain_b, 101, None).unwrap();
        assert!(system.residue(water).unwrap().hetero);
    }

    #[test]
    fn first_model_keeps_first_alternate_location() {
        let mut reader = Cursor::new(sample_pdb());
        let (system, _) = StructureFile::read_first_model(&mut reader).unwrap();

        let chain_a = system.find_chain_by_id("A").unwrap();
        let ser = system.find_residue(chain_a, 2, None).unwrap();
        let residue = system.residue(ser).unwrap();
        assert_eq!(residue.atoms().len(), 1);
        let ca = system.atom(residue.get_atom_id_by_name("CA").unwrap()).unwrap();
        assert!((ca.position.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn read_model_rejects_out_of_range_model() {
        let mut reader = Cursor::new(sample_pdb());
        let result = StructureFile::read_model(&mut reader, 3);
        assert!(matches!(
            result,
            Err(StructureFileError::ModelOutOfRange {
                index: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn model_is_read_from_path_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", sample_pdb()).unwrap();

        let (system, _) = StructureFile::read_model_from_path(&path, 0).unwrap();
        assert_eq!(system.chain_count(), 2);
    }

    #[test]
    fn reading_missing_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = StructureFile::read_model_from_path(dir.path().join("missing.cif"), 0);
        assert!(matches!(result, Err(StructureFileError::Io(_))));
    }
}
