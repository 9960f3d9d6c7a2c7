use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broad molecule class assigned to a residue when its representative atom is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MoleculeType {
    Protein,
    DNA,
    RNA,
    /// A nucleotide carrying a C1' atom whose name is not a canonical DNA or RNA base.
    Nucleic,
    Ligand,
    #[default]
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid molecule type string: '{0}'")]
pub struct ParseMoleculeTypeError(pub String);

impl FromStr for MoleculeType {
    type Err = ParseMoleculeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protein" => Ok(MoleculeType::Protein),
            "dna" => Ok(MoleculeType::DNA),
            "rna" => Ok(MoleculeType::RNA),
            "nucleic" => Ok(MoleculeType::Nucleic),
            "ligand" => Ok(MoleculeType::Ligand),
            "unknown" => Ok(MoleculeType::Unknown),
            _ => Err(ParseMoleculeTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MoleculeType::Protein => "Protein",
                MoleculeType::DNA => "DNA",
                MoleculeType::RNA => "RNA",
                MoleculeType::Nucleic => "Nucleic",
                MoleculeType::Ligand => "Ligand",
                MoleculeType::Unknown => "Unknown",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                      // Sequence number as stored in the source file
    pub insertion_code: Option<String>,     // Insertion code, `None` when blank
    pub name: String,                       // Residue name (e.g., "ALA", "DG", "HOH")
    pub hetero: bool,                       // True when read from HETATM records
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms in file order
    atom_name_map: HashMap<String, AtomId>, // First atom seen for each name
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        insertion_code: Option<&str>,
        name: &str,
        hetero: bool,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            insertion_code: insertion_code
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            name: name.trim().to_string(),
            hetero,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    /// Registers an atom with this residue.
    ///
    /// Returns `false` and leaves the residue untouched when an atom with the same
    /// name is already present (e.g. an alternate location), so the first occurrence
    /// always wins.
    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) -> bool {
        if self.atom_name_map.contains_key(atom_name) {
            return false;
        }
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
        true
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn first_atom(&self) -> Option<AtomId> {
        self.atoms.first().copied()
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn insertion_code_str(&self) -> &str {
        self.insertion_code.as_deref().unwrap_or("")
    }
}
