use phf::{Set, phf_set};

static STANDARD_AMINO_ACIDS: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
};

// Modified or rare residues that still carry a CA atom on a peptide backbone.
static NONSTANDARD_AMINO_ACIDS: Set<&'static str> = phf_set! {
    "MSE", "SEC", "PYL", "SEP", "TPO", "PTR", "HYP", "MLY", "M3L", "KCX",
    "CSO", "CSD", "CME", "CAS", "CSX", "OCS", "LLP", "ALY", "NLE", "ABA",
    "AIB", "DAL", "DLE", "DVA", "DPR", "DSN", "DTH", "DGL", "DAS", "DLY",
    "DAR", "DPN", "DTY", "DTR", "DCY", "DGN", "DHI", "DIL", "MVA", "HIC",
    "FME", "PCA", "TYS", "SAC", "MEN", "CGU", "HSD", "HSE", "HSP", "HID",
    "HIE", "HIP", "CYX", "ASH", "GLH", "LYN", "ORN", "UNK",
};

static DNA_NUCLEOTIDES: Set<&'static str> = phf_set! { "DA", "DT", "DG", "DC" };

static RNA_NUCLEOTIDES: Set<&'static str> = phf_set! { "A", "U", "G", "C" };

static SOLVENT_RESIDUES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "TIP", "TIP3", "TP3", "SOL", "SPC",
};

pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains(residue_name.trim())
}

/// Returns `true` for any recognized amino acid, standard or modified.
pub fn is_amino_acid(residue_name: &str) -> bool {
    let name = residue_name.trim();
    STANDARD_AMINO_ACIDS.contains(name) || NONSTANDARD_AMINO_ACIDS.contains(name)
}

pub fn is_dna_nucleotide(residue_name: &str) -> bool {
    DNA_NUCLEOTIDES.contains(residue_name.trim())
}

pub fn is_rna_nucleotide(residue_name: &str) -> bool {
    RNA_NUCLEOTIDES.contains(residue_name.trim())
}

pub fn is_solvent(residue_name: &str) -> bool {
    SOLVENT_RESIDUES.contains(residue_name.trim())
}
