use thiserror::Error;

use super::config::ConfigError;
use super::region::Region;
use crate::core::io::annotations::AnnotationError;
use crate::core::io::color_config::ColorConfigError;
use crate::core::io::structure::StructureFileError;

#[derive(Debug, Error)]
pub enum StructureLoadError {
    #[error("Failed to read structure '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: StructureFileError,
    },

    #[error("Chain '{chain}' not found in '{structure}' (available: {available})")]
    ChainNotFound {
        chain: String,
        structure: String,
        available: String,
    },

    #[error("Chain '{chain}' in '{structure}' has no residues with a representative atom")]
    EmptyChain { chain: String, structure: String },

    #[error("No representative atoms found in '{structure}'")]
    NoRepresentativeAtoms { structure: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure loading failed: {source}")]
    StructureLoad {
        #[from]
        source: StructureLoadError,
    },

    #[error("Invalid region '{input}': {reason}")]
    InvalidRegion { input: String, reason: String },

    #[error("Region {region} is out of bounds for a structure of {size} residues")]
    RegionOutOfBounds { region: Region, size: usize },

    #[error(
        "Sequence length mismatch: chain {chain_a} has {len_a} residues but chain {chain_b} has {len_b}"
    )]
    SequenceLengthMismatch {
        chain_a: String,
        chain_b: String,
        len_a: usize,
        len_b: usize,
    },

    #[error("Chain count mismatch: {count_a} chain(s) in structure A vs {count_b} in structure B")]
    ChainCountMismatch { count_a: usize, count_b: usize },

    #[error("Cannot compute distances for an empty structure")]
    EmptyStructure,

    #[error("Failed to read annotation tracks: {source}")]
    TrackAlignment {
        #[from]
        source: AnnotationError,
    },

    #[error("Invalid color '{color}' for track '{track}'")]
    InvalidTrackColor { track: String, color: String },

    #[error("Failed to load color configuration: {source}")]
    ColorConfig {
        #[from]
        source: ColorConfigError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
