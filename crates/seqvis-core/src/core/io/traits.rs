use crate::core::models::system::MolecularSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads coordinate files that may hold several models.
///
/// Implementors parse one model into a [`MolecularSystem`] and report format-specific
/// metadata next to it.
pub trait StructureReader {
    type Metadata;

    type Error: Error + From<io::Error>;

    /// Reads the model at zero-based `model_index`.
    fn read_model(
        reader: &mut impl BufRead,
        model_index: usize,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error>;

    fn read_first_model(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        Self::read_model(reader, 0)
    }

    /// Opens `path` and reads the model at `model_index`.
    fn read_model_from_path<P: AsRef<Path>>(
        path: P,
        model_index: usize,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_model(&mut reader, model_index)
    }
}
