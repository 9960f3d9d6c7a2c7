use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents a single atom of a parsed structure.
///
/// Only the fields needed for geometric analysis are retained: the atom name used
/// to pick a representative atom, the serial number from the source file, the owning
/// residue, and the Cartesian position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "C1'", "N1").
    pub name: String,
    /// The atom serial number from the source file, `0` when unknown.
    pub serial: usize,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` without a serial number.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.trim().to_string(),
            serial: 0,
            residue_id,
            position,
        }
    }

    pub fn with_serial(mut self, serial: usize) -> Self {
        self.serial = serial;
        self
    }
}
