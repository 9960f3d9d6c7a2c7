use super::atom::Atom;
use super::ids::{ChainId, ResidueId};
use super::system::MolecularSystem;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("A chain must be started before adding a residue")]
    NoActiveChain,
    #[error("A residue must be started before adding an atom")]
    NoActiveResidue,
}

/// Incrementally assembles a [`MolecularSystem`] in file order.
///
/// Chains and residues are "opened" in turn and atoms are appended to the currently
/// open residue, mirroring the nesting of coordinate records in structure files.
#[derive(Debug, Default)]
pub struct MolecularSystemBuilder {
    system: MolecularSystem,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
    next_serial: usize,
}

impl MolecularSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        self.current_chain = Some(self.system.add_chain(id));
        self.current_residue = None;
        self
    }

    pub fn start_residue(
        &mut self,
        number: isize,
        insertion_code: Option<&str>,
        name: &str,
        hetero: bool,
    ) -> Result<&mut Self, BuilderError> {
        let chain_id = self.current_chain.ok_or(BuilderError::NoActiveChain)?;
        self.current_residue =
            self.system
                .add_residue(chain_id, number, insertion_code, name, hetero);
        Ok(self)
    }

    /// Appends an atom to the open residue, numbering it sequentially.
    ///
    /// Duplicate atom names within a residue are ignored (first occurrence wins).
    pub fn add_atom(
        &mut self,
        name: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, BuilderError> {
        let residue_id = self.current_residue.ok_or(BuilderError::NoActiveResidue)?;
        self.next_serial += 1;
        let atom = Atom::new(name, residue_id, position).with_serial(self.next_serial);
        self.system.add_atom_to_residue(residue_id, atom);
        Ok(self)
    }

    pub fn build(self) -> MolecularSystem {
        self.system
    }
}
