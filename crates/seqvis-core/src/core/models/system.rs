use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

type ResidueKey = (ChainId, isize, Option<String>);

/// Represents one model of a macromolecular structure.
///
/// Atoms, residues, and chains are stored in slot maps and addressed through stable
/// IDs. Chain order is the order in which chains were first added, which for parsed
/// files is the order of appearance in the file.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding chains by their string identifier.
    chain_id_map: HashMap<String, ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<ResidueKey, ResidueId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in file order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ChainId, &Chain)` pairs.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns an iterator over the residues of one chain in file order.
    ///
    /// The iterator is empty when the chain does not exist.
    pub fn residues_of(&self, chain_id: ChainId) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains
            .get(chain_id)
            .map(|chain| chain.residues())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Finds a chain ID by its string identifier.
    pub fn find_chain_by_id(&self, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(id.trim()).copied()
    }

    /// Finds a residue by chain, sequence number and insertion code.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, `None` for a blank code.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<&str>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&residue_key(chain_id, number, insertion_code))
            .copied()
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given identifier already exists,
    /// its ID is returned and chain order is unchanged.
    pub fn add_chain(&mut self, id: &str) -> ChainId {
        let key = id.trim().to_string();
        if let Some(&existing) = self.chain_id_map.get(&key) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(&key));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(key, chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// Residues are identified by sequence number and insertion code within their chain.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `number` - The sequence number of the residue.
    /// * `insertion_code` - The insertion code, if any.
    /// * `name` - The residue name.
    /// * `hetero` - Whether the residue came from HETATM records.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        number: isize,
        insertion_code: Option<&str>,
        name: &str,
        hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = residue_key(chain_id, number, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(number, insertion_code, name, hetero, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// An atom whose name is already present in the residue is discarded, so the first
    /// alternate location read from a file is the one retained.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` for the stored atom, or `None` if the residue doesn't exist
    /// or already holds an atom of that name.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get(residue_id)?;
        if residue.get_atom_id_by_name(&atom.name).is_some() {
            return None;
        }

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(Atom { residue_id, ..atom });
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }
}

fn residue_key(chain_id: ChainId, number: isize, insertion_code: Option<&str>) -> ResidueKey {
    let code = insertion_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string);
    (chain_id, number, code)
}
