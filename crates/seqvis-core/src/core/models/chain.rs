use super::ids::ResidueId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                      // Chain identifier (e.g., "A", "AA")
    pub(crate) residues: Vec<ResidueId>, // Residues in file order
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chain_trims_identifier_and_starts_empty() {
        let chain = Chain::new(" B ");
        assert_eq!(chain.id, "B");
        assert!(chain.is_empty());
        assert!(chain.residues().is_empty());
    }
}
