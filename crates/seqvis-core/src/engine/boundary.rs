use serde::Serialize;

/// The contiguous, inclusive index range one chain occupies in a flattened residue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainBoundary {
    pub chain_id: String,
    pub start: usize,
    pub end: usize,
}

impl ChainBoundary {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Ordered chain boundaries covering `0..total_len()` without gaps or overlaps.
///
/// Entries are only ever appended at the current end of the index, so contiguity holds
/// by construction; chains that contribute no residues never receive an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChainBoundaryIndex {
    entries: Vec<ChainBoundary>,
}

impl ChainBoundaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chain of `len` residues after the existing entries.
    ///
    /// Returns `false` (and records nothing) when `len` is zero.
    pub fn push(&mut self, chain_id: &str, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let start = self.total_len();
        self.entries.push(ChainBoundary {
            chain_id: chain_id.to_string(),
            start,
            end: start + len - 1,
        });
        true
    }

    /// Derives boundaries from a per-residue chain label sequence, one entry per run of
    /// identical consecutive labels.
    pub fn from_chain_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut index = Self::new();
        let mut run: Option<(&str, usize)> = None;
        for label in labels {
            let label = label.as_ref();
            match run {
                Some((current, count)) if current == label => run = Some((current, count + 1)),
                Some((current, count)) => {
                    index.push(current, count);
                    run = Some((label, 1));
                }
                None => run = Some((label, 1)),
            }
        }
        if let Some((current, count)) = run {
            index.push(current, count);
        }
        index
    }

    pub fn get(&self, chain_id: &str) -> Option<&ChainBoundary> {
        self.entries.iter().find(|entry| entry.chain_id == chain_id)
    }

    /// Start offset of a chain in flattened index space.
    pub fn offset_of(&self, chain_id: &str) -> Option<usize> {
        self.get(chain_id).map(|entry| entry.start)
    }

    pub fn contains_chain(&self, chain_id: &str) -> bool {
        self.get(chain_id).is_some()
    }

    /// The boundary that owns a flattened residue index.
    pub fn chain_of(&self, index: usize) -> Option<&ChainBoundary> {
        self.entries.iter().find(|entry| entry.contains(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainBoundary> {
        self.entries.iter()
    }

    pub fn chain_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.chain_id.as_str()).collect()
    }

    /// Number of chains with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of residues covered by all entries.
    pub fn total_len(&self) -> usize {
        self.entries.last().map_or(0, |last| last.end + 1)
    }
}
