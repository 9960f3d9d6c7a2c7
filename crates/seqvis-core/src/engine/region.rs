use super::boundary::ChainBoundaryIndex;
use super::error::EngineError;
use serde::Serialize;
use std::fmt;

/// An inclusive, 0-based range of residue indices in flattened index space.
///
/// Positions are signed so that out-of-range requests survive parsing and can be
/// reported against the structure size by the comparison step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub start: isize,
    pub end: isize,
}

impl Region {
    pub fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    /// The region spanning every residue of a structure of `size` residues.
    pub fn full(size: usize) -> Self {
        Self::new(0, size as isize - 1)
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_within(&self, size: usize) -> bool {
        self.start >= 0 && self.end >= self.start && (self.end as usize) < size
    }

    /// Moves both ends by a chain's start offset; `None` when a position overflows.
    fn shifted(self, offset: usize) -> Option<Self> {
        let offset = isize::try_from(offset).ok()?;
        Some(Self::new(
            self.start.checked_add(offset)?,
            self.end.checked_add(offset)?,
        ))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A (row region, column region) pair selecting a sub-matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionPair {
    pub rows: Region,
    pub cols: Region,
}

impl RegionPair {
    pub fn new(rows: Region, cols: Region) -> Self {
        Self { rows, cols }
    }
}

/// An unresolved region request as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSpec {
    Range(isize, isize),
    Text(String),
}

impl RegionSpec {
    pub fn resolve(&self, boundaries: Option<&ChainBoundaryIndex>) -> Result<Region, EngineError> {
        match self {
            RegionSpec::Range(start, end) => {
                let input = format!("({start}, {end})");
                checked(&input, *start, *end)
            }
            RegionSpec::Text(text) => parse_region(text, boundaries),
        }
    }
}

impl From<&str> for RegionSpec {
    fn from(text: &str) -> Self {
        RegionSpec::Text(text.to_string())
    }
}

/// An unresolved region-pair request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionPairSpec {
    /// `"<region>,<region>"`; both halves resolve against the first structure's chains.
    Text(String),
    /// Separate halves; the row region resolves against the first structure's chains and
    /// the column region against the second's.
    Split(RegionSpec, RegionSpec),
}

impl RegionPairSpec {
    pub fn resolve(
        &self,
        boundaries_a: Option<&ChainBoundaryIndex>,
        boundaries_b: Option<&ChainBoundaryIndex>,
    ) -> Result<RegionPair, EngineError> {
        match self {
            RegionPairSpec::Text(text) => parse_region_pair(text, boundaries_a),
            RegionPairSpec::Split(rows, cols) => Ok(RegionPair::new(
                rows.resolve(boundaries_a)?,
                cols.resolve(boundaries_b)?,
            )),
        }
    }
}

/// What the column region becomes when a caller supplies only the row region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondRegionPolicy {
    /// Reuse the row region, selecting a square block.
    #[default]
    MirrorFirst,
    /// Use every residue of the structure.
    FullStructure,
}

impl SecondRegionPolicy {
    pub fn apply(self, first: Region, size: usize) -> Region {
        match self {
            SecondRegionPolicy::MirrorFirst => first,
            SecondRegionPolicy::FullStructure => Region::full(size),
        }
    }
}

/// Parses `"start:end"`, `"start-end"`, or, when `boundaries` is supplied,
/// `"chain:start:end"` / `"chain:start-end"` with chain-relative positions.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRegion`] for unrecognized formats, non-integer
/// positions, unknown chain qualifiers, and ranges whose end precedes their start.
pub fn parse_region(
    input: &str,
    boundaries: Option<&ChainBoundaryIndex>,
) -> Result<Region, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "region is empty"));
    }

    if let Some((qualifier, rest)) = trimmed.split_once(':') {
        let qualifier = qualifier.trim();
        let offset = boundaries.and_then(|index| index.offset_of(qualifier));
        if let (Some(offset), Some((start, end))) = (offset, split_range(rest)) {
            return checked(input, start, end)?
                .shifted(offset)
                .ok_or_else(|| invalid(input, "position overflows after adding the chain offset"));
        }
        if qualifier.parse::<isize>().is_err() && split_range(rest).is_some() {
            let reason = match boundaries {
                Some(_) => format!("unknown chain '{qualifier}'"),
                None => format!("chain qualifier '{qualifier}' requires known chain boundaries"),
            };
            return Err(invalid(input, &reason));
        }
    }

    match split_range(trimmed) {
        Some((start, end)) => checked(input, start, end),
        None => Err(invalid(
            input,
            "expected 'start:end', 'start-end' or 'chain:start:end'",
        )),
    }
}

/// Parses one `"<region>,<region>"` pair, splitting on the first comma not preceded by
/// a backslash.
pub fn parse_region_pair(
    input: &str,
    boundaries: Option<&ChainBoundaryIndex>,
) -> Result<RegionPair, EngineError> {
    let (left, right) = split_unescaped_comma(input.trim())
        .ok_or_else(|| invalid(input, "region pair must contain ','"))?;
    let rows = parse_region(&left, boundaries)?;
    let cols = parse_region(&right, boundaries)?;
    Ok(RegionPair::new(rows, cols))
}

/// Splits a bare range on `:` when present, otherwise on the first `-` that follows a
/// digit. Returns `None` when either side is not an integer.
fn split_range(text: &str) -> Option<(isize, isize)> {
    let text = text.trim();
    let (left, right) = if text.contains(':') {
        text.split_once(':')?
    } else {
        let bytes = text.as_bytes();
        let dash = (1..bytes.len()).find(|&i| bytes[i] == b'-' && bytes[i - 1].is_ascii_digit())?;
        (&text[..dash], &text[dash + 1..])
    };
    let start = left.trim().parse::<isize>().ok()?;
    let end = right.trim().parse::<isize>().ok()?;
    Some((start, end))
}

fn split_unescaped_comma(text: &str) -> Option<(String, String)> {
    let mut left = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                left.push(',');
                chars.next();
            }
            ',' => {
                let right: String = chars.collect();
                return Some((left, right.replace("\\,", ",")));
            }
            _ => left.push(c),
        }
    }
    None
}

fn checked(input: &str, start: isize, end: isize) -> Result<Region, EngineError> {
    if end < start {
        return Err(invalid(input, &format!("end {end} is before start {start}")));
    }
    Ok(Region::new(start, end))
}

fn invalid(input: &str, reason: &str) -> EngineError {
    EngineError::InvalidRegion {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
