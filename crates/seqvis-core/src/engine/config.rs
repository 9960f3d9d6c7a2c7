use super::loader::{ChainSelection, EmptyChainPolicy, LoadOptions};
use super::region::{RegionPairSpec, RegionSpec, SecondRegionPolicy};
use super::tracks::PaletteDefaults;
use crate::core::io::color_config::ColorConfig;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which residues of the two structures are compared against each other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionRequest {
    /// Compare the full structures.
    #[default]
    Full,
    /// One row region, with the column region optional.
    Single {
        first: RegionSpec,
        second: Option<RegionSpec>,
        policy: SecondRegionPolicy,
    },
    /// Explicit pairs; these take precedence over any single-region request.
    Pairs(Vec<RegionPairSpec>),
}

/// Color-scale limits for distance and difference panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    pub vmax: Option<f64>,
    pub vmax_percentile: f64,
    pub vdiff: Option<f64>,
    pub vdiff_percentile: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            vmax: None,
            vmax_percentile: 95.0,
            vdiff: None,
            vdiff_percentile: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub structure_a: PathBuf,
    pub structure_b: PathBuf,
    pub chains_a: Vec<String>,
    pub chains_b: Vec<String>,
    pub regions: RegionRequest,
    pub scale: ScaleConfig,
    pub load: LoadOptions,
}

#[derive(Default)]
pub struct ComparisonConfigBuilder {
    structure_a: Option<PathBuf>,
    structure_b: Option<PathBuf>,
    chains_a: Option<Vec<String>>,
    chains_b: Option<Vec<String>>,
    regions: Option<RegionRequest>,
    scale: Option<ScaleConfig>,
    include_nonstandard: bool,
    model_index: usize,
}

impl ComparisonConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_a(mut self, path: PathBuf) -> Self {
        self.structure_a = Some(path);
        self
    }
    pub fn structure_b(mut self, path: PathBuf) -> Self {
        self.structure_b = Some(path);
        self
    }
    pub fn chains_a(mut self, chains: Vec<String>) -> Self {
        self.chains_a = Some(chains);
        self
    }
    pub fn chains_b(mut self, chains: Vec<String>) -> Self {
        self.chains_b = Some(chains);
        self
    }
    pub fn regions(mut self, regions: RegionRequest) -> Self {
        self.regions = Some(regions);
        self
    }
    pub fn scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = Some(scale);
        self
    }
    pub fn include_nonstandard(mut self, include: bool) -> Self {
        self.include_nonstandard = include;
        self
    }
    pub fn model_index(mut self, index: usize) -> Self {
        self.model_index = index;
        self
    }

    pub fn build(self) -> Result<ComparisonConfig, ConfigError> {
        let chains_a = self
            .chains_a
            .ok_or(ConfigError::MissingParameter("chains_a"))?;
        let chains_b = self
            .chains_b
            .ok_or(ConfigError::MissingParameter("chains_b"))?;
        if chains_a.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "chains_a",
                reason: "at least one chain is required".to_string(),
            });
        }
        if chains_b.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "chains_b",
                reason: "at least one chain is required".to_string(),
            });
        }

        Ok(ComparisonConfig {
            structure_a: self
                .structure_a
                .ok_or(ConfigError::MissingParameter("structure_a"))?,
            structure_b: self
                .structure_b
                .ok_or(ConfigError::MissingParameter("structure_b"))?,
            chains_a,
            chains_b,
            regions: self.regions.unwrap_or_default(),
            scale: self.scale.unwrap_or_default(),
            load: LoadOptions {
                include_nonstandard: self.include_nonstandard,
                model_index: self.model_index,
                empty_chain_policy: EmptyChainPolicy::Fatal,
            },
        })
    }
}

/// Annotation tracks to overlay on a contact map.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    pub annotations: PathBuf,
    pub colors: Option<ColorConfig>,
    pub palette: PaletteDefaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMapConfig {
    pub structure: PathBuf,
    pub chains: ChainSelection,
    pub vmax: Option<f64>,
    pub vmax_percentile: f64,
    pub tracks: Option<TrackConfig>,
    pub load: LoadOptions,
}

#[derive(Default)]
pub struct ContactMapConfigBuilder {
    structure: Option<PathBuf>,
    chains: Option<ChainSelection>,
    vmax: Option<f64>,
    vmax_percentile: Option<f64>,
    annotations: Option<PathBuf>,
    colors: Option<ColorConfig>,
    palette: Option<PaletteDefaults>,
    include_nonstandard: bool,
    model_index: usize,
}

impl ContactMapConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure(mut self, path: PathBuf) -> Self {
        self.structure = Some(path);
        self
    }
    pub fn chains(mut self, chains: ChainSelection) -> Self {
        self.chains = Some(chains);
        self
    }
    pub fn vmax(mut self, vmax: Option<f64>) -> Self {
        self.vmax = vmax;
        self
    }
    pub fn vmax_percentile(mut self, percentile: f64) -> Self {
        self.vmax_percentile = Some(percentile);
        self
    }
    pub fn annotations(mut self, path: Option<PathBuf>) -> Self {
        self.annotations = path;
        self
    }
    pub fn colors(mut self, colors: Option<ColorConfig>) -> Self {
        self.colors = colors;
        self
    }
    pub fn palette(mut self, palette: PaletteDefaults) -> Self {
        self.palette = Some(palette);
        self
    }
    pub fn include_nonstandard(mut self, include: bool) -> Self {
        self.include_nonstandard = include;
        self
    }
    pub fn model_index(mut self, index: usize) -> Self {
        self.model_index = index;
        self
    }

    pub fn build(self) -> Result<ContactMapConfig, ConfigError> {
        if self.colors.is_some() && self.annotations.is_none() {
            return Err(ConfigError::InvalidParameter {
                name: "colors",
                reason: "track colors were given without an annotation file".to_string(),
            });
        }
        let tracks = self.annotations.map(|annotations| TrackConfig {
            annotations,
            colors: self.colors,
            palette: self.palette.unwrap_or_default(),
        });

        Ok(ContactMapConfig {
            structure: self
                .structure
                .ok_or(ConfigError::MissingParameter("structure"))?,
            chains: self.chains.unwrap_or(ChainSelection::All),
            vmax: self.vmax,
            vmax_percentile: self.vmax_percentile.unwrap_or(95.0),
            tracks,
            load: LoadOptions {
                include_nonstandard: self.include_nonstandard,
                model_index: self.model_index,
                empty_chain_policy: EmptyChainPolicy::Warn,
            },
        })
    }
}
