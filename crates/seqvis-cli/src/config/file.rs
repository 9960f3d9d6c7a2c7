use crate::error::{CliError, Result};
use seqvis::core::io::color_config::ColorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Structure reading options.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileLoadConfig {
    pub include_nonstandard: Option<bool>,
    pub model: Option<usize>,
}

/// Color-scale limits shared by both commands.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileScaleConfig {
    pub vmax: Option<f64>,
    pub vmax_percentile: Option<f64>,
    pub vdiff: Option<f64>,
    pub vdiff_percentile: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCompareConfig {
    pub chains_a: Option<String>,
    pub chains_b: Option<String>,
    pub region_1: Option<String>,
    pub region_2: Option<String>,
    pub region_pairs: Option<Vec<String>>,
    pub second_region: Option<FileSecondRegion>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileSecondRegion {
    Mirror,
    Full,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileMapConfig {
    pub chains: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileTracksConfig {
    pub annotations: Option<PathBuf>,
    pub categorical_palette: Option<String>,
    pub numerical_palette: Option<String>,
    pub colors: Option<ColorConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
}

/// Contents of a `--config` TOML file; every section and key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub load: Option<FileLoadConfig>,
    pub scale: Option<FileScaleConfig>,
    pub compare: Option<FileCompareConfig>,
    pub map: Option<FileMapConfig>,
    pub tracks: Option<FileTracksConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqvis::core::io::color_config::TrackColorSetting;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_configuration_file_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seqvis.toml");
        fs::write(
            &path,
            r##"
[load]
include-nonstandard = true
model = 1

[scale]
vmax-percentile = 90.0
vdiff = 5.0

[compare]
chains-a = "A,B"
chains-b = "C,D"
region-pairs = ["A:0:9,B:0:4"]
second-region = "full"

[map]
chains = "B"

[tracks]
annotations = "tracks.tsv"
categorical-palette = "Set2"

[tracks.colors]
pLDDT = "orange"
Domain = { SH3 = "#ff0000" }

[output]
directory = "results"
"##,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.load.as_ref().unwrap().model, Some(1));
        assert_eq!(config.scale.as_ref().unwrap().vdiff, Some(5.0));
        let compare = config.compare.as_ref().unwrap();
        assert_eq!(compare.chains_b.as_deref(), Some("C,D"));
        assert_eq!(compare.second_region, Some(FileSecondRegion::Full));

        let tracks = config.tracks.as_ref().unwrap();
        let colors = tracks.colors.as_ref().unwrap();
        assert_eq!(
            colors.for_track("pLDDT"),
            Some(TrackColorSetting::Named("orange".into()))
        );
        assert!(matches!(
            colors.for_track("Domain"),
            Some(TrackColorSetting::Categories(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[scale]\nvmax-percent = 90.0\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_path_means_empty_configuration() {
        assert_eq!(FileConfig::load(None).unwrap(), FileConfig::default());
    }
}
