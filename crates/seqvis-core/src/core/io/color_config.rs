use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// How annotation tracks should be colored.
///
/// Either one string applied to every track (a colormap name or a literal color), or a
/// table keyed by track name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorConfig {
    Global(String),
    PerTrack(BTreeMap<String, TrackColorSetting>),
}

/// Color setting for a single track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackColorSetting {
    /// A colormap name or a literal color.
    Named(String),
    /// Explicit category to color assignments.
    Categories(BTreeMap<String, String>),
}

#[derive(Debug, Error)]
pub enum ColorConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl ColorConfig {
    /// Loads a configuration file; `.toml` files are read as TOML, anything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ColorConfigError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ColorConfigError::Io {
            path: path_str.clone(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            toml::from_str(&content).map_err(|e| ColorConfigError::Toml {
                path: path_str,
                source: e,
            })
        } else {
            serde_json::from_str(&content).map_err(|e| ColorConfigError::Json {
                path: path_str,
                source: e,
            })
        }
    }

    /// The setting that applies to `track_name`, if any.
    ///
    /// A global string applies to every track.
    pub fn for_track(&self, track_name: &str) -> Option<TrackColorSetting> {
        match self {
            ColorConfig::Global(value) => Some(TrackColorSetting::Named(value.clone())),
            ColorConfig::PerTrack(map) => map.get(track_name).cloned(),
        }
    }
}
