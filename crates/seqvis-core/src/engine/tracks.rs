use super::error::EngineError;
use crate::core::io::annotations::AnnotationRecord;
use crate::core::io::color_config::{ColorConfig, TrackColorSetting};
use crate::core::utils::colors::{Colormap, FALLBACK_COLOR, parse_color};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Colormaps used when a track has no usable color setting of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteDefaults {
    pub categorical: String,
    pub numerical: String,
}

impl Default for PaletteDefaults {
    fn default() -> Self {
        Self {
            categorical: "tab10".to_string(),
            numerical: "tab10".to_string(),
        }
    }
}

/// Raw values read as "no data" for either track kind.
const MISSING_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

fn is_missing(raw: &str) -> bool {
    MISSING_VALUES.contains(&raw.trim())
}

/// Parses a numerical track value. Missing markers and NaN give `None`; infinities
/// are kept.
fn numeric_value(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Numerical,
    Categorical,
}

/// Resolved track color as lowercase `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrackColor {
    Single(String),
    Categories(BTreeMap<String, String>),
}

impl TrackColor {
    /// Color of one category; categories without an assignment get the fallback gray.
    pub fn category_color(&self, category: &str) -> &str {
        match self {
            TrackColor::Categories(map) => map.get(category).map_or(FALLBACK_COLOR, String::as_str),
            TrackColor::Single(color) => color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Interval {
    start: usize,
    end: usize,
    value: String,
}

/// One named annotation track, still keyed by chain and in-chain offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub name: String,
    pub kind: TrackKind,
    pub color: TrackColor,
    /// Distinct values of a categorical track, sorted; empty for numerical tracks.
    pub categories: Vec<String>,
    chains: BTreeMap<String, Vec<Interval>>,
}

impl TrackEntry {
    /// Raw value covering `offset` within `chain_id`; later records win over earlier ones.
    pub fn value_at(&self, chain_id: &str, offset: usize) -> Option<&str> {
        self.chains
            .get(chain_id)?
            .iter()
            .rev()
            .find(|iv| (iv.start..=iv.end).contains(&offset))
            .map(|iv| iv.value.as_str())
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlignedValues {
    Numerical(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

/// A track laid out over the flattened residue list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedTrack {
    pub name: String,
    pub kind: TrackKind,
    pub color: TrackColor,
    pub categories: Vec<String>,
    pub values: AlignedValues,
}

impl AlignedTrack {
    pub fn len(&self) -> usize {
        match &self.values {
            AlignedValues::Numerical(v) => v.len(),
            AlignedValues::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of each residue's category in the sorted category list.
    ///
    /// Always `None` for numerical tracks.
    pub fn category_codes(&self) -> Vec<Option<usize>> {
        match &self.values {
            AlignedValues::Numerical(v) => vec![None; v.len()],
            AlignedValues::Categorical(v) => v
                .iter()
                .map(|slot| {
                    slot.as_ref()
                        .and_then(|value| self.categories.binary_search(value).ok())
                })
                .collect(),
        }
    }

    /// Display string of slot `i`; empty when the residue is not annotated.
    pub fn display_value(&self, i: usize) -> String {
        let value = match &self.values {
            AlignedValues::Numerical(v) => v.get(i).copied().flatten().map(|x| x.to_string()),
            AlignedValues::Categorical(v) => v.get(i).cloned().flatten(),
        };
        value.unwrap_or_default()
    }
}

/// Groups annotation records into tracks, infers their kind and resolves their colors.
///
/// Tracks are ordered by name. A track is numerical when every value is either a
/// number (`inf` and `nan` included) or a missing marker such as an empty cell or
/// `NA`; missing markers never become categories.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTrackColor`] when a setting cannot be applied to a
/// track: an unknown color or colormap for a numerical track, a category mapping for
/// a numerical track, or an unparseable color inside a category mapping.
pub fn build_tracks(
    records: &[AnnotationRecord],
    colors: Option<&ColorConfig>,
    palette: &PaletteDefaults,
) -> Result<Vec<TrackEntry>, EngineError> {
    let grouped: BTreeMap<&str, Vec<&AnnotationRecord>> = records
        .iter()
        .map(|r| (r.track_name.as_str(), r))
        .into_group_map()
        .into_iter()
        .collect();
    let track_count = grouped.len();

    grouped
        .into_iter()
        .enumerate()
        .map(|(index, (name, rows))| -> Result<TrackEntry, EngineError> {
            let kind = if rows
                .iter()
                .all(|r| is_missing(&r.value) || r.value.trim().parse::<f64>().is_ok())
            {
                TrackKind::Numerical
            } else {
                TrackKind::Categorical
            };

            let mut chains: BTreeMap<String, Vec<Interval>> = BTreeMap::new();
            for row in &rows {
                chains.entry(row.chain_id.clone()).or_default().push(Interval {
                    start: row.start,
                    end: row.end,
                    value: row.value.clone(),
                });
            }

            let categories: Vec<String> = match kind {
                TrackKind::Numerical => Vec::new(),
                TrackKind::Categorical => rows
                    .iter()
                    .filter(|r| !is_missing(&r.value))
                    .map(|r| r.value.clone())
                    .unique()
                    .sorted()
                    .collect(),
            };

            let setting = colors.and_then(|c| c.for_track(name));
            let color = match kind {
                TrackKind::Categorical => {
                    resolve_categorical_color(name, setting.as_ref(), &categories, palette)?
                }
                TrackKind::Numerical => {
                    resolve_numerical_color(name, setting.as_ref(), index, track_count, palette)?
                }
            };
            debug!(track = name, ?kind, chains = chains.len(), "Built annotation track.");

            Ok(TrackEntry {
                name: name.to_string(),
                kind,
                color,
                categories,
                chains,
            })
        })
        .collect()
}

fn resolve_categorical_color(
    track: &str,
    setting: Option<&TrackColorSetting>,
    categories: &[String],
    palette: &PaletteDefaults,
) -> Result<TrackColor, EngineError> {
    let colormap = match setting {
        Some(TrackColorSetting::Categories(mapping)) => {
            let resolved = mapping
                .iter()
                .map(|(category, color)| {
                    parse_color(color)
                        .map(|rgb| (category.clone(), rgb.to_hex()))
                        .ok_or_else(|| invalid_color(track, color))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            return Ok(TrackColor::Categories(resolved));
        }
        Some(TrackColorSetting::Named(name)) => match Colormap::get(name) {
            Some(colormap) => colormap,
            None => {
                warn!(
                    track,
                    colormap = %name,
                    fallback = %palette.categorical,
                    "Unknown colormap for categorical track; using the default palette."
                );
                default_colormap(track, &palette.categorical)?
            }
        },
        None => default_colormap(track, &palette.categorical)?,
    };

    let mapping = categories
        .iter()
        .cloned()
        .zip(colormap.sample(categories.len()).into_iter().map(|rgb| rgb.to_hex()))
        .collect();
    Ok(TrackColor::Categories(mapping))
}

fn resolve_numerical_color(
    track: &str,
    setting: Option<&TrackColorSetting>,
    index: usize,
    track_count: usize,
    palette: &PaletteDefaults,
) -> Result<TrackColor, EngineError> {
    match setting {
        Some(TrackColorSetting::Named(value)) => {
            if let Some(rgb) = parse_color(value) {
                return Ok(TrackColor::Single(rgb.to_hex()));
            }
            if Colormap::get(value).is_none() {
                return Err(invalid_color(track, value));
            }
        }
        Some(TrackColorSetting::Categories(_)) => {
            return Err(invalid_color(track, "<category mapping>"));
        }
        None => {}
    }

    let colormap = default_colormap(track, &palette.numerical)?;
    let color = colormap
        .sample(track_count)
        .get(index)
        .copied()
        .unwrap_or_else(|| colormap.at(0.0));
    Ok(TrackColor::Single(color.to_hex()))
}

fn default_colormap(track: &str, name: &str) -> Result<Colormap, EngineError> {
    Colormap::get(name).ok_or_else(|| invalid_color(track, name))
}

fn invalid_color(track: &str, color: &str) -> EngineError {
    EngineError::InvalidTrackColor {
        track: track.to_string(),
        color: color.to_string(),
    }
}

/// Lays a track out over a per-residue chain label sequence.
///
/// The in-chain offset restarts at zero whenever the label changes, so slot `i` holds
/// the value annotated at residue `i`'s position within its chain.
pub fn align_track<S: AsRef<str>>(track: &TrackEntry, chain_labels: &[S]) -> AlignedTrack {
    let mut previous: Option<&str> = None;
    let mut offset = 0usize;
    let raw: Vec<Option<&str>> = chain_labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            if previous != Some(label) {
                previous = Some(label);
                offset = 0;
            }
            let value = track.value_at(label, offset);
            offset += 1;
            value
        })
        .collect();

    let values = match track.kind {
        TrackKind::Numerical => AlignedValues::Numerical(
            raw.iter()
                .map(|slot| slot.and_then(numeric_value))
                .collect(),
        ),
        TrackKind::Categorical => {
            AlignedValues::Categorical(
                raw.iter()
                    .map(|slot| slot.filter(|v| !is_missing(v)).map(str::to_string))
                    .collect(),
            )
        }
    };

    AlignedTrack {
        name: track.name.clone(),
        kind: track.kind,
        color: track.color.clone(),
        categories: track.categories.clone(),
        values,
    }
}

pub fn align_tracks<S: AsRef<str>>(tracks: &[TrackEntry], chain_labels: &[S]) -> Vec<AlignedTrack> {
    tracks
        .iter()
        .map(|track| {
            let unused = track
                .chain_ids()
                .filter(|chain| !chain_labels.iter().any(|l| l.as_ref() == *chain))
                .join(", ");
            if !unused.is_empty() {
                debug!(track = %track.name, chains = %unused, "Annotated chains not loaded; ignored.");
            }
            align_track(track, chain_labels)
        })
        .collect()
}
