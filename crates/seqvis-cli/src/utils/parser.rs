use seqvis::core::io::color_config::ColorConfig;
use seqvis::engine::loader::ChainSelection;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Chain list '{0}' names no chains. Expected comma-separated ids (e.g., 'A,B').")]
    EmptyChainList(String),

    #[error("Color setting cannot be empty.")]
    EmptyColorSetting,

    #[error("Invalid inline color JSON '{text}': {reason}")]
    InvalidColorJson { text: String, reason: String },

    #[error("Color file '{0}' does not exist.")]
    ColorFileNotFound(String),

    #[error("Failed to read color file: {0}")]
    ColorFile(String),
}

/// Parses an explicit, ordered chain list such as `"A,B"`.
///
/// Comparisons pair chains by position, so an empty list or `"all"` is rejected.
pub fn parse_chain_list(text: &str) -> Result<Vec<String>, ParseError> {
    match ChainSelection::parse(text) {
        ChainSelection::Ordered(chains) => Ok(chains),
        ChainSelection::All => Err(ParseError::EmptyChainList(text.to_string())),
    }
}

/// Interprets a `--colors` value.
///
/// Values ending in `.json` or `.toml` are files, values starting with `{` are inline
/// JSON objects, anything else is one color or colormap name for every track.
pub fn parse_color_setting(text: &str) -> Result<ColorConfig, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyColorSetting);
    }

    if text.starts_with('{') {
        return serde_json::from_str(text).map_err(|e| ParseError::InvalidColorJson {
            text: text.to_string(),
            reason: e.to_string(),
        });
    }

    let path = Path::new(text);
    let is_file_name = path.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("toml")
    });
    if is_file_name {
        if !path.is_file() {
            return Err(ParseError::ColorFileNotFound(text.to_string()));
        }
        return ColorConfig::from_path(path).map_err(|e| ParseError::ColorFile(e.to_string()));
    }

    Ok(ColorConfig::Global(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqvis::core::io::color_config::TrackColorSetting;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn chain_list_is_trimmed_and_ordered() {
        assert_eq!(parse_chain_list(" B, A ,").unwrap(), vec!["B", "A"]);
        assert_eq!(
            parse_chain_list(" , "),
            Err(ParseError::EmptyChainList(" , ".into()))
        );
        assert!(parse_chain_list("all").is_err());
    }

    #[test]
    fn plain_color_setting_applies_globally() {
        assert_eq!(
            parse_color_setting("viridis").unwrap(),
            ColorConfig::Global("viridis".into())
        );
        assert_eq!(
            parse_color_setting("#1f77b4").unwrap(),
            ColorConfig::Global("#1f77b4".into())
        );
        assert_eq!(parse_color_setting("  "), Err(ParseError::EmptyColorSetting));
    }

    #[test]
    fn inline_json_maps_tracks_to_settings() {
        let config = parse_color_setting(r#"{"pLDDT": "orange", "Domain": {"SH3": "red"}}"#)
            .unwrap();
        assert_eq!(
            config.for_track("pLDDT"),
            Some(TrackColorSetting::Named("orange".into()))
        );
        assert!(matches!(
            parse_color_setting("{not json"),
            Err(ParseError::InvalidColorJson { .. })
        ));
    }

    #[test]
    fn color_file_is_read_when_present() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colors.json");
        fs::write(&path, r#"{"IDR": "black"}"#).unwrap();

        let config = parse_color_setting(path.to_str().unwrap()).unwrap();
        assert_eq!(
            config.for_track("IDR"),
            Some(TrackColorSetting::Named("black".into()))
        );

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            parse_color_setting(missing.to_str().unwrap()),
            Err(ParseError::ColorFileNotFound(_))
        ));
    }
}
