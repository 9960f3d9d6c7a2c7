use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileSecondRegion};
use super::models::{CompareAppConfig, MapAppConfig};
use crate::cli::{CompareArgs, MapArgs};
use crate::error::{CliError, Result};
use crate::utils::{naming, parser};
use seqvis::engine::config as core_config;
use seqvis::engine::error::EngineError;
use seqvis::engine::loader::ChainSelection;
use seqvis::engine::region::{RegionPairSpec, RegionSpec, SecondRegionPolicy};
use seqvis::engine::tracks::PaletteDefaults;
use std::str::FromStr;
use tracing::debug;

impl From<FileSecondRegion> for SecondRegionPolicy {
    fn from(value: FileSecondRegion) -> Self {
        match value {
            FileSecondRegion::Mirror => SecondRegionPolicy::MirrorFirst,
            FileSecondRegion::Full => SecondRegionPolicy::FullStructure,
        }
    }
}

pub fn build_compare_config(args: &CompareArgs) -> Result<CompareAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let compare_file = file_config.compare.take().unwrap_or_default();
    let scale_file = file_config.scale.take().unwrap_or_default();
    let load_file = file_config.load.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let chains_a_text = args
        .chains_a
        .clone()
        .or(compare_file.chains_a)
        .unwrap_or_else(|| defaults.chains.clone());
    let chains_b_text = args
        .chains_b
        .clone()
        .or(compare_file.chains_b)
        .unwrap_or_else(|| chains_a_text.clone());
    let chains_a =
        parser::parse_chain_list(&chains_a_text).map_err(|e| CliError::Argument(e.to_string()))?;
    let chains_b =
        parser::parse_chain_list(&chains_b_text).map_err(|e| CliError::Argument(e.to_string()))?;

    let region_pairs = if args.region_pairs.is_empty() {
        compare_file.region_pairs.unwrap_or_default()
    } else {
        args.region_pairs.clone()
    };
    let region_1 = args.region_1.clone().or(compare_file.region_1);
    let region_2 = args.region_2.clone().or(compare_file.region_2);
    let policy = args
        .second_region
        .map(SecondRegionPolicy::from)
        .or(compare_file.second_region.map(SecondRegionPolicy::from))
        .unwrap_or(defaults.second_region);

    let regions = if !region_pairs.is_empty() {
        if region_1.is_some() || region_2.is_some() {
            debug!("Region pairs given; ignoring single-region settings.");
        }
        core_config::RegionRequest::Pairs(
            region_pairs
                .iter()
                .map(|pair| RegionPairSpec::Text(pair.clone()))
                .collect(),
        )
    } else {
        match (&region_1, &region_2) {
            (Some(first), second) => core_config::RegionRequest::Single {
                first: RegionSpec::from(first.as_str()),
                second: second.as_deref().map(RegionSpec::from),
                policy,
            },
            (None, Some(_)) => {
                return Err(CliError::Argument(
                    "A second region requires a first region (--region-1).".to_string(),
                ));
            }
            (None, None) => core_config::RegionRequest::Full,
        }
    };

    let scale = core_config::ScaleConfig {
        vmax: args.vmax.or(scale_file.vmax),
        vmax_percentile: checked_percentile(
            "vmax-percentile",
            args.vmax_percentile
                .or(scale_file.vmax_percentile)
                .unwrap_or(defaults.vmax_percentile),
        )?,
        vdiff: args.vdiff.or(scale_file.vdiff),
        vdiff_percentile: checked_percentile(
            "vdiff-percentile",
            args.vdiff_percentile
                .or(scale_file.vdiff_percentile)
                .unwrap_or(defaults.vdiff_percentile),
        )?,
    };

    let include_nonstandard = args.load.include_nonstandard
        || load_file
            .include_nonstandard
            .unwrap_or(defaults.include_nonstandard);
    let model = args.load.model.or(load_file.model).unwrap_or(defaults.model);

    let mut output_name =
        naming::comparison_name(&args.structure_a, &chains_a, &args.structure_b, &chains_b);
    if let Some(selection) =
        naming::selection_name(&region_pairs, region_1.as_deref(), region_2.as_deref())
    {
        output_name = format!("{}_{}", output_name, selection);
    }

    let core_config = core_config::ComparisonConfigBuilder::new()
        .structure_a(args.structure_a.clone())
        .structure_b(args.structure_b.clone())
        .chains_a(chains_a)
        .chains_b(chains_b)
        .regions(regions)
        .scale(scale)
        .include_nonstandard(include_nonstandard)
        .model_index(model)
        .build()
        .map_err(EngineError::from)?;

    Ok(CompareAppConfig {
        output_directory: args
            .output
            .clone()
            .or(output_file.directory)
            .unwrap_or(defaults.output_directory),
        output_name,
        core_config,
    })
}

pub fn build_map_config(args: &MapArgs) -> Result<MapAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let map_file = file_config.map.take().unwrap_or_default();
    let tracks_file = file_config.tracks.take().unwrap_or_default();
    let scale_file = file_config.scale.take().unwrap_or_default();
    let load_file = file_config.load.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let chains = args
        .chains
        .as_deref()
        .or(map_file.chains.as_deref())
        .map(ChainSelection::parse)
        .unwrap_or_default();

    let colors = match &args.colors {
        Some(text) => Some(
            parser::parse_color_setting(text).map_err(|e| CliError::Argument(e.to_string()))?,
        ),
        None => tracks_file.colors,
    };
    let palette = PaletteDefaults {
        categorical: args
            .categorical_palette
            .clone()
            .or(tracks_file.categorical_palette)
            .unwrap_or(defaults.categorical_palette),
        numerical: args
            .numerical_palette
            .clone()
            .or(tracks_file.numerical_palette)
            .unwrap_or(defaults.numerical_palette),
    };

    let vmax_percentile = checked_percentile(
        "vmax-percentile",
        args.vmax_percentile
            .or(scale_file.vmax_percentile)
            .unwrap_or(defaults.vmax_percentile),
    )?;

    let core_config = core_config::ContactMapConfigBuilder::new()
        .structure(args.input.clone())
        .chains(chains)
        .vmax(args.vmax.or(scale_file.vmax))
        .vmax_percentile(vmax_percentile)
        .annotations(args.tracks.clone().or(tracks_file.annotations))
        .colors(colors)
        .palette(palette)
        .include_nonstandard(
            args.load.include_nonstandard
                || load_file
                    .include_nonstandard
                    .unwrap_or(defaults.include_nonstandard),
        )
        .model_index(args.load.model.or(load_file.model).unwrap_or(defaults.model))
        .build()
        .map_err(EngineError::from)?;

    Ok(MapAppConfig {
        output_directory: args
            .output
            .clone()
            .or(output_file.directory)
            .unwrap_or(defaults.output_directory),
        output_name: naming::job_name(&args.input),
        core_config,
    })
}

fn checked_percentile(name: &str, value: f64) -> Result<f64> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(CliError::Argument(format!(
            "{} must be within [0, 100], got {}",
            name, value
        )))
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        debug!("Applying --set override: {} = {}", key, value);

        match key {
            "load.include-nonstandard" => {
                config.load.get_or_insert_with(Default::default).include_nonstandard =
                    Some(parse_value(key, value, "boolean")?);
            }
            "load.model" => {
                config.load.get_or_insert_with(Default::default).model =
                    Some(parse_value(key, value, "integer")?);
            }
            "scale.vmax" => {
                config.scale.get_or_insert_with(Default::default).vmax =
                    Some(parse_value(key, value, "float")?);
            }
            "scale.vmax-percentile" => {
                config.scale.get_or_insert_with(Default::default).vmax_percentile =
                    Some(parse_value(key, value, "float")?);
            }
            "scale.vdiff" => {
                config.scale.get_or_insert_with(Default::default).vdiff =
                    Some(parse_value(key, value, "float")?);
            }
            "scale.vdiff-percentile" => {
                config.scale.get_or_insert_with(Default::default).vdiff_percentile =
                    Some(parse_value(key, value, "float")?);
            }
            "compare.chains-a" => {
                config.compare.get_or_insert_with(Default::default).chains_a =
                    Some(value.to_string());
            }
            "compare.chains-b" => {
                config.compare.get_or_insert_with(Default::default).chains_b =
                    Some(value.to_string());
            }
            "compare.region-1" => {
                config.compare.get_or_insert_with(Default::default).region_1 =
                    Some(value.to_string());
            }
            "compare.region-2" => {
                config.compare.get_or_insert_with(Default::default).region_2 =
                    Some(value.to_string());
            }
            "compare.second-region" => {
                let policy = match value.trim() {
                    "mirror" => FileSecondRegion::Mirror,
                    "full" => FileSecondRegion::Full,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'mirror' or 'full'.",
                            key, other
                        )));
                    }
                };
                config.compare.get_or_insert_with(Default::default).second_region = Some(policy);
            }
            "map.chains" => {
                config.map.get_or_insert_with(Default::default).chains = Some(value.to_string());
            }
            "tracks.annotations" => {
                config.tracks.get_or_insert_with(Default::default).annotations =
                    Some(value.trim().into());
            }
            "tracks.categorical-palette" => {
                config
                    .tracks
                    .get_or_insert_with(Default::default)
                    .categorical_palette = Some(value.trim().to_string());
            }
            "tracks.numerical-palette" => {
                config.tracks.get_or_insert_with(Default::default).numerical_palette =
                    Some(value.trim().to_string());
            }
            "tracks.colors" => {
                let colors = parser::parse_color_setting(value)
                    .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?;
                config.tracks.get_or_insert_with(Default::default).colors = Some(colors);
            }
            "output.directory" => {
                config.output.get_or_insert_with(Default::default).directory =
                    Some(value.trim().into());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
