use seqvis::engine::region::SecondRegionPolicy;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub chains: String,
    pub vmax_percentile: f64,
    pub vdiff_percentile: f64,
    pub second_region: SecondRegionPolicy,
    pub include_nonstandard: bool,
    pub model: usize,
    pub output_directory: PathBuf,
    pub categorical_palette: String,
    pub numerical_palette: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chains: "A".to_string(),
            vmax_percentile: 95.0,
            vdiff_percentile: 95.0,
            second_region: SecondRegionPolicy::MirrorFirst,
            include_nonstandard: false,
            model: 0,
            output_directory: PathBuf::from("."),
            categorical_palette: "tab10".to_string(),
            numerical_palette: "tab10".to_string(),
        }
    }
}
