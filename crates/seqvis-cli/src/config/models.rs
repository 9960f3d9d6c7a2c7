use seqvis::engine::config as core_config;
use std::path::PathBuf;

pub struct CompareAppConfig {
    pub output_directory: PathBuf,
    pub output_name: String,
    pub core_config: core_config::ComparisonConfig,
}

pub struct MapAppConfig {
    pub output_directory: PathBuf,
    pub output_name: String,
    pub core_config: core_config::ContactMapConfig,
}
