mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_compare_config, build_map_config};
pub use models::{CompareAppConfig, MapAppConfig};
