//! Provides input functionality for the file formats the engine consumes.
//!
//! Structure files (mmCIF or PDB) are parsed through `pdbtbx` into a
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem); annotation tables
//! are tab-separated files read with `csv`; track color configurations are JSON or TOML
//! documents deserialized with `serde`.

pub mod annotations;
pub mod color_config;
pub mod structure;
pub mod traits;
