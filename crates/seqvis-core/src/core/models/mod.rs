//! # Core Models Module
//!
//! Data structures representing a parsed macromolecular model.
//!
//! ## Overview
//!
//! A [`system::MolecularSystem`] owns every chain, residue and atom of one model.
//! Entities are stored in slot maps and referenced through the typed keys in [`ids`],
//! while chain order, residue order within a chain and atom order within a residue
//! always follow the source file.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom with its name, serial number and coordinates
//! - [`residue`] - A residue with sequence number, insertion code and atom lookup
//! - [`chain`] - An ordered list of residues under a string chain identifier
//! - [`system`] - The owning container with lookup maps
//! - [`builder`] - Incremental construction of a system, chain by chain
//! - [`ids`] - Stable identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use seqvis::core::models::builder::MolecularSystemBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = MolecularSystemBuilder::new();
//! builder.start_chain("A");
//! builder.start_residue(1, None, "ALA", false)?;
//! builder.add_atom("CA", Point3::new(0.0, 0.0, 0.0))?;
//! let system = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
