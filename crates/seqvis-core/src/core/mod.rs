//! # Core Module
//!
//! Fundamental building blocks shared by every higher layer of the library.
//!
//! ## Overview
//!
//! The core module holds the in-memory representation of a parsed structure, the
//! readers that populate it, and the static lookup tables used to classify residues
//! and to resolve colors. Nothing in here knows about comparisons or regions; those
//! live in [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the owning system
//! - **File I/O** ([`io`]) - Structure files (via `pdbtbx`), annotation tables and color configurations
//! - **Static Tables** ([`utils`]) - Residue name sets and the colormap registry

pub mod io;
pub mod models;
pub mod utils;
