//! # seqvis Core Library
//!
//! A structural comparison engine for macromolecular models (mmCIF / PDB, such as
//! AlphaFold3 predictions). It extracts one representative atom per residue, builds
//! pairwise distance maps, compares two chain-matched structures region by region,
//! derives percentile-based display ranges, and aligns sparse 1D annotation tracks
//! onto the flattened residue ordering.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), file readers
//!   for structures, annotation tables and color configurations, and static residue and
//!   colormap tables.
//!
//! - **[`engine`]: The Logic Core.** Representative-atom extraction, chain boundary
//!   bookkeeping, region resolution, distance and difference matrices, scale
//!   normalization and track alignment, together with the error taxonomy, configuration
//!   builders and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures (`compare`, `contact_map`)
//!   that tie `core` and `engine` together for callers such as the command-line tool.

pub mod core;
pub mod engine;
pub mod workflows;
