//! # Engine Module
//!
//! Structural comparison machinery built on top of the [`crate::core`] data model.
//!
//! ## Overview
//!
//! The engine reduces parsed structures to one representative atom per residue,
//! computes residue distance maps, compares two structures position by position and
//! prepares everything a renderer needs: color-scale limits, chain boundaries and
//! annotation tracks aligned to the flattened residue order.
//!
//! ## Architecture
//!
//! - **Loading** ([`loader`]) - Representative-atom extraction and chain ordering
//! - **Chain Layout** ([`boundary`]) - Contiguous index ranges of chains in flattened order
//! - **Regions** ([`region`]) - Parsing of plain and chain-qualified residue ranges
//! - **Distances** ([`distance`]) - Pairwise distance matrices, optionally parallel
//! - **Comparison** ([`comparison`]) - Difference maps and per-region sub-matrices
//! - **Scaling** ([`scale`]) - Percentile-based color-scale limits
//! - **Tracks** ([`tracks`]) - Annotation track typing, coloring and alignment
//! - **Configuration** ([`config`]) - Workflow parameters and their builders
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod boundary;
pub mod comparison;
pub mod config;
pub mod distance;
pub mod error;
pub mod loader;
pub mod progress;
pub mod region;
pub mod scale;
pub mod tracks;
