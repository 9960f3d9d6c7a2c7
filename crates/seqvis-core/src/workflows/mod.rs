//! # Workflows Module
//!
//! High-level entry points that run a complete analysis from input files to
//! render-ready results.
//!
//! ## Overview
//!
//! Each workflow loads its inputs, drives the [`crate::engine`] components in order,
//! reports progress through a [`crate::engine::progress::ProgressReporter`] and returns
//! a self-contained report. Workflows never write files; serializing a report is left
//! to the caller.
//!
//! ## Architecture
//!
//! - **Comparison Workflow** ([`compare`]) - Two chain-matched structures, difference
//!   maps, region pairs and shared color-scale limits.
//! - **Contact Map Workflow** ([`contact_map`]) - One structure, its distance map,
//!   chain blocks and optional annotation tracks.

pub mod compare;
pub mod contact_map;
