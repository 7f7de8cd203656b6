//! # Pipegen Service
//!
//! Build-time generators turning analyst-authored spreadsheets into
//! machine-readable pipeline configuration:
//!
//! - [`generator::FeatureListGenerator`] emits a flat feature-list text
//!   file, one `feature=…; slot=…; method=…` line per accepted row.
//! - [`generator::JoinConfigGenerator`] emits a YAML join-configuration
//!   document describing a base table, its join tables and the derived
//!   output fields.
//!
//! Both share one shape: read rows after a fixed header region, resolve
//! symbolic table references through a [`resolver::TableResolver`],
//! validate fail-fast, and serialize the full artifact once at the end.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// File-backed and in-memory catalog implementations
pub mod catalog;

/// Shared CLI runner for the two generator binaries
pub mod cli;

/// The feature-list and join-config generators
pub mod generator;

/// Table reference resolution and tag assignment
pub mod resolver;

/// Workbook and sheet access
pub mod sheet;
