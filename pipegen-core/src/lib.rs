//! # Pipegen Core
//!
//! Core types and traits for the pipegen configuration generators.
//!
//! This crate holds the pieces shared by both generators: the error
//! taxonomy, the table/row data model, and the [`catalog::Catalog`]
//! trait abstracting the external table catalog. It performs no I/O of
//! its own; spreadsheet reading and artifact serialization live in the
//! `pipegen-service` crate.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types for generator runs
pub mod error;

/// Catalog collaborator trait
pub mod catalog;

/// Table and row data model
pub mod types;

/// Commonly used re-exports
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::error::{PipegenError, Result};
    pub use crate::types::{
        EnvSettings, FeatureRow, JoinField, TableInfo, TableKind, TableRef,
    };
}
