//! Catalog collaborator trait
//!
//! The table catalog is an external service from the generators' point
//! of view: it maps a table name to its schema, metadata and storage
//! location. The generators only ever read from it.

use crate::error::Result;
use crate::types::TableInfo;

/// Read-only view of the external table catalog
///
/// Dyn-compatible so generators can take `&dyn Catalog` and tests can
/// substitute a fixed-schema double.
pub trait Catalog {
    /// Whether `table` is known to the catalog
    fn exists(&self, table: &str) -> bool;

    /// Fetch schema, metadata and URI for `table`
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PipegenError::UnknownTable`] when the
    /// catalog does not know the table.
    fn query(&self, table: &str) -> Result<TableInfo>;
}
