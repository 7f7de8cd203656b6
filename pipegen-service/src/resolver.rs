//! Table reference resolution and tag assignment
//!
//! Maps external table names to [`TableRef`]s carrying a compact tag.
//! The tag is the registered-count at registration time formatted as a
//! decimal string, so tags run `"0"`, `"1"`, `"2"`, … in first-seen
//! order and the serialized output never has to repeat full table names
//! in every field reference.

use indexmap::IndexMap;
use pipegen_core::catalog::Catalog;
use pipegen_core::error::{PipegenError, Result};
use pipegen_core::types::{TableKind, TableRef};

/// Run-scoped registry of resolved tables
#[derive(Default)]
pub struct TableResolver {
    tables: IndexMap<String, TableRef>,
}

impl TableResolver {
    /// Create an empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with the next free tag.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::DuplicateTable`] when the name was
    /// already registered in this run, and
    /// [`PipegenError::UnknownTable`] when the catalog does not know
    /// the table.
    pub fn register(
        &mut self,
        name: &str,
        kind: TableKind,
        catalog: &dyn Catalog,
    ) -> Result<&TableRef> {
        if self.tables.contains_key(name) {
            return Err(PipegenError::duplicate_table(name));
        }
        if !catalog.exists(name) {
            return Err(PipegenError::unknown_table(name));
        }
        let info = catalog.query(name)?;
        let table = TableRef {
            name: name.to_string(),
            tag: self.tables.len().to_string(),
            schema: info.schema,
            meta: info.meta,
            uri: info.uri,
            kind,
        };
        Ok(self.tables.entry(name.to_string()).or_insert(table))
    }

    /// Look up a previously registered table.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::UnknownTable`] when `name` has not been
    /// registered in this run.
    pub fn lookup(&self, name: &str) -> Result<&TableRef> {
        self.tables
            .get(name)
            .ok_or_else(|| PipegenError::unknown_table(name))
    }

    /// Registered tables in registration (= tag) order
    pub fn iter(&self) -> impl Iterator<Item = &TableRef> {
        self.tables.values()
    }

    /// Number of registered tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
