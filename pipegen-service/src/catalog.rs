//! File-backed and in-memory catalog implementations
//!
//! [`StaticCatalog`] holds a fixed name-to-[`TableInfo`] map. The CLI
//! loads one from a YAML file (path taken from the `PIPEGEN_CATALOG`
//! environment variable); tests build one in memory with
//! [`StaticCatalog::with_table`].
//!
//! Catalog file format, one entry per table:
//!
//! ```yaml
//! user_profile:
//!   schema: [uid, age, income]
//!   uri: hdfs:///warehouse/user_profile
//!   meta:
//!     owner: growth-team
//! ```

use indexmap::IndexMap;
use pipegen_core::catalog::Catalog;
use pipegen_core::error::{PipegenError, Result};
use pipegen_core::types::TableInfo;
use std::path::Path;

/// Immutable catalog over a fixed set of tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: IndexMap<String, TableInfo>,
}

impl StaticCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with the given columns and placeholder metadata
    #[must_use]
    pub fn with_table<I, S>(mut self, name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let info = TableInfo {
            schema: columns.into_iter().map(Into::into).collect(),
            meta: serde_yaml::Value::Null,
            uri: format!("catalog://{name}"),
        };
        self.tables.insert(name.to_string(), info);
        self
    }

    /// Add a table with full [`TableInfo`]
    pub fn insert(&mut self, name: impl Into<String>, info: TableInfo) {
        self.tables.insert(name.into(), info);
    }

    /// Load a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::ConfigSource`] when the document does not
    /// parse as a table mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let tables: IndexMap<String, TableInfo> = serde_yaml::from_str(content)
            .map_err(|e| PipegenError::config_source(format!("invalid catalog file: {e}")))?;
        Ok(Self { tables })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::ConfigSource`] when the file cannot be
    /// read or does not parse as a table mapping.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipegenError::config_source(format!(
                "load catalog file {} failed: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }
}

impl Catalog for StaticCatalog {
    fn exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    fn query(&self, table: &str) -> Result<TableInfo> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| PipegenError::unknown_table(table))
    }
}
