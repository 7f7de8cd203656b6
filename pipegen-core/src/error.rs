//! Error types for generator runs
//!
//! Every validation failure is fatal: the run aborts, nothing is
//! written, and the error carries the offending slot/row/name so the
//! diagnostic printed by the CLI points at the spreadsheet cell the
//! analyst has to fix.

use thiserror::Error;

/// Main error type for pipegen operations
#[derive(Error, Debug)]
pub enum PipegenError {
    /// Workbook, sheet or catalog source not available
    #[error("config source error: {message}")]
    ConfigSource {
        /// What could not be loaded
        message: String,
    },

    /// Feature slot outside the addressable vector range
    #[error("invalid slot {slot}, exceeded range [0, 1023]")]
    SlotRange {
        /// The out-of-range slot value
        slot: i64,
    },

    /// Non-zero slot used by more than one row
    #[error("duplicated slot {slot}")]
    DuplicateSlot {
        /// The repeated slot value
        slot: i64,
    },

    /// Blank feature name with no dependencies to derive one from
    #[error("cannot determine feature name, slot={slot}")]
    UndeterminedFeatureName {
        /// Slot of the offending row
        slot: i64,
    },

    /// Feature name collides with the input schema or an earlier row
    #[error("duplicated feature {feature}, slot={slot}")]
    DuplicateFeature {
        /// The colliding feature name
        feature: String,
        /// Slot of the offending row
        slot: i64,
    },

    /// Dependency token is neither an input column nor an earlier feature
    #[error("depends {dependency} not exists, slot={slot}")]
    UnresolvedDependency {
        /// The unresolvable token
        dependency: String,
        /// Slot of the offending row
        slot: i64,
    },

    /// Table name registered twice within one run
    #[error("duplicated table name {table}")]
    DuplicateTable {
        /// The repeated table name
        table: String,
    },

    /// Table absent from the catalog or not yet registered
    #[error("table {table} does not exist")]
    UnknownTable {
        /// The missing table name
        table: String,
    },

    /// Column absent from the referenced table's schema
    #[error("column {column} does not exist in table {table}")]
    UnknownColumn {
        /// The missing column name
        column: String,
        /// Table whose schema was checked
        table: String,
    },

    /// Join table list and join key-group list disagree in length
    #[error("join table count {tables} does not match join key group count {key_groups}")]
    JoinKeyMismatch {
        /// Number of join table names
        tables: usize,
        /// Number of join key groups
        key_groups: usize,
    },

    /// Output field name emitted twice within one run
    #[error("duplicated output field {field}")]
    DuplicateField {
        /// The repeated field name
        field: String,
    },

    /// Required header cell blank or not the expected number
    #[error("malformed header cell {cell}: {message}")]
    MalformedHeader {
        /// Which header cell failed
        cell: String,
        /// Why it was rejected
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for pipegen operations
pub type Result<T> = std::result::Result<T, PipegenError>;

impl PipegenError {
    /// Create a new config source error
    #[must_use]
    pub fn config_source(message: impl Into<String>) -> Self {
        Self::ConfigSource {
            message: message.into(),
        }
    }

    /// Create a new duplicate table error
    #[must_use]
    pub fn duplicate_table(table: impl Into<String>) -> Self {
        Self::DuplicateTable {
            table: table.into(),
        }
    }

    /// Create a new unknown table error
    #[must_use]
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }

    /// Create a new unknown column error
    #[must_use]
    pub fn unknown_column(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
            table: table.into(),
        }
    }

    /// Create a new duplicate feature error
    #[must_use]
    pub fn duplicate_feature(feature: impl Into<String>, slot: i64) -> Self {
        Self::DuplicateFeature {
            feature: feature.into(),
            slot,
        }
    }

    /// Create a new unresolved dependency error
    #[must_use]
    pub fn unresolved_dependency(dependency: impl Into<String>, slot: i64) -> Self {
        Self::UnresolvedDependency {
            dependency: dependency.into(),
            slot,
        }
    }

    /// Create a new duplicate field error
    #[must_use]
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        Self::DuplicateField {
            field: field.into(),
        }
    }

    /// Create a new malformed header error
    #[must_use]
    pub fn malformed_header(cell: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            cell: cell.into(),
            message: message.into(),
        }
    }
}
