//! Table and row data model
//!
//! All entities live for a single generator run: they are built while
//! the sheet is validated, serialized once, and discarded.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Role of a registered table within a join plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// The primary dataset the join starts from
    Base,
    /// A secondary dataset joined onto the base by key
    Join,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Join => write!(f, "join"),
        }
    }
}

/// Result of a catalog query for one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableInfo {
    /// Known column names, in catalog order
    pub schema: IndexSet<String>,
    /// Opaque catalog metadata, carried through unmodified
    #[serde(default)]
    pub meta: serde_yaml::Value,
    /// Storage location of the table
    #[serde(default)]
    pub uri: String,
}

/// A table resolved through the reference resolver
///
/// The `tag` is the resolver's registered-count at registration time,
/// formatted as a decimal string, so tags read `"0"`, `"1"`, `"2"`, …
/// in first-seen order and stay stable for the whole run.
#[derive(Debug, Clone)]
pub struct TableRef {
    /// External table name, unique within a run
    pub name: String,
    /// Compact alias used in serialized column references
    pub tag: String,
    /// Known column names
    pub schema: IndexSet<String>,
    /// Opaque catalog metadata
    pub meta: serde_yaml::Value,
    /// Storage location
    pub uri: String,
    /// Base or join
    pub kind: TableKind,
}

/// One accepted row of the feature-list sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    /// Canonical feature name, auto-derived from `depends` when blank
    pub feature: String,
    /// Slot in `[0, 1023]`; 0 means "no slot" and may repeat
    pub slot: i64,
    /// Computation method, opaque to the generator
    pub method: String,
    /// Comma-separated upstream columns/features, if any
    pub depends: Option<String>,
    /// Opaque method arguments, if any
    pub args: Option<String>,
}

impl FeatureRow {
    /// Render the row in the feature-list artifact format.
    ///
    /// `depends` and `args` are appended only when present, so the line
    /// reads `feature=<f>; slot=<s>; method=<m>[; depends=<d>][; args=<a>]`.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "feature={}; slot={}; method={}",
            self.feature, self.slot, self.method
        );
        if let Some(depends) = &self.depends {
            line.push_str("; depends=");
            line.push_str(depends);
        }
        if let Some(args) = &self.args {
            line.push_str("; args=");
            line.push_str(args);
        }
        line
    }
}

/// One accepted row of the join-config sheet
///
/// `depends` and `cursors` hold already-resolved `tag:column` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinField {
    /// Canonical output field name, unique within a run
    pub field_name: String,
    /// Computation method, opaque to the generator
    pub method: String,
    /// Resolved source column references, in row order
    pub depends: Vec<String>,
    /// Resolved auxiliary column references, if any
    pub cursors: Option<Vec<String>>,
    /// Opaque tracker setting, if any
    pub tracker: Option<String>,
    /// Opaque method arguments, if any
    pub args: Option<String>,
}

/// Execution settings of the generated join job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvSettings {
    /// Reduce task count, strictly positive
    #[serde(rename = "mapred.reduce.tasks")]
    pub reduce_tasks: i64,
    /// Reduce task memory in MB, strictly positive
    #[serde(rename = "mapreduce.reduce.memory.mb")]
    pub reduce_memory_mb: i64,
}
