//! The feature-list and join-config generators
//!
//! Both follow the same single-pass shape: open the sheet, resolve the
//! tables named in the header through the catalog, validate data rows
//! fail-fast, and serialize the complete artifact once at the end. No
//! partial artifact is ever written; any fatal error leaves the output
//! path untouched.

pub mod feature_list;
pub mod join_config;

pub use feature_list::FeatureListGenerator;
pub use join_config::JoinConfigGenerator;

/// Minimum populated columns a data row needs to be considered at all;
/// shorter rows are skipped with a warning.
pub(crate) const MIN_ROW_COLUMNS: usize = 3;

/// A trimmed cell as an optional value: blank means "not supplied".
pub(crate) fn optional(cells: &[String], index: usize) -> Option<String> {
    cells
        .get(index)
        .filter(|value| !value.is_empty())
        .cloned()
}
