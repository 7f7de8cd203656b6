//! Feature-list generator
//!
//! Reads feature rows from a spreadsheet, validates them against the
//! input table's schema, and emits one `feature=…; slot=…; method=…`
//! line per accepted row, in row order.
//!
//! Sheet layout: cell (0,1) names the input table, rows 0–2 are header,
//! data rows carry `feature, slot, method, depends, args` in columns
//! 0–4. A row with a blank feature name is auto-named
//! `F_<depends with ',' replaced by '-'>`.

use super::{MIN_ROW_COLUMNS, optional};
use crate::sheet::Sheet;
use indexmap::IndexSet;
use pipegen_core::catalog::Catalog;
use pipegen_core::error::{PipegenError, Result};
use pipegen_core::types::{FeatureRow, TableInfo};
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// Header rows preceding the first data row
const HEADER_ROWS: usize = 3;

/// Highest addressable slot in the downstream feature vector
const MAX_SLOT: i64 = 1023;

/// Numeric-literal pattern a slot cell must match; anything else is a
/// skippable row, not a fatal error.
fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("hardcoded slot pattern is valid")
    })
}

/// Generator for the flat feature-list artifact
#[derive(Debug)]
pub struct FeatureListGenerator {
    sheet: Sheet,
    input_table_name: String,
    input_table: Option<TableInfo>,
}

impl FeatureListGenerator {
    /// Open the feature-list sheet.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::ConfigSource`] when the workbook or the
    /// sheet cannot be loaded.
    pub fn load(workbook: &Path, sheet_name: &str) -> Result<Self> {
        Ok(Self {
            sheet: Sheet::open(workbook, sheet_name)?,
            input_table_name: String::new(),
            input_table: None,
        })
    }

    /// Validate all rows and produce the artifact text.
    ///
    /// The whole output is buffered; nothing reaches disk until every
    /// row has validated, so a fatal error never leaves a partial file.
    ///
    /// # Errors
    ///
    /// Any violation of the slot, naming or dependency constraints
    /// aborts the run with the matching [`PipegenError`] variant.
    pub fn generate(&mut self, catalog: &dyn Catalog) -> Result<String> {
        let input_table_name = self.sheet.cell_text(0, 1);
        if input_table_name.is_empty() {
            return Err(PipegenError::malformed_header(
                "(0,1)",
                "empty input table name",
            ));
        }
        if !catalog.exists(&input_table_name) {
            return Err(PipegenError::unknown_table(&input_table_name));
        }
        let input_table = catalog.query(&input_table_name)?;

        let mut emitted: IndexSet<String> = IndexSet::new();
        let mut used_slots: HashSet<i64> = HashSet::new();
        let mut output = String::new();

        for row_index in HEADER_ROWS..self.sheet.row_count() {
            let cells = self.sheet.row_text(row_index);
            if cells.len() < MIN_ROW_COLUMNS {
                warn!(row = row_index, "skip leak of column, {:?}", cells);
                continue;
            }
            if let Some(row) =
                validate_row(row_index, &cells, &input_table, &emitted, &mut used_slots)?
            {
                emitted.insert(row.feature.clone());
                let _ = writeln!(output, "{}", row.to_line());
            }
        }

        self.input_table_name = input_table_name;
        self.input_table = Some(input_table);
        Ok(output)
    }

    /// Generate and write the artifact to `output`.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`Self::generate`] and I/O
    /// errors from the final write.
    pub fn dump(&mut self, catalog: &dyn Catalog, output: &Path) -> Result<()> {
        let text = self.generate(catalog)?;
        std::fs::write(output, text)?;
        Ok(())
    }

    /// Human-readable summary of the resolved input table.
    ///
    /// Only meaningful after a successful [`Self::generate`] /
    /// [`Self::dump`]; before that the summary is empty.
    #[must_use]
    pub fn input_table_info(&self) -> String {
        let Some(table) = &self.input_table else {
            return String::new();
        };
        let schema: Vec<&str> = table.schema.iter().map(String::as_str).collect();
        format!(
            "Input table name: {}\nInput table schema: [{}]\nInput table URI: {}\nInput table meta: {}\n",
            self.input_table_name,
            schema.join(", "),
            table.uri,
            display_meta(&table.meta),
        )
    }
}

/// Validate one data row; `Ok(None)` means warn-and-skip.
fn validate_row(
    row_index: usize,
    cells: &[String],
    input_table: &TableInfo,
    emitted: &IndexSet<String>,
    used_slots: &mut HashSet<i64>,
) -> Result<Option<FeatureRow>> {
    let feature = cells[0].clone();
    let slot_text = &cells[1];
    let method = cells[2].clone();
    let depends = optional(cells, 3);
    let args = optional(cells, 4);

    // skip empty or invalid slot
    if !slot_pattern().is_match(slot_text) {
        warn!(row = row_index, "skip invalid slot, {:?}", cells);
        return Ok(None);
    }
    let Ok(slot_value) = slot_text.parse::<f64>() else {
        warn!(row = row_index, "skip invalid slot, {:?}", cells);
        return Ok(None);
    };
    #[allow(clippy::cast_possible_truncation)]
    let slot = slot_value as i64;

    if !(0..=MAX_SLOT).contains(&slot) {
        return Err(PipegenError::SlotRange { slot });
    }
    // slot 0 is the "no slot" marker and may repeat
    if slot > 0 && !used_slots.insert(slot) {
        return Err(PipegenError::DuplicateSlot { slot });
    }

    let feature = if feature.is_empty() {
        let Some(depends) = &depends else {
            return Err(PipegenError::UndeterminedFeatureName { slot });
        };
        format!("F_{}", depends.replace(',', "-"))
    } else {
        feature
    };

    if input_table.schema.contains(&feature) || emitted.contains(&feature) {
        return Err(PipegenError::duplicate_feature(feature, slot));
    }
    if let Some(depends) = &depends {
        for dep in depends.split(',') {
            if !input_table.schema.contains(dep) && !emitted.contains(dep) {
                return Err(PipegenError::unresolved_dependency(dep, slot));
            }
        }
    }

    Ok(Some(FeatureRow {
        feature,
        slot,
        method,
        depends,
        args,
    }))
}

/// Compact single-line rendering of the opaque catalog metadata
fn display_meta(meta: &serde_yaml::Value) -> String {
    serde_yaml::to_string(meta).map_or_else(|_| "~".to_string(), |s| s.trim_end().to_string())
}
