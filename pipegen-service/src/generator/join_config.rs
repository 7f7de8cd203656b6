//! Join-config generator
//!
//! Reads a join plan from a spreadsheet and emits a YAML document
//! describing the base table, its join tables and the derived output
//! fields.
//!
//! Sheet layout (fixed header cells):
//!
//! | cell  | content                                   |
//! |-------|-------------------------------------------|
//! | (0,1) | base table name                           |
//! | (1,1) | base table keys, `,`-separated            |
//! | (0,3) | join table names, `,`-separated           |
//! | (1,3) | join key groups, `;` between tables, `,` between keys |
//! | (0,5) | reduce task count                         |
//! | (1,5) | reduce memory in MB                       |
//!
//! Data rows start at row 4 and carry `field_name, depends, method,
//! cursors, tracker, args` in columns 0–5. `depends`/`cursors` tokens
//! have the form `table:column` and are rewritten to `tag:column`.

use super::{MIN_ROW_COLUMNS, optional};
use crate::resolver::TableResolver;
use crate::sheet::Sheet;
use indexmap::{IndexMap, IndexSet};
use pipegen_core::catalog::Catalog;
use pipegen_core::error::{PipegenError, Result};
use pipegen_core::types::{EnvSettings, JoinField, TableKind};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::warn;

/// Header rows preceding the first data row
const HEADER_ROWS: usize = 4;

/// `base_table` / `join_table_<i>` entry of the output document
#[derive(Serialize)]
struct TableEntry {
    keys: Vec<String>,
    tag: String,
}

/// `out_table` entry of the output document
#[derive(Serialize)]
struct OutTable {
    meta: Vec<IndexMap<String, FieldEntry>>,
}

/// Per-field record inside `out_table.meta`
#[derive(Serialize)]
struct FieldEntry {
    method: String,
    depends: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<String>,
}

impl From<JoinField> for FieldEntry {
    fn from(field: JoinField) -> Self {
        Self {
            method: field.method,
            depends: field.depends.join(","),
            cursors: field.cursors.map(|tokens| tokens.join(",")),
            tracker: field.tracker,
            args: field.args,
        }
    }
}

/// Generator for the structured join-configuration artifact
pub struct JoinConfigGenerator {
    sheet: Sheet,
    resolver: TableResolver,
}

impl JoinConfigGenerator {
    /// Open the join-config sheet.
    ///
    /// # Errors
    ///
    /// Returns [`PipegenError::ConfigSource`] when the workbook or the
    /// sheet cannot be loaded.
    pub fn load(workbook: &Path, sheet_name: &str) -> Result<Self> {
        Ok(Self {
            sheet: Sheet::open(workbook, sheet_name)?,
            resolver: TableResolver::new(),
        })
    }

    /// Validate the header and all rows, producing the YAML document.
    ///
    /// Serialization happens once after every row has validated; a
    /// fatal error discards the in-memory document.
    ///
    /// # Errors
    ///
    /// Any violation of the header, table or field constraints aborts
    /// the run with the matching [`PipegenError`] variant.
    pub fn generate(&mut self, catalog: &dyn Catalog) -> Result<String> {
        let base_table_name = self.sheet.cell_text(0, 1);
        let base_table_key = self.sheet.cell_text(1, 1);
        let join_table_name = self.sheet.cell_text(0, 3);
        let join_table_key = self.sheet.cell_text(1, 3);
        let reduce_num = self.sheet.cell_text(0, 5);
        let reduce_mem = self.sheet.cell_text(1, 5);

        if base_table_name.is_empty() || base_table_key.is_empty() {
            return Err(PipegenError::malformed_header(
                "(0,1)/(1,1)",
                "empty base table or key",
            ));
        }
        if join_table_name.is_empty() || join_table_key.is_empty() {
            return Err(PipegenError::malformed_header(
                "(0,3)/(1,3)",
                "empty join table or key",
            ));
        }
        let env = EnvSettings {
            reduce_tasks: parse_positive_number(&reduce_num, "(0,5)")?,
            reduce_memory_mb: parse_positive_number(&reduce_mem, "(1,5)")?,
        };

        let mut document: IndexMap<String, serde_yaml::Value> = IndexMap::new();

        let base_tag = self
            .resolver
            .register(&base_table_name, TableKind::Base, catalog)?
            .tag
            .clone();
        document.insert(
            "base_table".to_string(),
            to_value(&TableEntry {
                keys: split_keys(&base_table_key),
                tag: base_tag,
            })?,
        );

        let join_tables: Vec<&str> = join_table_name.split(',').collect();
        let join_keys: Vec<&str> = join_table_key.split(';').collect();
        if join_tables.len() != join_keys.len() {
            return Err(PipegenError::JoinKeyMismatch {
                tables: join_tables.len(),
                key_groups: join_keys.len(),
            });
        }
        for (index, (table, keys)) in join_tables.iter().zip(&join_keys).enumerate() {
            let tag = self
                .resolver
                .register(table, TableKind::Join, catalog)?
                .tag
                .clone();
            document.insert(
                format!("join_table_{index}"),
                to_value(&TableEntry {
                    keys: split_keys(keys),
                    tag,
                })?,
            );
        }

        let mut field_names: IndexSet<String> = IndexSet::new();
        let mut fields: Vec<IndexMap<String, FieldEntry>> = Vec::new();
        for row_index in HEADER_ROWS..self.sheet.row_count() {
            let cells = self.sheet.row_text(row_index);
            if cells.len() < MIN_ROW_COLUMNS {
                warn!(row = row_index, "skip leak of column, {:?}", cells);
                continue;
            }
            let field = self.validate_field_row(&cells, &field_names)?;
            field_names.insert(field.field_name.clone());
            let mut entry = IndexMap::new();
            entry.insert(field.field_name.clone(), FieldEntry::from(field));
            fields.push(entry);
        }
        document.insert("out_table".to_string(), to_value(&OutTable { meta: fields })?);
        document.insert("env".to_string(), to_value(&env)?);

        serde_yaml::to_string(&document).map_err(|e| PipegenError::Serialization(e.to_string()))
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

    /// Human-readable summary of every registered table, in tag order.
    ///
    /// Only meaningful after a successful [`Self::generate`] /
    /// [`Self::dump`]; before that the summary is empty.
    #[must_use]
    pub fn input_table_info(&self) -> String {
        let mut info = String::new();
        for table in self.resolver.iter() {
            let schema: Vec<&str> = table.schema.iter().map(String::as_str).collect();
            let _ = writeln!(
                info,
                "Table: {} [{}][{}]\n\tschema: [{}]\n\turi: {}\n\tmeta: {}\n",
                table.name,
                table.tag,
                table.kind,
                schema.join(", "),
                table.uri,
                display_meta(&table.meta),
            );
        }
        info
    }

    /// Validate one data row into a [`JoinField`].
    fn validate_field_row(
        &self,
        cells: &[String],
        field_names: &IndexSet<String>,
    ) -> Result<JoinField> {
        let field_name = cells[0].clone();
        let depends = cells[1].clone();
        let method = cells[2].clone();
        let cursors = optional(cells, 3);
        let tracker = optional(cells, 4);
        let args = optional(cells, 5);

        let field_name = if field_name.is_empty() {
            derive_field_name(&depends)
        } else {
            field_name
        };
        if field_names.contains(&field_name) {
            return Err(PipegenError::duplicate_field(field_name));
        }

        let depends = depends
            .split(',')
            .map(|token| self.resolve_token(token))
            .collect::<Result<Vec<String>>>()?;
        let cursors = cursors
            .map(|cursors| {
                cursors
                    .split(',')
                    .map(|token| self.resolve_token(token))
                    .collect::<Result<Vec<String>>>()
            })
            .transpose()?;

        Ok(JoinField {
            field_name,
            method,
            depends,
            cursors,
            tracker,
            args,
        })
    }

    /// Rewrite one `table:column` token to `tag:column`.
    fn resolve_token(&self, token: &str) -> Result<String> {
        let (table, column) = token.split_once(':').unwrap_or((token, ""));
        let table_ref = self.resolver.lookup(table)?;
        if !table_ref.schema.contains(column) {
            return Err(PipegenError::unknown_column(column, table));
        }
        Ok(format!("{}:{}", table_ref.tag, column))
    }
}

/// Derive a field name from dependency tokens: `:` becomes `.`, tokens
/// join with `_`, so `t1:c1,t2:c2` yields `t1.c1_t2.c2`.
fn derive_field_name(depends: &str) -> String {
    depends
        .split(',')
        .map(|dep| dep.replace(':', "."))
        .collect::<Vec<String>>()
        .join("_")
}

/// Split a `,`-separated key list into its keys
fn split_keys(keys: &str) -> Vec<String> {
    keys.split(',').map(str::to_string).collect()
}

/// Parse a header cell that must hold a strictly positive number.
///
/// Spreadsheet numerics may carry a fraction (`10.0`); the value is
/// truncated to an integer the same way the sheet reader renders cells.
#[allow(clippy::cast_possible_truncation)]
fn parse_positive_number(text: &str, cell: &str) -> Result<i64> {
    let value = text
        .parse::<f64>()
        .map_err(|_| PipegenError::malformed_header(cell, format!("not a number: {text:?}")))?;
    let value = value as i64;
    if value <= 0 {
        return Err(PipegenError::malformed_header(
            cell,
            format!("must be positive, got {text}"),
        ));
    }
    Ok(value)
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_yaml::Value> {
    serde_yaml::to_value(value).map_err(|e| PipegenError::Serialization(e.to_string()))
}

/// Compact single-line rendering of the opaque catalog metadata
fn display_meta(meta: &serde_yaml::Value) -> String {
    serde_yaml::to_string(meta).map_or_else(|_| "~".to_string(), |s| s.trim_end().to_string())
}
