//! Helper functions to build input workbooks and catalogs for tests
//!
//! The generators read real `.xlsx` files, so the fixtures write real
//! ones via `rust_xlsxwriter` into a temp dir. Blank cells are simply
//! not written, which is how a ragged analyst-authored row looks.

use pipegen_service::catalog::StaticCatalog;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::Path;

/// Sheet name used by all fixtures
pub const SHEET: &str = "plan";

/// Catalog with the tables the tests reference
pub fn test_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_table("user_profile", ["uid", "age", "income"])
        .with_table("users", ["id", "name"])
        .with_table("orders", ["user_id", "amount", "ts"])
        .with_table("clicks", ["user_id", "page", "ts"])
}

/// Write a feature-list workbook: input table name at (0,1), header
/// filler on rows 1–2, data rows from row 3 in columns 0–4.
pub fn write_feature_sheet(
    path: &Path,
    input_table: &str,
    rows: &[&[&str]],
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET)?;

    sheet.write(0, 0, "InputTable")?;
    if !input_table.is_empty() {
        sheet.write(0, 1, input_table)?;
    }
    sheet.write(1, 0, "feature")?;
    sheet.write(1, 1, "slot")?;
    sheet.write(1, 2, "method")?;
    sheet.write(1, 3, "depends")?;
    sheet.write(1, 4, "args")?;

    write_data_rows(sheet, 3, rows)?;
    workbook.save(path)?;
    Ok(())
}

/// Fixed header cells of a join-config workbook
pub struct JoinHeader<'a> {
    pub base_table: &'a str,
    pub base_keys: &'a str,
    pub join_tables: &'a str,
    pub join_keys: &'a str,
    pub reduce_tasks: &'a str,
    pub reduce_mem: &'a str,
}

impl Default for JoinHeader<'_> {
    fn default() -> Self {
        Self {
            base_table: "users",
            base_keys: "id",
            join_tables: "orders",
            join_keys: "user_id",
            reduce_tasks: "10",
            reduce_mem: "2048",
        }
    }
}

/// Write a join-config workbook: header cells per the fixed layout,
/// data rows from row 4 in columns 0–5.
pub fn write_join_sheet(
    path: &Path,
    header: &JoinHeader<'_>,
    rows: &[&[&str]],
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET)?;

    sheet.write(0, 0, "BaseTable")?;
    sheet.write(1, 0, "BaseTableKey")?;
    sheet.write(0, 2, "JoinTableName")?;
    sheet.write(1, 2, "JoinTableKey")?;
    sheet.write(0, 4, "ReduceNum")?;
    sheet.write(1, 4, "ReduceMem")?;
    for (row, value) in [
        (0, header.base_table),
        (1, header.base_keys),
    ] {
        if !value.is_empty() {
            sheet.write(row, 1, value)?;
        }
    }
    for (row, value) in [
        (0, header.join_tables),
        (1, header.join_keys),
    ] {
        if !value.is_empty() {
            sheet.write(row, 3, value)?;
        }
    }
    for (row, value) in [
        (0, header.reduce_tasks),
        (1, header.reduce_mem),
    ] {
        if !value.is_empty() {
            sheet.write(row, 5, value)?;
        }
    }
    sheet.write(3, 0, "field_name")?;
    sheet.write(3, 1, "depends")?;
    sheet.write(3, 2, "method")?;
    sheet.write(3, 3, "cursors")?;
    sheet.write(3, 4, "tracker")?;
    sheet.write(3, 5, "args")?;

    write_data_rows(sheet, 4, rows)?;
    workbook.save(path)?;
    Ok(())
}

fn write_data_rows(
    sheet: &mut rust_xlsxwriter::Worksheet,
    first_row: u32,
    rows: &[&[&str]],
) -> Result<(), XlsxError> {
    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            if !value.is_empty() {
                #[allow(clippy::cast_possible_truncation)]
                sheet.write(first_row + i as u32, j as u16, *value)?;
            }
        }
    }
    Ok(())
}
