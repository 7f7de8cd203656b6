//! Integration tests for the feature-list generator

mod helpers;

use helpers::fixtures::{SHEET, test_catalog, write_feature_sheet};
use pipegen_core::error::PipegenError;
use pipegen_service::generator::FeatureListGenerator;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn generate(input_table: &str, rows: &[&[&str]]) -> Result<String, PipegenError> {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("features.xlsx");
    write_feature_sheet(&workbook, input_table, rows).unwrap();

    let mut generator = FeatureListGenerator::load(&workbook, SHEET)?;
    generator.generate(&test_catalog())
}

#[test]
fn derived_feature_name_scenario() {
    // blank feature name, depends on two existing columns
    let output = generate("user_profile", &[&["", "5", "bucket", "age,income", ""]]).unwrap();
    assert_eq!(
        output,
        "feature=F_age-income; slot=5; method=bucket; depends=age,income\n"
    );
}

#[test]
fn lines_follow_row_order() {
    let output = generate(
        "user_profile",
        &[
            &["f_age", "1", "copy", "age"],
            &["f_income", "2", "log", "income", "base=10"],
            &["f_combo", "3", "cross", "f_age,f_income"],
        ],
    )
    .unwrap();
    assert_eq!(
        output,
        "feature=f_age; slot=1; method=copy; depends=age\n\
         feature=f_income; slot=2; method=log; depends=income; args=base=10\n\
         feature=f_combo; slot=3; method=cross; depends=f_age,f_income\n"
    );
}

#[test]
fn slot_zero_may_repeat() {
    let output = generate(
        "user_profile",
        &[
            &["f_a", "0", "copy", "age"],
            &["f_b", "0", "copy", "income"],
            &["f_c", "0", "copy", "uid"],
        ],
    )
    .unwrap();
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn duplicate_nonzero_slot_is_fatal() {
    let err = generate(
        "user_profile",
        &[&["f_a", "7", "copy", "age"], &["f_b", "7", "copy", "income"]],
    )
    .unwrap_err();
    assert!(matches!(err, PipegenError::DuplicateSlot { slot: 7 }));
}

#[test]
fn slot_above_range_is_fatal_wherever_it_appears() {
    let err = generate(
        "user_profile",
        &[&["f_a", "1", "copy", "age"], &["f_b", "1024", "copy", "income"]],
    )
    .unwrap_err();
    assert!(matches!(err, PipegenError::SlotRange { slot: 1024 }));
}

#[test]
fn non_numeric_slot_row_is_skipped_not_fatal() {
    let output = generate(
        "user_profile",
        &[
            &["f_a", "first", "copy", "age"],
            &["f_b", "2", "copy", "income"],
        ],
    )
    .unwrap();
    assert_eq!(output, "feature=f_b; slot=2; method=copy; depends=income\n");
}

#[test]
fn short_row_is_skipped_not_fatal() {
    let output = generate(
        "user_profile",
        &[&["f_a", "1"], &["f_b", "2", "copy", "income"]],
    )
    .unwrap();
    assert_eq!(output, "feature=f_b; slot=2; method=copy; depends=income\n");
}

#[test]
fn feature_colliding_with_input_schema_is_fatal() {
    let err = generate("user_profile", &[&["age", "1", "copy"]]).unwrap_err();
    assert!(matches!(
        err,
        PipegenError::DuplicateFeature { feature, slot: 1 } if feature == "age"
    ));
}

#[test]
fn feature_colliding_with_earlier_row_is_fatal() {
    let err = generate(
        "user_profile",
        &[&["f_a", "1", "copy", "age"], &["f_a", "2", "copy", "income"]],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PipegenError::DuplicateFeature { feature, slot: 2 } if feature == "f_a"
    ));
}

#[test]
fn unresolved_dependency_is_fatal() {
    let err = generate("user_profile", &[&["f_a", "1", "copy", "salary"]]).unwrap_err();
    assert!(matches!(
        err,
        PipegenError::UnresolvedDependency { dependency, slot: 1 } if dependency == "salary"
    ));
}

#[test]
fn blank_feature_without_depends_is_fatal() {
    let err = generate("user_profile", &[&["", "3", "copy"]]).unwrap_err();
    assert!(matches!(
        err,
        PipegenError::UndeterminedFeatureName { slot: 3 }
    ));
}

#[test]
fn unknown_input_table_is_fatal() {
    let err = generate("no_such_table", &[&["f_a", "1", "copy"]]).unwrap_err();
    assert!(matches!(
        err,
        PipegenError::UnknownTable { table } if table == "no_such_table"
    ));
}

#[test]
fn blank_input_table_header_is_fatal() {
    let err = generate("", &[&["f_a", "1", "copy"]]).unwrap_err();
    assert!(matches!(err, PipegenError::MalformedHeader { .. }));
}

#[test]
fn failed_run_writes_no_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("features.xlsx");
    let output = temp_dir.path().join("feature_list.txt");
    write_feature_sheet(
        &workbook,
        "user_profile",
        &[&["f_a", "1", "copy", "age"], &["f_b", "9999", "copy"]],
    )
    .unwrap();

    let mut generator = FeatureListGenerator::load(&workbook, SHEET).unwrap();
    assert!(generator.dump(&test_catalog(), &output).is_err());
    assert!(!output.exists(), "no partial artifact may be left behind");
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("features.xlsx");
    write_feature_sheet(
        &workbook,
        "user_profile",
        &[
            &["", "5", "bucket", "age,income"],
            &["f_log", "6", "log", "income"],
        ],
    )
    .unwrap();

    let catalog = test_catalog();
    let first = FeatureListGenerator::load(&workbook, SHEET)
        .unwrap()
        .generate(&catalog)
        .unwrap();
    let second = FeatureListGenerator::load(&workbook, SHEET)
        .unwrap()
        .generate(&catalog)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_sheet_is_a_config_source_error() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("features.xlsx");
    write_feature_sheet(&workbook, "user_profile", &[&["f_a", "1", "copy", "age"]]).unwrap();

    let err = FeatureListGenerator::load(&workbook, "nope").unwrap_err();
    assert!(matches!(err, PipegenError::ConfigSource { .. }));
}

#[test]
fn input_table_info_reports_resolved_table() {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("features.xlsx");
    write_feature_sheet(&workbook, "user_profile", &[&["f_a", "1", "copy", "age"]]).unwrap();

    let mut generator = FeatureListGenerator::load(&workbook, SHEET).unwrap();
    generator.generate(&test_catalog()).unwrap();
    let info = generator.input_table_info();
    assert!(info.contains("Input table name: user_profile"));
    assert!(info.contains("uid, age, income"));
}
