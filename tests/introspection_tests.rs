use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pretty_assertions::assert_eq;
use sharpcraft::api::dto::{complexity_report, return_null_report};
use sharpcraft::application::introspection::{order_complexity, order_return_null};
use sharpcraft::application::Introspection;
use sharpcraft::domain::introspection::{ComplexityRecord, ReturnNullRecord};
use sharpcraft::infrastructure::CancellationToken;
use sharpcraft::ports::json_exporter::JsonExporter;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/CodeSmells.Samples/CodeSmells.Samples.sln")
}

fn complex_methods(max: usize) -> Vec<ComplexityRecord> {
    Introspection::default()
        .search_for_complex_methods(fixture(), max, &CancellationToken::new())
        .unwrap()
}

fn lines(records: &[ReturnNullRecord]) -> Vec<usize> {
    let mut lines: Vec<usize> = records
        .iter()
        .inspect(|r| {
            assert_eq!(r.type_identifier, "ClassWithReturnNullMethods");
            assert_eq!(r.file_path, "ClassWithReturnNullMethods.cs");
        })
        .map(|r| r.source_line)
        .collect();
    lines.sort_unstable();
    lines
}

#[test]
fn only_methods_above_the_threshold_are_reported() {
    let records = complex_methods(10);
    assert_eq!(records.len(), 1, "{records:#?}");
    let record = &records[0];
    assert_eq!(record.type_identifier, "ClassWithExtraComplexity");
    assert_eq!(record.method_identifier, "MoreComplexMethod");
    assert_eq!(record.n_statement_syntax, 12);
    assert_eq!(record.file_path, "ClassWithExtraComplexity.cs");
    assert_eq!(record.source_line, 68);
    assert_eq!(record.sources_sample, "public int MoreComplexMethod(int[] values)");
}

#[test]
fn lower_threshold_groups_both_complex_methods() {
    let groups = order_complexity(complex_methods(9));
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].iter().map(|r| r.method_identifier.as_str()).collect();
    assert_eq!(names, ["MoreComplexMethod", "ComplexMethod"]);
    assert_eq!(groups[0][1].n_statement_syntax, 11);
    assert_eq!(groups[0][1].source_line, 11);
}

#[test]
fn repeated_scans_agree() {
    let first: HashSet<_> = complex_methods(0).into_iter().collect();
    let second: HashSet<_> = complex_methods(0).into_iter().collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn every_null_shaped_return_is_found() {
    let records = Introspection::default()
        .search_for_return_null_statements(fixture(), &CancellationToken::new())
        .unwrap();
    assert_eq!(lines(&records), [12, 17, 27, 32]);
    let samples: HashSet<&str> = records.iter().map(|r| r.sources_sample.as_str()).collect();
    assert!(samples.contains("return default(int);"));
    assert!(samples.contains("yield return null;"));
}

#[test]
fn semantic_scan_skips_value_type_defaults() {
    let records = Introspection::default()
        .search_for_return_null_statements_semantic(fixture(), &CancellationToken::new())
        .unwrap();
    assert_eq!(lines(&records), [12, 17, 32]);
}

#[test]
fn exhausted_budget_cancels_the_scan() {
    let token = CancellationToken::with_timeout(Duration::ZERO);
    let err = Introspection::default()
        .search_for_return_null_statements(fixture(), &token)
        .unwrap_err();
    assert!(err.is_cancellation(), "{err}");
}

#[test]
fn cancelled_token_stops_the_scan() {
    let token = CancellationToken::new();
    token.cancel();
    let err = Introspection::default().search_for_complex_methods(fixture(), 0, &token).unwrap_err();
    assert!(err.is_cancellation(), "{err}");
}

#[test]
fn reports_serialize_with_pascal_case_keys() {
    let report = complexity_report(order_complexity(complex_methods(10)));
    let json = JsonExporter::to_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let record = &value[0][0];
    assert_eq!(record["TypeIdentifier"], "ClassWithExtraComplexity");
    assert_eq!(record["MethodIdentifier"], "MoreComplexMethod");
    assert_eq!(record["nStatementSyntax"], 12);
    assert_eq!(record["SourceLine"], 68);

    let records = Introspection::default()
        .search_for_return_null_statements(fixture(), &CancellationToken::new())
        .unwrap();
    let json = JsonExporter::to_json(&return_null_report(order_return_null(records))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(4));
    assert_eq!(value[0]["FilePath"], "ClassWithReturnNullMethods.cs");
}

#[test]
fn a_plain_directory_is_scanned_as_one_project() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("obj")).unwrap();
    fs::write(
        dir.path().join("src/Repo.cs"),
        "class Repo {\n    string Find(int id) {\n        if (id < 0) return null;\n        return \"x\";\n    }\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("obj/Generated.cs"), "class Gen { object M() { return null; } }").unwrap();

    let records = Introspection::default()
        .search_for_return_null_statements(dir.path(), &CancellationToken::new())
        .unwrap();
    assert_eq!(records.len(), 1, "{records:#?}");
    assert_eq!(records[0].type_identifier, "Repo");
    assert_eq!(records[0].file_path, "src/Repo.cs");
    assert_eq!(records[0].source_line, 3);
    assert_eq!(records[0].sources_sample, "return null;");
}

#[test]
fn missing_solution_is_a_load_error() {
    let err = Introspection::default()
        .search_for_complex_methods("does/not/exist.sln", 10, &CancellationToken::new())
        .unwrap_err();
    assert!(!err.is_cancellation());
    assert!(err.to_string().starts_with("failed to load solution"), "{err}");
}
