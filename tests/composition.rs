// Composition tests: verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   loader -> SourceFile -> aggregate -> reports
// using real files in a temp directory. No network access; the PDF test
// points at a pandoc binary that does not exist to exercise the fallback.

use std::fs;
use std::path::{Path, PathBuf};

use codesim::output::{self, csv, json, markdown, Report, ReportFormat};
use codesim::pipeline::aggregate;
use codesim::source::{loader, prepare, FileSummary, Language, SourceFile};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Four small files: two near-duplicates, one rewrite, one unrelated.
fn fixture(dir: &Path) -> Vec<PathBuf> {
    vec![
        write(
            dir,
            "sum_a.py",
            "def total(items):\n    s = 0\n    for x in items:\n        s += x\n    return s\n",
        ),
        write(
            dir,
            "sum_b.py",
            "def total(values):\n    s = 0\n    for x in values:\n        s += x\n    return s\n",
        ),
        write(
            dir,
            "sum.js",
            "function total(items) {\n  let s = 0;\n  for (const x of items) { s += x; }\n  return s;\n}\n",
        ),
        write(
            dir,
            "Greeter.java",
            "class Greeter {\n  void hello() { System.out.println(\"hi\"); }\n}\n",
        ),
    ]
}

fn load(dir: &Path) -> (Vec<SourceFile>, Vec<FileSummary>) {
    let inputs = loader::load_all(&fixture(dir));
    let files = prepare(inputs);
    let summaries = files.iter().map(SourceFile::summary).collect();
    (files, summaries)
}

// ============================================================
// Chain: loader -> prepare -> aggregate
// ============================================================

#[test]
fn loaded_files_keep_argument_order_and_language() {
    let dir = tempfile::tempdir().unwrap();
    let (files, _) = load(dir.path());
    let langs: Vec<Language> = files.iter().map(|f| f.language()).collect();
    assert_eq!(
        langs,
        vec![Language::Python, Language::Python, Language::JavaScript, Language::Java]
    );
}

#[test]
fn near_duplicates_rank_highest() {
    let dir = tempfile::tempdir().unwrap();
    let (files, _) = load(dir.path());
    let set = aggregate(&files, 0.0).unwrap();

    assert_eq!(set.pairs().len(), 6);
    let best = set.most_similar().unwrap();
    assert!(output::display_name(&best.left) == "sum_a.py");
    assert!(output::display_name(&best.right) == "sum_b.py");
    assert!(best.levenshtein > 0.8, "got {}", best.levenshtein);
}

#[test]
fn invalid_files_are_skipped_before_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "only.py", "print(1)\n");
    let blank = write(dir.path(), "blank.py", "\n\n");
    let text = write(dir.path(), "notes.txt", "print(1)\n");

    let inputs = loader::load_all(&[good, blank, text]);
    assert_eq!(inputs.len(), 1);
    let files = prepare(inputs);
    assert!(aggregate(&files, 0.0).is_err());
}

// ============================================================
// Chain: aggregate -> reports
// ============================================================

#[test]
fn csv_report_has_rows_and_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let (files, summaries) = load(dir.path());
    let set = aggregate(&files, 0.0).unwrap();
    let report = Report::new(&summaries, &set, 4);

    let text = csv::render(&report).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "File A,File B,Cosine,Jaccard,Levenshtein");
    // header + 6 pairs + blank + marker
    assert_eq!(lines[7], "");
    assert_eq!(lines[8], "=== STATISTICS ===");
    assert_eq!(lines[9], "Total Comparisons,6");
    assert!(text.contains("Cosine Mean,"));
    assert!(text.contains("Levenshtein Min,"));

    // Every score rendered with 4 decimals
    let first_row: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first_row.len(), 5);
    for score in &first_row[2..] {
        assert_eq!(score.split('.').nth(1).unwrap().len(), 4, "{score}");
    }

    let path = csv::write(&report, &dir.path().join("out")).unwrap();
    assert_eq!(path, dir.path().join("out.csv"));
    assert_eq!(fs::read_to_string(path).unwrap(), text);
}

#[test]
fn json_report_round_trips_through_serde_json() {
    let dir = tempfile::tempdir().unwrap();
    let (files, summaries) = load(dir.path());
    let set = aggregate(&files, 0.5).unwrap();
    let report = Report::new(&summaries, &set, 3);

    let doc: serde_json::Value = serde_json::from_str(&json::render(&report).unwrap()).unwrap();
    assert_eq!(doc["metadata"]["files_processed"], 4);
    assert_eq!(doc["metadata"]["pairs_evaluated"], 6);
    assert_eq!(doc["metadata"]["threshold"], 0.5);
    assert_eq!(doc["files"][2]["language"], "javascript");
    assert_eq!(doc["files"][0]["name"], "sum_a.py");

    let comparisons = doc["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), set.pairs().len());
    assert_eq!(doc["statistics"]["total_comparisons"], set.pairs().len());

    // Rounded to 3 digits
    let lev = comparisons[0]["levenshtein"].as_f64().unwrap();
    assert_eq!(lev, (lev * 1000.0).round() / 1000.0);
}

#[test]
fn markdown_report_sections() {
    let dir = tempfile::tempdir().unwrap();
    let (files, summaries) = load(dir.path());
    let set = aggregate(&files, 0.0).unwrap();
    let report = Report::new(&summaries, &set, 3);

    let md = markdown::render(&report);
    assert!(md.starts_with("# Source Code Similarity Report"));
    assert!(md.contains("## Executive Summary"));
    assert!(md.contains("### Similarity Matrix (Cosine)"), "4 files get a matrix");
    assert!(md.contains("| `sum_a.py` | `sum_b.py` |"));
    assert!(md.contains("### High Similarity Detected"));
    assert!(md.contains("## Conclusions"));
    assert!(md.contains("`Greeter.java`"));
}

#[test]
fn markdown_without_retained_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.py", "alpha beta\n");
    let b = write(dir.path(), "b.py", "gamma delta\n");
    let files = prepare(loader::load_all(&[a, b]));
    let summaries: Vec<FileSummary> = files.iter().map(SourceFile::summary).collect();
    let set = aggregate(&files, 0.9).unwrap();
    let report = Report::new(&summaries, &set, 4);

    let md = markdown::render(&report);
    assert!(md.contains("No pairs reached the threshold."));
    assert!(!md.contains("## Executive Summary"));
    assert!(!md.contains("## Conclusions"));
    assert!(!md.contains("Similarity Matrix"), "2 files get no matrix");
}

#[tokio::test]
async fn pdf_falls_back_to_markdown_without_pandoc() {
    let dir = tempfile::tempdir().unwrap();
    let (files, summaries) = load(dir.path());
    let set = aggregate(&files, 0.0).unwrap();
    let report = Report::new(&summaries, &set, 4);
    let base = dir.path().join("report");

    let written = output::write_report(
        &report,
        ReportFormat::Pdf,
        &base,
        "codesim-test-no-such-pandoc",
    )
    .await
    .unwrap();

    assert_eq!(written.format, ReportFormat::Md);
    assert_eq!(written.path, dir.path().join("report.md"));
    assert!(written.path.exists());
    assert!(!dir.path().join("report_temp.md").exists());
}

#[tokio::test]
async fn write_report_dispatches_by_format() {
    let dir = tempfile::tempdir().unwrap();
    let (files, summaries) = load(dir.path());
    let set = aggregate(&files, 0.0).unwrap();
    let report = Report::new(&summaries, &set, 4);
    let base = dir.path().join("run");

    for format in [ReportFormat::Csv, ReportFormat::Json, ReportFormat::Md] {
        let written = output::write_report(&report, format, &base, "pandoc")
            .await
            .unwrap();
        assert_eq!(written.format, format);
        assert_eq!(written.path, output::with_extension(&base, format.extension()));
        assert!(written.path.exists());
    }
}
