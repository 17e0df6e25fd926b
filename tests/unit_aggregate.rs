// Unit tests for the pairwise aggregator.
//
// Tests the precondition (fewer than 2 files), pair enumeration order,
// threshold filtering, and statistics over retained pairs.

use codesim::pipeline::{aggregate, Agreement, Metric, SimilarityLevel};
use codesim::source::{prepare, Language, SourceFile, SourceInput};
use codesim::CompareError;

fn file(id: &str, text: &str) -> SourceFile {
    SourceFile::new(id, text, Language::Python)
}

fn corpus() -> Vec<SourceFile> {
    vec![
        file("add.py", "def add(a, b):\n    return a + b\n"),
        file("plus.py", "def plus(x, y):\n    return x + y\n"),
        file("add_copy.py", "def add(a, b):\n    return a + b\n"),
        file("loop.py", "for i in range(10):\n    print(i)\n"),
        file("empty.py", ""),
    ]
}

// ============================================================
// Precondition
// ============================================================

#[test]
fn zero_files_is_insufficient() {
    assert_eq!(
        aggregate(&[], 0.0).unwrap_err(),
        CompareError::InsufficientInput { found: 0 }
    );
}

#[test]
fn one_file_is_insufficient() {
    let files = vec![file("a.py", "x = 1")];
    let err = aggregate(&files, 0.0).unwrap_err();
    assert_eq!(err, CompareError::InsufficientInput { found: 1 });
    assert!(err.to_string().contains("At least 2"));
}

#[test]
fn two_files_give_exactly_one_pair() {
    let files = vec![file("a.py", "x = 1"), file("b.py", "y = 2")];
    let set = aggregate(&files, 0.0).unwrap();
    assert_eq!(set.pairs().len(), 1);
    assert_eq!(set.evaluated(), 1);
    assert_eq!(set.pairs()[0].left, "a.py");
    assert_eq!(set.pairs()[0].right, "b.py");
}

// ============================================================
// Enumeration and filtering
// ============================================================

#[test]
fn all_pairs_kept_at_zero_threshold() {
    let files = corpus();
    let set = aggregate(&files, 0.0).unwrap();
    assert_eq!(set.pairs().len(), 10);
    assert_eq!(set.statistics().count, 10);
}

#[test]
fn duplicate_files_score_one_everywhere() {
    let files = corpus();
    let set = aggregate(&files, 0.0).unwrap();
    let dup = set.find("add_copy.py", "add.py").unwrap();
    assert_eq!(dup.cosine, 1.0);
    assert_eq!(dup.jaccard, 1.0);
    assert_eq!(dup.levenshtein, 1.0);
}

#[test]
fn filter_keeps_pair_when_any_metric_reaches_threshold() {
    let files = corpus();
    let set = aggregate(&files, 0.5).unwrap();
    for pair in set.pairs() {
        assert!(
            pair.cosine >= 0.5 || pair.jaccard >= 0.5 || pair.levenshtein >= 0.5,
            "{pair:?} should not pass 0.5"
        );
    }
    // add/plus: 5 of 12 tokens renamed. Cosine 7/16 misses 0.5,
    // jaccard 7/13 and levenshtein 7/12 clear it.
    let renamed = set.find("add.py", "plus.py").unwrap();
    assert!((renamed.cosine - 7.0 / 16.0).abs() < 1e-12);
    assert!((renamed.jaccard - 7.0 / 13.0).abs() < 1e-12);
    assert!((renamed.levenshtein - 7.0 / 12.0).abs() < 1e-12);
    assert!(set.find("loop.py", "empty.py").is_none());
}

#[test]
fn threshold_one_keeps_only_identical_files() {
    let files = corpus();
    let set = aggregate(&files, 1.0).unwrap();
    assert_eq!(set.pairs().len(), 1);
    assert!(set.pairs()[0].is_pair("add.py", "add_copy.py"));
    assert_eq!(set.evaluated(), 10);
}

#[test]
fn statistics_cover_only_retained_pairs() {
    let files = corpus();
    let set = aggregate(&files, 1.0).unwrap();
    let stats = set.statistics();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.cosine.mean, 1.0);
    assert_eq!(stats.levenshtein.max, 1.0);
    assert_eq!(stats.level(), SimilarityLevel::High);
    assert_eq!(set.metric_agreement(0.7), Agreement::Strong);
}

#[test]
fn nothing_retained_gives_zero_statistics() {
    let files = vec![file("a.py", "alpha beta"), file("b.py", "gamma delta epsilon")];
    let set = aggregate(&files, 0.5).unwrap();
    assert!(set.is_empty());
    let stats = set.statistics();
    assert_eq!(stats.count, 0);
    for metric in Metric::ALL {
        assert_eq!(stats.summary(metric).mean, 0.0);
        assert_eq!(stats.summary(metric).max, 0.0);
    }
    assert!(set.most_similar().is_none());
}

#[test]
fn empty_file_pairs_use_conventions() {
    let files = vec![file("e1.py", ""), file("e2.py", "")];
    let set = aggregate(&files, 0.0).unwrap();
    let pair = &set.pairs()[0];
    assert_eq!(pair.cosine, 0.0);
    assert_eq!(pair.jaccard, 1.0);
    assert_eq!(pair.levenshtein, 1.0);
}

#[test]
fn prepared_inputs_feed_the_aggregator() {
    let inputs = vec![
        SourceInput {
            id: "a.go".to_string(),
            text: "func main() {}".to_string(),
            language: Language::Go,
        },
        SourceInput {
            id: "b.go".to_string(),
            text: "func main() { run() }".to_string(),
            language: Language::Go,
        },
    ];
    let files = prepare(inputs);
    let set = aggregate(&files, 0.0).unwrap();
    assert_eq!(set.pairs().len(), 1);
    assert!(set.pairs()[0].best_score() > 0.5);
}
