// Summary statistics over retained pairs, and the qualitative labels the
// reports derive from them.

use super::aggregate::PairResult;

/// One of the three similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cosine,
    Jaccard,
    Levenshtein,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cosine, Metric::Jaccard, Metric::Levenshtein];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Cosine => "cosine",
            Metric::Jaccard => "jaccard",
            Metric::Levenshtein => "levenshtein",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Cosine => "Cosine similarity",
            Metric::Jaccard => "Jaccard index",
            Metric::Levenshtein => "Levenshtein ratio",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mean, maximum and minimum of one metric. All zero when nothing was kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl MetricSummary {
    fn from_scores(scores: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::MIN;
        let mut min = f64::MAX;
        for s in scores {
            count += 1;
            sum += s;
            max = max.max(s);
            min = min.min(s);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            mean: sum / count as f64,
            max,
            min,
        }
    }

    /// Spread between the best and worst pair.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-metric statistics over the retained pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub cosine: MetricSummary,
    pub jaccard: MetricSummary,
    pub levenshtein: MetricSummary,
}

impl Statistics {
    pub fn from_pairs(pairs: &[PairResult]) -> Self {
        Self {
            count: pairs.len(),
            cosine: MetricSummary::from_scores(pairs.iter().map(|p| p.cosine)),
            jaccard: MetricSummary::from_scores(pairs.iter().map(|p| p.jaccard)),
            levenshtein: MetricSummary::from_scores(pairs.iter().map(|p| p.levenshtein)),
        }
    }

    pub fn summary(&self, metric: Metric) -> &MetricSummary {
        match metric {
            Metric::Cosine => &self.cosine,
            Metric::Jaccard => &self.jaccard,
            Metric::Levenshtein => &self.levenshtein,
        }
    }

    /// Mean of the three per-metric means.
    pub fn overall_mean(&self) -> f64 {
        (self.cosine.mean + self.jaccard.mean + self.levenshtein.mean) / 3.0
    }

    pub fn level(&self) -> SimilarityLevel {
        SimilarityLevel::from_score(self.overall_mean())
    }

    /// The metric whose scores spread the widest (max - min).
    /// Ties go to the earlier metric in cosine, jaccard, levenshtein order.
    pub fn most_discriminating(&self) -> Metric {
        let mut best = Metric::Cosine;
        for metric in [Metric::Jaccard, Metric::Levenshtein] {
            if self.summary(metric).range() > self.summary(best).range() {
                best = metric;
            }
        }
        best
    }
}

/// Qualitative similarity band for a score in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityLevel {
    Low,
    Medium,
    High,
}

impl SimilarityLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.7 => SimilarityLevel::High,
            s if s >= 0.4 => SimilarityLevel::Medium,
            _ => SimilarityLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLevel::Low => "Low",
            SimilarityLevel::Medium => "Medium",
            SimilarityLevel::High => "High",
        }
    }
}

impl std::fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the metrics agree on which pairs look similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    /// All three metrics flag at least one pair.
    Strong,
    /// Two metrics do.
    Partial,
    /// One or none.
    Divergent,
}

impl Agreement {
    pub fn from_flagged(metrics_flagging: usize) -> Self {
        match metrics_flagging {
            0 | 1 => Agreement::Divergent,
            2 => Agreement::Partial,
            _ => Agreement::Strong,
        }
    }
}
