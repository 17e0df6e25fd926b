// Token-level Levenshtein distance and its normalized ratio.
//
// The edit unit is one token, not one character: renaming an identifier
// costs 1 no matter how long the name is.
//
// Working memory is a single DP row sized to the shorter sequence + 1,
// updated in place while the outer loop walks the longer sequence. Memory
// is O(min(n, m)); time is still O(n * m).

/// Reusable DP row for edit distance computations.
///
/// The aggregator keeps one workspace per worker thread so consecutive pairs
/// reuse the same allocation. The row never grows beyond the shorter
/// sequence of the largest pair it has seen.
#[derive(Debug, Default)]
pub struct LevenshteinWorkspace {
    row: Vec<usize>,
}

impl LevenshteinWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit distance between two sequences (insert, delete, substitute: cost 1).
    pub fn distance<T: PartialEq>(&mut self, a: &[T], b: &[T]) -> usize {
        let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        if shorter.is_empty() {
            return longer.len();
        }

        // row[j] holds d[i][j] for the current outer index i
        self.row.clear();
        self.row.extend(0..=shorter.len());

        for (i, long_item) in longer.iter().enumerate() {
            // d[i-1][j-1], carried along the row
            let mut diagonal = self.row[0];
            self.row[0] = i + 1;

            for (j, short_item) in shorter.iter().enumerate() {
                let above = self.row[j + 1];
                let substitution = diagonal + usize::from(long_item != short_item);
                let value = (above + 1).min(self.row[j] + 1).min(substitution);
                diagonal = above;
                self.row[j + 1] = value;
            }
        }

        self.row[shorter.len()]
    }

    /// Normalized similarity: `1 - distance / max(n, m, 1)`, clamped to [0, 1].
    ///
    /// Two empty sequences score 1.0.
    pub fn ratio<T: PartialEq>(&mut self, a: &[T], b: &[T]) -> f64 {
        let longest = a.len().max(b.len()).max(1);
        let distance = self.distance(a, b);
        (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
    }

    /// Length of the DP row used by the most recent computation.
    pub fn row_len(&self) -> usize {
        self.row.len()
    }

    /// Allocated capacity of the DP row.
    pub fn row_capacity(&self) -> usize {
        self.row.capacity()
    }
}

/// Edit distance with a throwaway workspace.
pub fn levenshtein_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    LevenshteinWorkspace::new().distance(a, b)
}

/// Normalized Levenshtein ratio with a throwaway workspace.
pub fn levenshtein_ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    LevenshteinWorkspace::new().ratio(a, b)
}
