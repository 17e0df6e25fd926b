// Jaccard index over distinct-token sets: |A ∩ B| / |A ∪ B|.
//
// Two empty sets score 1.0. That is a convention, chosen to agree with the
// self-comparison case (and with the Levenshtein ratio of two empty files);
// one empty and one populated set score 0.0.

use crate::tokens::TokenSet;

/// Jaccard index between two token sets.
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|t| large.contains(t)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return 1.0;
    }

    (intersection as f64 / union as f64).clamp(0.0, 1.0)
}
