// Cosine similarity over token frequency vectors.
//
//   cosine = dot(A, B) / (|A| * |B|)
//
// The dot product only visits tokens present in both vectors; each norm is
// taken over the vector's own entries. Counts are accumulated as integers
// and converted once, so a vector compared with itself divides exactly.

use crate::tokens::FrequencyVector;

/// Cosine similarity between two frequency vectors.
///
/// Returns 0.0 when either vector is empty (a file with no tokens has no
/// direction to compare), never NaN.
pub fn cosine(a: &FrequencyVector, b: &FrequencyVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Walk the smaller vector, probe the larger one
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: u64 = small
        .iter()
        .map(|(token, count)| count * large.get(token))
        .sum();

    if dot == 0 {
        return 0.0;
    }

    let denominator = (a.norm_squared() as f64 * b.norm_squared() as f64).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (dot as f64 / denominator).clamp(0.0, 1.0)
}
