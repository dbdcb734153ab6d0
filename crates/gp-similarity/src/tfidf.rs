//! Cosine similarity over TF-IDF vectors
//!
//! The two texts under comparison form the whole corpus (n = 2 documents).
//! Weights use the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1` with raw term counts, L2-normalized, so a
//! term present in both documents contributes idf 1.0 and a term unique to
//! one document contributes `ln(3/2) + 1`.

use std::collections::BTreeMap;

use crate::engine::tokenize;

/// Cosine similarity between the TF-IDF vectors of `a` and `b`.
///
/// Returns 0.0 when either vector is all-zero (no tokens, or no weight),
/// avoiding the division by zero explicitly.
pub(crate) fn cosine(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    // BTreeMap keeps vocabulary iteration order deterministic.
    let mut counts: BTreeMap<String, [u32; 2]> = BTreeMap::new();
    for token in tokens_a {
        counts.entry(token).or_default()[0] += 1;
    }
    for token in tokens_b {
        counts.entry(token).or_default()[1] += 1;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for [tf_a, tf_b] in counts.values() {
        let df = (*tf_a > 0) as u32 + (*tf_b > 0) as u32;
        let idf = ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0;
        let w_a = *tf_a as f64 * idf;
        let w_b = *tf_b as f64 * idf;

        dot += w_a * w_b;
        norm_a += w_a * w_a;
        norm_b += w_b * w_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
