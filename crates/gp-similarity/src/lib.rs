//! Text similarity scoring
//!
//! Pure, deterministic similarity methods over pairs of texts, scored in
//! [0, 1]. Used by the prediction cache to decide whether a prompt has
//! effectively been seen before, and exposed directly over the API.

pub mod engine;
mod tfidf;

pub use engine::{SimilarityEngine, SimilarityMethod};
