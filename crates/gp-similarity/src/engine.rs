//! Similarity engine: method dispatch and scoring

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use gp_types::{AppError, AppResult};

use crate::tfidf;

/// A similarity scoring method.
///
/// The set of methods is closed; unknown names are rejected when parsed
/// from configuration or requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    Jaccard,
    CosineTfidf,
}

impl SimilarityMethod {
    /// All known methods, in the order they are listed over the API.
    pub fn all() -> &'static [SimilarityMethod] {
        &[SimilarityMethod::Jaccard, SimilarityMethod::CosineTfidf]
    }

    /// Parse a method identifier as it appears in config and requests.
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "jaccard" => Ok(Self::Jaccard),
            "cosine_tfidf" => Ok(Self::CosineTfidf),
            other => Err(AppError::InvalidMethod(other.to_string())),
        }
    }

    /// The wire identifier for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jaccard => "jaccard",
            Self::CosineTfidf => "cosine_tfidf",
        }
    }
}

impl std::fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokenize a text for similarity scoring: lowercase, split on Unicode
/// whitespace. Scores depend on this definition, so both methods share it.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Stateless scoring engine with a configured default method.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    default_method: SimilarityMethod,
}

impl SimilarityEngine {
    pub fn new(default_method: SimilarityMethod) -> Self {
        Self { default_method }
    }

    /// Score two texts with the given method. Always in [0, 1] and
    /// bit-for-bit reproducible for fixed inputs.
    pub fn score(&self, method: SimilarityMethod, a: &str, b: &str) -> f64 {
        match method {
            SimilarityMethod::Jaccard => jaccard(a, b),
            SimilarityMethod::CosineTfidf => tfidf::cosine(a, b),
        }
    }

    /// Score with a method given by name, falling back to the configured
    /// default when absent. Returns the method actually used.
    pub fn score_by_name(
        &self,
        method: Option<&str>,
        a: &str,
        b: &str,
    ) -> AppResult<(f64, SimilarityMethod)> {
        let method = match method {
            Some(name) => SimilarityMethod::parse(name)?,
            None => self.default_method,
        };
        Ok((self.score(method, a, b), method))
    }

    pub fn default_method(&self) -> SimilarityMethod {
        self.default_method
    }

    /// Identifiers of all available methods.
    pub fn list_methods(&self) -> Vec<&'static str> {
        SimilarityMethod::all().iter().map(|m| m.as_str()).collect()
    }
}

/// Jaccard similarity over word sets: |A ∩ B| / |A ∪ B|.
///
/// Two empty texts score 1.0 by convention; exactly one empty scores 0.0.
fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = tokenize(a).into_iter().collect();
    let words_b: HashSet<String> = tokenize(b).into_iter().collect();

    if words_a.is_empty() && words_b.is_empty() {
        return 1.0;
    }
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}
