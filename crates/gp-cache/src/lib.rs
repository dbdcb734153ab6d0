//! Similarity-driven prediction cache
//!
//! Stores (prompt, response) pairs and answers "have we effectively seen
//! this prompt before?" with a linear similarity scan over the entries.
//! A best score at or above the configured threshold reuses the cached
//! response instead of invoking generation.
//!
//! The entry list is the only shared mutable state in the service and is
//! guarded by a single mutex. The scan-and-decide step and the
//! insert-and-evict step each run under the lock, but the lock is never
//! held across the generation await: two near-simultaneous misses may
//! both generate (a performance cost, not a correctness one), and the
//! re-scan before insert keeps the cache from ending up with duplicate
//! entries for the same effective prompt.

use std::collections::VecDeque;
use std::future::Future;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use gp_similarity::{SimilarityEngine, SimilarityMethod};
use gp_types::AppResult;

/// A cached (prompt, response) pair. Never mutated after insertion;
/// removed only by FIFO eviction.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a cache lookup, hit or miss.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub response: String,
    pub cache_hit: bool,
    /// The cached prompt that matched, on a hit.
    pub matched_prompt: Option<String>,
    /// The winning similarity score, on a hit.
    pub similarity_score: Option<f64>,
}

/// In-memory prediction cache with FIFO eviction.
pub struct PredictionCache {
    entries: Mutex<VecDeque<CacheEntry>>,
    engine: SimilarityEngine,
    method: SimilarityMethod,
    threshold: f64,
    max_entries: usize,
}

impl PredictionCache {
    /// Create an empty cache.
    ///
    /// `threshold` must already be validated to [0, 1] and `max_entries`
    /// to ≥ 1 by configuration loading.
    pub fn new(method: SimilarityMethod, threshold: f64, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            engine: SimilarityEngine::new(method),
            method,
            threshold,
            max_entries,
        }
    }

    /// Look up the most similar cached prompt; on a miss, call `generate`
    /// and cache the result.
    ///
    /// Generation parameters stay opaque to the cache: callers capture
    /// them in the closure. A generation failure propagates unchanged and
    /// caches nothing.
    pub async fn get_or_compute<F, Fut>(
        &self,
        prompt: &str,
        generate: F,
    ) -> AppResult<PredictionOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<String>>,
    {
        if let Some((matched_prompt, response, score)) = self.best_match(prompt) {
            debug!(score, matched = %matched_prompt, "prediction cache hit");
            return Ok(PredictionOutcome {
                response,
                cache_hit: true,
                matched_prompt: Some(matched_prompt),
                similarity_score: Some(score),
            });
        }

        // Miss: generate with the lock released; inference may be slow.
        let response = generate().await?;

        self.insert_if_still_novel(prompt, &response);

        Ok(PredictionOutcome {
            response,
            cache_hit: false,
            matched_prompt: None,
            similarity_score: None,
        })
    }

    /// Scan every entry and return the best match at or above the
    /// threshold. Ties at the maximum score prefer the most recently
    /// inserted entry, so results are stable and deterministic.
    fn best_match(&self, prompt: &str) -> Option<(String, String, f64)> {
        let entries = self.entries.lock();

        let mut best: Option<(&CacheEntry, f64)> = None;
        for entry in entries.iter() {
            let score = self.engine.score(self.method, prompt, &entry.prompt);
            // >= lets a later (more recent) entry take over an equal score
            match best {
                Some((_, best_score)) if score < best_score => {}
                _ => best = Some((entry, score)),
            }
        }

        best.filter(|(_, score)| *score >= self.threshold)
            .map(|(entry, score)| (entry.prompt.clone(), entry.response.clone(), score))
    }

    /// Append a freshly generated entry unless a concurrent caller already
    /// cached one that matches the prompt at or above the threshold.
    fn insert_if_still_novel(&self, prompt: &str, response: &str) {
        let mut entries = self.entries.lock();

        let already_covered = entries
            .iter()
            .any(|e| self.engine.score(self.method, prompt, &e.prompt) >= self.threshold);
        if already_covered {
            debug!("skipping insert, a matching entry was cached concurrently");
            return;
        }

        if entries.len() >= self.max_entries {
            if let Some(evicted) = entries.pop_front() {
                info!(prompt = %evicted.prompt, "evicted oldest cache entry");
            }
        }

        entries.push_back(CacheEntry {
            prompt: prompt.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Cached prompts in insertion order (oldest first).
    pub fn cached_prompts(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.prompt.clone()).collect()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn method(&self) -> SimilarityMethod {
        self.method
    }
}
