//! Server state
//!
//! All services are built once from validated configuration and shared
//! across handlers. Everything except the prediction cache is immutable;
//! the cache serializes its own access internally.

use std::sync::Arc;

use gp_cache::PredictionCache;
use gp_config::AppConfig;
use gp_generation::Generator;
use gp_guardrails::GuardrailRegistry;
use gp_similarity::SimilarityEngine;
use gp_types::{AppResult, GenerationParams};

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GuardrailRegistry>,
    pub similarity: Arc<SimilarityEngine>,
    pub cache: Arc<PredictionCache>,
    pub generator: Arc<dyn Generator>,
    /// Generation parameters from config, passed through opaque.
    pub params: GenerationParams,
}

impl AppState {
    /// Wire up services from a validated configuration and a generation
    /// backend.
    pub fn new(config: &AppConfig, generator: Arc<dyn Generator>) -> AppResult<Self> {
        let registry = GuardrailRegistry::from_specs(&config.guardrails)?;
        let similarity = SimilarityEngine::new(config.similarity.default_method);
        let cache = PredictionCache::new(
            config.prediction.cache.method,
            config.prediction.cache.threshold,
            config.prediction.cache.max_entries,
        );

        Ok(Self {
            registry: Arc::new(registry),
            similarity: Arc::new(similarity),
            cache: Arc::new(cache),
            generator,
            params: config.prediction.parameters.clone(),
        })
    }
}
