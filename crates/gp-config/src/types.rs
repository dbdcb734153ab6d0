//! Configuration types
//!
//! The shape of `config.json`. Defaults are chosen so a minimal file only
//! needs the prediction model name.

use serde::{Deserialize, Serialize};

use gp_guardrails::GuardrailSpec;
use gp_similarity::SimilarityMethod;
use gp_types::GenerationParams;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Input- and output-side guardrails, applied in declaration order.
    #[serde(default)]
    pub guardrails: Vec<GuardrailSpec>,

    #[serde(default)]
    pub similarity: SimilarityConfig,

    pub prediction: PredictionConfig,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the standalone similarity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Method used when a request does not name one.
    #[serde(default = "default_similarity_method")]
    pub default_method: SimilarityMethod,
}

fn default_similarity_method() -> SimilarityMethod {
    SimilarityMethod::CosineTfidf
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            default_method: default_similarity_method(),
        }
    }
}

/// Generation model and prediction-cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Model name passed to the generation backend.
    pub model: String,

    #[serde(default)]
    pub parameters: GenerationParams,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Prediction-cache tuning. All values are deployment configuration, not
/// constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Similarity method used for the cache scan.
    #[serde(default = "default_cache_method")]
    pub method: SimilarityMethod,

    /// Minimum score for a cached entry to be reused, in [0, 1].
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Entry bound; the oldest entry is evicted when it would be exceeded.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_cache_method() -> SimilarityMethod {
    SimilarityMethod::Jaccard
}

fn default_threshold() -> f64 {
    0.8
}

fn default_max_entries() -> usize {
    128
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            method: default_cache_method(),
            threshold: default_threshold(),
            max_entries: default_max_entries(),
        }
    }
}
