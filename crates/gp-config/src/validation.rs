//! Eager configuration validation
//!
//! Everything here is a startup gate: a configuration that passes is one
//! the runtime components can be constructed from without further error
//! handling.

use gp_guardrails::GuardrailRegistry;
use gp_types::{AppError, AppResult};

use crate::types::AppConfig;

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> AppResult<()> {
    // Compiling the registry exercises every rule: duplicate names,
    // invalid regexes, and unbounded length rules all surface here.
    GuardrailRegistry::from_specs(&config.guardrails)?;

    if config.prediction.model.trim().is_empty() {
        return Err(AppError::Config(
            "prediction.model must not be empty".to_string(),
        ));
    }

    let cache = &config.prediction.cache;
    if !(0.0..=1.0).contains(&cache.threshold) {
        return Err(AppError::Config(format!(
            "prediction.cache.threshold must be within [0, 1], got {}",
            cache.threshold
        )));
    }
    if cache.max_entries == 0 {
        return Err(AppError::Config(
            "prediction.cache.max_entries must be at least 1".to_string(),
        ));
    }

    Ok(())
}
