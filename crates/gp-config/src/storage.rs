//! Configuration file IO

use std::path::Path;

use gp_types::{AppError, AppResult};
use tracing::info;

use crate::types::AppConfig;
use crate::validation;

/// Load and validate configuration from a JSON file.
///
/// Any defect — unreadable file, malformed JSON, unknown rule kind, bad
/// regex, duplicate guardrail name, out-of-range cache settings — is a
/// `Config` error; callers treat it as fatal at startup.
pub async fn load_config(path: &Path) -> AppResult<AppConfig> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: AppConfig = serde_json::from_str(&raw).map_err(|e| {
        AppError::Config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validation::validate_config(&config)?;

    info!(
        path = %path.display(),
        guardrails = config.guardrails.len(),
        model = %config.prediction.model,
        "configuration loaded"
    );

    Ok(config)
}
