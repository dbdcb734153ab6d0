//! Registry of configured guardrails
//!
//! Built once at startup from validated configuration, read-only
//! afterwards. Holds both directions and runs the appropriate set in
//! configured order.

use std::collections::HashSet;

use gp_types::{AppError, AppResult};
use tracing::info;

use crate::guardrail::Guardrail;
use crate::types::{GuardrailDirection, GuardrailInfo, GuardrailReport, GuardrailSpec};

/// The active set of guardrails, partitioned by direction at check time.
#[derive(Debug, Clone, Default)]
pub struct GuardrailRegistry {
    guardrails: Vec<Guardrail>,
}

impl GuardrailRegistry {
    /// Compile every configured guardrail. Duplicate names and defective
    /// rules are fatal here, before the service starts taking traffic.
    pub fn from_specs(specs: &[GuardrailSpec]) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for spec in specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate guardrail name '{}'",
                    spec.name
                )));
            }
        }

        let guardrails = specs
            .iter()
            .map(Guardrail::compile)
            .collect::<AppResult<Vec<_>>>()?;

        for guardrail in &guardrails {
            info!(
                name = %guardrail.name(),
                direction = %guardrail.direction(),
                "guardrail loaded"
            );
        }

        Ok(Self { guardrails })
    }

    /// Run all input guardrails against the text, in configured order.
    pub fn validate_input(&self, text: &str) -> GuardrailReport {
        self.validate(GuardrailDirection::Input, text)
    }

    /// Run all output guardrails against the text, in configured order.
    pub fn validate_output(&self, text: &str) -> GuardrailReport {
        self.validate(GuardrailDirection::Output, text)
    }

    fn validate(&self, direction: GuardrailDirection, text: &str) -> GuardrailReport {
        let mut current = text.to_string();
        let mut violations = Vec::new();

        for guardrail in self
            .guardrails
            .iter()
            .filter(|g| g.direction() == direction)
        {
            // Transformed text threads from one guardrail into the next
            let report = guardrail.check(&current);
            current = report.text;
            violations.extend(report.violations);
        }

        GuardrailReport {
            passed: violations.is_empty(),
            text: current,
            violations,
        }
    }

    /// Summaries of every configured guardrail, in configured order.
    pub fn list(&self) -> Vec<GuardrailInfo> {
        self.guardrails.iter().map(Guardrail::info).collect()
    }

    /// Look up a guardrail by name.
    pub fn get(&self, name: &str) -> AppResult<GuardrailInfo> {
        self.guardrails
            .iter()
            .find(|g| g.name() == name)
            .map(Guardrail::info)
            .ok_or_else(|| AppError::NotFound(format!("guardrail '{name}'")))
    }
}
