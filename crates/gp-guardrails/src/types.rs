//! Type definitions for the guardrails engine

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which side of the generation call a guardrail applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailDirection {
    Input,
    Output,
}

impl std::fmt::Display for GuardrailDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// A single rule as declared in configuration.
///
/// The tag set is closed: an unknown `type` fails deserialization, so bad
/// config is rejected at startup rather than at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Inclusive character-count bounds; either bound may be absent.
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Regex rule. Without `replace_with` a match is a violation; with it,
    /// every match is substituted and the rule never fails.
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        replace_with: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_message: Option<String>,
    },
}

/// A guardrail as declared in configuration: a name, a direction, and an
/// ordered list of rules.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuardrailSpec {
    pub name: String,
    pub guardrail_type: GuardrailDirection,
    #[serde(default)]
    pub description: String,
    pub rules: Vec<RuleConfig>,
}

/// Result of evaluating one rule against a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    Fail(String),
    Transformed(String),
}

/// A single rule violation, in rule order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Violation {
    /// Name of the guardrail whose rule failed
    pub guardrail: String,
    /// Rule kind identifier ("length", "pattern")
    pub rule: String,
    /// Human-readable reason
    pub message: String,
}

/// Result of running a text through one or more guardrails
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuardrailReport {
    /// True when no validation rule failed
    pub passed: bool,
    /// The final text after all transformations, returned even on failure
    /// so callers can see what sanitization occurred
    pub text: String,
    /// Every validation failure, in rule order
    pub violations: Vec<Violation>,
}

impl GuardrailReport {
    /// A passing report for text no guardrail applies to.
    pub fn clean(text: impl Into<String>) -> Self {
        Self {
            passed: true,
            text: text.into(),
            violations: Vec::new(),
        }
    }

    /// First violation message, if any.
    pub fn first_violation(&self) -> Option<&str> {
        self.violations.first().map(|v| v.message.as_str())
    }
}

/// Summary of a configured guardrail, as listed over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuardrailInfo {
    pub name: String,
    pub guardrail_type: GuardrailDirection,
    pub description: String,
    pub rule_count: usize,
}
