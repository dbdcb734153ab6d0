//! Rule compilation and evaluation
//!
//! Rules compile once at load time; evaluation is a pure function of the
//! compiled rule and the text.

use regex::Regex;

use gp_types::{AppError, AppResult};

use crate::types::{RuleConfig, RuleOutcome};

/// A rule compiled for evaluation. Immutable once built.
#[derive(Debug, Clone)]
pub enum CompiledRule {
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    Pattern {
        regex: Regex,
        replacement: Option<String>,
        message: String,
    },
}

impl CompiledRule {
    /// Compile a configured rule, failing fast on defects the evaluator
    /// must never see: invalid regexes and length rules with no bounds.
    pub fn compile(config: &RuleConfig) -> AppResult<Self> {
        match config {
            RuleConfig::Length {
                min_length,
                max_length,
            } => {
                if min_length.is_none() && max_length.is_none() {
                    return Err(AppError::Config(
                        "length rule must set min_length or max_length".to_string(),
                    ));
                }
                if let (Some(min), Some(max)) = (min_length, max_length) {
                    if min > max {
                        return Err(AppError::Config(format!(
                            "length rule has min_length {min} greater than max_length {max}"
                        )));
                    }
                }
                Ok(Self::Length {
                    min: *min_length,
                    max: *max_length,
                })
            }
            RuleConfig::Pattern {
                pattern,
                replace_with,
                error_message,
            } => {
                let regex = Regex::new(pattern).map_err(|e| {
                    AppError::Config(format!("invalid pattern '{pattern}': {e}"))
                })?;
                let message = error_message.clone().unwrap_or_else(|| {
                    format!("text matches forbidden pattern '{pattern}'")
                });
                Ok(Self::Pattern {
                    regex,
                    replacement: replace_with.clone(),
                    message,
                })
            }
        }
    }

    /// Rule kind identifier used in violation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Length { .. } => "length",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// Evaluate this rule against a text.
    ///
    /// Length counts characters (Unicode scalar values), with inclusive
    /// bounds; an absent bound never fails. A pattern rule with a
    /// replacement substitutes every match and never fails; without one,
    /// any match is a violation.
    pub fn evaluate(&self, text: &str) -> RuleOutcome {
        match self {
            Self::Length { min, max } => {
                let length = text.chars().count();
                if let Some(min) = min {
                    if length < *min {
                        return RuleOutcome::Fail(format!(
                            "text length {length} is below the minimum of {min}"
                        ));
                    }
                }
                if let Some(max) = max {
                    if length > *max {
                        return RuleOutcome::Fail(format!(
                            "text length {length} exceeds the maximum of {max}"
                        ));
                    }
                }
                RuleOutcome::Pass
            }
            Self::Pattern {
                regex,
                replacement,
                message,
            } => match replacement {
                Some(replacement) => {
                    RuleOutcome::Transformed(regex.replace_all(text, replacement.as_str()).into_owned())
                }
                None => {
                    if regex.is_match(text) {
                        RuleOutcome::Fail(message.clone())
                    } else {
                        RuleOutcome::Pass
                    }
                }
            },
        }
    }
}
