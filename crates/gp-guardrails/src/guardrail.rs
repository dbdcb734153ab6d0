//! A named, ordered chain of compiled rules

use gp_types::AppResult;
use tracing::debug;

use crate::rules::CompiledRule;
use crate::types::{GuardrailDirection, GuardrailInfo, GuardrailReport, GuardrailSpec, RuleOutcome, Violation};

/// A compiled guardrail: rules apply in declaration order, transformations
/// chain, and all validation failures are aggregated.
#[derive(Debug, Clone)]
pub struct Guardrail {
    name: String,
    direction: GuardrailDirection,
    description: String,
    rules: Vec<CompiledRule>,
}

impl Guardrail {
    /// Compile a configured guardrail, failing fast on any defective rule.
    pub fn compile(spec: &GuardrailSpec) -> AppResult<Self> {
        let rules = spec
            .rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            name: spec.name.clone(),
            direction: spec.guardrail_type,
            description: spec.description.clone(),
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> GuardrailDirection {
        self.direction
    }

    /// Run the text through every rule in order.
    ///
    /// A transforming rule's output becomes the next rule's input, and the
    /// final text is returned even when validation failed, so callers can
    /// inspect what sanitization occurred. Pure: no state is touched.
    pub fn check(&self, text: &str) -> GuardrailReport {
        let mut current = text.to_string();
        let mut violations = Vec::new();

        for rule in &self.rules {
            match rule.evaluate(&current) {
                RuleOutcome::Pass => {}
                RuleOutcome::Fail(message) => {
                    violations.push(Violation {
                        guardrail: self.name.clone(),
                        rule: rule.kind().to_string(),
                        message,
                    });
                }
                RuleOutcome::Transformed(new_text) => {
                    current = new_text;
                }
            }
        }

        if !violations.is_empty() {
            debug!(
                guardrail = %self.name,
                violations = violations.len(),
                "guardrail check failed"
            );
        }

        GuardrailReport {
            passed: violations.is_empty(),
            text: current,
            violations,
        }
    }

    /// Summary for listings and the detail endpoint.
    pub fn info(&self) -> GuardrailInfo {
        GuardrailInfo {
            name: self.name.clone(),
            guardrail_type: self.direction,
            description: self.description.clone(),
            rule_count: self.rules.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleConfig;

    fn spec(name: &str, rules: Vec<RuleConfig>) -> GuardrailSpec {
        GuardrailSpec {
            name: name.to_string(),
            guardrail_type: GuardrailDirection::Input,
            description: String::new(),
            rules,
        }
    }

    #[test]
    fn test_all_rules_pass() {
        let guardrail = Guardrail::compile(&spec(
            "basic",
            vec![RuleConfig::Length {
                min_length: Some(1),
                max_length: Some(100),
            }],
        ))
        .unwrap();

        let report = guardrail.check("hello world");
        assert!(report.passed);
        assert_eq!(report.text, "hello world");
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_violations_aggregate_in_rule_order() {
        let guardrail = Guardrail::compile(&spec(
            "strict",
            vec![
                RuleConfig::Length {
                    min_length: Some(50),
                    max_length: None,
                },
                RuleConfig::Pattern {
                    pattern: "forbidden".to_string(),
                    replace_with: None,
                    error_message: Some("contains a forbidden word".to_string()),
                },
            ],
        ))
        .unwrap();

        let report = guardrail.check("short forbidden text");
        assert!(!report.passed);
        // One violation per failing rule, in declaration order
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].rule, "length");
        assert_eq!(report.violations[1].rule, "pattern");
        assert_eq!(report.violations[1].message, "contains a forbidden word");
        assert!(report.violations.iter().all(|v| v.guardrail == "strict"));
    }

    #[test]
    fn test_transformations_chain() {
        // The first rule's substitution feeds the second rule's match
        let guardrail = Guardrail::compile(&spec(
            "sanitize",
            vec![
                RuleConfig::Pattern {
                    pattern: "aaa".to_string(),
                    replace_with: Some("bbb".to_string()),
                    error_message: None,
                },
                RuleConfig::Pattern {
                    pattern: "bbb".to_string(),
                    replace_with: Some("ccc".to_string()),
                    error_message: None,
                },
            ],
        ))
        .unwrap();

        let report = guardrail.check("xx aaa yy");
        assert!(report.passed);
        assert_eq!(report.text, "xx ccc yy");
    }

    #[test]
    fn test_transformed_text_returned_on_failure() {
        let guardrail = Guardrail::compile(&spec(
            "redact-then-check",
            vec![
                RuleConfig::Pattern {
                    pattern: r"\d+".to_string(),
                    replace_with: Some("#".to_string()),
                    error_message: None,
                },
                RuleConfig::Length {
                    min_length: Some(100),
                    max_length: None,
                },
            ],
        ))
        .unwrap();

        let report = guardrail.check("code 1234");
        assert!(!report.passed);
        // Sanitization is still visible to the caller
        assert_eq!(report.text, "code #");
    }

    #[test]
    fn test_length_applies_to_transformed_text() {
        // Redaction shrinks the text below the minimum
        let guardrail = Guardrail::compile(&spec(
            "shrinking",
            vec![
                RuleConfig::Pattern {
                    pattern: "[0-9]".to_string(),
                    replace_with: Some("".to_string()),
                    error_message: None,
                },
                RuleConfig::Length {
                    min_length: Some(5),
                    max_length: None,
                },
            ],
        ))
        .unwrap();

        let report = guardrail.check("12345678");
        assert!(!report.passed);
        assert_eq!(report.text, "");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, "length");
    }

    #[test]
    fn test_compile_fails_on_bad_rule() {
        let err = Guardrail::compile(&spec(
            "broken",
            vec![RuleConfig::Pattern {
                pattern: "(unclosed".to_string(),
                replace_with: None,
                error_message: None,
            }],
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_info() {
        let guardrail = Guardrail::compile(&GuardrailSpec {
            name: "output-filter".to_string(),
            guardrail_type: GuardrailDirection::Output,
            description: "filters generated text".to_string(),
            rules: vec![RuleConfig::Length {
                min_length: None,
                max_length: Some(10),
            }],
        })
        .unwrap();

        let info = guardrail.info();
        assert_eq!(info.name, "output-filter");
        assert_eq!(info.guardrail_type, GuardrailDirection::Output);
        assert_eq!(info.rule_count, 1);
    }
}
