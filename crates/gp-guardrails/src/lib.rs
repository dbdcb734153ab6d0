//! Guardrails: rule-based validation and sanitization of LLM text
//!
//! A guardrail is a named, ordered list of rules applied to input (before
//! generation) or output (after generation). Rules either validate
//! (length bounds, forbidden patterns) or transform (pattern
//! substitution); transformations chain, and every validation failure is
//! collected rather than short-circuiting.
//!
//! # Architecture
//!
//! - **Rules**: closed set of kinds, compiled once at load; bad regexes
//!   and unknown kinds are startup errors, never evaluation errors
//! - **Guardrail**: applies its rules in order, threading transformed text
//! - **Registry**: the startup-built, read-only set of guardrails,
//!   partitioned by direction and addressable by name

pub mod guardrail;
pub mod registry;
pub mod rules;
pub mod types;

pub use guardrail::Guardrail;
pub use registry::GuardrailRegistry;
pub use rules::CompiledRule;
pub use types::*;
