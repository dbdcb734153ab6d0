pub mod guardrails;
pub mod prediction;
pub mod similarity;
pub mod system;
