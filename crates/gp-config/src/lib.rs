//! Configuration management
//!
//! Loads the service configuration from a JSON file once at startup and
//! validates it eagerly: bad regexes, unknown rule kinds, duplicate
//! guardrail names, and out-of-range cache settings are all fatal before
//! the server binds. The loaded configuration is immutable for the life
//! of the process.

mod storage;
pub mod types;
mod validation;

pub use storage::load_config;
pub use types::*;
pub use validation::validate_config;
