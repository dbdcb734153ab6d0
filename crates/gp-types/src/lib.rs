pub mod errors;
pub mod params;

pub use errors::{AppError, AppResult};
pub use params::GenerationParams;
