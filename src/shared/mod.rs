// Shared kernel

pub mod errors; // Shared error types
pub mod utils; // Logging helpers

pub use errors::{AppError, AppResult};
