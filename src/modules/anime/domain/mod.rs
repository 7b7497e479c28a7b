pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::RawAnime;
