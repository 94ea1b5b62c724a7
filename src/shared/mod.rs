// Shared kernel used by every bounded context in `modules`.

pub mod application; // Shared application layer patterns
pub mod config; // Environment-driven settings
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database, query helpers)
pub mod utils; // Logging
pub mod validation; // Field validation rules

// Re-exports for convenience
pub use config::AppConfig;
pub use infrastructure::database::Database;
