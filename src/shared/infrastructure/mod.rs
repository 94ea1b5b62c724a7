/// Shared infrastructure concerns
///
/// This module contains infrastructure implementations that are shared across
/// multiple bounded contexts (modules).
pub mod database;
pub mod query;

// Re-exports for convenience
pub use database::{Database, PoolStatus};
