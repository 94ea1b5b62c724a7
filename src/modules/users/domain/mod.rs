pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{StoredConfirmation, User};
pub use repositories::UserRepository;
pub use value_objects::UserRole;
