pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

// Re-export commonly used items
pub use application::UserService;
pub use domain::{User, UserRepository, UserRole};
