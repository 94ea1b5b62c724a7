// Bounded contexts. Each one keeps the domain / application / infrastructure
// split and exposes its HTTP routes from `handlers.rs`.

pub mod access; // Role-based permission checks
pub mod auth; // Sign-up and bearer tokens
pub mod catalog; // Titles, categories, genres
pub mod reviews; // Reviews and comments
pub mod users; // Accounts and roles
