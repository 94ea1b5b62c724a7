pub mod user;

pub use user::{StoredConfirmation, User};
