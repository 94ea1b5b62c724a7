pub mod claims;
pub mod confirmation;

pub use claims::Claims;
pub use confirmation::{code_hash, issued_after, ConfirmationCode};
