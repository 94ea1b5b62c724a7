//! Sign-up, confirmation codes and bearer tokens.
pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::{Authenticator, MailDispatcher, OutgoingMail};
pub use infrastructure::{LogMailDispatcher, TokenService};
