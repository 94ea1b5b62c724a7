pub mod authenticator;
pub mod ports;
pub mod use_cases;

pub use authenticator::Authenticator;
pub use ports::{MailDispatcher, OutgoingMail};
pub use use_cases::{
    ObtainTokenCommand, ObtainTokenHandler, ObtainTokenResult, RegisterUserCommand,
    RegisterUserHandler, RegisterUserResult,
};
