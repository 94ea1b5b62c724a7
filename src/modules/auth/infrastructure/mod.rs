pub mod jwt;
pub mod mailer;

pub use jwt::TokenService;
pub use mailer::LogMailDispatcher;
