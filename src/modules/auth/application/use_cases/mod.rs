pub mod obtain_token;
pub mod register_user;

pub use obtain_token::{ObtainTokenCommand, ObtainTokenHandler, ObtainTokenResult};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
