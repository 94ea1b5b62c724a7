mod command;
mod handler;
mod result;

pub use command::ObtainTokenCommand;
pub use handler::ObtainTokenHandler;
pub use result::ObtainTokenResult;
