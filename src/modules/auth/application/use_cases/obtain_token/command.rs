use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ObtainTokenCommand {
    pub username: String,
    pub confirmation_code: String,
}

impl ObtainTokenCommand {
    pub fn new(username: impl Into<String>, confirmation_code: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            confirmation_code: confirmation_code.into(),
        }
    }
}
