use serde::Deserialize;

/// Sign-up request: who to register and where to send the code
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
}

impl RegisterUserCommand {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
