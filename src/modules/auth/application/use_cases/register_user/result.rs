use serde::Serialize;

/// Echo of the registered pair
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserResult {
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub was_created: bool, // false when an existing pending account was reused
}
