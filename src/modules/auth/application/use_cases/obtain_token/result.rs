use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ObtainTokenResult {
    pub token: String,
}
