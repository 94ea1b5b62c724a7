use std::sync::Arc;

use crate::modules::access::{Identity, Principal};
use crate::modules::auth::infrastructure::TokenService;
use crate::modules::users::domain::UserRepository;
use crate::shared::errors::{AppError, AppResult};

/// Resolves an `Authorization` header into the identity of the caller.
pub struct Authenticator {
    token_service: Arc<TokenService>,
    user_repository: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(token_service: Arc<TokenService>, user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            token_service,
            user_repository,
        }
    }

    /// No header means anonymous. A header that is present but cannot be
    /// resolved to a live account is an authentication failure.
    pub async fn identify(&self, authorization: Option<&str>) -> AppResult<Identity> {
        let Some(header) = authorization else {
            return Ok(Identity::Anonymous);
        };

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string())
            })?;

        let claims = self.token_service.verify(token)?;

        // Reload so role changes apply to tokens already issued
        let user = self
            .user_repository
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(Identity::Authenticated(Principal::from(&user)))
    }
}
