use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::modules::auth::domain::{code_hash, issued_after};
use crate::modules::auth::infrastructure::TokenService;
use crate::modules::users::domain::UserRepository;
use crate::shared::validation::ValidationResult;
use crate::shared::{application::use_case::UseCase, errors::AppError, errors::AppResult};
use crate::{log_info, log_warn};

use super::{command::ObtainTokenCommand, result::ObtainTokenResult};

const INVALID_CREDENTIALS: &str = "Invalid username or confirmation code";

/// Exchanges a confirmation code for a bearer token. Codes are single use.
pub struct ObtainTokenHandler {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
    code_ttl: Duration,
}

impl ObtainTokenHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        code_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            code_ttl,
        }
    }
}

#[async_trait]
impl UseCase<ObtainTokenCommand, ObtainTokenResult> for ObtainTokenHandler {
    async fn execute(&self, command: ObtainTokenCommand) -> AppResult<ObtainTokenResult> {
        let mut required = ValidationResult::valid();
        if command.username.is_empty() {
            required.add_error("username", "This field may not be blank");
        }
        if command.confirmation_code.is_empty() {
            required.add_error("confirmation_code", "This field may not be blank");
        }
        required.into_result()?;

        // Every failure below answers identically so usernames cannot be probed
        let rejected = || AppError::ValidationError(INVALID_CREDENTIALS.to_string());

        let Some(user) = self
            .user_repository
            .find_by_username(&command.username)
            .await?
        else {
            log_warn!("Token requested for unknown user");
            return Err(rejected());
        };

        // Match and clear in one storage call so a code is honoured once
        let consumed = self
            .user_repository
            .consume_confirmation(
                &user.id,
                &code_hash(&command.confirmation_code),
                issued_after(Utc::now(), self.code_ttl),
            )
            .await?;
        if !consumed {
            log_warn!("Rejected confirmation code for '{}'", user.username);
            return Err(rejected());
        }

        let token = self.token_service.issue(&user)?;
        log_info!("Issued token for '{}'", user.username);

        Ok(ObtainTokenResult { token })
    }
}
