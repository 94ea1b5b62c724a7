use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::auth::application::ports::{MailDispatcher, OutgoingMail};
use crate::modules::auth::domain::ConfirmationCode;
use crate::modules::users::domain::{User, UserRepository};
use crate::shared::config::MailSettings;
use crate::shared::validation::Validator;
use crate::shared::{application::use_case::UseCase, errors::AppError, errors::AppResult};
use crate::{log_debug, log_info};

use super::{command::RegisterUserCommand, result::RegisterUserResult};

/// Creates (or reuses) an account and mails it a fresh confirmation code.
///
/// Registering the same username/email pair again is idempotent apart from
/// replacing the outstanding code.
pub struct RegisterUserHandler {
    user_repository: Arc<dyn UserRepository>,
    mail_dispatcher: Arc<dyn MailDispatcher>,
    validator: Arc<Validator>,
    mail_settings: MailSettings,
}

impl RegisterUserHandler {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        mail_dispatcher: Arc<dyn MailDispatcher>,
        validator: Arc<Validator>,
        mail_settings: MailSettings,
    ) -> Self {
        Self {
            user_repository,
            mail_dispatcher,
            validator,
            mail_settings,
        }
    }

    async fn find_or_create(&self, command: &RegisterUserCommand) -> AppResult<(User, bool)> {
        if let Some(existing) = self
            .user_repository
            .find_by_username(&command.username)
            .await?
        {
            if existing.email == command.email {
                return Ok((existing, false));
            }
            return Err(AppError::field(
                "username",
                "This username is already registered with a different email",
            ));
        }

        if self
            .user_repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AppError::field(
                "email",
                "This email is already registered with a different username",
            ));
        }

        let user = User::new(
            command.username.clone(),
            command.email.clone(),
            self.validator.default_role(),
        );
        let saved = self.user_repository.insert(&user).await?;
        Ok((saved, true))
    }
}

#[async_trait]
impl UseCase<RegisterUserCommand, RegisterUserResult> for RegisterUserHandler {
    async fn execute(&self, command: RegisterUserCommand) -> AppResult<RegisterUserResult> {
        self.validator
            .validate_username(&command.username)
            .merge(self.validator.validate_email(&command.email))
            .into_result()?;

        let (user, was_created) = self.find_or_create(&command).await?;

        // A new code replaces whatever was outstanding
        let code = ConfirmationCode::generate();
        self.user_repository
            .store_confirmation(&user.id, code.seal(Utc::now()))
            .await?;

        self.mail_dispatcher
            .send(OutgoingMail {
                from: self.mail_settings.default_from_email.clone(),
                to: user.email.clone(),
                subject: "Confirmation code".to_string(),
                body: format!("Your confirmation code: {}", code.as_str()),
            })
            .await?;

        if was_created {
            log_info!("Registered user '{}'", user.username);
        } else {
            log_debug!("Re-issued confirmation code for '{}'", user.username);
        }

        Ok(RegisterUserResult {
            username: user.username,
            email: user.email,
            was_created,
        })
    }
}
