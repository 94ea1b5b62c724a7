use std::sync::Arc;

use super::dto::{CreateUserRequest, UpdateUserRequest};
use crate::modules::access::{ensure, Action, Identity, Resource};
use crate::modules::users::domain::{User, UserRepository};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::{ValidationResult, Validator};
use crate::{log_debug, log_info};

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    validator: Arc<Validator>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, validator: Arc<Validator>) -> Self {
        Self {
            user_repo,
            validator,
        }
    }

    pub async fn list_users(
        &self,
        identity: &Identity,
        search: Option<String>,
        page: PageRequest,
    ) -> AppResult<Page<User>> {
        ensure(identity, &Resource::UserDirectory, Action::Read)?;
        let search = search.filter(|s| !s.trim().is_empty());
        self.user_repo.list(search, page).await
    }

    pub async fn get_user(&self, identity: &Identity, username: &str) -> AppResult<User> {
        ensure(identity, &Resource::UserDirectory, Action::Read)?;
        self.require_by_username(username).await
    }

    pub async fn create_user(
        &self,
        identity: &Identity,
        request: CreateUserRequest,
    ) -> AppResult<User> {
        ensure(identity, &Resource::UserDirectory, Action::Create)?;

        self.validator
            .validate_username(&request.username)
            .merge(self.validator.validate_email(&request.email))
            .merge(self.validate_profile(
                Some(&request.first_name),
                Some(&request.last_name),
            ))
            .into_result()?;

        let mut conflicts = ValidationResult::valid();
        if self.user_repo.find_by_username(&request.username).await?.is_some() {
            conflicts.add_error("username", "A user with that username already exists");
        }
        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            conflicts.add_error("email", "A user with that email already exists");
        }
        conflicts.into_result()?;

        let role = request.role.unwrap_or_else(|| self.validator.default_role());
        let mut user = User::new(request.username, request.email, role);
        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.bio = request.bio;

        let saved = self.user_repo.insert(&user).await?;
        log_info!("Created user '{}' with role {}", saved.username, saved.role);
        Ok(saved)
    }

    pub async fn update_user(
        &self,
        identity: &Identity,
        username: &str,
        request: UpdateUserRequest,
    ) -> AppResult<User> {
        ensure(identity, &Resource::UserDirectory, Action::Update)?;
        let user = self.require_by_username(username).await?;
        self.apply_update(user, request).await
    }

    pub async fn delete_user(&self, identity: &Identity, username: &str) -> AppResult<()> {
        ensure(identity, &Resource::UserDirectory, Action::Delete)?;
        let user = self.require_by_username(username).await?;
        self.user_repo.delete(&user.id).await?;
        log_info!("Deleted user '{}'", user.username);
        Ok(())
    }

    pub async fn get_me(&self, identity: &Identity) -> AppResult<User> {
        ensure(identity, &Resource::OwnAccount, Action::Read)?;
        self.require_current(identity).await
    }

    /// Self-service update. Only admins may change their own role; for
    /// everyone else a submitted role is ignored.
    pub async fn update_me(
        &self,
        identity: &Identity,
        mut request: UpdateUserRequest,
    ) -> AppResult<User> {
        ensure(identity, &Resource::OwnAccount, Action::Update)?;
        let user = self.require_current(identity).await?;

        if !user.is_admin() && request.role.take().is_some() {
            log_debug!("Ignoring role change requested by '{}'", user.username);
        }

        self.apply_update(user, request).await
    }

    async fn apply_update(&self, mut user: User, request: UpdateUserRequest) -> AppResult<User> {
        let mut result = self.validate_profile(
            request.first_name.as_deref(),
            request.last_name.as_deref(),
        );

        if let Some(username) = &request.username {
            if *username != user.username {
                result = result.merge(self.validator.validate_username(username));
                if self.user_repo.find_by_username(username).await?.is_some() {
                    result.add_error("username", "A user with that username already exists");
                }
            }
        }
        if let Some(email) = &request.email {
            if *email != user.email {
                result = result.merge(self.validator.validate_email(email));
                if self.user_repo.find_by_email(email).await?.is_some() {
                    result.add_error("email", "A user with that email already exists");
                }
            }
        }
        result.into_result()?;

        if let Some(username) = request.username {
            user.username = username;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(bio) = request.bio {
            user.bio = bio;
        }
        if let Some(role) = request.role {
            user.role = role;
        }

        self.user_repo.update(&user).await
    }

    fn validate_profile(&self, first_name: Option<&str>, last_name: Option<&str>) -> ValidationResult {
        let mut result = ValidationResult::valid();
        if let Some(first_name) = first_name {
            result = result.merge(self.validator.validate_person_name("first_name", first_name));
        }
        if let Some(last_name) = last_name {
            result = result.merge(self.validator.validate_person_name("last_name", last_name));
        }
        result
    }

    async fn require_by_username(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }

    async fn require_current(&self, identity: &Identity) -> AppResult<User> {
        let principal = identity.principal().ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided".to_string())
        })?;
        self.user_repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
