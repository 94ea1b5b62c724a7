use crate::modules::users::domain::entities::{StoredConfirmation, User};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Users ordered by username, optionally filtered by a username substring.
    async fn list(&self, search: Option<String>, page: PageRequest) -> AppResult<Page<User>>;

    /// Username/email collisions surface as field validation errors.
    async fn insert(&self, user: &User) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<User>;
    async fn delete(&self, id: &Uuid) -> AppResult<()>;

    // Confirmation codes for the sign-up flow
    async fn store_confirmation(&self, id: &Uuid, confirmation: StoredConfirmation)
        -> AppResult<()>;

    /// Clears the stored code if it matches `code_hash` and was issued at or
    /// after `issued_after`, in one step. `false` means nothing was consumed.
    async fn consume_confirmation(
        &self,
        id: &Uuid,
        code_hash: &str,
        issued_after: DateTime<Utc>,
    ) -> AppResult<bool>;
}
