use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{Title, TitleDraft, TitleFilter};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait TitleRepository: Send + Sync {
    /// Titles ordered by name, with category, genres and rating attached.
    async fn list(&self, filter: TitleFilter, page: PageRequest) -> AppResult<Page<Title>>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Title>>;
    async fn exists(&self, id: &Uuid) -> AppResult<bool>;

    /// Title row and genre links are written atomically.
    async fn insert(&self, draft: &TitleDraft) -> AppResult<Title>;
    /// Replaces every column and the full genre set.
    async fn update(&self, id: &Uuid, draft: &TitleDraft) -> AppResult<Title>;
    async fn delete(&self, id: &Uuid) -> AppResult<()>;
}
