use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::reviews::domain::entities::{Review, ReviewDetails};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews of a title, oldest first.
    async fn list_for_title(&self, title_id: &Uuid, page: PageRequest)
        -> AppResult<Page<ReviewDetails>>;

    /// Only matches when the review belongs to `title_id`.
    async fn find(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<Option<ReviewDetails>>;

    async fn exists_for_author(&self, title_id: &Uuid, author_id: &Uuid) -> AppResult<bool>;

    /// A second review by the same author for the same title is a
    /// `ValidationError`, even when two inserts race.
    async fn insert(&self, review: &Review) -> AppResult<ReviewDetails>;
    async fn update(&self, review: &Review) -> AppResult<ReviewDetails>;
    async fn delete(&self, review_id: &Uuid) -> AppResult<()>;
}
