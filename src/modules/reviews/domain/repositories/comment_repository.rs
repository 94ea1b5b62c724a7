use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::reviews::domain::entities::{Comment, CommentDetails};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::AppResult;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list_for_review(
        &self,
        review_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<CommentDetails>>;
    async fn find(&self, review_id: &Uuid, comment_id: &Uuid)
        -> AppResult<Option<CommentDetails>>;
    async fn insert(&self, comment: &Comment) -> AppResult<CommentDetails>;
    async fn update(&self, comment: &Comment) -> AppResult<CommentDetails>;
    async fn delete(&self, comment_id: &Uuid) -> AppResult<()>;
}
