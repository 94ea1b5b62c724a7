use std::sync::Arc;

use uuid::Uuid;

use super::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::log_info;
use crate::modules::access::{ensure, Action, Identity, Resource};
use crate::modules::reviews::domain::{
    Comment, CommentDetails, CommentRepository, ReviewRepository,
};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::Validator;

/// Comments nested under a review, which is itself nested under a title.
pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    validator: Arc<Validator>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        validator: Arc<Validator>,
    ) -> Self {
        Self {
            comment_repo,
            review_repo,
            validator,
        }
    }

    pub async fn list(
        &self,
        title_id: &Uuid,
        review_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<CommentDetails>> {
        self.require_review(title_id, review_id).await?;
        self.comment_repo.list_for_review(review_id, page).await
    }

    pub async fn get(
        &self,
        title_id: &Uuid,
        review_id: &Uuid,
        comment_id: &Uuid,
    ) -> AppResult<CommentDetails> {
        self.require_review(title_id, review_id).await?;
        self.require_comment(review_id, comment_id).await
    }

    pub async fn create(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        review_id: &Uuid,
        request: CreateCommentRequest,
    ) -> AppResult<CommentDetails> {
        ensure(identity, &Resource::ReviewThread, Action::Create)?;
        let author_id = identity
            .principal()
            .map(|p| p.user_id)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
        self.require_review(title_id, review_id).await?;

        self.validator.validate_text(&request.text).into_result()?;

        let comment = Comment::new(*review_id, author_id, request.text);
        let saved = self.comment_repo.insert(&comment).await?;
        log_info!(
            "Comment {} by '{}' on review {}",
            saved.comment.id,
            saved.author_username,
            review_id
        );
        Ok(saved)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        review_id: &Uuid,
        comment_id: &Uuid,
        request: UpdateCommentRequest,
    ) -> AppResult<CommentDetails> {
        ensure(identity, &Resource::ReviewThread, Action::Update)?;
        self.require_review(title_id, review_id).await?;
        let current = self.require_comment(review_id, comment_id).await?;
        ensure(
            identity,
            &Resource::Comment {
                author_id: current.comment.author_id,
            },
            Action::Update,
        )?;

        let mut comment = current.comment;
        if let Some(text) = request.text {
            self.validator.validate_text(&text).into_result()?;
            comment.text = text;
        }

        self.comment_repo.update(&comment).await
    }

    pub async fn delete(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        review_id: &Uuid,
        comment_id: &Uuid,
    ) -> AppResult<()> {
        ensure(identity, &Resource::ReviewThread, Action::Delete)?;
        self.require_review(title_id, review_id).await?;
        let current = self.require_comment(review_id, comment_id).await?;
        ensure(
            identity,
            &Resource::Comment {
                author_id: current.comment.author_id,
            },
            Action::Delete,
        )?;

        self.comment_repo.delete(comment_id).await?;
        log_info!("Deleted comment {}", comment_id);
        Ok(())
    }

    /// The review must exist and belong to the title in the path.
    async fn require_review(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<()> {
        match self.review_repo.find(title_id, review_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Review {} not found", review_id))),
        }
    }

    async fn require_comment(
        &self,
        review_id: &Uuid,
        comment_id: &Uuid,
    ) -> AppResult<CommentDetails> {
        self.comment_repo
            .find(review_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }
}
