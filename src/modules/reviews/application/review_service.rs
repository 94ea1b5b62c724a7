use std::sync::Arc;

use uuid::Uuid;

use super::dto::{CreateReviewRequest, UpdateReviewRequest};
use crate::modules::access::{ensure, Action, Identity, Resource};
use crate::modules::catalog::domain::TitleRepository;
use crate::modules::reviews::domain::{Review, ReviewDetails, ReviewRepository};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::{ValidationResult, Validator};
use crate::{log_debug, log_info};

/// Reviews nested under a title.
///
/// Checks run in a fixed order: the collection-level gate (anonymous writers
/// get 401 before any lookup), then existence (404), then ownership (403).
pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    title_repo: Arc<dyn TitleRepository>,
    validator: Arc<Validator>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        title_repo: Arc<dyn TitleRepository>,
        validator: Arc<Validator>,
    ) -> Self {
        Self {
            review_repo,
            title_repo,
            validator,
        }
    }

    pub async fn list(&self, title_id: &Uuid, page: PageRequest) -> AppResult<Page<ReviewDetails>> {
        self.require_title(title_id).await?;
        self.review_repo.list_for_title(title_id, page).await
    }

    pub async fn get(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<ReviewDetails> {
        self.require_title(title_id).await?;
        self.require_review(title_id, review_id).await
    }

    pub async fn create(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        request: CreateReviewRequest,
    ) -> AppResult<ReviewDetails> {
        ensure(identity, &Resource::ReviewThread, Action::Create)?;
        let author_id = identity
            .principal()
            .map(|p| p.user_id)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
        self.require_title(title_id).await?;

        self.validator
            .validate_text(&request.text)
            .merge(self.validator.validate_score(request.score))
            .into_result()?;
        let score = to_score(request.score)?;

        if self.review_repo.exists_for_author(title_id, &author_id).await? {
            return Err(AppError::ValidationError(
                "You have already reviewed this title".to_string(),
            ));
        }

        let review = Review::new(*title_id, author_id, request.text, score);
        let saved = self.review_repo.insert(&review).await?;
        log_info!(
            "Review {} by '{}' on title {}",
            saved.review.id,
            saved.author_username,
            title_id
        );
        Ok(saved)
    }

    /// Uniqueness is not rechecked: an update never changes author or title.
    pub async fn update(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        review_id: &Uuid,
        request: UpdateReviewRequest,
    ) -> AppResult<ReviewDetails> {
        ensure(identity, &Resource::ReviewThread, Action::Update)?;
        self.require_title(title_id).await?;
        let current = self.require_review(title_id, review_id).await?;
        ensure(
            identity,
            &Resource::Review {
                author_id: current.review.author_id,
            },
            Action::Update,
        )?;

        let mut result = ValidationResult::valid();
        if let Some(text) = &request.text {
            result = result.merge(self.validator.validate_text(text));
        }
        if let Some(score) = request.score {
            result = result.merge(self.validator.validate_score(score));
        }
        result.into_result()?;

        let mut review = current.review;
        if let Some(text) = request.text {
            review.text = text;
        }
        if let Some(score) = request.score {
            review.score = to_score(score)?;
        }

        log_debug!("Updating review {}", review.id);
        self.review_repo.update(&review).await
    }

    pub async fn delete(
        &self,
        identity: &Identity,
        title_id: &Uuid,
        review_id: &Uuid,
    ) -> AppResult<()> {
        ensure(identity, &Resource::ReviewThread, Action::Delete)?;
        self.require_title(title_id).await?;
        let current = self.require_review(title_id, review_id).await?;
        ensure(
            identity,
            &Resource::Review {
                author_id: current.review.author_id,
            },
            Action::Delete,
        )?;

        self.review_repo.delete(review_id).await?;
        log_info!("Deleted review {}", review_id);
        Ok(())
    }

    async fn require_title(&self, title_id: &Uuid) -> AppResult<()> {
        if self.title_repo.exists(title_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Title {} not found", title_id)))
        }
    }

    async fn require_review(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<ReviewDetails> {
        self.review_repo
            .find(title_id, review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))
    }
}

fn to_score(score: i32) -> AppResult<i16> {
    i16::try_from(score).map_err(|_| AppError::field("score", "Score is out of range"))
}
