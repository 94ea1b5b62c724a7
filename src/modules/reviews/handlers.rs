use axum::http::StatusCode;
use axum::routing::get;
use axum::{extract::State, Json, Router};
use uuid::Uuid;

use super::application::{
    CommentResponse, CreateCommentRequest, CreateReviewRequest, ReviewResponse,
    UpdateCommentRequest, UpdateReviewRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery, CurrentIdentity};
use crate::api::fallback::method_not_allowed;
use crate::api::state::AppState;
use crate::shared::application::{PageQuery, PaginatedResult};
use crate::shared::errors::AppResult;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/titles/:title_id/reviews",
            get(list_reviews)
                .post(create_review)
                .fallback(method_not_allowed),
        )
        .route(
            "/titles/:title_id/reviews/:review_id",
            get(get_review)
                .patch(update_review)
                .delete(delete_review)
                .fallback(method_not_allowed),
        )
        .route(
            "/titles/:title_id/reviews/:review_id/comments",
            get(list_comments)
                .post(create_comment)
                .fallback(method_not_allowed),
        )
        .route(
            "/titles/:title_id/reviews/:review_id/comments/:comment_id",
            get(get_comment)
                .patch(update_comment)
                .delete(delete_comment)
                .fallback(method_not_allowed),
        )
}

// ============= REVIEWS =============

pub async fn list_reviews(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiPath(title_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PaginatedResult<ReviewResponse>>> {
    let request = query.resolve(&state.pagination)?;
    let page = state.reviews.list(&title_id, request).await?;
    Ok(Json(PaginatedResult::new(
        page.map(ReviewResponse::from),
        &request,
    )))
}

pub async fn create_review(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(title_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state.reviews.create(&identity, &title_id, request).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn get_review(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiPath((title_id, review_id)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<Json<ReviewResponse>> {
    let review = state.reviews.get(&title_id, &review_id).await?;
    Ok(Json(review.into()))
}

pub async fn update_review(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath((title_id, review_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let review = state
        .reviews
        .update(&identity, &title_id, &review_id, request)
        .await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath((title_id, review_id)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .reviews
        .delete(&identity, &title_id, &review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============= COMMENTS =============

pub async fn list_comments(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiPath((title_id, review_id)): ApiPath<(Uuid, Uuid)>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PaginatedResult<CommentResponse>>> {
    let request = query.resolve(&state.pagination)?;
    let page = state.comments.list(&title_id, &review_id, request).await?;
    Ok(Json(PaginatedResult::new(
        page.map(CommentResponse::from),
        &request,
    )))
}

pub async fn create_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath((title_id, review_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let comment = state
        .comments
        .create(&identity, &title_id, &review_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

pub async fn get_comment(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> AppResult<Json<CommentResponse>> {
    let comment = state
        .comments
        .get(&title_id, &review_id, &comment_id)
        .await?;
    Ok(Json(comment.into()))
}

pub async fn update_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateCommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    let comment = state
        .comments
        .update(&identity, &title_id, &review_id, &comment_id, request)
        .await?;
    Ok(Json(comment.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath((title_id, review_id, comment_id)): ApiPath<(Uuid, Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .comments
        .delete(&identity, &title_id, &review_id, &comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
