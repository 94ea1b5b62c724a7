use axum::http::StatusCode;
use axum::routing::get;
use axum::{extract::State, Json, Router};

use super::application::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserResponse};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery, CurrentIdentity};
use crate::api::fallback::method_not_allowed;
use crate::api::state::AppState;
use crate::shared::application::{PageRequest, PaginatedResult};
use crate::shared::errors::AppResult;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/users/me",
            get(get_me).patch(update_me).fallback(method_not_allowed),
        )
        .route(
            "/users/:username",
            get(get_user)
                .patch(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
}

pub async fn list_users(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> AppResult<Json<PaginatedResult<UserResponse>>> {
    let request = PageRequest::resolve(query.limit, query.offset, &state.pagination)?;
    let page = state
        .users
        .list_users(&identity, query.search, request)
        .await?;
    Ok(Json(PaginatedResult::new(
        page.map(UserResponse::from),
        &request,
    )))
}

pub async fn create_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.create_user(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(username): ApiPath<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(&identity, &username).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(username): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .update_user(&identity, &username, request)
        .await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(username): ApiPath<String>,
) -> AppResult<StatusCode> {
    state.users.delete_user(&identity, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_me(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_me(&identity).await?;
    Ok(Json(user.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.update_me(&identity, request).await?;
    Ok(Json(user.into()))
}
