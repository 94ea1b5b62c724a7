use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{extract::State, Json, Router};
use uuid::Uuid;

use super::application::{
    CreateTaxonomyRequest, CreateTitleRequest, TaxonomyListQuery, TaxonomyResponse,
    TitleListQuery, TitleResponse, UpdateTitleRequest,
};
use super::domain::TaxonomyKind;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery, CurrentIdentity};
use crate::api::fallback::method_not_allowed;
use crate::api::state::AppState;
use crate::modules::access::Identity;
use crate::shared::application::{PageRequest, PaginatedResult};
use crate::shared::errors::AppResult;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/titles",
            get(list_titles)
                .post(create_title)
                .fallback(method_not_allowed),
        )
        .route(
            "/titles/:title_id",
            get(get_title)
                .patch(update_title)
                .delete(delete_title)
                .fallback(method_not_allowed),
        )
        .route(
            "/categories",
            get(list_categories)
                .post(create_category)
                .fallback(method_not_allowed),
        )
        // Single entries are only ever deleted
        .route(
            "/categories/:slug",
            delete(delete_category).fallback(method_not_allowed),
        )
        .route(
            "/genres",
            get(list_genres)
                .post(create_genre)
                .fallback(method_not_allowed),
        )
        .route(
            "/genres/:slug",
            delete(delete_genre).fallback(method_not_allowed),
        )
}

// ============= TITLES =============

pub async fn list_titles(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiQuery(query): ApiQuery<TitleListQuery>,
) -> AppResult<Json<PaginatedResult<TitleResponse>>> {
    let request = PageRequest::resolve(query.limit, query.offset, &state.pagination)?;
    let page = state.titles.list(query.filter(), request).await?;
    Ok(Json(PaginatedResult::new(
        page.map(TitleResponse::from),
        &request,
    )))
}

pub async fn get_title(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiPath(title_id): ApiPath<Uuid>,
) -> AppResult<Json<TitleResponse>> {
    let title = state.titles.get(&title_id).await?;
    Ok(Json(title.into()))
}

pub async fn create_title(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(request): ApiJson<CreateTitleRequest>,
) -> AppResult<(StatusCode, Json<TitleResponse>)> {
    let title = state.titles.create(&identity, request).await?;
    Ok((StatusCode::CREATED, Json(title.into())))
}

pub async fn update_title(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(title_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTitleRequest>,
) -> AppResult<Json<TitleResponse>> {
    let title = state.titles.update(&identity, &title_id, request).await?;
    Ok(Json(title.into()))
}

pub async fn delete_title(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(title_id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    state.titles.delete(&identity, &title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============= CATEGORIES & GENRES =============

async fn list_taxonomy(
    state: &AppState,
    kind: TaxonomyKind,
    query: TaxonomyListQuery,
) -> AppResult<Json<PaginatedResult<TaxonomyResponse>>> {
    let request = PageRequest::resolve(query.limit, query.offset, &state.pagination)?;
    let page = state.taxonomies.list(kind, query.search, request).await?;
    Ok(Json(PaginatedResult::new(
        page.map(TaxonomyResponse::from),
        &request,
    )))
}

async fn create_taxonomy(
    state: &AppState,
    identity: &Identity,
    kind: TaxonomyKind,
    request: CreateTaxonomyRequest,
) -> AppResult<(StatusCode, Json<TaxonomyResponse>)> {
    let entry = state.taxonomies.create(identity, kind, request).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn list_categories(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiQuery(query): ApiQuery<TaxonomyListQuery>,
) -> AppResult<Json<PaginatedResult<TaxonomyResponse>>> {
    list_taxonomy(&state, TaxonomyKind::Category, query).await
}

pub async fn create_category(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(request): ApiJson<CreateTaxonomyRequest>,
) -> AppResult<(StatusCode, Json<TaxonomyResponse>)> {
    create_taxonomy(&state, &identity, TaxonomyKind::Category, request).await
}

pub async fn delete_category(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<StatusCode> {
    state
        .taxonomies
        .delete(&identity, TaxonomyKind::Category, &slug)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_genres(
    State(state): State<AppState>,
    CurrentIdentity(_): CurrentIdentity,
    ApiQuery(query): ApiQuery<TaxonomyListQuery>,
) -> AppResult<Json<PaginatedResult<TaxonomyResponse>>> {
    list_taxonomy(&state, TaxonomyKind::Genre, query).await
}

pub async fn create_genre(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiJson(request): ApiJson<CreateTaxonomyRequest>,
) -> AppResult<(StatusCode, Json<TaxonomyResponse>)> {
    create_taxonomy(&state, &identity, TaxonomyKind::Genre, request).await
}

pub async fn delete_genre(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<StatusCode> {
    state
        .taxonomies
        .delete(&identity, TaxonomyKind::Genre, &slug)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
