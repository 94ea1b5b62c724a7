use axum::routing::post;
use axum::{extract::State, Json, Router};

use super::application::{
    ObtainTokenCommand, ObtainTokenResult, RegisterUserCommand, RegisterUserResult,
};
use crate::api::extract::ApiJson;
use crate::api::fallback::method_not_allowed;
use crate::api::state::AppState;
use crate::shared::application::use_case::UseCase;
use crate::shared::errors::AppResult;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup).fallback(method_not_allowed))
        .route("/auth/token", post(obtain_token).fallback(method_not_allowed))
}

/// Always 200 on success, whether the account is new or pending.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<RegisterUserCommand>,
) -> AppResult<Json<RegisterUserResult>> {
    let result = state.register_user.execute(command).await?;
    Ok(Json(result))
}

pub async fn obtain_token(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<ObtainTokenCommand>,
) -> AppResult<Json<ObtainTokenResult>> {
    let result = state.obtain_token.execute(command).await?;
    Ok(Json(result))
}
