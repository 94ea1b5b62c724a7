//! Request extractors that speak `AppError` instead of axum's plain-text
//! rejections.

use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::state::AppState;
use crate::modules::access::Identity;
use crate::shared::errors::AppError;

/// JSON body; malformed input answers 400 with a JSON detail.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string; malformed parameters answer 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters; unparseable ids answer 404.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// The caller, resolved from the bearer token (or anonymous).
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::Unauthorized("Authorization header is not valid text".to_string())
            })?),
            None => None,
        };

        let identity = state.authenticator.identify(header).await?;
        Ok(CurrentIdentity(identity))
    }
}
