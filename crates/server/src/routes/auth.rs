//! Authentication routes

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use keygate_shared::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, AUTH_TOKEN_HEADER};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Register a new account. Success implies immediate authentication: the
/// response carries a freshly issued session token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .service
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate an existing account
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = state.service.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

/// Resolve the session token carried in the x-auth-token header to the
/// current account's public view
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<PublicUser>> {
    let token = headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let user = state.service.identify(token).await?;
    Ok(Json(user))
}
