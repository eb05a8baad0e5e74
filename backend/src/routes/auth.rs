//! Authentication routes
//!
//! Signup, login and token refresh. Password hashing runs on the blocking
//! thread pool inside `UserService`.

use super::JsonBody;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use fitplan_shared::types::{
    ApiResponse, AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse,
    SignupRequest,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

/// Public auth routes, merged at the API root
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/auth/refresh", post(refresh_token))
}

/// POST /api/signup
async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<SignupRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;
    let tokens = UserService::signup(state.db(), state.jwt(), req).await?;
    Ok(Json(ApiResponse::success(tokens)))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;
    let tokens = UserService::login(state.db(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(ApiResponse::success(tokens)))
}

/// POST /api/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<RefreshTokenRequest>,
) -> ApiResult<Json<ApiResponse<RefreshTokenResponse>>> {
    req.validate()?;
    let tokens = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(ApiResponse::success(tokens)))
}
