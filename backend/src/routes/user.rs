//! Current-user routes

use super::{JsonBody, QueryParams};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{TemplateService, UserService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use fitplan_shared::types::{
    ApiResponse, PageQuery, TemplatePage, UpdateUserInfoRequest, UserInfoResponse,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(get_info).put(update_info))
        .route("/templates", get(list_templates))
}

/// GET /api/user/info
async fn get_info(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserInfoResponse>>> {
    let info = UserService::get_info(state.db(), auth.user_id).await?;
    Ok(Json(ApiResponse::success(info)))
}

/// PUT /api/user/info
///
/// Empty strings and non-positive numbers leave the stored value untouched.
async fn update_info(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<UpdateUserInfoRequest>,
) -> ApiResult<Json<ApiResponse<UserInfoResponse>>> {
    req.validate()?;
    let info = UserService::update_info(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(info)))
}

/// GET /api/user/templates
async fn list_templates(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<PageQuery>,
) -> ApiResult<Json<ApiResponse<TemplatePage>>> {
    let page = TemplateService::list_for_user(state.db(), auth.user_id, query).await?;
    Ok(Json(ApiResponse::success(page)))
}
