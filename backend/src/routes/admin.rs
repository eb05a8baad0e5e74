//! Admin-only routes

use super::JsonBody;
use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::services::TemplateService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use fitplan_shared::types::{ApiResponse, CreateTemplateRequest, CreatedResponse};
use validator::Validate;

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/templates", post(create_official_template))
}

/// POST /api/admin/templates
async fn create_official_template(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    WithRejection(Json(req), _): JsonBody<CreateTemplateRequest>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    req.validate()?;
    let created = TemplateService::create_official(state.db(), admin.user_id, req).await?;
    Ok(Json(ApiResponse::success(created)))
}
