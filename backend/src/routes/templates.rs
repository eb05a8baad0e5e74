//! Template catalog routes
//!
//! Reads are public. Creating, copying, editing and deleting need a token;
//! editing an official template additionally needs the admin role.

use super::{parse_id, JsonBody, QueryParams};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::TemplateService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use fitplan_shared::types::{
    ApiResponse, CreateTemplateRequest, CreatedResponse, TemplateListQuery, TemplatePage,
    TemplateResponse, UpdateTemplateRequest,
};
use validator::Validate;

pub fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates))
        .route("/custom", post(create_custom))
        .route(
            "/:id",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/:id/duplicate", post(duplicate_template))
}

/// GET /api/templates
async fn list_templates(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<TemplateListQuery>,
) -> ApiResult<Json<ApiResponse<TemplatePage>>> {
    let page = TemplateService::list(state.db(), query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/templates/:id
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TemplateResponse>>> {
    let template_id = parse_id(&id, "template")?;
    let template = TemplateService::get(state.db(), template_id).await?;
    Ok(Json(ApiResponse::success(template)))
}

/// POST /api/templates/custom
async fn create_custom(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<CreateTemplateRequest>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    req.validate()?;
    let created = TemplateService::create_custom(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// POST /api/templates/:id/duplicate
async fn duplicate_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    let template_id = parse_id(&id, "template")?;
    let created = TemplateService::duplicate(state.db(), auth.user_id, template_id).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /api/templates/:id
async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateTemplateRequest>,
) -> ApiResult<Json<ApiResponse<TemplateResponse>>> {
    let template_id = parse_id(&id, "template")?;
    req.validate()?;
    let template = TemplateService::update(state.db(), &auth, template_id, req).await?;
    Ok(Json(ApiResponse::success(template)))
}

/// DELETE /api/templates/:id
async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let template_id = parse_id(&id, "template")?;
    TemplateService::delete(state.db(), &auth, template_id).await?;
    Ok(Json(ApiResponse::with_message((), "Template deleted")))
}
