//! Fitness plan routes
//!
//! Every route needs a token and only ever touches the caller's own plans.

use super::{parse_id, JsonBody, QueryParams};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use fitplan_shared::types::{
    AdjustDayRequest, ApiResponse, CompleteDayRequest, CreateCustomPlanRequest,
    CreatePlanFromTemplateRequest, CreatedResponse, DayProgressResponse, PlanListQuery, PlanPage,
    PlanProgressResponse, PlanResponse, SkipDayRequest, UncompleteDayRequest,
    UpdatePlanStatusRequest,
};
use fitplan_shared::TrainingDay;
use validator::Validate;

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans))
        .route("/from-template", post(create_from_template))
        .route("/custom", post(create_custom))
        .route("/:id", get(get_plan).delete(delete_plan))
        .route("/:id/status", put(update_status))
        .route("/:id/complete-day", post(complete_day))
        .route("/:id/uncomplete-day", post(uncomplete_day))
        .route("/:id/skip-day", post(skip_day))
        .route("/:id/adjust-day", post(adjust_day))
        .route("/:id/progress", get(get_progress))
        .route("/:id/schedule", get(get_schedule))
}

/// POST /api/plans/from-template
async fn create_from_template(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<CreatePlanFromTemplateRequest>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    req.validate()?;
    let created = PlanService::create_from_template(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// POST /api/plans/custom
async fn create_custom(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<CreateCustomPlanRequest>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    req.validate()?;
    let created = PlanService::create_custom(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// GET /api/plans
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<PlanListQuery>,
) -> ApiResult<Json<ApiResponse<PlanPage>>> {
    let page = PlanService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/plans/:id
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<PlanResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    let plan = PlanService::get(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(ApiResponse::success(plan)))
}

/// PUT /api/plans/:id/status
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdatePlanStatusRequest>,
) -> ApiResult<Json<ApiResponse<PlanResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    req.validate()?;
    let plan = PlanService::update_status(state.db(), auth.user_id, plan_id, &req.status).await?;
    Ok(Json(ApiResponse::success(plan)))
}

/// POST /api/plans/:id/complete-day
async fn complete_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<CompleteDayRequest>,
) -> ApiResult<Json<ApiResponse<DayProgressResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    req.validate()?;
    let progress = PlanService::complete_day(state.db(), auth.user_id, plan_id, req).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// POST /api/plans/:id/uncomplete-day
async fn uncomplete_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UncompleteDayRequest>,
) -> ApiResult<Json<ApiResponse<DayProgressResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    req.validate()?;
    let progress = PlanService::uncomplete_day(state.db(), auth.user_id, plan_id, req).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// POST /api/plans/:id/skip-day
async fn skip_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<SkipDayRequest>,
) -> ApiResult<Json<ApiResponse<DayProgressResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    req.validate()?;
    let progress = PlanService::skip_day(state.db(), auth.user_id, plan_id, req).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// POST /api/plans/:id/adjust-day
async fn adjust_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<AdjustDayRequest>,
) -> ApiResult<Json<ApiResponse<TrainingDay>>> {
    let plan_id = parse_id(&id, "plan")?;
    req.validate()?;
    let day = PlanService::adjust_day(state.db(), auth.user_id, plan_id, req).await?;
    Ok(Json(ApiResponse::success(day)))
}

/// GET /api/plans/:id/progress
async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<PlanProgressResponse>>> {
    let plan_id = parse_id(&id, "plan")?;
    let today = Utc::now().date_naive();
    let progress = PlanService::progress(state.db(), auth.user_id, plan_id, today).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// GET /api/plans/:id/schedule
async fn get_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<TrainingDay>>>> {
    let plan_id = parse_id(&id, "plan")?;
    let schedule = PlanService::schedule(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(ApiResponse::success(schedule)))
}

/// DELETE /api/plans/:id
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let plan_id = parse_id(&id, "plan")?;
    PlanService::delete(state.db(), auth.user_id, plan_id).await?;
    Ok(Json(ApiResponse::with_message((), "Plan deleted")))
}
