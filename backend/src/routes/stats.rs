//! Statistics routes
//!
//! "Today" is the server's UTC date.

use super::QueryParams;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::{NaiveDate, Utc};
use fitplan_shared::types::{
    ApiResponse, CalendarDay, CalendarQuery, MuscleGroupStats, PeriodQuery, PersonalRecord,
    PlanListQuery, PlanProgressPage, PlanStatsQuery, PlanStatsResponse, TrainingStatsQuery,
    TrainingStatsResponse,
};

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/training", get(training_stats))
        .route("/muscle-groups", get(muscle_group_stats))
        .route("/personal-records", get(personal_records))
        .route("/calendar", get(calendar))
        .route("/plan", get(plan_stats))
        .route("/plan-progress", get(plan_progress))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// GET /api/stats/training
async fn training_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<TrainingStatsQuery>,
) -> ApiResult<Json<ApiResponse<TrainingStatsResponse>>> {
    let stats = StatsService::training(
        state.db(),
        auth.user_id,
        query.period.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        today(),
    )
    .await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// GET /api/stats/muscle-groups
async fn muscle_group_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MuscleGroupStats>>>> {
    let stats =
        StatsService::muscle_groups(state.db(), auth.user_id, query.period.as_deref(), today())
            .await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// GET /api/stats/personal-records
async fn personal_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<PersonalRecord>>>> {
    let records = StatsService::personal_records(state.db(), auth.user_id).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// GET /api/stats/calendar
async fn calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<CalendarQuery>,
) -> ApiResult<Json<ApiResponse<Vec<CalendarDay>>>> {
    let days =
        StatsService::calendar(state.db(), auth.user_id, query.year, query.month, today()).await?;
    Ok(Json(ApiResponse::success(days)))
}

/// GET /api/stats/plan
async fn plan_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<PlanStatsQuery>,
) -> ApiResult<Json<ApiResponse<PlanStatsResponse>>> {
    let stats = StatsService::plan(
        state.db(),
        auth.user_id,
        query.plan_id.as_deref(),
        query.period.as_deref(),
        today(),
    )
    .await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// GET /api/stats/plan-progress
async fn plan_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<PlanListQuery>,
) -> ApiResult<Json<ApiResponse<PlanProgressPage>>> {
    let page = StatsService::plan_progress(state.db(), auth.user_id, query).await?;
    Ok(Json(ApiResponse::success(page)))
}
