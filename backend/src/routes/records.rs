//! Training record routes

use super::{parse_id, JsonBody, QueryParams};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::TrainingRecordService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use fitplan_shared::types::{
    ApiResponse, CreateTrainingRecordRequest, CreatedResponse, RecordListQuery, RecordPage,
    TrainingRecordResponse, UpdateTrainingRecordRequest,
};
use validator::Validate;

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// POST /api/training/records
async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<CreateTrainingRecordRequest>,
) -> ApiResult<Json<ApiResponse<CreatedResponse>>> {
    req.validate()?;
    let created = TrainingRecordService::create(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// GET /api/training/records
async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): QueryParams<RecordListQuery>,
) -> ApiResult<Json<ApiResponse<RecordPage>>> {
    let page = TrainingRecordService::list(state.db(), auth.user_id, query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/training/records/:id
async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TrainingRecordResponse>>> {
    let record_id = parse_id(&id, "record")?;
    let record = TrainingRecordService::get(state.db(), auth.user_id, record_id).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// PUT /api/training/records/:id
async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateTrainingRecordRequest>,
) -> ApiResult<Json<ApiResponse<TrainingRecordResponse>>> {
    let record_id = parse_id(&id, "record")?;
    req.validate()?;
    let record = TrainingRecordService::update(state.db(), auth.user_id, record_id, req).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// DELETE /api/training/records/:id
async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let record_id = parse_id(&id, "record")?;
    TrainingRecordService::delete(state.db(), auth.user_id, record_id).await?;
    Ok(Json(ApiResponse::with_message((), "Record deleted")))
}
