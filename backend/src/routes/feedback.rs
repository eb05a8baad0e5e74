//! Feedback route

use super::JsonBody;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::FeedbackService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use fitplan_shared::types::{ApiResponse, FeedbackRequest, FeedbackResponse};
use validator::Validate;

pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/", post(submit_feedback))
}

/// POST /api/feedback
async fn submit_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): JsonBody<FeedbackRequest>,
) -> ApiResult<Json<ApiResponse<FeedbackResponse>>> {
    req.validate()?;
    let feedback = FeedbackService::submit(state.db(), auth.user_id, req).await?;
    Ok(Json(ApiResponse::success(feedback)))
}
