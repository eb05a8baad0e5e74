//! Fitness plan service
//!
//! Every day-level change runs as one transaction: lock the plan row, apply
//! the pure engine from `fitplan_shared::plan`, write the whole progress
//! state back, commit.

use crate::error::ApiError;
use crate::metrics;
use crate::repositories::{
    CreatePlan, PlanRecord, PlanRepository, SaveProgress, TemplateRepository,
    TrainingRecordRepository,
};
use chrono::NaiveDate;
use fitplan_shared::plan::{
    calendar_position, end_date, format_date, next_training_date, parse_date, validate_schedule,
    DayProgress, PlanState,
};
use fitplan_shared::types::{
    normalize_paging, AdjustDayRequest, CompleteDayRequest, CreateCustomPlanRequest,
    CreatePlanFromTemplateRequest, CreatedResponse, DayProgressResponse, PlanListQuery, PlanPage,
    PlanProgressResponse, PlanResponse, SkipDayRequest, UncompleteDayRequest,
};
use fitplan_shared::{PlanError, PlanStatus, TrainingDay};
use rust_decimal::prelude::ToPrimitive;
use sqlx::{PgConnection, PgPool};
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Fitness plan service for business logic
pub struct PlanService;

impl PlanService {
    /// Instantiate a plan from a template, copying its schedule
    pub async fn create_from_template(
        pool: &PgPool,
        user_id: Uuid,
        req: CreatePlanFromTemplateRequest,
    ) -> Result<CreatedResponse, ApiError> {
        let template_id = Uuid::parse_str(&req.template_id)
            .map_err(|_| ApiError::Validation("Invalid template ID".to_string()))?;
        let start = parse_date(&req.start_date)?;

        let template = TemplateRepository::find_by_id(pool, template_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

        let override_weeks = req.duration_weeks_override.filter(|w| *w > 0);
        let duration_weeks = override_weeks.unwrap_or(template.duration_weeks);
        let training_days = template.training_days.0;
        validate_schedule(duration_weeks, template.training_days_per_week, &training_days)?;

        let overrides =
            normalize_overrides(req.training_days_override.unwrap_or_default(), duration_weeks)?;

        let input = CreatePlan {
            user_id,
            template_id: Some(template_id),
            name: req
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(template.name),
            description: template.description,
            goal: template.goal,
            duration_weeks,
            duration_weeks_override: override_weeks,
            training_days_per_week: template.training_days_per_week,
            training_days,
            training_days_override: overrides,
            start_date: start,
            end_date: end_date(start, duration_weeks),
        };

        let plan = PlanRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(plan_id = %plan.id, user_id = %user_id, template_id = %template_id, "Plan created from template");
        metrics::plan_created("template");

        Ok(CreatedResponse {
            id: plan.id.to_string(),
        })
    }

    /// Create a self-authored plan
    pub async fn create_custom(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateCustomPlanRequest,
    ) -> Result<CreatedResponse, ApiError> {
        let start = parse_date(&req.start_date)?;
        validate_schedule(req.duration_weeks, req.training_days_per_week, &req.training_days)?;

        let input = CreatePlan {
            user_id,
            template_id: None,
            name: req.name,
            description: req.description,
            goal: req.goal,
            duration_weeks: req.duration_weeks,
            duration_weeks_override: None,
            training_days_per_week: req.training_days_per_week,
            training_days: req.training_days,
            training_days_override: Vec::new(),
            start_date: start,
            end_date: end_date(start, req.duration_weeks),
        };

        let plan = PlanRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(plan_id = %plan.id, user_id = %user_id, "Custom plan created");
        metrics::plan_created("custom");

        Ok(CreatedResponse {
            id: plan.id.to_string(),
        })
    }

    /// The caller's plans, newest first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        query: PlanListQuery,
    ) -> Result<PlanPage, ApiError> {
        let (page, page_size, offset) =
            normalize_paging(query.page, query.page_size, DEFAULT_PAGE_SIZE);
        let status = parse_status_filter(query.status.as_deref())?;

        let (records, total) = PlanRepository::list_by_user(
            pool,
            user_id,
            status.map(|s| s.as_str()),
            page_size,
            offset,
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(PlanPage {
            total,
            page,
            page_size,
            plans: records.into_iter().map(to_response).collect(),
        })
    }

    pub async fn get(pool: &PgPool, user_id: Uuid, plan_id: Uuid) -> Result<PlanResponse, ApiError> {
        let plan = Self::fetch_owned(pool, user_id, plan_id).await?;
        Ok(to_response(plan))
    }

    /// Explicit status change; re-setting the current status is a no-op
    pub async fn update_status(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        status: &str,
    ) -> Result<PlanResponse, ApiError> {
        let next = PlanStatus::from_str(status).map_err(ApiError::Validation)?;

        let mut tx = pool.begin().await?;
        let (changed, plan) =
            apply_locked(&mut *tx, user_id, plan_id, |state| state.set_status(next)).await?;
        tx.commit().await?;

        if changed {
            info!(plan_id = %plan_id, user_id = %user_id, status = %next, "Plan status changed");
        }
        Ok(to_response(plan))
    }

    /// Mark a day completed, optionally naming the record that fulfilled it
    pub async fn complete_day(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        req: CompleteDayRequest,
    ) -> Result<DayProgressResponse, ApiError> {
        let record_id = req
            .record_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                Uuid::parse_str(s).map_err(|_| ApiError::Validation("Invalid record ID".to_string()))
            })
            .transpose()?;

        let mut tx = pool.begin().await?;
        let (progress, plan) =
            apply_locked(&mut *tx, user_id, plan_id, |state| state.complete_day(req.day_number))
                .await?;

        // Record rows are only touched after the plan row is locked
        if let Some(record_id) = record_id {
            let linked = TrainingRecordRepository::set_completion_status(
                &mut *tx, record_id, user_id, plan_id, "completed",
            )
            .await
            .map_err(ApiError::Internal)?;
            if !linked {
                warn!(plan_id = %plan_id, record_id = %record_id, "Record not linked to plan, left unchanged");
            }
        }
        tx.commit().await?;

        info!(
            plan_id = %plan_id,
            user_id = %user_id,
            day_number = req.day_number,
            completion_rate = progress.completion_rate,
            "Plan day completed"
        );
        metrics::plan_day_event("complete");

        Ok(day_response(progress, &plan))
    }

    /// Revert a completed day
    pub async fn uncomplete_day(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        req: UncompleteDayRequest,
    ) -> Result<DayProgressResponse, ApiError> {
        let mut tx = pool.begin().await?;
        let (progress, plan) =
            apply_locked(&mut *tx, user_id, plan_id, |state| state.uncomplete_day(req.day_number))
                .await?;
        tx.commit().await?;

        info!(plan_id = %plan_id, user_id = %user_id, day_number = req.day_number, "Plan day reverted");
        metrics::plan_day_event("uncomplete");

        Ok(day_response(progress, &plan))
    }

    pub async fn skip_day(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        req: SkipDayRequest,
    ) -> Result<DayProgressResponse, ApiError> {
        let mut tx = pool.begin().await?;
        let (progress, plan) =
            apply_locked(&mut *tx, user_id, plan_id, |state| state.skip_day(req.day_number)).await?;
        tx.commit().await?;

        info!(
            plan_id = %plan_id,
            user_id = %user_id,
            day_number = req.day_number,
            reason = %req.reason,
            "Plan day skipped"
        );
        metrics::plan_day_event("skip");

        Ok(day_response(progress, &plan))
    }

    /// Override one day's exercises for this plan only
    pub async fn adjust_day(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        req: AdjustDayRequest,
    ) -> Result<TrainingDay, ApiError> {
        let mut tx = pool.begin().await?;
        let (day, _) = apply_locked(&mut *tx, user_id, plan_id, |state| {
            state
                .adjust_day(req.day_number, req.exercises, &req.notes)
                .cloned()
        })
        .await?;
        tx.commit().await?;

        info!(plan_id = %plan_id, user_id = %user_id, day_number = req.day_number, "Plan day adjusted");
        metrics::plan_day_event("adjust");

        Ok(day)
    }

    /// Progress summary with the wall-clock view computed for `today`
    pub async fn progress(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
        today: NaiveDate,
    ) -> Result<PlanProgressResponse, ApiError> {
        let plan = Self::fetch_owned(pool, user_id, plan_id).await?;
        build_progress(&plan, today)
    }

    /// Base schedule with overrides resolved
    pub async fn schedule(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Vec<TrainingDay>, ApiError> {
        let plan = Self::fetch_owned(pool, user_id, plan_id).await?;
        Ok(plan_state(&plan)?.effective_schedule())
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, plan_id: Uuid) -> Result<(), ApiError> {
        Self::fetch_owned(pool, user_id, plan_id).await?;

        let deleted = PlanRepository::delete(pool, plan_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Plan not found".to_string()));
        }

        info!(plan_id = %plan_id, user_id = %user_id, "Plan deleted");
        Ok(())
    }

    /// Fetch a plan the caller owns: 404 when absent, 403 when foreign
    pub async fn fetch_owned(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<PlanRecord, ApiError> {
        let plan = PlanRepository::find_by_id(pool, plan_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?;
        ensure_owner(&plan, user_id)?;
        Ok(plan)
    }
}

/// Lock, check ownership, run `op` against the engine state, persist it
async fn apply_locked<T, F>(
    conn: &mut PgConnection,
    user_id: Uuid,
    plan_id: Uuid,
    op: F,
) -> Result<(T, PlanRecord), ApiError>
where
    F: FnOnce(&mut PlanState) -> Result<T, PlanError>,
{
    let plan = PlanRepository::find_for_update(&mut *conn, plan_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?;
    ensure_owner(&plan, user_id)?;

    let mut state = plan_state(&plan)?;
    let outcome = op(&mut state)?;

    let position = state.bookkeeping_position();
    let saved = PlanRepository::save_progress(
        conn,
        plan_id,
        SaveProgress {
            status: state.status.as_str().to_string(),
            completion_rate: state.completion_rate(),
            total_completed_days: state.total_completed_days(),
            training_days_override: state.training_days_override,
            completed_days: state.completed_days,
            skipped_days: state.skipped_days,
            current_week: position.week,
            current_day: position.day,
        },
    )
    .await
    .map_err(ApiError::Internal)?;

    Ok((outcome, saved))
}

pub(crate) fn ensure_owner(plan: &PlanRecord, user_id: Uuid) -> Result<(), ApiError> {
    if plan.user_id != user_id {
        warn!(plan_id = %plan.id, user_id = %user_id, "Plan access rejected: not the owner");
        return Err(ApiError::Forbidden("No permission to access this plan".to_string()));
    }
    Ok(())
}

pub(crate) fn parse_stored_status(plan: &PlanRecord) -> Result<PlanStatus, ApiError> {
    PlanStatus::from_str(&plan.status)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Plan {}: {}", plan.id, e)))
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<PlanStatus>, ApiError> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => PlanStatus::from_str(s).map(Some).map_err(ApiError::Validation),
        None => Ok(None),
    }
}

fn plan_state(plan: &PlanRecord) -> Result<PlanState, ApiError> {
    let mut state = PlanState::new(
        plan.duration_weeks,
        plan.training_days_per_week,
        plan.training_days.0.clone(),
        plan.training_days_override.0.clone(),
    );
    state.status = parse_stored_status(plan)?;
    state.completed_days = plan.completed_days.clone();
    state.skipped_days = plan.skipped_days.clone();
    Ok(state)
}

/// Sort sparse overrides by day and reject duplicates or days outside the plan
fn normalize_overrides(
    mut days: Vec<TrainingDay>,
    duration_weeks: i32,
) -> Result<Vec<TrainingDay>, PlanError> {
    let max = duration_weeks * 7;
    days.sort_by_key(|d| d.day_number);
    for pair in days.windows(2) {
        if pair[0].day_number == pair[1].day_number {
            return Err(PlanError::InvalidSchedule(format!(
                "override for day {} appears more than once",
                pair[0].day_number
            )));
        }
    }
    if let Some(day) = days.iter().find(|d| d.day_number < 1 || d.day_number > max) {
        return Err(PlanError::DayOutOfRange {
            day: day.day_number,
            max,
        });
    }
    Ok(days)
}

fn build_progress(plan: &PlanRecord, today: NaiveDate) -> Result<PlanProgressResponse, ApiError> {
    let state = plan_state(plan)?;
    let calendar = calendar_position(plan.start_date, today, state.status);
    let next = next_training_date(
        plan.start_date,
        state.completed_days.len(),
        state.skipped_days.len(),
        state.status,
    );

    Ok(PlanProgressResponse {
        plan_id: plan.id.to_string(),
        status: state.status.as_str().to_string(),
        total_days: state.scheduled_days(),
        completed_days: state.total_completed_days(),
        skipped_days: state.skipped_days.len() as i32,
        completion_rate: state.completion_rate(),
        current_week: plan.current_week,
        current_day: plan.current_day,
        calendar_week: calendar.week,
        calendar_day: calendar.day,
        next_training_date: next.map(format_date),
        total_duration: plan.total_duration,
        total_weight: plan.total_weight.to_f64().unwrap_or(0.0),
        total_calories: plan.total_calories,
    })
}

fn day_response(progress: DayProgress, plan: &PlanRecord) -> DayProgressResponse {
    DayProgressResponse {
        day_number: progress.day_number,
        completion_rate: progress.completion_rate,
        total_completed_days: progress.total_completed_days,
        completed_days: plan.completed_days.clone(),
        skipped_days: plan.skipped_days.clone(),
    }
}

pub(crate) fn to_response(plan: PlanRecord) -> PlanResponse {
    PlanResponse {
        id: plan.id.to_string(),
        user_id: plan.user_id.to_string(),
        template_id: plan.template_id.map(|id| id.to_string()),
        name: plan.name,
        description: plan.description,
        goal: plan.goal,
        duration_weeks: plan.duration_weeks,
        duration_weeks_override: plan.duration_weeks_override,
        training_days_per_week: plan.training_days_per_week,
        training_days: plan.training_days.0,
        training_days_override: plan.training_days_override.0,
        start_date: format_date(plan.start_date),
        end_date: format_date(plan.end_date),
        status: plan.status,
        current_week: plan.current_week,
        current_day: plan.current_day,
        completed_days: plan.completed_days,
        skipped_days: plan.skipped_days,
        total_completed_days: plan.total_completed_days,
        completion_rate: plan.completion_rate,
        total_weight: plan.total_weight.to_f64().unwrap_or(0.0),
        total_duration: plan.total_duration,
        total_calories: plan.total_calories,
        created_at: plan.created_at,
        updated_at: plan.updated_at,
    }
}
