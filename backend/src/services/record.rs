//! Training record service
//!
//! Records are owned by one user. A record may point at one of the owner's
//! plans; the plan's weight/duration/calorie totals follow the linked
//! records and are adjusted in the same transaction as the record write.
//!
//! Lock order: plan rows (ascending id) before the record row, matching
//! `PlanService::complete_day`.

use crate::error::ApiError;
use crate::metrics;
use crate::repositories::{
    AggregateDelta, CreateTrainingRecord, PlanRepository, RecordFilter, TrainingRecordRepository,
    TrainingRecordRow, UpdateTrainingRecord,
};
use fitplan_shared::types::{
    normalize_paging, CreateTrainingRecordRequest, CreatedResponse, RecordListQuery, RecordPage,
    TrainingRecordResponse, UpdateTrainingRecordRequest,
};
use fitplan_shared::validation::{
    parse_record_time, validate_date_range, validate_mood, validate_record_time,
};
use fitplan_shared::Exercise;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Training record service for business logic
pub struct TrainingRecordService;

impl TrainingRecordService {
    /// Log a session
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateTrainingRecordRequest,
    ) -> Result<CreatedResponse, ApiError> {
        check_times(req.start_time.as_deref(), req.end_time.as_deref())?;
        check_mood(req.mood.as_deref())?;
        let plan_id = parse_optional_id(req.plan_id.as_deref(), "plan")?;

        let mut tx = pool.begin().await?;
        if let Some(plan_id) = plan_id {
            ensure_plan_owned(&mut *tx, user_id, plan_id).await?;
        }

        let input = CreateTrainingRecord {
            user_id,
            title: req.title,
            start_time: req.start_time,
            end_time: req.end_time,
            duration: req.duration,
            exercises: req.exercises,
            total_weight: req.total_weight.map(to_decimal),
            total_sets: req.total_sets,
            calories_burned: req.calories_burned,
            notes: req.notes,
            mood: req.mood,
            plan_id,
            plan_day_id: req.plan_day_id,
            completion_status: req.completion_status,
        };

        let record = TrainingRecordRepository::create(&mut *tx, input)
            .await
            .map_err(ApiError::Internal)?;

        if let Some(plan_id) = record.plan_id {
            shift_plan_totals(&mut *tx, user_id, plan_id, aggregate_delta(&record)).await?;
        }
        tx.commit().await?;

        info!(record_id = %record.id, user_id = %user_id, plan_id = ?record.plan_id, "Training record created");
        metrics::record_created();

        Ok(CreatedResponse {
            id: record.id.to_string(),
        })
    }

    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        record_id: Uuid,
    ) -> Result<TrainingRecordResponse, ApiError> {
        let record = TrainingRecordRepository::find_by_id(pool, record_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Training record not found".to_string()))?;
        ensure_owner(&record, user_id)?;

        Ok(to_response(record))
    }

    /// The caller's records, newest start time first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        query: RecordListQuery,
    ) -> Result<RecordPage, ApiError> {
        let (page, page_size, offset) =
            normalize_paging(query.page, query.page_size, DEFAULT_PAGE_SIZE);
        let start_date = query.start_date.filter(|s| !s.is_empty());
        let end_date = query.end_date.filter(|s| !s.is_empty());
        validate_date_range(start_date.as_deref(), end_date.as_deref())
            .map_err(ApiError::Validation)?;

        let filter = RecordFilter {
            start_date,
            end_date,
            plan_id: parse_optional_id(query.plan_id.as_deref(), "plan")?,
        };

        let (records, total) = TrainingRecordRepository::list(pool, user_id, &filter, page_size, offset)
            .await
            .map_err(ApiError::Internal)?;

        Ok(RecordPage {
            total,
            page,
            page_size,
            records: records.into_iter().map(to_response).collect(),
        })
    }

    /// Apply the supplied fields and move plan totals along with the record
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        record_id: Uuid,
        req: UpdateTrainingRecordRequest,
    ) -> Result<TrainingRecordResponse, ApiError> {
        check_mood(req.mood.as_deref())?;
        let plan_id = parse_optional_id(req.plan_id.as_deref(), "plan")?;

        let mut tx = pool.begin().await?;
        let current = lock_record_with_plans(&mut *tx, user_id, record_id, plan_id).await?;

        // Times are checked against the merged values so start <= end still holds
        let start = req.start_time.as_deref().or(current.start_time.as_deref());
        let end = req.end_time.as_deref().or(current.end_time.as_deref());
        check_times(start, end)?;

        let input = UpdateTrainingRecord {
            title: req.title,
            start_time: req.start_time,
            end_time: req.end_time,
            duration: req.duration,
            exercises: req.exercises,
            total_weight: req.total_weight.map(to_decimal),
            total_sets: req.total_sets,
            calories_burned: req.calories_burned,
            notes: req.notes,
            mood: req.mood,
            plan_id,
            plan_day_id: req.plan_day_id,
            completion_status: req.completion_status,
        };

        let updated = TrainingRecordRepository::update(&mut *tx, record_id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Training record not found".to_string()))?;

        if let Some(old_plan) = current.plan_id {
            shift_plan_totals(&mut *tx, user_id, old_plan, aggregate_delta(&current).negate())
                .await?;
        }
        if let Some(new_plan) = updated.plan_id {
            shift_plan_totals(&mut *tx, user_id, new_plan, aggregate_delta(&updated)).await?;
        }
        tx.commit().await?;

        info!(record_id = %record_id, user_id = %user_id, "Training record updated");
        Ok(to_response(updated))
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, record_id: Uuid) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;
        let current = lock_record_with_plans(&mut *tx, user_id, record_id, None).await?;

        TrainingRecordRepository::delete(&mut *tx, record_id)
            .await
            .map_err(ApiError::Internal)?;

        if let Some(plan_id) = current.plan_id {
            shift_plan_totals(&mut *tx, user_id, plan_id, aggregate_delta(&current).negate())
                .await?;
        }
        tx.commit().await?;

        info!(record_id = %record_id, user_id = %user_id, "Training record deleted");
        Ok(())
    }
}

fn ensure_owner(record: &TrainingRecordRow, user_id: Uuid) -> Result<(), ApiError> {
    ensure_owned_by(record.id, record.user_id, user_id)
}

fn ensure_owned_by(record_id: Uuid, owner: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    if owner != user_id {
        warn!(record_id = %record_id, user_id = %user_id, "Record access rejected: not the owner");
        return Err(ApiError::Forbidden(
            "No permission to access this training record".to_string(),
        ));
    }
    Ok(())
}

/// Lock every plan a record write touches, then the record itself.
///
/// `requested_plan` is the plan the record is being linked to and must be
/// the caller's. A record relinked between the unlocked read and the lock
/// is reported as a conflict.
async fn lock_record_with_plans(
    conn: &mut PgConnection,
    user_id: Uuid,
    record_id: Uuid,
    requested_plan: Option<Uuid>,
) -> Result<TrainingRecordRow, ApiError> {
    let (owner, linked_plan) = TrainingRecordRepository::find_link(&mut *conn, record_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Training record not found".to_string()))?;
    ensure_owned_by(record_id, owner, user_id)?;

    for plan_id in plan_lock_order(linked_plan, requested_plan) {
        if Some(plan_id) == requested_plan {
            ensure_plan_owned(&mut *conn, user_id, plan_id).await?;
        } else {
            PlanRepository::find_for_update(&mut *conn, plan_id)
                .await
                .map_err(ApiError::Internal)?;
        }
    }

    let record = TrainingRecordRepository::find_for_update(&mut *conn, record_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Training record not found".to_string()))?;
    if record.plan_id != linked_plan {
        return Err(ApiError::Conflict(
            "Training record was modified concurrently, please retry".to_string(),
        ));
    }
    Ok(record)
}

fn plan_lock_order(linked: Option<Uuid>, requested: Option<Uuid>) -> Vec<Uuid> {
    let mut plans: Vec<Uuid> = linked.into_iter().chain(requested).collect();
    plans.sort();
    plans.dedup();
    plans
}

/// A linked plan must exist and belong to the caller
async fn ensure_plan_owned(
    conn: &mut PgConnection,
    user_id: Uuid,
    plan_id: Uuid,
) -> Result<(), ApiError> {
    let plan = PlanRepository::find_for_update(conn, plan_id)
        .await
        .map_err(ApiError::Internal)?;
    match plan {
        Some(plan) if plan.user_id == user_id => Ok(()),
        _ => Err(ApiError::Validation(format!(
            "planId {} does not reference one of your plans",
            plan_id
        ))),
    }
}

async fn shift_plan_totals(
    conn: &mut PgConnection,
    user_id: Uuid,
    plan_id: Uuid,
    delta: AggregateDelta,
) -> Result<(), ApiError> {
    if delta.is_zero() {
        return Ok(());
    }
    let updated = PlanRepository::apply_aggregates(conn, plan_id, user_id, delta)
        .await
        .map_err(ApiError::Internal)?;
    if !updated {
        // Plan deleted since the record was linked
        warn!(plan_id = %plan_id, "Linked plan missing, totals not adjusted");
    }
    Ok(())
}

fn check_times(start: Option<&str>, end: Option<&str>) -> Result<(), ApiError> {
    validate_record_time(start).map_err(ApiError::Validation)?;
    validate_record_time(end).map_err(ApiError::Validation)?;

    if let (Some(start), Some(end)) = (start, end) {
        let start = parse_record_time(start).map_err(ApiError::Validation)?;
        let end = parse_record_time(end).map_err(ApiError::Validation)?;
        if end < start {
            return Err(ApiError::Validation(
                "endTime must not be before startTime".to_string(),
            ));
        }
    }
    Ok(())
}

fn check_mood(mood: Option<&str>) -> Result<(), ApiError> {
    match mood.filter(|m| !m.is_empty()) {
        Some(m) => validate_mood(m).map_err(ApiError::Validation),
        None => Ok(()),
    }
}

fn parse_optional_id(value: Option<&str>, what: &str) -> Result<Option<Uuid>, ApiError> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).map_err(|_| ApiError::Validation(format!("Invalid {} ID", what))))
        .transpose()
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

/// Stored total weight, or the summed exercise volume when none was given
pub(crate) fn record_weight(record: &TrainingRecordRow) -> f64 {
    match record.total_weight {
        Some(total) => total.to_f64().unwrap_or(0.0),
        None => record.exercises.0.iter().map(Exercise::volume).sum(),
    }
}

fn aggregate_delta(record: &TrainingRecordRow) -> AggregateDelta {
    AggregateDelta {
        weight: to_decimal(record_weight(record)),
        duration: record.duration.unwrap_or(0),
        calories: record.calories_burned.unwrap_or(0),
    }
}

fn to_response(record: TrainingRecordRow) -> TrainingRecordResponse {
    TrainingRecordResponse {
        id: record.id.to_string(),
        user_id: record.user_id.to_string(),
        title: record.title,
        start_time: record.start_time,
        end_time: record.end_time,
        duration: record.duration,
        exercises: record.exercises.0,
        total_weight: record.total_weight.map(|w| w.to_f64().unwrap_or(0.0)),
        total_sets: record.total_sets,
        calories_burned: record.calories_burned,
        notes: record.notes,
        mood: record.mood,
        plan_id: record.plan_id.map(|id| id.to_string()),
        plan_day_id: record.plan_day_id,
        completion_status: record.completion_status,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
