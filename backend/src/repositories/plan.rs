//! Fitness plan repository for database operations
//!
//! Progress changes go through `find_for_update` + `save_progress` on the
//! same transaction so that concurrent day updates serialize on the row.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use fitplan_shared::TrainingDay;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Plan record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub duration_weeks: i32,
    pub duration_weeks_override: Option<i32>,
    pub training_days_per_week: i32,
    pub training_days: Json<Vec<TrainingDay>>,
    pub training_days_override: Json<Vec<TrainingDay>>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub current_week: i32,
    pub current_day: i32,
    pub completed_days: Vec<i32>,
    pub skipped_days: Vec<i32>,
    pub total_completed_days: i32,
    pub completion_rate: i32,
    pub total_weight: Decimal,
    pub total_duration: i32,
    pub total_calories: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a plan
#[derive(Debug, Clone)]
pub struct CreatePlan {
    pub user_id: Uuid,
    pub template_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub duration_weeks: i32,
    pub duration_weeks_override: Option<i32>,
    pub training_days_per_week: i32,
    pub training_days: Vec<TrainingDay>,
    pub training_days_override: Vec<TrainingDay>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Progress state written back after an engine operation
#[derive(Debug, Clone)]
pub struct SaveProgress {
    pub status: String,
    pub training_days_override: Vec<TrainingDay>,
    pub completed_days: Vec<i32>,
    pub skipped_days: Vec<i32>,
    pub total_completed_days: i32,
    pub completion_rate: i32,
    pub current_week: i32,
    pub current_day: i32,
}

/// Signed change to a plan's aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateDelta {
    pub weight: Decimal,
    pub duration: i32,
    pub calories: i32,
}

impl AggregateDelta {
    pub fn is_zero(&self) -> bool {
        self.weight.is_zero() && self.duration == 0 && self.calories == 0
    }

    pub fn negate(self) -> Self {
        Self {
            weight: -self.weight,
            duration: -self.duration,
            calories: -self.calories,
        }
    }
}

const PLAN_COLUMNS: &str = "id, user_id, template_id, name, description, goal, duration_weeks, \
    duration_weeks_override, training_days_per_week, training_days, training_days_override, \
    start_date, end_date, status, current_week, current_day, completed_days, skipped_days, \
    total_completed_days, completion_rate, total_weight, total_duration, total_calories, \
    created_at, updated_at";

/// Plan repository for database operations
pub struct PlanRepository;

impl PlanRepository {
    /// Create a new plan with zeroed progress
    pub async fn create(pool: &PgPool, input: CreatePlan) -> Result<PlanRecord> {
        let query = format!(
            r#"
            INSERT INTO fitness_plans (user_id, template_id, name, description, goal,
                                       duration_weeks, duration_weeks_override,
                                       training_days_per_week, training_days,
                                       training_days_override, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            PLAN_COLUMNS
        );

        let record = sqlx::query_as::<_, PlanRecord>(&query)
            .bind(input.user_id)
            .bind(input.template_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.goal)
            .bind(input.duration_weeks)
            .bind(input.duration_weeks_override)
            .bind(input.training_days_per_week)
            .bind(Json(&input.training_days))
            .bind(Json(&input.training_days_override))
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Get plan by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PlanRecord>> {
        let query = format!("SELECT {} FROM fitness_plans WHERE id = $1", PLAN_COLUMNS);
        let record = sqlx::query_as::<_, PlanRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Get plan by ID and lock the row until the transaction ends
    pub async fn find_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<PlanRecord>> {
        let query = format!(
            "SELECT {} FROM fitness_plans WHERE id = $1 FOR UPDATE",
            PLAN_COLUMNS
        );
        let record = sqlx::query_as::<_, PlanRecord>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(record)
    }

    /// Write back the full progress state of a locked plan
    pub async fn save_progress(
        conn: &mut PgConnection,
        id: Uuid,
        input: SaveProgress,
    ) -> Result<PlanRecord> {
        let query = format!(
            r#"
            UPDATE fitness_plans SET
                status = $2,
                training_days_override = $3,
                completed_days = $4,
                skipped_days = $5,
                total_completed_days = $6,
                completion_rate = $7,
                current_week = $8,
                current_day = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PLAN_COLUMNS
        );

        let record = sqlx::query_as::<_, PlanRecord>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(Json(&input.training_days_override))
            .bind(&input.completed_days)
            .bind(&input.skipped_days)
            .bind(input.total_completed_days)
            .bind(input.completion_rate)
            .bind(input.current_week)
            .bind(input.current_day)
            .fetch_one(conn)
            .await?;

        Ok(record)
    }

    /// Page through a user's plans, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PlanRecord>, i64)> {
        let query = format!(
            r#"
            SELECT {} FROM fitness_plans
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            PLAN_COLUMNS
        );
        let records = sqlx::query_as::<_, PlanRecord>(&query)
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM fitness_plans
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((records, total.0))
    }

    /// Shift the record-derived totals; never drops below zero
    pub async fn apply_aggregates(
        conn: &mut PgConnection,
        id: Uuid,
        user_id: Uuid,
        delta: AggregateDelta,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE fitness_plans SET
                total_weight = GREATEST(total_weight + $3, 0),
                total_duration = GREATEST(total_duration + $4, 0),
                total_calories = GREATEST(total_calories + $5, 0),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(delta.weight)
        .bind(delta.duration)
        .bind(delta.calories)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a plan
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fitness_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
