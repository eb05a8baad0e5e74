//! Training record repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitplan_shared::Exercise;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Training record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrainingRecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<i32>,
    pub exercises: Json<Vec<Exercise>>,
    pub total_weight: Option<Decimal>,
    pub total_sets: Option<i32>,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub plan_id: Option<Uuid>,
    pub plan_day_id: Option<i32>,
    pub completion_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrainingRecordRow {
    /// `YYYY-MM-DD` part of the start time
    pub fn start_date(&self) -> Option<&str> {
        self.start_time.as_deref().and_then(|t| t.get(..10))
    }
}

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct CreateTrainingRecord {
    pub user_id: Uuid,
    pub title: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<i32>,
    pub exercises: Vec<Exercise>,
    pub total_weight: Option<Decimal>,
    pub total_sets: Option<i32>,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub plan_id: Option<Uuid>,
    pub plan_day_id: Option<i32>,
    pub completion_status: Option<String>,
}

/// Partial record update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateTrainingRecord {
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<i32>,
    pub exercises: Option<Vec<Exercise>>,
    pub total_weight: Option<Decimal>,
    pub total_sets: Option<i32>,
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub plan_id: Option<Uuid>,
    pub plan_day_id: Option<i32>,
    pub completion_status: Option<String>,
}

/// Record list filters; dates are inclusive `YYYY-MM-DD` bounds on the start time
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub plan_id: Option<Uuid>,
}

const RECORD_COLUMNS: &str = "id, user_id, title, start_time, end_time, duration, exercises, \
    total_weight, total_sets, calories_burned, notes, mood, plan_id, plan_day_id, \
    completion_status, created_at, updated_at";

const FILTER_WHERE: &str = r#"
    user_id = $1
    AND ($2::text IS NULL OR LEFT(start_time, 10) >= $2)
    AND ($3::text IS NULL OR LEFT(start_time, 10) <= $3)
    AND ($4::uuid IS NULL OR plan_id = $4)
"#;

/// Training record repository for database operations
pub struct TrainingRecordRepository;

impl TrainingRecordRepository {
    /// Create a new record
    pub async fn create(
        conn: &mut PgConnection,
        input: CreateTrainingRecord,
    ) -> Result<TrainingRecordRow> {
        let query = format!(
            r#"
            INSERT INTO training_records (user_id, title, start_time, end_time, duration,
                                          exercises, total_weight, total_sets, calories_burned,
                                          notes, mood, plan_id, plan_day_id, completion_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let record = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(input.duration)
            .bind(Json(&input.exercises))
            .bind(input.total_weight)
            .bind(input.total_sets)
            .bind(input.calories_burned)
            .bind(&input.notes)
            .bind(&input.mood)
            .bind(input.plan_id)
            .bind(input.plan_day_id)
            .bind(&input.completion_status)
            .fetch_one(conn)
            .await?;

        Ok(record)
    }

    /// Get record by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TrainingRecordRow>> {
        let query = format!("SELECT {} FROM training_records WHERE id = $1", RECORD_COLUMNS);
        let record = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Owner and linked plan of a record, read without locking the row
    pub async fn find_link(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<(Uuid, Option<Uuid>)>> {
        let link = sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
            "SELECT user_id, plan_id FROM training_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(link)
    }

    /// Get record by ID and lock it until the transaction ends
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<TrainingRecordRow>> {
        let query = format!(
            "SELECT {} FROM training_records WHERE id = $1 FOR UPDATE",
            RECORD_COLUMNS
        );
        let record = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(record)
    }

    /// Page through a user's records, newest start time first
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        filter: &RecordFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TrainingRecordRow>, i64)> {
        let query = format!(
            r#"
            SELECT {} FROM training_records
            WHERE {}
            ORDER BY start_time DESC NULLS LAST, created_at DESC
            LIMIT $5 OFFSET $6
            "#,
            RECORD_COLUMNS, FILTER_WHERE
        );
        let records = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(user_id)
            .bind(&filter.start_date)
            .bind(&filter.end_date)
            .bind(filter.plan_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM training_records WHERE {}", FILTER_WHERE);
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(user_id)
            .bind(&filter.start_date)
            .bind(&filter.end_date)
            .bind(filter.plan_id)
            .fetch_one(pool)
            .await?;

        Ok((records, total.0))
    }

    /// Every matching record, oldest start time first. Feeds the stats reducers.
    pub async fn list_chronological(
        pool: &PgPool,
        user_id: Uuid,
        filter: &RecordFilter,
    ) -> Result<Vec<TrainingRecordRow>> {
        let query = format!(
            r#"
            SELECT {} FROM training_records
            WHERE start_time IS NOT NULL AND {}
            ORDER BY start_time ASC, created_at ASC
            "#,
            RECORD_COLUMNS, FILTER_WHERE
        );
        let records = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(user_id)
            .bind(&filter.start_date)
            .bind(&filter.end_date)
            .bind(filter.plan_id)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Apply a partial update
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        input: UpdateTrainingRecord,
    ) -> Result<Option<TrainingRecordRow>> {
        let query = format!(
            r#"
            UPDATE training_records SET
                title = COALESCE($2, title),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                duration = COALESCE($5, duration),
                exercises = COALESCE($6, exercises),
                total_weight = COALESCE($7, total_weight),
                total_sets = COALESCE($8, total_sets),
                calories_burned = COALESCE($9, calories_burned),
                notes = COALESCE($10, notes),
                mood = COALESCE($11, mood),
                plan_id = COALESCE($12, plan_id),
                plan_day_id = COALESCE($13, plan_day_id),
                completion_status = COALESCE($14, completion_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let record = sqlx::query_as::<_, TrainingRecordRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(input.duration)
            .bind(input.exercises.as_ref().map(Json))
            .bind(input.total_weight)
            .bind(input.total_sets)
            .bind(input.calories_burned)
            .bind(&input.notes)
            .bind(&input.mood)
            .bind(input.plan_id)
            .bind(input.plan_day_id)
            .bind(&input.completion_status)
            .fetch_optional(conn)
            .await?;

        Ok(record)
    }

    /// Mark a record of `user_id` linked to `plan_id` with a completion status
    pub async fn set_completion_status(
        conn: &mut PgConnection,
        id: Uuid,
        user_id: Uuid,
        plan_id: Uuid,
        status: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE training_records SET completion_status = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND plan_id = $3
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(plan_id)
        .bind(status)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a record
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM training_records WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
