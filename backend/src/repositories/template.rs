//! Plan template repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitplan_shared::TrainingDay;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Template record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TemplateRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub split_type: String,
    pub level: String,
    pub equipment: String,
    pub duration_weeks: i32,
    pub training_days_per_week: i32,
    pub training_days: Json<Vec<TrainingDay>>,
    pub image_url: String,
    pub author: String,
    pub tags: Json<Vec<String>>,
    pub recommended_intensity: String,
    pub is_official: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a template
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub split_type: String,
    pub level: String,
    pub equipment: String,
    pub duration_weeks: i32,
    pub training_days_per_week: i32,
    pub training_days: Vec<TrainingDay>,
    pub image_url: String,
    pub author: String,
    pub tags: Vec<String>,
    pub recommended_intensity: String,
    pub is_official: bool,
}

/// Partial template update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub split_type: Option<String>,
    pub level: Option<String>,
    pub equipment: Option<String>,
    pub duration_weeks: Option<i32>,
    pub training_days_per_week: Option<i32>,
    pub training_days: Option<Vec<TrainingDay>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub recommended_intensity: Option<String>,
}

/// Conjunctive catalog filters; duration bounds are inclusive
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    pub goal: Option<String>,
    pub level: Option<String>,
    pub split_type: Option<String>,
    pub equipment: Option<String>,
    pub duration_weeks_min: Option<i32>,
    pub duration_weeks_max: Option<i32>,
}

const TEMPLATE_COLUMNS: &str = "id, user_id, name, description, goal, split_type, level, equipment, \
    duration_weeks, training_days_per_week, training_days, image_url, author, tags, \
    recommended_intensity, is_official, created_at, updated_at";

const CATALOG_WHERE: &str = r#"
    is_official = TRUE
    AND ($1::text IS NULL OR goal = $1)
    AND ($2::text IS NULL OR level = $2)
    AND ($3::text IS NULL OR split_type = $3)
    AND ($4::text IS NULL OR equipment = $4)
    AND ($5::int4 IS NULL OR duration_weeks >= $5)
    AND ($6::int4 IS NULL OR duration_weeks <= $6)
"#;

/// Template repository for database operations
pub struct TemplateRepository;

impl TemplateRepository {
    /// Create a new template
    pub async fn create(pool: &PgPool, input: CreateTemplate) -> Result<TemplateRecord> {
        let query = format!(
            r#"
            INSERT INTO plan_templates (user_id, name, description, goal, split_type, level,
                                        equipment, duration_weeks, training_days_per_week,
                                        training_days, image_url, author, tags,
                                        recommended_intensity, is_official)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            TEMPLATE_COLUMNS
        );

        let record = sqlx::query_as::<_, TemplateRecord>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.goal)
            .bind(&input.split_type)
            .bind(&input.level)
            .bind(&input.equipment)
            .bind(input.duration_weeks)
            .bind(input.training_days_per_week)
            .bind(Json(&input.training_days))
            .bind(&input.image_url)
            .bind(&input.author)
            .bind(Json(&input.tags))
            .bind(&input.recommended_intensity)
            .bind(input.is_official)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Get template by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TemplateRecord>> {
        let query = format!("SELECT {} FROM plan_templates WHERE id = $1", TEMPLATE_COLUMNS);
        let record = sqlx::query_as::<_, TemplateRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Page through the official catalog. Returns `(page, total)`.
    pub async fn list_catalog(
        pool: &PgPool,
        filter: &TemplateFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TemplateRecord>, i64)> {
        let query = format!(
            "SELECT {} FROM plan_templates WHERE {} ORDER BY created_at DESC LIMIT $7 OFFSET $8",
            TEMPLATE_COLUMNS, CATALOG_WHERE
        );
        let records = sqlx::query_as::<_, TemplateRecord>(&query)
            .bind(&filter.goal)
            .bind(&filter.level)
            .bind(&filter.split_type)
            .bind(&filter.equipment)
            .bind(filter.duration_weeks_min)
            .bind(filter.duration_weeks_max)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM plan_templates WHERE {}", CATALOG_WHERE);
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&filter.goal)
            .bind(&filter.level)
            .bind(&filter.split_type)
            .bind(&filter.equipment)
            .bind(filter.duration_weeks_min)
            .bind(filter.duration_weeks_max)
            .fetch_one(pool)
            .await?;

        Ok((records, total.0))
    }

    /// Page through a user's personal templates, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TemplateRecord>, i64)> {
        let query = format!(
            r#"
            SELECT {} FROM plan_templates
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            TEMPLATE_COLUMNS
        );
        let records = sqlx::query_as::<_, TemplateRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plan_templates WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok((records, total.0))
    }

    /// Apply a partial update
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: UpdateTemplate,
    ) -> Result<Option<TemplateRecord>> {
        let query = format!(
            r#"
            UPDATE plan_templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                goal = COALESCE($4, goal),
                split_type = COALESCE($5, split_type),
                level = COALESCE($6, level),
                equipment = COALESCE($7, equipment),
                duration_weeks = COALESCE($8, duration_weeks),
                training_days_per_week = COALESCE($9, training_days_per_week),
                training_days = COALESCE($10, training_days),
                tags = COALESCE($11, tags),
                image_url = COALESCE($12, image_url),
                recommended_intensity = COALESCE($13, recommended_intensity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TEMPLATE_COLUMNS
        );

        let record = sqlx::query_as::<_, TemplateRecord>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.goal)
            .bind(&input.split_type)
            .bind(&input.level)
            .bind(&input.equipment)
            .bind(input.duration_weeks)
            .bind(input.training_days_per_week)
            .bind(input.training_days.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(&input.recommended_intensity)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Delete a template
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM plan_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
