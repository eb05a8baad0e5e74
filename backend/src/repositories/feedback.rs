//! Feedback repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Feedback record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub feedback_type: String,
    pub contact_info: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for storing feedback
#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub user_id: Uuid,
    pub content: String,
    pub feedback_type: String,
    pub contact_info: Option<String>,
}

pub struct FeedbackRepository;

impl FeedbackRepository {
    /// Store feedback with status `pending`
    pub async fn create(pool: &PgPool, input: CreateFeedback) -> Result<FeedbackRecord> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            r#"
            INSERT INTO feedback (user_id, content, feedback_type, contact_info, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING id, user_id, content, feedback_type, contact_info, status, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.content)
        .bind(&input.feedback_type)
        .bind(&input.contact_info)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
