//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub avatar_url: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub age: i32,
    pub height: Decimal,
    pub weight: Decimal,
    pub target_weight: Decimal,
    pub fitness_goal: String,
    pub role: String,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub age: i32,
    pub height: Decimal,
    pub weight: Decimal,
    pub target_weight: Decimal,
    pub fitness_goal: String,
    pub role: String,
    pub join_date: NaiveDate,
}

/// Profile fields to change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub height: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub target_weight: Option<Decimal>,
    pub fitness_goal: Option<String>,
}

const USER_COLUMNS: &str = "id, username, password_hash, nickname, avatar_url, email, phone, \
    gender, age, height, weight, target_weight, fitness_goal, role, join_date, created_at, updated_at";

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserRecord> {
        let query = format!(
            r#"
            INSERT INTO users (username, password_hash, nickname, email, phone, gender, age,
                               height, weight, target_weight, fitness_goal, role, join_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.nickname)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gender)
            .bind(input.age)
            .bind(input.height)
            .bind(input.weight)
            .bind(input.target_weight)
            .bind(&input.fitness_goal)
            .bind(&input.role)
            .bind(input.join_date)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRecord>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Check if a username is taken
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }

    /// Update profile fields, keeping stored values where the input is `None`
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        input: UpdateUserProfile,
    ) -> Result<Option<UserRecord>> {
        let query = format!(
            r#"
            UPDATE users SET
                nickname = COALESCE($2, nickname),
                avatar_url = COALESCE($3, avatar_url),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                gender = COALESCE($6, gender),
                age = COALESCE($7, age),
                height = COALESCE($8, height),
                weight = COALESCE($9, weight),
                target_weight = COALESCE($10, target_weight),
                fitness_goal = COALESCE($11, fitness_goal),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .bind(&input.nickname)
            .bind(&input.avatar_url)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gender)
            .bind(input.age)
            .bind(input.height)
            .bind(input.weight)
            .bind(input.target_weight)
            .bind(&input.fitness_goal)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}
