//! User service for authentication and profile management
//!
//! Password hashing and verification run on the blocking pool; the JWT
//! service is borrowed from `AppState` with its keys already derived.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::metrics;
use crate::repositories::{CreateUser, UpdateUserProfile, UserRecord, UserRepository};
use chrono::Utc;
use fitplan_shared::plan::format_date;
use fitplan_shared::types::{
    AuthResponse, RefreshTokenResponse, SignupRequest, UpdateUserInfoRequest, UserInfoResponse,
};
use fitplan_shared::UserRole;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user with role `user`
    pub async fn signup(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: SignupRequest,
    ) -> Result<AuthResponse, ApiError> {
        if UserRepository::username_exists(pool, &req.username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let input = CreateUser {
            username: req.username,
            password_hash,
            nickname: req.nickname.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            gender: req.gender.unwrap_or_default(),
            age: req.age.unwrap_or(0),
            height: to_decimal(req.height.unwrap_or(0.0)),
            weight: to_decimal(req.weight.unwrap_or(0.0)),
            target_weight: to_decimal(req.target_weight.unwrap_or(0.0)),
            fitness_goal: req.fitness_goal.unwrap_or_default(),
            role: UserRole::User.as_str().to_string(),
            join_date: Utc::now().date_naive(),
        };

        // The unique index still guards against a concurrent signup
        let user = UserRepository::create(pool, input).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Username already exists".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(user_id = %user.id, username = %user.username, "User signed up");
        metrics::auth_event("signup");

        Self::issue_tokens(jwt_service, user.id, UserRole::User)
    }

    /// Login with username and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let user = match UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
        {
            Some(user) => user,
            None => {
                metrics::auth_event("login_failed");
                return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            metrics::auth_event("login_failed");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        metrics::auth_event("login");
        Self::issue_tokens(jwt_service, user.id, parse_role(&user.role))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<RefreshTokenResponse, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        // Role comes from the store so a demotion takes effect on refresh
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        let tokens = Self::issue_tokens(jwt_service, user.id, parse_role(&user.role))?;
        metrics::auth_event("refresh");

        Ok(RefreshTokenResponse {
            access_token: tokens.token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Get the caller's profile
    pub async fn get_info(pool: &PgPool, user_id: Uuid) -> Result<UserInfoResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(to_info(user))
    }

    /// Update profile fields; empty strings and non-positive numbers are left alone
    pub async fn update_info(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateUserInfoRequest,
    ) -> Result<UserInfoResponse, ApiError> {
        let input = profile_update(req);

        let user = UserRepository::update_profile(pool, user_id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user_id, "User profile updated");
        Ok(to_info(user))
    }

    fn issue_tokens(
        jwt_service: &JwtService,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<AuthResponse, ApiError> {
        let token = jwt_service
            .generate_access_token(user_id, role)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id, role)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            token,
            refresh_token,
            role: role.as_str().to_string(),
        })
    }
}

/// Unknown role strings fall back to the least privileged role
fn parse_role(role: &str) -> UserRole {
    role.parse().unwrap_or_default()
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn positive(value: f64) -> Option<Decimal> {
    (value > 0.0).then(|| to_decimal(value))
}

fn profile_update(req: UpdateUserInfoRequest) -> UpdateUserProfile {
    UpdateUserProfile {
        nickname: non_empty(req.nickname),
        avatar_url: non_empty(req.avatar_url),
        email: non_empty(req.email),
        phone: non_empty(req.phone),
        gender: non_empty(req.gender),
        age: (req.age > 0).then_some(req.age),
        height: positive(req.height),
        weight: positive(req.weight),
        target_weight: positive(req.target_weight),
        fitness_goal: non_empty(req.fitness_goal),
    }
}

fn to_info(user: UserRecord) -> UserInfoResponse {
    UserInfoResponse {
        id: user.id.to_string(),
        username: user.username,
        nickname: user.nickname,
        avatar_url: user.avatar_url,
        email: user.email,
        phone: user.phone,
        gender: user.gender,
        age: user.age,
        height: user.height.to_f64().unwrap_or(0.0),
        weight: user.weight.to_f64().unwrap_or(0.0),
        target_weight: user.target_weight.to_f64().unwrap_or(0.0),
        fitness_goal: user.fitness_goal,
        role: user.role,
        join_date: format_date(user.join_date),
    }
}
