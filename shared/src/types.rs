//! API request and response types
//!
//! Every payload is camelCase on the wire. Request types derive
//! `validator::Validate`; handlers call `.validate()` before touching
//! the service layer.

use crate::models::{Exercise, TrainingDay};
use crate::validation::validate_plan_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Envelope and paging
// ============================================================================

/// Uniform response envelope: `{code, message, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Largest page a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number honoured; larger requests land on this (empty) page
pub const MAX_PAGE: i64 = 1_000_000;

/// Clamp raw paging input; returns `(page, page_size, offset)`
pub fn normalize_paging(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
    let page_size = page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE);
    (page, page_size, (page - 1) * page_size)
}

/// Id of a freshly created resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

// ============================================================================
// Auth and users
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 4, max = 20, message = "Username must be 4-20 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 20, message = "Password must be 6-20 characters"))]
    pub password: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 150, message = "Age must be between 1 and 150"))]
    pub age: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 20.0, max = 500.0, message = "Target weight must be between 20 and 500 kg"))]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub fitness_goal: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Tokens issued on signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub role: String,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile returned by `GET /user/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub avatar_url: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub target_weight: f64,
    pub fitness_goal: String,
    pub role: String,
    pub join_date: String,
}

/// Profile update; empty strings and non-positive numbers are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInfoRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    #[validate(range(max = 150, message = "Age cannot exceed 150"))]
    pub age: i32,
    #[serde(default)]
    #[validate(range(max = 300.0, message = "Height must be at most 300 cm"))]
    pub height: f64,
    #[serde(default)]
    #[validate(range(max = 500.0, message = "Weight must be at most 500 kg"))]
    pub weight: f64,
    #[serde(default)]
    #[validate(range(max = 500.0, message = "Target weight must be at most 500 kg"))]
    pub target_weight: f64,
    #[serde(default)]
    pub fitness_goal: String,
}

// ============================================================================
// Templates
// ============================================================================

/// Plan template as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a template (personal, or official through the admin route)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Goal is required"))]
    pub goal: String,
    #[serde(default)]
    pub split_type: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub equipment: String,
    pub duration_weeks: i32,
    pub training_days_per_week: i32,
    #[validate(nested)]
    pub training_days: Vec<TrainingDay>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub recommended_intensity: String,
    /// Only honoured for official templates
    #[serde(default)]
    pub author: Option<String>,
}

/// Partial template update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub split_type: Option<String>,
    pub level: Option<String>,
    pub equipment: Option<String>,
    pub duration_weeks: Option<i32>,
    pub training_days_per_week: Option<i32>,
    #[validate(nested)]
    pub training_days: Option<Vec<TrainingDay>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub recommended_intensity: Option<String>,
}

/// Template catalog filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListQuery {
    pub goal: Option<String>,
    pub level: Option<String>,
    pub split_type: Option<String>,
    pub equipment: Option<String>,
    pub duration_weeks_min: Option<i32>,
    pub duration_weeks_max: Option<i32>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Page of templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub templates: Vec<TemplateResponse>,
}

/// Plain paging query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// ============================================================================
// Plans
// ============================================================================

/// Fitness plan as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub duration_weeks: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_weeks_override: Option<i32>,
    pub training_days_per_week: i32,
    pub training_days: Vec<TrainingDay>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub training_days_override: Vec<TrainingDay>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    /// Stored position, advanced only by explicit API calls
    pub current_week: i32,
    pub current_day: i32,
    pub completed_days: Vec<i32>,
    pub skipped_days: Vec<i32>,
    pub total_completed_days: i32,
    pub completion_rate: i32,
    pub total_weight: f64,
    pub total_duration: i32,
    pub total_calories: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Instantiate a plan from a template
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanFromTemplateRequest {
    #[validate(length(min = 1, message = "templateId is required"))]
    pub template_id: String,
    #[validate(custom(function = "validate_plan_date"))]
    pub start_date: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration_weeks_override: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub training_days_override: Option<Vec<TrainingDay>>,
}

/// Create a self-authored plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Goal is required"))]
    pub goal: String,
    pub duration_weeks: i32,
    pub training_days_per_week: i32,
    #[validate(nested)]
    pub training_days: Vec<TrainingDay>,
    #[validate(custom(function = "validate_plan_date"))]
    pub start_date: String,
}

/// Mark a day completed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDayRequest {
    #[validate(range(min = 1, message = "dayNumber must be positive"))]
    pub day_number: i32,
    /// Training record that fulfilled the day
    #[serde(default)]
    pub record_id: Option<String>,
}

/// Revert a completed day
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UncompleteDayRequest {
    #[validate(range(min = 1, message = "dayNumber must be positive"))]
    pub day_number: i32,
}

/// Skip a day
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkipDayRequest {
    #[validate(range(min = 1, message = "dayNumber must be positive"))]
    pub day_number: i32,
    #[serde(default)]
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: String,
}

/// Swap a day's exercises for this plan only
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustDayRequest {
    #[validate(range(min = 1, message = "dayNumber must be positive"))]
    pub day_number: i32,
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub notes: String,
}

/// Set plan status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Plan list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Page of plans
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub plans: Vec<PlanResponse>,
}

/// Result of complete/uncomplete/skip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProgressResponse {
    pub day_number: i32,
    pub completion_rate: i32,
    pub total_completed_days: i32,
    pub completed_days: Vec<i32>,
    pub skipped_days: Vec<i32>,
}

/// Progress summary of one plan.
///
/// `currentWeek`/`currentDay` are the stored counters; `calendarWeek`/
/// `calendarDay` are derived from the days elapsed since `startDate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgressResponse {
    pub plan_id: String,
    pub status: String,
    pub total_days: i32,
    pub completed_days: i32,
    pub skipped_days: i32,
    pub completion_rate: i32,
    pub current_week: i32,
    pub current_day: i32,
    pub calendar_week: i32,
    pub calendar_day: i32,
    pub next_training_date: Option<String>,
    pub total_duration: i32,
    pub total_weight: f64,
    pub total_calories: i32,
}

// ============================================================================
// Training records
// ============================================================================

/// Logged training session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecordResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub exercises: Vec<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sets: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_day_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Log a training session
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingRecordRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 0, max = 1440, message = "Duration must be 0-1440 minutes"))]
    pub duration: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
    #[validate(range(min = 0.0, message = "Total weight cannot be negative"))]
    pub total_weight: Option<f64>,
    #[validate(range(min = 0, message = "Total sets cannot be negative"))]
    pub total_sets: Option<i32>,
    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub plan_id: Option<String>,
    #[validate(range(min = 1, message = "planDayId must be positive"))]
    pub plan_day_id: Option<i32>,
    pub completion_status: Option<String>,
}

/// Partial record update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrainingRecordRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[validate(range(min = 0, max = 1440, message = "Duration must be 0-1440 minutes"))]
    pub duration: Option<i32>,
    #[validate(nested)]
    pub exercises: Option<Vec<Exercise>>,
    #[validate(range(min = 0.0, message = "Total weight cannot be negative"))]
    pub total_weight: Option<f64>,
    #[validate(range(min = 0, message = "Total sets cannot be negative"))]
    pub total_sets: Option<i32>,
    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories_burned: Option<i32>,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub plan_id: Option<String>,
    #[validate(range(min = 1, message = "planDayId must be positive"))]
    pub plan_day_id: Option<i32>,
    pub completion_status: Option<String>,
}

/// Record list filters; dates are inclusive `YYYY-MM-DD`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub plan_id: Option<String>,
}

/// Page of records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub records: Vec<TrainingRecordResponse>,
}

// ============================================================================
// Stats
// ============================================================================

/// Window selection for training stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatsQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Per-day totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub training_count: i32,
    pub duration: i32,
    pub weight: f64,
    pub sets: i32,
    pub calories: i32,
}

/// Totals over a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatsResponse {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub total_training_count: i32,
    pub total_duration: i32,
    pub total_weight: f64,
    pub total_sets: i32,
    pub total_calories: i32,
    pub avg_duration: i32,
    pub avg_weight: f64,
    pub most_trained_muscle: String,
    pub favorite_exercise: String,
    pub daily_stats: Vec<DailyStats>,
}

/// Period-only query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub period: Option<String>,
}

/// Volume per muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleGroupStats {
    pub muscle_group: String,
    pub training_count: i32,
    pub total_weight: f64,
    pub percentage: i32,
}

/// Heaviest load lifted per exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise_name: String,
    pub max_weight: f64,
    pub date: String,
    pub record_id: String,
}

/// Calendar month selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// One calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub has_training: bool,
    pub training_count: i32,
    pub total_duration: i32,
}

/// Plan stats selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatsQuery {
    pub plan_id: Option<String>,
    pub period: Option<String>,
}

/// Progress and trend of one plan over a window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatsResponse {
    pub plan_id: String,
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub completion_rate: i32,
    pub completed_days: i32,
    pub skipped_days: i32,
    pub total_duration: i32,
    pub total_weight: f64,
    pub total_calories: i32,
    pub trend: Vec<DailyStats>,
}

/// One row of the plan progress list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgressSummary {
    pub plan_id: String,
    pub name: String,
    pub status: String,
    pub completion_rate: i32,
    pub current_week: i32,
    pub current_day: i32,
    pub end_date: String,
}

/// Page of plan progress rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgressPage {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub plans: Vec<PlanProgressSummary>,
}

// ============================================================================
// Feedback
// ============================================================================

/// Submit feedback
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    pub content: String,
    #[serde(default, rename = "type")]
    pub feedback_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200, message = "Contact info must be at most 200 characters"))]
    pub contact_info: Option<String>,
}

/// Stored feedback acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 10, (1, 10, 0))]
    #[case(Some(3), Some(20), 10, (3, 20, 40))]
    #[case(Some(0), Some(0), 10, (1, 1, 0))]
    #[case(Some(-4), Some(1000), 20, (1, 100, 0))]
    #[case(Some(i64::MAX), Some(100), 10, (MAX_PAGE, 100, (MAX_PAGE - 1) * 100))]
    #[case(Some(i64::MIN), Some(i64::MAX), 10, (1, 100, 0))]
    fn test_normalize_paging(
        #[case] page: Option<i64>,
        #[case] page_size: Option<i64>,
        #[case] default_size: i64,
        #[case] expected: (i64, i64, i64),
    ) {
        assert_eq!(normalize_paging(page, page_size, default_size), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any client paging input yields a non-negative, bounded offset
        #[test]
        fn prop_paging_offset_in_range(page in any::<i64>(), size in any::<i64>()) {
            let (page, page_size, offset) = normalize_paging(Some(page), Some(size), 10);
            prop_assert!((1..=MAX_PAGE).contains(&page));
            prop_assert!((1..=MAX_PAGE_SIZE).contains(&page_size));
            prop_assert_eq!(offset, (page - 1) * page_size);
        }
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let json = serde_json::to_value(ApiResponse::error(404, "Plan not found")).unwrap();
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "Plan not found");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_signup_validation() {
        let valid: SignupRequest =
            serde_json::from_str(r#"{"username": "lifter", "password": "secret1"}"#).unwrap();
        assert!(valid.validate().is_ok());

        let short: SignupRequest =
            serde_json::from_str(r#"{"username": "abc", "password": "secret1"}"#).unwrap();
        assert!(short.validate().is_err());

        let long_password: SignupRequest = serde_json::from_str(
            r#"{"username": "lifter", "password": "aaaaaaaaaaaaaaaaaaaaa"}"#,
        )
        .unwrap();
        assert!(long_password.validate().is_err());
    }

    #[test]
    fn test_custom_plan_rejects_bad_start_date() {
        let request: CreateCustomPlanRequest = serde_json::from_str(
            r#"{
                "name": "Base",
                "goal": "strength",
                "durationWeeks": 4,
                "trainingDaysPerWeek": 3,
                "trainingDays": [],
                "startDate": "2024-02-30"
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_feedback_type_field_name() {
        let request: FeedbackRequest =
            serde_json::from_str(r#"{"content": "More templates please", "type": "issue"}"#).unwrap();
        assert_eq!(request.feedback_type.as_deref(), Some("issue"));
    }
}
