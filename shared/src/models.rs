//! Domain value types shared by the backend, the engine and the WASM module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// A single movement within a training day or a logged session.
///
/// Every numeric field is optional: a cardio entry may only carry a
/// duration, a stretch may carry nothing but a name. Aggregations treat
/// an absent value as a zero contribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 100, message = "Exercise name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    /// Load in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Rest between sets in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

impl Exercise {
    /// Volume moved by this exercise: weight x sets x reps
    pub fn volume(&self) -> f64 {
        let weight = self.weight.unwrap_or(0.0);
        let sets = self.sets.unwrap_or(0) as f64;
        let reps = self.reps.unwrap_or(0) as f64;
        weight * sets * reps
    }
}

/// One scheduled day in a template or plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDay {
    #[validate(range(min = 1, message = "Day number must be positive"))]
    pub day_number: i32,
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup_tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_tips: Option<String>,
}

/// Plan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Paused,
    Completed,
    Archived,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Active,
        PlanStatus::Paused,
        PlanStatus::Completed,
        PlanStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Paused => "paused",
            PlanStatus::Completed => "completed",
            PlanStatus::Archived => "archived",
        }
    }

    /// Whether an explicit status change from `self` to `next` is allowed.
    ///
    /// Re-setting the current status is accepted as a no-op.
    pub fn can_transition_to(&self, next: PlanStatus) -> bool {
        if *self == next || next == PlanStatus::Archived {
            return true;
        }
        matches!(
            (self, next),
            (PlanStatus::Active, PlanStatus::Paused)
                | (PlanStatus::Active, PlanStatus::Completed)
                | (PlanStatus::Paused, PlanStatus::Active)
        )
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "paused" => Ok(PlanStatus::Paused),
            "completed" => Ok(PlanStatus::Completed),
            "archived" => Ok(PlanStatus::Archived),
            other => Err(format!(
                "Invalid status '{}'. Must be one of: active, paused, completed, archived",
                other
            )),
        }
    }
}

/// Account role carried in the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Feedback category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    #[default]
    Suggestion,
    Issue,
    Other,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Suggestion => "suggestion",
            FeedbackType::Issue => "issue",
            FeedbackType::Other => "other",
        }
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "suggestion" => Ok(FeedbackType::Suggestion),
            "issue" => Ok(FeedbackType::Issue),
            "other" => Ok(FeedbackType::Other),
            other => Err(format!(
                "Invalid feedback type '{}'. Must be one of: suggestion, issue, other",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PlanStatus::Active, PlanStatus::Paused, true)]
    #[case(PlanStatus::Active, PlanStatus::Completed, true)]
    #[case(PlanStatus::Active, PlanStatus::Archived, true)]
    #[case(PlanStatus::Paused, PlanStatus::Active, true)]
    #[case(PlanStatus::Paused, PlanStatus::Archived, true)]
    #[case(PlanStatus::Paused, PlanStatus::Completed, false)]
    #[case(PlanStatus::Completed, PlanStatus::Active, false)]
    #[case(PlanStatus::Completed, PlanStatus::Archived, true)]
    #[case(PlanStatus::Archived, PlanStatus::Active, false)]
    #[case(PlanStatus::Archived, PlanStatus::Archived, true)]
    fn test_status_transitions(
        #[case] from: PlanStatus,
        #[case] to: PlanStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in PlanStatus::ALL {
            assert_eq!(status.as_str().parse::<PlanStatus>().unwrap(), status);
        }
        assert!("finished".parse::<PlanStatus>().is_err());
    }

    #[test]
    fn test_exercise_volume_treats_missing_as_zero() {
        let full = Exercise {
            name: "Squat".to_string(),
            sets: Some(5),
            reps: Some(5),
            weight: Some(100.0),
            ..Default::default()
        };
        assert_eq!(full.volume(), 2500.0);

        let bodyweight = Exercise {
            name: "Push-up".to_string(),
            sets: Some(3),
            reps: Some(20),
            ..Default::default()
        };
        assert_eq!(bodyweight.volume(), 0.0);
    }

    #[test]
    fn test_training_day_deserializes_with_defaults() {
        let day: TrainingDay = serde_json::from_str(r#"{"dayNumber": 3}"#).unwrap();
        assert_eq!(day.day_number, 3);
        assert!(!day.is_rest_day);
        assert!(day.exercises.is_empty());
        assert!(day.notes.is_empty());
    }
}
