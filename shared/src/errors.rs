//! Error types for the plan engine

use crate::models::PlanStatus;
use thiserror::Error;

/// Rule violations raised by the plan engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Day {day} is outside the plan (1-{max})")]
    DayOutOfRange { day: i32, max: i32 },

    #[error("Day {0} is already completed")]
    AlreadyCompleted(i32),

    #[error("Day {0} is already skipped")]
    AlreadySkipped(i32),

    #[error("Day {0} was skipped and cannot be completed")]
    DaySkipped(i32),

    #[error("Day {0} is not completed")]
    NotCompleted(i32),

    #[error("Cannot change plan status from {from} to {to}")]
    InvalidTransition { from: PlanStatus, to: PlanStatus },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
}

impl PlanError {
    /// True for errors caused by malformed input rather than plan state
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PlanError::DayOutOfRange { .. } | PlanError::InvalidDate(_) | PlanError::InvalidSchedule(_)
        )
    }
}
