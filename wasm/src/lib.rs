//! FitPlan WASM Module
//!
//! Browser bindings for the plan arithmetic, so a client renders the same
//! end dates, completion rates and calendar positions as the server.
//! Dates cross the boundary as `YYYY-MM-DD` strings; unparsable input
//! yields `undefined` on the JS side.

use chrono::NaiveDate;
use fitplan_shared::plan::{self, format_date, parse_date};
use fitplan_shared::{PlanStatus, TrainingDay};
use wasm_bindgen::prelude::*;

fn parse(value: &str) -> Option<NaiveDate> {
    parse_date(value).ok()
}

/// Last calendar day of a plan (inclusive)
#[wasm_bindgen]
pub fn end_date(start_date: &str, duration_weeks: i32) -> Option<String> {
    parse(start_date).map(|start| format_date(plan::end_date(start, duration_weeks)))
}

/// Integer completion percentage given the raw schedule numbers
#[wasm_bindgen]
pub fn completion_rate(
    completed: u32,
    skipped: u32,
    duration_weeks: i32,
    training_days_per_week: i32,
) -> i32 {
    let scheduled = plan::scheduled_training_days(duration_weeks, training_days_per_week, &[]);
    plan::completion_rate(completed as usize, skipped as usize, scheduled)
}

/// `[week, day]` of `today` within the plan; `[1, 1]` unless active and started
#[wasm_bindgen]
pub fn calendar_position(start_date: &str, today: &str, status: &str) -> Option<Vec<i32>> {
    let start = parse(start_date)?;
    let today = parse(today)?;
    let status = status.parse::<PlanStatus>().ok()?;
    let position = plan::calendar_position(start, today, status);
    Some(vec![position.week, position.day])
}

/// Suggested next training date; `undefined` unless the plan is active
#[wasm_bindgen]
pub fn next_training_date(start_date: &str, completed: u32, skipped: u32, status: &str) -> Option<String> {
    let start = parse(start_date)?;
    let status = status.parse::<PlanStatus>().ok()?;
    plan::next_training_date(start, completed as usize, skipped as usize, status).map(format_date)
}

/// Resolve overrides against the base schedule; both arguments are JSON
/// arrays of training days
#[wasm_bindgen]
pub fn effective_schedule(
    duration_weeks: i32,
    training_days_per_week: i32,
    training_days_json: &str,
    overrides_json: &str,
) -> Option<String> {
    let days: Vec<TrainingDay> = serde_json::from_str(training_days_json).ok()?;
    let overrides: Vec<TrainingDay> = serde_json::from_str(overrides_json).ok()?;
    let state = plan::PlanState::new(duration_weeks, training_days_per_week, days, overrides);
    serde_json::to_string(&state.effective_schedule()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_date() {
        assert_eq!(end_date("2024-01-01", 4).as_deref(), Some("2024-01-28"));
        assert_eq!(end_date("2024-02-30", 4), None);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(2, 0, 2, 3), 33);
        assert_eq!(completion_rate(2, 6, 2, 3), 0);
    }

    #[test]
    fn test_calendar_position() {
        assert_eq!(
            calendar_position("2024-01-01", "2024-01-10", "active"),
            Some(vec![2, 3])
        );
        assert_eq!(
            calendar_position("2024-01-01", "2024-01-10", "paused"),
            Some(vec![1, 1])
        );
        assert_eq!(calendar_position("2024-01-01", "2024-01-10", "done"), None);
    }

    #[test]
    fn test_next_training_date() {
        assert_eq!(
            next_training_date("2024-01-01", 2, 1, "active").as_deref(),
            Some("2024-01-04")
        );
        assert_eq!(next_training_date("2024-01-01", 2, 1, "archived"), None);
    }

    #[test]
    fn test_effective_schedule_prefers_override() {
        let base = r#"[{"dayNumber": 1, "dayName": "Push"}, {"dayNumber": 2, "dayName": "Pull"}]"#;
        let overrides = r#"[{"dayNumber": 2, "dayName": "Pull (light)"}]"#;

        let json = effective_schedule(1, 2, base, overrides).unwrap();
        let days: Vec<TrainingDay> = serde_json::from_str(&json).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].day_name, "Pull (light)");
    }
}
