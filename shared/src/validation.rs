//! Input validation functions
//!
//! Field checks that the `validator` derive cannot express on its own.

use crate::plan::parse_date;
use chrono::NaiveDateTime;
use std::sync::OnceLock;
use validator::ValidationError;

/// Wire format for record start/end times
pub const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RECORD_TIME_PATTERN: &str = r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$";

fn record_time_regex() -> &'static regex_lite::Regex {
    static RE: OnceLock<regex_lite::Regex> = OnceLock::new();
    RE.get_or_init(|| regex_lite::Regex::new(RECORD_TIME_PATTERN).expect("valid record time pattern"))
}

/// `validator` hook for `YYYY-MM-DD` plan dates
pub fn validate_plan_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("date");
        err.message = Some("Date must be a valid YYYY-MM-DD date".into());
        err
    })
}

/// Parse a zero-padded `YYYY-MM-DD HH:MM:SS` record time
pub fn parse_record_time(value: &str) -> Result<NaiveDateTime, String> {
    if !record_time_regex().is_match(value) {
        return Err(format!(
            "Invalid time '{}', expected YYYY-MM-DD HH:MM:SS",
            value
        ));
    }
    NaiveDateTime::parse_from_str(value, RECORD_TIME_FORMAT)
        .map_err(|_| format!("Invalid time '{}', expected YYYY-MM-DD HH:MM:SS", value))
}

/// Validate an optional record time
pub fn validate_record_time(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) => parse_record_time(v).map(|_| ()),
        None => Ok(()),
    }
}

/// Validate an optional inclusive date range filter
pub fn validate_date_range(start: Option<&str>, end: Option<&str>) -> Result<(), String> {
    let start = start
        .map(|s| parse_date(s).map_err(|e| e.to_string()))
        .transpose()?;
    let end = end
        .map(|s| parse_date(s).map_err(|e| e.to_string()))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err("startDate must not be after endDate".to_string());
        }
    }
    Ok(())
}

/// Valid training moods
pub const VALID_MOODS: &[&str] = &["great", "good", "normal", "tired"];

/// Validate a training mood
pub fn validate_mood(mood: &str) -> Result<(), String> {
    if VALID_MOODS.contains(&mood.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Invalid mood. Must be one of: {}",
            VALID_MOODS.join(", ")
        ))
    }
}
