//! Training statistics
//!
//! Read-only reducers over records fetched oldest first. All grouping goes
//! through `BTreeMap` so output order never depends on hash iteration.

use crate::error::ApiError;
use crate::repositories::{PlanRepository, RecordFilter, TrainingRecordRepository, TrainingRecordRow};
use crate::services::plan::{parse_stored_status, PlanService};
use crate::services::record::record_weight;
use chrono::{Datelike, Duration, NaiveDate};
use fitplan_shared::plan::{completion_rate, format_date, parse_date, scheduled_training_days};
use fitplan_shared::types::{
    normalize_paging, CalendarDay, DailyStats, MuscleGroupStats, PersonalRecord, PlanListQuery,
    PlanProgressPage, PlanProgressSummary, PlanStatsResponse, TrainingStatsResponse,
};
use fitplan_shared::PlanStatus;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Year,
    /// A plan's own start..end range
    Whole,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::Whole => "whole",
        }
    }

    fn lookback_days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
            Period::Whole => 0,
        }
    }

    /// Parse an optional period, restricted to `allowed`
    fn parse(value: Option<&str>, default: Period, allowed: &[Period]) -> Result<Period, ApiError> {
        let value = match value.map(str::trim).filter(|s| !s.is_empty()) {
            Some(v) => v,
            None => return Ok(default),
        };
        allowed
            .iter()
            .copied()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| {
                let names: Vec<&str> = allowed.iter().map(Period::as_str).collect();
                ApiError::Validation(format!(
                    "Invalid period '{}'. Must be one of: {}",
                    value,
                    names.join(", ")
                ))
            })
    }

    /// `today - lookback ..= today`
    fn window_ending(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Duration::days(self.lookback_days()), today)
    }
}

/// Statistics service
pub struct StatsService;

impl StatsService {
    /// Totals over a period or an explicit date range
    pub async fn training(
        pool: &PgPool,
        user_id: Uuid,
        period: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<TrainingStatsResponse, ApiError> {
        let period = Period::parse(
            period,
            Period::Week,
            &[Period::Week, Period::Month, Period::Year],
        )?;
        let (start, end) = match (
            start_date.filter(|s| !s.is_empty()),
            end_date.filter(|s| !s.is_empty()),
        ) {
            (Some(start), Some(end)) => {
                let (start, end) = (parse_date(start)?, parse_date(end)?);
                if start > end {
                    return Err(ApiError::Validation(
                        "startDate must not be after endDate".to_string(),
                    ));
                }
                (start, end)
            }
            _ => period.window_ending(today),
        };

        let records = fetch_window(pool, user_id, start, end, None).await?;
        Ok(training_summary(&records, period, start, end))
    }

    pub async fn muscle_groups(
        pool: &PgPool,
        user_id: Uuid,
        period: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<MuscleGroupStats>, ApiError> {
        let period = Period::parse(
            period,
            Period::Month,
            &[Period::Week, Period::Month, Period::Year],
        )?;
        let (start, end) = period.window_ending(today);
        let records = fetch_window(pool, user_id, start, end, None).await?;
        Ok(muscle_group_stats(&records))
    }

    /// Heaviest weight per exercise over all time
    pub async fn personal_records(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<PersonalRecord>, ApiError> {
        let records =
            TrainingRecordRepository::list_chronological(pool, user_id, &RecordFilter::default())
                .await
                .map_err(ApiError::Internal)?;
        Ok(personal_records(&records))
    }

    pub async fn calendar(
        pool: &PgPool,
        user_id: Uuid,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Vec<CalendarDay>, ApiError> {
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());
        let (first, last) = month_bounds(year, month)?;

        let records = fetch_window(pool, user_id, first, last, None).await?;
        Ok(calendar_days(&records, first, last))
    }

    /// Progress of one plan plus the daily trend of its linked records
    pub async fn plan(
        pool: &PgPool,
        user_id: Uuid,
        plan_id: Option<&str>,
        period: Option<&str>,
        today: NaiveDate,
    ) -> Result<PlanStatsResponse, ApiError> {
        let plan_id = plan_id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::Validation("planId is required".to_string()))?;
        let plan_id = Uuid::parse_str(plan_id)
            .map_err(|_| ApiError::Validation("Invalid plan ID".to_string()))?;
        let period = Period::parse(
            period,
            Period::Whole,
            &[Period::Week, Period::Month, Period::Whole],
        )?;

        let plan = PlanService::fetch_owned(pool, user_id, plan_id).await?;
        let (start, end) = match period {
            Period::Whole => (plan.start_date, plan.end_date),
            other => other.window_ending(today),
        };

        let records = fetch_window(pool, user_id, start, end, Some(plan_id)).await?;
        let trend = daily_stats(&records);
        let scheduled = scheduled_training_days(
            plan.duration_weeks,
            plan.training_days_per_week,
            &plan.training_days.0,
        );

        Ok(PlanStatsResponse {
            plan_id: plan.id.to_string(),
            period: period.as_str().to_string(),
            start_date: format_date(start),
            end_date: format_date(end),
            completion_rate: completion_rate(
                plan.completed_days.len(),
                plan.skipped_days.len(),
                scheduled,
            ),
            completed_days: plan.completed_days.len() as i32,
            skipped_days: plan.skipped_days.len() as i32,
            total_duration: trend.iter().map(|d| d.duration).sum(),
            total_weight: round2(trend.iter().map(|d| d.weight).sum()),
            total_calories: trend.iter().map(|d| d.calories).sum(),
            trend,
        })
    }

    /// One progress row per plan
    pub async fn plan_progress(
        pool: &PgPool,
        user_id: Uuid,
        query: PlanListQuery,
    ) -> Result<PlanProgressPage, ApiError> {
        let (page, page_size, offset) =
            normalize_paging(query.page, query.page_size, DEFAULT_PAGE_SIZE);
        let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(PlanStatus::from_str(s).map_err(ApiError::Validation)?),
            None => None,
        };

        let (records, total) = PlanRepository::list_by_user(
            pool,
            user_id,
            status.map(|s| s.as_str()),
            page_size,
            offset,
        )
        .await
        .map_err(ApiError::Internal)?;

        let plans = records
            .into_iter()
            .map(|plan| {
                let status = parse_stored_status(&plan)?;
                Ok(PlanProgressSummary {
                    plan_id: plan.id.to_string(),
                    name: plan.name,
                    status: status.as_str().to_string(),
                    completion_rate: plan.completion_rate,
                    current_week: plan.current_week,
                    current_day: plan.current_day,
                    end_date: format_date(plan.end_date),
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(PlanProgressPage {
            total,
            page,
            page_size,
            plans,
        })
    }
}

async fn fetch_window(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    plan_id: Option<Uuid>,
) -> Result<Vec<TrainingRecordRow>, ApiError> {
    let filter = RecordFilter {
        start_date: Some(format_date(start)),
        end_date: Some(format_date(end)),
        plan_id,
    };
    TrainingRecordRepository::list_chronological(pool, user_id, &filter)
        .await
        .map_err(ApiError::Internal)
}

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let invalid = || ApiError::Validation(format!("Invalid year/month: {}-{}", year, month));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((first, next - Duration::days(1)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn record_sets(record: &TrainingRecordRow) -> i32 {
    record
        .total_sets
        .unwrap_or_else(|| record.exercises.0.iter().filter_map(|e| e.sets).sum())
}

/// Key with the highest count; ties go to the alphabetically first key
fn most_frequent(counts: &BTreeMap<String, i32>) -> String {
    counts
        .iter()
        .fold(None::<(&String, i32)>, |best, (name, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((name, *count)),
        })
        .map(|(name, _)| name.clone())
        .unwrap_or_default()
}

/// Per-day totals, ascending by date
pub fn daily_stats(records: &[TrainingRecordRow]) -> Vec<DailyStats> {
    let mut days: BTreeMap<&str, DailyStats> = BTreeMap::new();
    for record in records {
        let Some(date) = record.start_date() else {
            continue;
        };
        let day = days.entry(date).or_insert_with(|| DailyStats {
            date: date.to_string(),
            ..Default::default()
        });
        day.training_count += 1;
        day.duration += record.duration.unwrap_or(0);
        day.weight = round2(day.weight + record_weight(record));
        day.sets += record_sets(record);
        day.calories += record.calories_burned.unwrap_or(0);
    }
    days.into_values().collect()
}

pub fn training_summary(
    records: &[TrainingRecordRow],
    period: Period,
    start: NaiveDate,
    end: NaiveDate,
) -> TrainingStatsResponse {
    let daily = daily_stats(records);
    let count: i32 = daily.iter().map(|d| d.training_count).sum();
    let total_duration: i32 = daily.iter().map(|d| d.duration).sum();
    let total_weight = round2(daily.iter().map(|d| d.weight).sum());

    let mut muscles: BTreeMap<String, i32> = BTreeMap::new();
    let mut exercises: BTreeMap<String, i32> = BTreeMap::new();
    for exercise in records.iter().flat_map(|r| r.exercises.0.iter()) {
        *exercises.entry(exercise.name.clone()).or_default() += 1;
        if let Some(group) = exercise.muscle_group.as_ref().filter(|g| !g.is_empty()) {
            *muscles.entry(group.clone()).or_default() += 1;
        }
    }

    TrainingStatsResponse {
        period: period.as_str().to_string(),
        start_date: format_date(start),
        end_date: format_date(end),
        total_training_count: count,
        total_duration,
        total_weight,
        total_sets: daily.iter().map(|d| d.sets).sum(),
        total_calories: daily.iter().map(|d| d.calories).sum(),
        avg_duration: if count > 0 { total_duration / count } else { 0 },
        avg_weight: if count > 0 {
            round2(total_weight / count as f64)
        } else {
            0.0
        },
        most_trained_muscle: most_frequent(&muscles),
        favorite_exercise: most_frequent(&exercises),
        daily_stats: daily,
    }
}

/// Exercise count and volume per muscle group, sorted by group name
pub fn muscle_group_stats(records: &[TrainingRecordRow]) -> Vec<MuscleGroupStats> {
    let mut groups: BTreeMap<String, (i32, f64)> = BTreeMap::new();
    for exercise in records.iter().flat_map(|r| r.exercises.0.iter()) {
        let Some(group) = exercise.muscle_group.as_ref().filter(|g| !g.is_empty()) else {
            continue;
        };
        let entry = groups.entry(group.clone()).or_default();
        entry.0 += 1;
        entry.1 += exercise.volume();
    }

    let total: i32 = groups.values().map(|(count, _)| count).sum();
    groups
        .into_iter()
        .map(|(muscle_group, (count, weight))| MuscleGroupStats {
            muscle_group,
            training_count: count,
            total_weight: round2(weight),
            percentage: if total > 0 { count * 100 / total } else { 0 },
        })
        .collect()
}

/// Max weight per exercise; only a strictly heavier lift replaces a record
pub fn personal_records(records: &[TrainingRecordRow]) -> Vec<PersonalRecord> {
    let mut best: BTreeMap<String, PersonalRecord> = BTreeMap::new();
    for record in records {
        for exercise in record.exercises.0.iter() {
            let Some(weight) = exercise.weight else {
                continue;
            };
            let improves = best
                .get(&exercise.name)
                .map_or(true, |pr| weight > pr.max_weight);
            if improves {
                best.insert(
                    exercise.name.clone(),
                    PersonalRecord {
                        exercise_name: exercise.name.clone(),
                        max_weight: weight,
                        date: record.start_date().unwrap_or_default().to_string(),
                        record_id: record.id.to_string(),
                    },
                );
            }
        }
    }
    best.into_values().collect()
}

/// One entry per day in `first..=last`
pub fn calendar_days(
    records: &[TrainingRecordRow],
    first: NaiveDate,
    last: NaiveDate,
) -> Vec<CalendarDay> {
    let daily: BTreeMap<String, DailyStats> = daily_stats(records)
        .into_iter()
        .map(|d| (d.date.clone(), d))
        .collect();

    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|day| {
            let date = format_date(day);
            let stats = daily.get(&date);
            CalendarDay {
                has_training: stats.is_some(),
                training_count: stats.map_or(0, |s| s.training_count),
                total_duration: stats.map_or(0, |s| s.duration),
                date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::record::tests::{lift, row};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_daily_stats_ascending() {
        let records = vec![
            row("2024-03-02 07:00:00", vec![lift("Squat", "legs", Some(100.0))]),
            row("2024-03-01 18:00:00", vec![lift("Bench", "chest", Some(60.0))]),
            row("2024-03-02 19:00:00", vec![]),
        ];

        let daily = daily_stats(&records);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2024-03-01");
        assert_eq!(daily[1].date, "2024-03-02");
        assert_eq!(daily[1].training_count, 2);
        assert_eq!(daily[1].weight, 3000.0);
        assert_eq!(daily[1].duration, 120);
    }

    #[test]
    fn test_summary_ties_resolve_alphabetically() {
        let records = vec![
            row("2024-03-01 08:00:00", vec![lift("Row", "back", Some(50.0))]),
            row("2024-03-02 08:00:00", vec![lift("Deadlift", "back", Some(120.0))]),
            row("2024-03-03 08:00:00", vec![lift("Curl", "arms", Some(15.0))]),
            row("2024-03-04 08:00:00", vec![lift("Curl", "arms", Some(15.0))]),
        ];

        let summary = training_summary(&records, Period::Week, date("2024-03-01"), date("2024-03-07"));
        assert_eq!(summary.total_training_count, 4);
        assert_eq!(summary.most_trained_muscle, "arms");
        assert_eq!(summary.favorite_exercise, "Curl");
        assert_eq!(summary.avg_duration, 60);
        assert_eq!(summary.total_sets, 12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = training_summary(&[], Period::Month, date("2024-02-01"), date("2024-03-02"));
        assert_eq!(summary.total_training_count, 0);
        assert_eq!(summary.avg_weight, 0.0);
        assert_eq!(summary.most_trained_muscle, "");
        assert!(summary.daily_stats.is_empty());
    }

    #[test]
    fn test_muscle_groups_sorted_with_floor_percentage() {
        let records = vec![row(
            "2024-03-01 08:00:00",
            vec![
                lift("Squat", "legs", Some(100.0)),
                lift("Lunge", "legs", None),
                lift("Bench", "chest", Some(60.0)),
                lift("Stretch", "", None),
            ],
        )];

        let groups = muscle_group_stats(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].muscle_group, "chest");
        assert_eq!(groups[0].percentage, 33);
        assert_eq!(groups[1].muscle_group, "legs");
        assert_eq!(groups[1].training_count, 2);
        assert_eq!(groups[1].total_weight, 3000.0);
        assert_eq!(groups[1].percentage, 66);
    }

    #[test]
    fn test_personal_record_ties_keep_earliest() {
        let first = row("2024-03-01 08:00:00", vec![lift("Squat", "legs", Some(140.0))]);
        let second = row("2024-03-05 08:00:00", vec![lift("Squat", "legs", Some(140.0))]);
        let third = row("2024-03-09 08:00:00", vec![lift("Bench", "chest", None)]);
        let first_id = first.id.to_string();

        let prs = personal_records(&[first, second, third]);
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].exercise_name, "Squat");
        assert_eq!(prs[0].date, "2024-03-01");
        assert_eq!(prs[0].record_id, first_id);
    }

    #[test]
    fn test_personal_record_strictly_heavier_wins() {
        let records = vec![
            row("2024-03-01 08:00:00", vec![lift("Squat", "legs", Some(140.0))]),
            row("2024-03-05 08:00:00", vec![lift("Squat", "legs", Some(142.5))]),
        ];
        let prs = personal_records(&records);
        assert_eq!(prs[0].max_weight, 142.5);
        assert_eq!(prs[0].date, "2024-03-05");
    }

    #[test]
    fn test_calendar_covers_whole_month() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        let records = vec![row("2024-02-29 08:00:00", vec![])];

        let days = calendar_days(&records, first, last);
        assert_eq!(days.len(), 29);
        assert!(days[28].has_training);
        assert_eq!(days[28].total_duration, 60);
        assert!(!days[0].has_training);
    }

    #[test]
    fn test_month_bounds_rejects_bad_month() {
        assert!(matches!(month_bounds(2024, 13), Err(ApiError::Validation(_))));
        assert_eq!(
            month_bounds(2023, 12).unwrap(),
            (date("2023-12-01"), date("2023-12-31"))
        );
    }

    #[test]
    fn test_period_parsing() {
        let all = [Period::Week, Period::Month, Period::Year];
        assert_eq!(Period::parse(None, Period::Week, &all).unwrap(), Period::Week);
        assert_eq!(Period::parse(Some("year"), Period::Week, &all).unwrap(), Period::Year);
        assert!(Period::parse(Some("whole"), Period::Week, &all).is_err());

        let (start, end) = Period::Week.window_ending(date("2024-03-10"));
        assert_eq!((start, end), (date("2024-03-03"), date("2024-03-10")));
    }
}
