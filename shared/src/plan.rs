//! Plan progress engine
//!
//! Pure functions over a plan's schedule and day bookkeeping. The backend
//! loads a plan row, applies one of these operations and writes the result
//! back in the same transaction; the WASM module exposes the arithmetic to
//! the browser so both sides agree on the numbers.
//!
//! Day numbers are calendar day indexes inside the plan: day 1 is the start
//! date, day `durationWeeks * 7` is the end date.

use crate::errors::PlanError;
use crate::models::{Exercise, PlanStatus, TrainingDay};
use chrono::{Duration, NaiveDate};

/// Wire format for plan dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound for a plan's length in weeks
pub const MAX_DURATION_WEEKS: i32 = 52;

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| PlanError::InvalidDate(value.to_string()))
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Last day of a plan, inclusive: a one-week plan spans exactly seven days
pub fn end_date(start: NaiveDate, duration_weeks: i32) -> NaiveDate {
    let days = (duration_weeks.max(1) as i64) * 7 - 1;
    start + Duration::days(days)
}

/// Number of non-rest days in a schedule
pub fn count_non_rest_days(days: &[TrainingDay]) -> i32 {
    days.iter().filter(|d| !d.is_rest_day).count() as i32
}

/// Training days the plan expects over its whole duration
pub fn scheduled_training_days(
    duration_weeks: i32,
    training_days_per_week: i32,
    training_days: &[TrainingDay],
) -> i32 {
    let per_week = if training_days_per_week > 0 {
        training_days_per_week
    } else {
        count_non_rest_days(training_days)
    };
    duration_weeks.max(0) * per_week
}

/// Integer completion percentage.
///
/// `completed * 100 / (scheduled - skipped)`, floor division, 0 when no
/// effective days remain, never above 100.
pub fn completion_rate(completed: usize, skipped: usize, scheduled: i32) -> i32 {
    let effective = scheduled as i64 - skipped as i64;
    if effective <= 0 {
        return 0;
    }
    let rate = (completed as i64 * 100) / effective;
    rate.clamp(0, 100) as i32
}

/// Week/day position derived from elapsed wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPosition {
    pub week: i32,
    pub day: i32,
}

impl Default for CalendarPosition {
    fn default() -> Self {
        Self { week: 1, day: 1 }
    }
}

/// Where `today` falls in the plan, independent of completed/skipped days.
///
/// Falls back to week 1 day 1 before the start date or when the plan is
/// not active.
pub fn calendar_position(start: NaiveDate, today: NaiveDate, status: PlanStatus) -> CalendarPosition {
    if status != PlanStatus::Active {
        return CalendarPosition::default();
    }
    let elapsed = (today - start).num_days();
    if elapsed < 0 {
        return CalendarPosition::default();
    }
    CalendarPosition {
        week: (elapsed / 7) as i32 + 1,
        day: (elapsed % 7) as i32 + 1,
    }
}

/// Next date to train: one day per day already accounted for.
///
/// Only meaningful while the plan is active.
pub fn next_training_date(
    start: NaiveDate,
    completed: usize,
    skipped: usize,
    status: PlanStatus,
) -> Option<NaiveDate> {
    if status != PlanStatus::Active {
        return None;
    }
    Some(start + Duration::days((completed + skipped) as i64))
}

/// Check a schedule supplied for a template or a custom plan
pub fn validate_schedule(
    duration_weeks: i32,
    training_days_per_week: i32,
    training_days: &[TrainingDay],
) -> Result<(), PlanError> {
    if !(1..=MAX_DURATION_WEEKS).contains(&duration_weeks) {
        return Err(PlanError::InvalidSchedule(format!(
            "durationWeeks must be between 1 and {}",
            MAX_DURATION_WEEKS
        )));
    }
    if !(1..=7).contains(&training_days_per_week) {
        return Err(PlanError::InvalidSchedule(
            "trainingDaysPerWeek must be between 1 and 7".to_string(),
        ));
    }
    let mut seen = std::collections::BTreeSet::new();
    for day in training_days {
        if day.day_number < 1 {
            return Err(PlanError::InvalidSchedule(format!(
                "dayNumber {} must be positive",
                day.day_number
            )));
        }
        if !seen.insert(day.day_number) {
            return Err(PlanError::InvalidSchedule(format!(
                "dayNumber {} appears more than once",
                day.day_number
            )));
        }
        if day.is_rest_day && !day.exercises.is_empty() {
            return Err(PlanError::InvalidSchedule(format!(
                "rest day {} cannot carry exercises",
                day.day_number
            )));
        }
    }
    Ok(())
}

/// Outcome of a day-level bookkeeping change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayProgress {
    pub day_number: i32,
    pub completion_rate: i32,
    pub total_completed_days: i32,
}

/// Mutable progress state of one plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanState {
    pub status: PlanStatus,
    pub duration_weeks: i32,
    pub training_days_per_week: i32,
    pub training_days: Vec<TrainingDay>,
    pub training_days_override: Vec<TrainingDay>,
    pub completed_days: Vec<i32>,
    pub skipped_days: Vec<i32>,
}

impl PlanState {
    /// Fresh state for a newly created plan
    pub fn new(
        duration_weeks: i32,
        training_days_per_week: i32,
        training_days: Vec<TrainingDay>,
        training_days_override: Vec<TrainingDay>,
    ) -> Self {
        Self {
            status: PlanStatus::Active,
            duration_weeks,
            training_days_per_week,
            training_days,
            training_days_override,
            completed_days: Vec::new(),
            skipped_days: Vec::new(),
        }
    }

    /// Highest addressable day number
    pub fn max_day(&self) -> i32 {
        self.duration_weeks.max(0) * 7
    }

    pub fn scheduled_days(&self) -> i32 {
        scheduled_training_days(
            self.duration_weeks,
            self.training_days_per_week,
            &self.training_days,
        )
    }

    pub fn completion_rate(&self) -> i32 {
        completion_rate(
            self.completed_days.len(),
            self.skipped_days.len(),
            self.scheduled_days(),
        )
    }

    pub fn total_completed_days(&self) -> i32 {
        self.completed_days.len() as i32
    }

    fn check_day(&self, day: i32) -> Result<(), PlanError> {
        let max = self.max_day();
        if day < 1 || day > max {
            return Err(PlanError::DayOutOfRange { day, max });
        }
        Ok(())
    }

    fn progress(&self, day_number: i32) -> DayProgress {
        DayProgress {
            day_number,
            completion_rate: self.completion_rate(),
            total_completed_days: self.total_completed_days(),
        }
    }

    /// Mark a day as done. Completing twice, or completing a skipped day, fails.
    pub fn complete_day(&mut self, day: i32) -> Result<DayProgress, PlanError> {
        self.check_day(day)?;
        if self.completed_days.contains(&day) {
            return Err(PlanError::AlreadyCompleted(day));
        }
        if self.skipped_days.contains(&day) {
            return Err(PlanError::DaySkipped(day));
        }
        insert_sorted(&mut self.completed_days, day);
        Ok(self.progress(day))
    }

    /// Undo a completion
    pub fn uncomplete_day(&mut self, day: i32) -> Result<DayProgress, PlanError> {
        self.check_day(day)?;
        let before = self.completed_days.len();
        self.completed_days.retain(|d| *d != day);
        if self.completed_days.len() == before {
            return Err(PlanError::NotCompleted(day));
        }
        Ok(self.progress(day))
    }

    /// Mark a day as skipped. Skipping a completed or already skipped day fails.
    pub fn skip_day(&mut self, day: i32) -> Result<DayProgress, PlanError> {
        self.check_day(day)?;
        if self.completed_days.contains(&day) {
            return Err(PlanError::AlreadyCompleted(day));
        }
        if self.skipped_days.contains(&day) {
            return Err(PlanError::AlreadySkipped(day));
        }
        insert_sorted(&mut self.skipped_days, day);
        Ok(self.progress(day))
    }

    /// Replace a day's exercises in the plan-local override list.
    ///
    /// An existing override keeps its notes unless `notes` is non-empty. A
    /// new override inherits name and rest flag from the base day, if any.
    /// A day that receives exercises is no longer a rest day.
    /// `training_days` is never touched.
    pub fn adjust_day(
        &mut self,
        day: i32,
        exercises: Vec<Exercise>,
        notes: &str,
    ) -> Result<&TrainingDay, PlanError> {
        self.check_day(day)?;

        let index = match self
            .training_days_override
            .iter()
            .position(|d| d.day_number == day)
        {
            Some(index) => {
                let entry = &mut self.training_days_override[index];
                entry.is_rest_day &= exercises.is_empty();
                entry.exercises = exercises;
                if !notes.is_empty() {
                    entry.notes = notes.to_string();
                }
                index
            }
            None => {
                let base = self.training_days.iter().find(|d| d.day_number == day);
                let entry = TrainingDay {
                    day_number: day,
                    day_name: base.map(|b| b.day_name.clone()).unwrap_or_default(),
                    is_rest_day: base.is_some_and(|b| b.is_rest_day) && exercises.is_empty(),
                    exercises,
                    notes: notes.to_string(),
                    ..Default::default()
                };
                let index = self
                    .training_days_override
                    .partition_point(|d| d.day_number < day);
                self.training_days_override.insert(index, entry);
                index
            }
        };

        Ok(&self.training_days_override[index])
    }

    /// The day as it should be rendered: an override wins over the base day
    pub fn resolve_day(&self, day: i32) -> Option<&TrainingDay> {
        self.training_days_override
            .iter()
            .find(|d| d.day_number == day)
            .or_else(|| self.training_days.iter().find(|d| d.day_number == day))
    }

    /// Base schedule with overrides applied, ordered by day number
    pub fn effective_schedule(&self) -> Vec<TrainingDay> {
        let mut numbers: Vec<i32> = self
            .training_days
            .iter()
            .chain(self.training_days_override.iter())
            .map(|d| d.day_number)
            .collect();
        numbers.sort_unstable();
        numbers.dedup();

        numbers
            .into_iter()
            .filter_map(|n| self.resolve_day(n).cloned())
            .collect()
    }

    /// Stored week/day counter: the day after the furthest completed or
    /// skipped day, held at the last day of the plan.
    pub fn bookkeeping_position(&self) -> CalendarPosition {
        let last = self
            .completed_days
            .iter()
            .chain(self.skipped_days.iter())
            .copied()
            .max()
            .unwrap_or(0);
        let next = (last + 1).min(self.max_day().max(1));
        CalendarPosition {
            week: (next - 1) / 7 + 1,
            day: (next - 1) % 7 + 1,
        }
    }

    /// Apply an explicit status change. Returns whether the status changed.
    pub fn set_status(&mut self, next: PlanStatus) -> Result<bool, PlanError> {
        if !self.status.can_transition_to(next) {
            return Err(PlanError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        let changed = self.status != next;
        self.status = next;
        Ok(changed)
    }
}

fn insert_sorted(days: &mut Vec<i32>, day: i32) {
    let index = days.partition_point(|d| *d < day);
    days.insert(index, day);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn day(number: i32, rest: bool) -> TrainingDay {
        TrainingDay {
            day_number: number,
            day_name: if rest { "Rest".to_string() } else { format!("Day {}", number) },
            is_rest_day: rest,
            exercises: if rest {
                vec![]
            } else {
                vec![Exercise {
                    id: 1,
                    name: "Squat".to_string(),
                    sets: Some(5),
                    reps: Some(5),
                    weight: Some(100.0),
                    ..Default::default()
                }]
            },
            ..Default::default()
        }
    }

    /// Push/pull/legs week: three training days and four rest days
    fn three_day_week() -> Vec<TrainingDay> {
        vec![
            day(1, false),
            day(2, true),
            day(3, false),
            day(4, true),
            day(5, false),
            day(6, true),
            day(7, true),
        ]
    }

    fn state(weeks: i32, per_week: i32) -> PlanState {
        PlanState::new(weeks, per_week, three_day_week(), vec![])
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_end_date_four_week_plan() {
        assert_eq!(end_date(date("2024-01-01"), 4), date("2024-01-28"));
    }

    #[test]
    fn test_end_date_one_week_spans_seven_days() {
        let start = date("2024-02-26");
        let end = end_date(start, 1);
        assert_eq!((end - start).num_days() + 1, 7);
        assert_eq!(end, date("2024-03-03"));
    }

    #[rstest]
    #[case("2024-13-01")]
    #[case("2024/01/01")]
    #[case("yesterday")]
    #[case("")]
    fn test_parse_date_rejects_garbage(#[case] input: &str) {
        assert!(matches!(parse_date(input), Err(PlanError::InvalidDate(_))));
    }

    #[test]
    fn test_bookkeeping_position_follows_furthest_day() {
        let mut plan = state(2, 3);
        assert_eq!(plan.bookkeeping_position(), CalendarPosition { week: 1, day: 1 });

        plan.complete_day(3).unwrap();
        plan.skip_day(7).unwrap();
        assert_eq!(plan.bookkeeping_position(), CalendarPosition { week: 2, day: 1 });

        plan.complete_day(14).unwrap();
        assert_eq!(plan.bookkeeping_position(), CalendarPosition { week: 2, day: 7 });
    }

    #[test]
    fn test_two_completions_in_two_week_plan() {
        let mut plan = state(2, 3);
        plan.complete_day(1).unwrap();
        let progress = plan.complete_day(2).unwrap();

        assert_eq!(plan.scheduled_days(), 6);
        assert_eq!(progress.completion_rate, 33);
        assert_eq!(progress.total_completed_days, 2);
    }

    #[test]
    fn test_skipped_day_cannot_be_completed() {
        let mut plan = state(2, 3);
        plan.skip_day(1).unwrap();

        assert_eq!(plan.complete_day(1), Err(PlanError::DaySkipped(1)));
        assert!(plan.completed_days.is_empty());
    }

    #[test]
    fn test_completed_day_cannot_be_skipped() {
        let mut plan = state(2, 3);
        plan.complete_day(3).unwrap();

        assert_eq!(plan.skip_day(3), Err(PlanError::AlreadyCompleted(3)));
        assert!(plan.skipped_days.is_empty());
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut plan = state(1, 3);
        plan.complete_day(1).unwrap();
        assert_eq!(plan.complete_day(1), Err(PlanError::AlreadyCompleted(1)));
        assert_eq!(plan.total_completed_days(), 1);
    }

    #[test]
    fn test_skip_twice_fails() {
        let mut plan = state(1, 3);
        plan.skip_day(2).unwrap();
        assert_eq!(plan.skip_day(2), Err(PlanError::AlreadySkipped(2)));
    }

    #[test]
    fn test_skips_shrink_the_denominator() {
        let mut plan = state(2, 3);
        plan.complete_day(1).unwrap();
        plan.complete_day(3).unwrap();
        let progress = plan.skip_day(5).unwrap();

        // 2 * 100 / (6 - 1)
        assert_eq!(progress.completion_rate, 40);
    }

    #[test]
    fn test_uncomplete_day_recomputes() {
        let mut plan = state(2, 3);
        plan.complete_day(1).unwrap();
        plan.complete_day(3).unwrap();

        let progress = plan.uncomplete_day(1).unwrap();
        assert_eq!(progress.total_completed_days, 1);
        assert_eq!(progress.completion_rate, 16);
        assert_eq!(plan.uncomplete_day(1), Err(PlanError::NotCompleted(1)));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(15)]
    fn test_day_out_of_range(#[case] day_number: i32) {
        let mut plan = state(2, 3);
        assert_eq!(
            plan.complete_day(day_number),
            Err(PlanError::DayOutOfRange { day: day_number, max: 14 })
        );
        assert!(plan.skip_day(day_number).is_err());
        assert!(plan.adjust_day(day_number, vec![], "").is_err());
    }

    #[test]
    fn test_rate_is_zero_when_everything_skipped() {
        let mut plan = state(1, 2);
        plan.skip_day(1).unwrap();
        plan.skip_day(2).unwrap();
        assert_eq!(plan.completion_rate(), 0);
        assert_eq!(plan.skip_day(3).unwrap().completion_rate, 0);
    }

    #[test]
    fn test_rate_capped_when_more_days_than_scheduled() {
        let mut plan = state(1, 2);
        for d in 1..=4 {
            plan.complete_day(d).unwrap();
        }
        assert_eq!(plan.completion_rate(), 100);
    }

    #[test]
    fn test_scheduled_days_falls_back_to_non_rest_count() {
        assert_eq!(scheduled_training_days(4, 0, &three_day_week()), 12);
        assert_eq!(scheduled_training_days(4, 5, &three_day_week()), 20);
        assert_eq!(scheduled_training_days(4, 0, &[]), 0);
    }

    #[test]
    fn test_adjust_day_overrides_without_touching_base() {
        let mut plan = state(2, 3);
        let base_before = plan.training_days.clone();
        let replacement = vec![Exercise {
            id: 9,
            name: "Leg Press".to_string(),
            sets: Some(4),
            reps: Some(12),
            ..Default::default()
        }];

        let entry = plan.adjust_day(1, replacement.clone(), "knee friendly").unwrap();
        assert_eq!(entry.day_name, "Day 1");
        assert_eq!(entry.notes, "knee friendly");

        assert_eq!(plan.training_days, base_before);
        assert_eq!(plan.resolve_day(1).unwrap().exercises, replacement);
        assert_eq!(plan.resolve_day(3).unwrap().exercises[0].name, "Squat");
    }

    #[test]
    fn test_adjust_existing_override_keeps_notes_on_empty() {
        let mut plan = state(2, 3);
        plan.adjust_day(1, vec![], "first").unwrap();
        let entry = plan.adjust_day(1, vec![Exercise::default()], "").unwrap();

        assert_eq!(entry.notes, "first");
        assert_eq!(entry.exercises.len(), 1);
        assert_eq!(plan.training_days_override.len(), 1);

        let entry = plan.adjust_day(1, vec![], "second").unwrap();
        assert_eq!(entry.notes, "second");
    }

    #[test]
    fn test_adjust_day_beyond_base_schedule() {
        let mut plan = state(2, 3);
        let entry = plan.adjust_day(10, vec![], "").unwrap();

        assert_eq!(entry.day_number, 10);
        assert!(entry.day_name.is_empty());
        assert!(!entry.is_rest_day);
    }

    #[test]
    fn test_effective_schedule_orders_and_merges() {
        let mut plan = state(2, 3);
        plan.adjust_day(9, vec![], "extra").unwrap();
        plan.adjust_day(2, vec![Exercise::default()], "").unwrap();

        let schedule = plan.effective_schedule();
        let numbers: Vec<i32> = schedule.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 9]);
        assert_eq!(schedule[1].exercises.len(), 1);
        assert!(!schedule[1].is_rest_day);
        assert!(validate_schedule(2, 3, &schedule).is_ok());
    }

    #[test]
    fn test_adjust_rest_day_keeps_flag_only_while_empty() {
        let mut plan = state(2, 3);
        assert!(plan.adjust_day(4, vec![], "walk").unwrap().is_rest_day);

        let entry = plan.adjust_day(4, vec![Exercise::default()], "").unwrap();
        assert!(!entry.is_rest_day);
        assert_eq!(entry.notes, "walk");

        // Clearing exercises later does not turn it back into a rest day
        assert!(!plan.adjust_day(4, vec![], "").unwrap().is_rest_day);
    }

    #[test]
    fn test_calendar_position() {
        let start = date("2024-01-01");
        let active = PlanStatus::Active;

        assert_eq!(calendar_position(start, start, active), CalendarPosition { week: 1, day: 1 });
        assert_eq!(
            calendar_position(start, date("2024-01-09"), active),
            CalendarPosition { week: 2, day: 2 }
        );
        assert_eq!(
            calendar_position(start, date("2023-12-25"), active),
            CalendarPosition::default()
        );
        assert_eq!(
            calendar_position(start, date("2024-01-20"), PlanStatus::Paused),
            CalendarPosition::default()
        );
    }

    #[test]
    fn test_next_training_date() {
        let start = date("2024-01-01");
        assert_eq!(
            next_training_date(start, 2, 1, PlanStatus::Active),
            Some(date("2024-01-04"))
        );
        assert_eq!(next_training_date(start, 2, 1, PlanStatus::Archived), None);
    }

    #[test]
    fn test_status_change() {
        let mut plan = state(1, 3);
        assert!(plan.set_status(PlanStatus::Paused).unwrap());
        assert!(!plan.set_status(PlanStatus::Paused).unwrap());
        assert_eq!(
            plan.set_status(PlanStatus::Completed),
            Err(PlanError::InvalidTransition {
                from: PlanStatus::Paused,
                to: PlanStatus::Completed
            })
        );
        assert!(plan.set_status(PlanStatus::Archived).unwrap());
    }

    #[test]
    fn test_validate_schedule() {
        assert!(validate_schedule(4, 3, &three_day_week()).is_ok());
        assert!(validate_schedule(0, 3, &[]).is_err());
        assert!(validate_schedule(4, 8, &[]).is_err());
        assert!(validate_schedule(4, 3, &[day(1, false), day(1, false)]).is_err());

        let mut rest_with_work = day(2, true);
        rest_with_work.exercises.push(Exercise::default());
        assert!(validate_schedule(4, 3, &[rest_with_work]).is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Complete(i32),
        Skip(i32),
        Uncomplete(i32),
    }

    fn op_strategy(max_day: i32) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..=max_day + 1).prop_map(Op::Complete),
            (0..=max_day + 1).prop_map(Op::Skip),
            (0..=max_day + 1).prop_map(Op::Uncomplete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Completed and skipped sets stay disjoint and the counters agree
        #[test]
        fn prop_day_sets_stay_disjoint(
            weeks in 1i32..=8,
            per_week in 1i32..=7,
            ops in prop::collection::vec(op_strategy(56), 0..60)
        ) {
            let mut plan = state(weeks, per_week);
            for op in ops {
                let _ = match op {
                    Op::Complete(d) => plan.complete_day(d),
                    Op::Skip(d) => plan.skip_day(d),
                    Op::Uncomplete(d) => plan.uncomplete_day(d),
                };

                for d in &plan.completed_days {
                    prop_assert!(!plan.skipped_days.contains(d));
                }
                prop_assert_eq!(plan.total_completed_days() as usize, plan.completed_days.len());
                let rate = plan.completion_rate();
                prop_assert!((0..=100).contains(&rate));
                prop_assert!(plan.completed_days.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(plan.skipped_days.windows(2).all(|w| w[0] < w[1]));
            }
        }

        /// Completing days with a fixed skip set never lowers the rate
        #[test]
        fn prop_rate_monotonic_under_completion(
            weeks in 1i32..=8,
            per_week in 1i32..=7,
            days in prop::collection::vec(1i32..=56, 0..40)
        ) {
            let mut plan = state(weeks, per_week);
            let mut last = plan.completion_rate();
            for d in days {
                if plan.complete_day(d).is_ok() {
                    let rate = plan.completion_rate();
                    prop_assert!(rate >= last);
                    last = rate;
                }
            }
        }

        /// A second completion of the same day always fails
        #[test]
        fn prop_complete_is_not_idempotent(weeks in 1i32..=8, d in 1i32..=7) {
            let mut plan = state(weeks, 3);
            prop_assert!(plan.complete_day(d).is_ok());
            prop_assert_eq!(plan.complete_day(d), Err(PlanError::AlreadyCompleted(d)));
            prop_assert_eq!(plan.total_completed_days(), 1);
        }

        /// Plans always end durationWeeks * 7 - 1 days after they start
        #[test]
        fn prop_end_date_span(offset in 0i64..3650, weeks in 1i32..=52) {
            let start = date("2020-01-01") + Duration::days(offset);
            let end = end_date(start, weeks);
            prop_assert_eq!((end - start).num_days(), weeks as i64 * 7 - 1);
        }

        /// Adjusting a day resolves to the new exercises and leaves the base alone
        #[test]
        fn prop_adjust_resolves_to_override(d in 1i32..=14, sets in 1i32..10) {
            let mut plan = state(2, 3);
            let base = plan.training_days.clone();
            let exercises = vec![Exercise { name: "Row".to_string(), sets: Some(sets), ..Default::default() }];

            plan.adjust_day(d, exercises.clone(), "").unwrap();

            prop_assert_eq!(&plan.resolve_day(d).unwrap().exercises, &exercises);
            prop_assert_eq!(&plan.training_days, &base);
        }
    }
}
