use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use crate::domain::models::{default_schedule::DefaultSchedule, schedule::ScheduleInstance, workout::WorkoutType};
use crate::error::AppError;

/// 0..=6 with Sunday = 0.
pub fn day_of_week(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// First date on or after `reference` that falls on `day_of_week` (Sunday = 0).
pub fn next_occurrence(day_of_week_target: i32, reference: NaiveDate) -> NaiveDate {
    let offset = (day_of_week_target - day_of_week(reference) + 7).rem_euclid(7);
    reference + Duration::days(offset as i64)
}

/// Friday and Saturday classes let the member pick upper or lower body.
pub fn is_flexible_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Validates an `HH:MM` clock time and returns it zero-padded.
pub fn normalize_time(raw: &str) -> Result<String, AppError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))
}

/// A bookable slot in the week view; `schedule_id` is set once materialized.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ScheduleSlot {
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub current_participants: i32,
    pub workout_type: WorkoutType,
    pub coach_id: String,
    pub default_schedule_id: Option<String>,
    pub schedule_id: Option<String>,
    pub is_flexible: bool,
}

impl From<&ScheduleInstance> for ScheduleSlot {
    fn from(s: &ScheduleInstance) -> Self {
        Self {
            date: s.date,
            time: s.time.clone(),
            capacity: s.capacity,
            current_participants: s.current_participants,
            workout_type: s.workout_type,
            coach_id: s.coach_id.clone(),
            default_schedule_id: s.default_schedule_id.clone(),
            schedule_id: Some(s.id.clone()),
            is_flexible: is_flexible_day(s.date),
        }
    }
}

/// Merges active templates with materialized instances over the 7 days
/// starting at `start`. A template already materialized for a date is
/// represented by its instance only.
pub fn project_week(start: NaiveDate, templates: &[DefaultSchedule], instances: &[ScheduleInstance]) -> Vec<ScheduleSlot> {
    let end = start + Duration::days(6);
    let mut slots: Vec<ScheduleSlot> = instances.iter()
        .filter(|s| s.date >= start && s.date <= end)
        .map(ScheduleSlot::from)
        .collect();

    for template in templates.iter().filter(|t| t.is_active) {
        let date = next_occurrence(template.day_of_week, start);
        let materialized = instances.iter().any(|s| {
            s.date == date && s.default_schedule_id.as_deref() == Some(template.id.as_str())
        });
        if materialized {
            continue;
        }

        slots.push(ScheduleSlot {
            date,
            time: template.time.clone(),
            capacity: template.capacity,
            current_participants: 0,
            workout_type: template.workout_type,
            coach_id: template.coach_id.clone(),
            default_schedule_id: Some(template.id.clone()),
            schedule_id: None,
            is_flexible: is_flexible_day(date),
        });
    }

    slots.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
    slots
}
