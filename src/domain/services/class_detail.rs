use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;
use crate::domain::models::{
    booking::Booking,
    schedule::ScheduleInstance,
    user::User,
    workout::{Lift, Weight, WorkoutScheme, WorkoutType},
};
use crate::domain::ports::{BookingRepository, ScheduleRepository, UserRepository};
use crate::domain::services::{schemes, weights};
use crate::error::AppError;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "status", content = "weight", rename_all = "snake_case")]
pub enum LiftWeight {
    Computed(Weight),
    Unavailable,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LiftPrescription {
    pub lift: Lift,
    pub max: Option<f64>,
    pub weight: LiftWeight,
}

#[derive(Debug, Serialize, Clone)]
pub struct ParticipantDetail {
    pub user_id: String,
    pub username: String,
    pub workout_type: WorkoutType,
    pub scheme: WorkoutScheme,
    pub lifts: Vec<LiftPrescription>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ClassDetailView {
    pub schedule: ScheduleInstance,
    pub week: i32,
    pub day: u32,
    pub participants: Vec<ParticipantDetail>,
}

/// Builds the roster with per-set weights for every booked member.
pub fn assemble(
    schedule: &ScheduleInstance,
    bookings: &[Booking],
    members: &HashMap<String, User>,
    week: i32,
) -> Result<ClassDetailView, AppError> {
    let base = schemes::get_scheme(week, schedule.date.weekday().number_from_monday())?;

    let mut participants = Vec::with_capacity(bookings.len());
    for booking in bookings {
        // The booking's type wins: on flexible days it may differ from day parity.
        let scheme = schemes::scheme_for(week, base.day, booking.workout_type)?;
        let member = members.get(&booking.user_id);
        let maxes = member.map(User::max_lifts).unwrap_or_default();

        let lifts = booking.workout_type.lifts().into_iter().map(|lift| {
            let max = maxes.get(lift);
            let weight = weights::per_set(max, &scheme.percentages)
                .map(LiftWeight::Computed)
                .unwrap_or(LiftWeight::Unavailable);
            LiftPrescription { lift, max, weight }
        }).collect();

        participants.push(ParticipantDetail {
            user_id: booking.user_id.clone(),
            username: member.map(|m| m.username.clone()).unwrap_or_else(|| "unknown".to_string()),
            workout_type: booking.workout_type,
            scheme,
            lifts,
        });
    }

    Ok(ClassDetailView {
        schedule: schedule.clone(),
        week,
        day: base.day,
        participants,
    })
}

pub struct ClassDetailAssembler {
    schedules: Arc<dyn ScheduleRepository>,
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    program_start: NaiveDate,
}

impl ClassDetailAssembler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        program_start: NaiveDate,
    ) -> Self {
        Self { schedules, bookings, users, program_start }
    }

    /// Class running at the hour of `as_of` (gym local time).
    pub async fn current(&self, as_of: NaiveDateTime, week_override: Option<i32>) -> Result<ClassDetailView, AppError> {
        let date = as_of.date();
        let hour = as_of.hour();

        let mut candidates: Vec<ScheduleInstance> = self.schedules.list_by_range(date, date).await?
            .into_iter()
            .filter(|s| s.hour() == Some(hour))
            .collect();
        candidates.sort_by(|a, b| a.time.cmp(&b.time));

        let schedule = candidates.into_iter().next().ok_or_else(|| {
            debug!("No schedule at {} {:02}:00", date, hour);
            AppError::NoClassInSession
        })?;

        self.build(schedule, week_override).await
    }

    pub async fn for_schedule(&self, schedule_id: &str, week_override: Option<i32>) -> Result<ClassDetailView, AppError> {
        let schedule = self.schedules.find_by_id(schedule_id).await?
            .ok_or(AppError::NotFound("Schedule not found".into()))?;
        self.build(schedule, week_override).await
    }

    async fn build(&self, schedule: ScheduleInstance, week_override: Option<i32>) -> Result<ClassDetailView, AppError> {
        let week = week_override.unwrap_or_else(|| schemes::program_week(self.program_start, schedule.date));
        let bookings = self.bookings.list_by_schedule(&schedule.id).await?;

        let mut members = HashMap::new();
        for booking in &bookings {
            if let Some(user) = self.users.find_by_id(&booking.user_id).await? {
                members.insert(user.id.clone(), user);
            }
        }

        assemble(&schedule, &bookings, &members, week)
    }
}
