use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use super::booking::Booking;
use super::default_schedule::DefaultSchedule;
use super::workout::WorkoutType;

/// A dated, bookable class. `default_schedule_id` is `None` for ad-hoc classes.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ScheduleInstance {
    pub id: String,
    pub default_schedule_id: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub current_participants: i32,
    #[sqlx(try_from = "String")]
    pub workout_type: WorkoutType,
    pub coach_id: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewScheduleParams {
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub workout_type: WorkoutType,
    pub coach_id: String,
}

impl ScheduleInstance {
    pub fn new(params: NewScheduleParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            default_schedule_id: None,
            date: params.date,
            time: params.time,
            capacity: params.capacity,
            current_participants: 0,
            workout_type: params.workout_type,
            coach_id: params.coach_id,
            created_at: Utc::now(),
        }
    }

    pub fn from_template(template: &DefaultSchedule, date: NaiveDate) -> Self {
        Self {
            default_schedule_id: Some(template.id.clone()),
            ..Self::new(NewScheduleParams {
                date,
                time: template.time.clone(),
                capacity: template.capacity,
                workout_type: template.workout_type,
                coach_id: template.coach_id.clone(),
            })
        }
    }

    /// Hour component of the `HH:MM` start time.
    pub fn hour(&self) -> Option<u32> {
        self.time.split(':').next().and_then(|h| h.parse().ok())
    }
}

/// Outcome of create-if-absent materialization.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterializeResult {
    Created(ScheduleInstance),
    AlreadyExists(ScheduleInstance),
}

impl MaterializeResult {
    pub fn into_instance(self) -> ScheduleInstance {
        match self {
            MaterializeResult::Created(s) | MaterializeResult::AlreadyExists(s) => s,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CoachSummary {
    pub id: String,
    pub username: String,
}

/// Instance with its coach and bookings embedded, for list views.
#[derive(Debug, Serialize, Clone)]
pub struct ScheduleDetails {
    #[serde(flatten)]
    pub schedule: ScheduleInstance,
    pub coach: Option<CoachSummary>,
    pub bookings: Vec<Booking>,
}
