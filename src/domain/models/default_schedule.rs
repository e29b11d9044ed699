use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use super::workout::WorkoutType;

/// Recurring weekly class slot. `day_of_week` is 0..=6 with Sunday = 0.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DefaultSchedule {
    pub id: String,
    pub day_of_week: i32,
    pub time: String,
    pub capacity: i32,
    #[sqlx(try_from = "String")]
    pub workout_type: WorkoutType,
    pub is_active: bool,
    pub coach_id: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewDefaultScheduleParams {
    pub day_of_week: i32,
    pub time: String,
    pub capacity: i32,
    pub workout_type: WorkoutType,
    pub is_active: bool,
    pub coach_id: String,
}

impl DefaultSchedule {
    pub fn new(params: NewDefaultScheduleParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            day_of_week: params.day_of_week,
            time: params.time,
            capacity: params.capacity,
            workout_type: params.workout_type,
            is_active: params.is_active,
            coach_id: params.coach_id,
            created_at: Utc::now(),
        }
    }
}
