use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::workout::WorkoutType;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub schedule_id: String,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub workout_type: WorkoutType,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(schedule_id: String, user_id: String, workout_type: WorkoutType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            schedule_id,
            user_id,
            workout_type,
            created_at: Utc::now(),
        }
    }
}
