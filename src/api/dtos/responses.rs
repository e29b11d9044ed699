use crate::domain::models::{
    booking::Booking,
    schedule::ScheduleInstance,
    user::{Role, User},
    workout::{Lift, Weight},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// User without credentials.
#[derive(Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub max_bench: Option<f64>,
    pub max_ohp: Option<f64>,
    pub max_squat: Option<f64>,
    pub max_deadlift: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for MemberResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            max_bench: u.max_bench,
            max_ohp: u.max_ohp,
            max_squat: u.max_squat,
            max_deadlift: u.max_deadlift,
            created_at: u.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct MyBookingResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub schedule: Option<ScheduleInstance>,
}

#[derive(Serialize)]
pub struct WeightResponse {
    pub lift: Lift,
    pub max: Option<f64>,
    pub percentage: f64,
    pub weight: Option<Weight>,
}
