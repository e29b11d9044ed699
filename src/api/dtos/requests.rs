use crate::domain::models::{user::Role, workout::WorkoutType};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct UpsertDefaultScheduleRequest {
    pub id: Option<String>,
    pub day_of_week: i32,
    pub time: String,
    pub capacity: i32,
    pub workout_type: WorkoutType,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub coach_id: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
pub struct MaterializeRequest {
    pub date: String,
}

#[derive(Deserialize)]
pub struct TemplateBookRequest {
    pub date: String,
    pub workout_type: Option<WorkoutType>,
}

#[derive(Deserialize, Default)]
pub struct BookRequest {
    pub workout_type: Option<WorkoutType>,
}

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub date: String,
    pub time: String,
    pub capacity: i32,
    pub workout_type: WorkoutType,
    pub coach_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub time: Option<String>,
    pub capacity: Option<i32>,
    pub workout_type: Option<WorkoutType>,
    pub coach_id: Option<String>,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
pub struct WeekQuery {
    pub start: Option<String>,
}

#[derive(Deserialize)]
pub struct CurrentClassQuery {
    pub date: Option<String>,
    pub hour: Option<u32>,
    pub week: Option<i32>,
}

#[derive(Deserialize)]
pub struct DetailQuery {
    pub week: Option<i32>,
}

#[derive(Deserialize)]
pub struct WeightQuery {
    pub lift: String,
    pub percentage: f64,
}
