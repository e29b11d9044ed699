use crate::domain::models::{
    user::User, auth::RefreshTokenRecord, booking::Booking, default_schedule::DefaultSchedule,
    schedule::{MaterializeResult, ScheduleInstance}, workout::MemberMaxLifts,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update_max_lifts(&self, id: &str, lifts: &MemberMaxLifts) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait DefaultScheduleRepository: Send + Sync {
    async fn create(&self, template: &DefaultSchedule) -> Result<DefaultSchedule, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<DefaultSchedule>, AppError>;
    async fn list(&self) -> Result<Vec<DefaultSchedule>, AppError>;
    async fn update(&self, template: &DefaultSchedule) -> Result<DefaultSchedule, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: &ScheduleInstance) -> Result<ScheduleInstance, AppError>;
    /// Inserts under the (default_schedule_id, date) unique constraint. A lost
    /// race yields the row that won.
    async fn create_if_absent(&self, schedule: &ScheduleInstance) -> Result<MaterializeResult, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleInstance>, AppError>;
    async fn find_by_template_and_date(&self, template_id: &str, date: NaiveDate) -> Result<Option<ScheduleInstance>, AppError>;
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ScheduleInstance>, AppError>;
    /// Updates descriptive fields. Fails with `Conflict` when the new capacity
    /// is below the current participant count.
    async fn update(&self, schedule: &ScheduleInstance) -> Result<ScheduleInstance, AppError>;
    /// Deletes the instance together with its bookings.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking and claims a seat in one transaction.
    async fn book(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Removes the booking and releases its seat in one transaction.
    async fn cancel(&self, schedule_id: &str, user_id: &str) -> Result<(), AppError>;
    async fn find(&self, schedule_id: &str, user_id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_schedule(&self, schedule_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
}
