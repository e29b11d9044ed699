use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};
use crate::domain::models::{booking::Booking, schedule::ScheduleInstance, workout::WorkoutType};
use crate::domain::ports::{BookingRepository, ScheduleRepository, UserRepository};
use crate::domain::services::calendar::{day_of_week, is_flexible_day};
use crate::domain::services::materializer::ScheduleMaterializer;
use crate::error::AppError;

/// Workout type a booking records. Flexible days take the member's choice and
/// require one; other days use the class's own type.
pub fn resolve_workout_type(schedule: &ScheduleInstance, requested: Option<WorkoutType>) -> Result<WorkoutType, AppError> {
    if is_flexible_day(schedule.date) {
        requested.ok_or(AppError::WorkoutTypeRequired {
            day_of_week: day_of_week(schedule.date) as u32,
        })
    } else {
        Ok(schedule.workout_type)
    }
}

pub struct BookingManager {
    schedules: Arc<dyn ScheduleRepository>,
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    materializer: Arc<ScheduleMaterializer>,
}

impl BookingManager {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        materializer: Arc<ScheduleMaterializer>,
    ) -> Self {
        Self { schedules, bookings, users, materializer }
    }

    pub async fn book(&self, schedule_id: &str, user_id: &str, workout_type: Option<WorkoutType>) -> Result<Booking, AppError> {
        self.ensure_member(user_id).await?;
        self.book_for_member(schedule_id, user_id, workout_type).await
    }

    /// A still-valid token may outlive its user.
    async fn ensure_member(&self, user_id: &str) -> Result<(), AppError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            warn!("Booking refused: user {} no longer exists", user_id);
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    async fn book_for_member(&self, schedule_id: &str, user_id: &str, workout_type: Option<WorkoutType>) -> Result<Booking, AppError> {
        let schedule = self.schedules.find_by_id(schedule_id).await?
            .ok_or(AppError::NotFound("Schedule not found".into()))?;

        if self.bookings.find(&schedule.id, user_id).await?.is_some() {
            return Err(AppError::AlreadyBooked);
        }

        let resolved = resolve_workout_type(&schedule, workout_type)?;

        // Seat and uniqueness are re-checked by the store inside one transaction.
        let booking = Booking::new(schedule.id.clone(), user_id.to_string(), resolved);
        match self.bookings.book(&booking).await {
            Ok(created) => {
                info!("Booking confirmed: {} for schedule {} ({})", created.id, schedule.id, created.workout_type);
                Ok(created)
            }
            Err(AppError::CapacityExceeded) => {
                warn!("Booking rejected: schedule {} is full", schedule.id);
                Err(AppError::CapacityExceeded)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn cancel(&self, schedule_id: &str, user_id: &str) -> Result<(), AppError> {
        self.bookings.cancel(schedule_id, user_id).await?;
        info!("Booking cancelled: user {} from schedule {}", user_id, schedule_id);
        Ok(())
    }

    /// Releases every seat held by `user_id`; used before removing the member.
    pub async fn cancel_all_for_user(&self, user_id: &str) -> Result<usize, AppError> {
        let bookings = self.bookings.list_by_user(user_id).await?;
        let mut released = 0;
        for booking in bookings {
            match self.bookings.cancel(&booking.schedule_id, user_id).await {
                Ok(()) => released += 1,
                // Cancelled concurrently.
                Err(AppError::NotBooked) => {}
                Err(e) => return Err(e),
            }
        }
        info!("Released {} bookings for user {}", released, user_id);
        Ok(released)
    }

    /// Books a template slot for `date`, materializing it first. Whether this
    /// call or a concurrent one created the instance, the booking lands on the
    /// single canonical instance.
    pub async fn book_from_template(
        &self,
        template_id: &str,
        date: NaiveDate,
        user_id: &str,
        workout_type: Option<WorkoutType>,
    ) -> Result<Booking, AppError> {
        self.ensure_member(user_id).await?;
        let schedule = self.materializer.materialize(template_id, date).await?.into_instance();
        self.book_for_member(&schedule.id, user_id, workout_type).await
    }
}
