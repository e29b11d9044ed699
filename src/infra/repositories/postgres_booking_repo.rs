use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn book(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Write first so the transaction takes the write lock before reading.
        let created = match sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, schedule_id, user_id, workout_type, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&booking.id).bind(&booking.schedule_id).bind(&booking.user_id)
            .bind(booking.workout_type.as_str()).bind(booking.created_at)
            .fetch_one(&mut *tx).await
        {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => return Err(AppError::AlreadyBooked),
            Err(e) => return Err(AppError::Database(e)),
        };

        let seat = sqlx::query("UPDATE schedules SET current_participants = current_participants + 1 WHERE id = $1 AND current_participants < capacity")
            .bind(&booking.schedule_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if seat.rows_affected() == 0 { return Err(AppError::CapacityExceeded); }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn cancel(&self, schedule_id: &str, user_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let removed = sqlx::query("DELETE FROM bookings WHERE schedule_id = $1 AND user_id = $2")
            .bind(schedule_id).bind(user_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if removed.rows_affected() == 0 { return Err(AppError::NotBooked); }

        sqlx::query("UPDATE schedules SET current_participants = current_participants - 1 WHERE id = $1 AND current_participants > 0")
            .bind(schedule_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find(&self, schedule_id: &str, user_id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE schedule_id = $1 AND user_id = $2").bind(schedule_id).bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_schedule(&self, schedule_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE schedule_id = $1 ORDER BY created_at ASC").bind(schedule_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b JOIN schedules s ON s.id = b.schedule_id WHERE s.date >= $1 AND s.date <= $2 ORDER BY b.created_at ASC"
        ).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b JOIN schedules s ON s.id = b.schedule_id WHERE b.user_id = $1 ORDER BY s.date ASC, s.time ASC"
        ).bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
