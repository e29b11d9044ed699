use crate::domain::{models::schedule::{MaterializeResult, ScheduleInstance}, ports::ScheduleRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, schedule: &ScheduleInstance) -> Result<ScheduleInstance, sqlx::Error> {
        sqlx::query_as::<_, ScheduleInstance>(
            r#"INSERT INTO schedules (id, default_schedule_id, date, time, capacity, current_participants, workout_type, coach_id, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#
        )
            .bind(&schedule.id)
            .bind(&schedule.default_schedule_id)
            .bind(schedule.date)
            .bind(&schedule.time)
            .bind(schedule.capacity)
            .bind(schedule.current_participants)
            .bind(schedule.workout_type.as_str())
            .bind(&schedule.coach_id)
            .bind(schedule.created_at)
            .fetch_one(&self.pool)
            .await
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepo {
    async fn create(&self, schedule: &ScheduleInstance) -> Result<ScheduleInstance, AppError> {
        self.insert(schedule).await.map_err(AppError::Database)
    }

    async fn create_if_absent(&self, schedule: &ScheduleInstance) -> Result<MaterializeResult, AppError> {
        match self.insert(schedule).await {
            Ok(created) => Ok(MaterializeResult::Created(created)),
            Err(e) if is_unique_violation(&e) => {
                let template_id = schedule.default_schedule_id.as_deref()
                    .ok_or(AppError::InternalWithMsg("Materialized schedule without template".into()))?;
                let winner = self.find_by_template_and_date(template_id, schedule.date).await?
                    .ok_or(AppError::Database(e))?;
                Ok(MaterializeResult::AlreadyExists(winner))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleInstance>, AppError> {
        sqlx::query_as::<_, ScheduleInstance>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_template_and_date(&self, template_id: &str, date: NaiveDate) -> Result<Option<ScheduleInstance>, AppError> {
        sqlx::query_as::<_, ScheduleInstance>("SELECT * FROM schedules WHERE default_schedule_id = $1 AND date = $2")
            .bind(template_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<ScheduleInstance>, AppError> {
        sqlx::query_as::<_, ScheduleInstance>(
            "SELECT * FROM schedules WHERE date >= $1 AND date <= $2 ORDER BY date ASC, time ASC"
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, schedule: &ScheduleInstance) -> Result<ScheduleInstance, AppError> {
        let updated = sqlx::query_as::<_, ScheduleInstance>(
            r#"UPDATE schedules SET time=$1, capacity=$2, workout_type=$3, coach_id=$4
               WHERE id=$5 AND current_participants <= $6
               RETURNING *"#
        )
            .bind(&schedule.time)
            .bind(schedule.capacity)
            .bind(schedule.workout_type.as_str())
            .bind(&schedule.coach_id)
            .bind(&schedule.id)
            .bind(schedule.capacity)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match updated {
            Some(s) => Ok(s),
            None => match self.find_by_id(&schedule.id).await? {
                Some(current) => Err(AppError::Conflict(format!(
                    "Cannot reduce capacity to {}. {} bookings already exist.", schedule.capacity, current.current_participants
                ))),
                None => Err(AppError::NotFound("Schedule not found".into())),
            },
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("DELETE FROM bookings WHERE schedule_id = $1").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Schedule not found".into())); }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
