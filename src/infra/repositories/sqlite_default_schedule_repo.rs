use crate::domain::{models::default_schedule::DefaultSchedule, ports::DefaultScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDefaultScheduleRepo {
    pool: SqlitePool,
}

impl SqliteDefaultScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DefaultScheduleRepository for SqliteDefaultScheduleRepo {
    async fn create(&self, template: &DefaultSchedule) -> Result<DefaultSchedule, AppError> {
        sqlx::query_as::<_, DefaultSchedule>(
            r#"INSERT INTO default_schedules (id, day_of_week, time, capacity, workout_type, is_active, coach_id, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&template.id)
            .bind(template.day_of_week)
            .bind(&template.time)
            .bind(template.capacity)
            .bind(template.workout_type.as_str())
            .bind(template.is_active)
            .bind(&template.coach_id)
            .bind(template.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DefaultSchedule>, AppError> {
        sqlx::query_as::<_, DefaultSchedule>("SELECT * FROM default_schedules WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<DefaultSchedule>, AppError> {
        sqlx::query_as::<_, DefaultSchedule>("SELECT * FROM default_schedules ORDER BY day_of_week ASC, time ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, template: &DefaultSchedule) -> Result<DefaultSchedule, AppError> {
        sqlx::query_as::<_, DefaultSchedule>(
            r#"UPDATE default_schedules SET day_of_week=?, time=?, capacity=?, workout_type=?, is_active=?, coach_id=?
               WHERE id=?
               RETURNING *"#
        )
            .bind(template.day_of_week)
            .bind(&template.time)
            .bind(template.capacity)
            .bind(template.workout_type.as_str())
            .bind(template.is_active)
            .bind(&template.coach_id)
            .bind(&template.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Default schedule not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM default_schedules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Default schedule not found".into()));
        }
        Ok(())
    }
}
