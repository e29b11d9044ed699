use std::sync::Arc;
use tracing::info;
use crate::domain::models::{
    default_schedule::{DefaultSchedule, NewDefaultScheduleParams},
    user::Actor,
    workout::WorkoutType,
};
use crate::domain::ports::DefaultScheduleRepository;
use crate::domain::services::calendar::normalize_time;
use crate::error::AppError;

/// Create-or-update input for a weekly template. `id = None` creates.
#[derive(Debug, Clone)]
pub struct TemplateInput {
    pub id: Option<String>,
    pub day_of_week: i32,
    pub time: String,
    pub capacity: i32,
    pub workout_type: WorkoutType,
    pub is_active: bool,
    pub coach_id: Option<String>,
}

pub struct DefaultScheduleRegistry {
    repo: Arc<dyn DefaultScheduleRepository>,
}

impl DefaultScheduleRegistry {
    pub fn new(repo: Arc<dyn DefaultScheduleRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<DefaultSchedule>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<DefaultSchedule, AppError> {
        self.repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Default schedule not found".into()))
    }

    pub async fn upsert(&self, actor: &Actor, input: TemplateInput) -> Result<DefaultSchedule, AppError> {
        if !actor.role.manages_schedules() {
            return Err(AppError::Forbidden("Only coaches and admins can edit schedules".into()));
        }
        if !(0..=6).contains(&input.day_of_week) {
            return Err(AppError::Validation("day_of_week must be 0-6 (Sunday = 0)".into()));
        }
        if input.capacity <= 0 {
            return Err(AppError::Validation("capacity must be positive".into()));
        }
        let time = normalize_time(&input.time)?;

        // Empty coach means the acting user coaches the class.
        let coach_id = input.coach_id
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| actor.id.clone());

        match input.id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let mut existing = self.get(&id).await?;
                existing.day_of_week = input.day_of_week;
                existing.time = time;
                existing.capacity = input.capacity;
                existing.workout_type = input.workout_type;
                existing.is_active = input.is_active;
                existing.coach_id = coach_id;

                let updated = self.repo.update(&existing).await?;
                info!("Updated default schedule {}", updated.id);
                Ok(updated)
            }
            None => {
                let template = DefaultSchedule::new(NewDefaultScheduleParams {
                    day_of_week: input.day_of_week,
                    time,
                    capacity: input.capacity,
                    workout_type: input.workout_type,
                    is_active: input.is_active,
                    coach_id,
                });
                let created = self.repo.create(&template).await?;
                info!("Created default schedule {} (day {} at {})", created.id, created.day_of_week, created.time);
                Ok(created)
            }
        }
    }

    /// Materialized instances keep living after their template is gone.
    pub async fn delete(&self, actor: &Actor, id: &str) -> Result<(), AppError> {
        if !actor.role.manages_schedules() {
            return Err(AppError::Forbidden("Only coaches and admins can edit schedules".into()));
        }
        self.repo.delete(id).await?;
        info!("Deleted default schedule {}", id);
        Ok(())
    }
}
