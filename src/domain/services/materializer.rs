use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{debug, info};
use crate::domain::models::schedule::{MaterializeResult, ScheduleInstance};
use crate::domain::ports::{DefaultScheduleRepository, ScheduleRepository};
use crate::domain::services::calendar::day_of_week;
use crate::error::AppError;

/// Turns a weekly template plus a date into the one instance for that pair.
pub struct ScheduleMaterializer {
    templates: Arc<dyn DefaultScheduleRepository>,
    schedules: Arc<dyn ScheduleRepository>,
}

impl ScheduleMaterializer {
    pub fn new(templates: Arc<dyn DefaultScheduleRepository>, schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { templates, schedules }
    }

    pub async fn materialize(&self, template_id: &str, date: NaiveDate) -> Result<MaterializeResult, AppError> {
        let template = self.templates.find_by_id(template_id).await?
            .ok_or(AppError::NotFound("Default schedule not found".into()))?;

        if day_of_week(date) != template.day_of_week {
            return Err(AppError::Validation(format!(
                "Date {} does not fall on day {} of the template", date, template.day_of_week
            )));
        }

        if let Some(existing) = self.schedules.find_by_template_and_date(&template.id, date).await? {
            debug!("Schedule {} already materialized for {}", existing.id, date);
            return Ok(MaterializeResult::AlreadyExists(existing));
        }

        if !template.is_active {
            return Err(AppError::Validation("Default schedule is inactive".into()));
        }

        let result = self.schedules.create_if_absent(&ScheduleInstance::from_template(&template, date)).await?;
        match &result {
            MaterializeResult::Created(s) => info!("Materialized schedule {} from template {} for {}", s.id, template.id, date),
            MaterializeResult::AlreadyExists(s) => info!("Lost materialization race for {}; using schedule {}", date, s.id),
        }
        Ok(result)
    }
}
