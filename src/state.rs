use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, BookingRepository, DefaultScheduleRepository, ScheduleRepository, UserRepository,
};
use crate::domain::services::{
    auth_service::AuthService,
    booking_manager::BookingManager,
    class_detail::ClassDetailAssembler,
    materializer::ScheduleMaterializer,
    registry::DefaultScheduleRegistry,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub default_schedule_repo: Arc<dyn DefaultScheduleRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub registry: Arc<DefaultScheduleRegistry>,
    pub materializer: Arc<ScheduleMaterializer>,
    pub booking_manager: Arc<BookingManager>,
    pub class_detail: Arc<ClassDetailAssembler>,
}

impl AppState {
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        auth_repo: Arc<dyn AuthRepository>,
        default_schedule_repo: Arc<dyn DefaultScheduleRepository>,
        schedule_repo: Arc<dyn ScheduleRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let registry = Arc::new(DefaultScheduleRegistry::new(default_schedule_repo.clone()));
        let materializer = Arc::new(ScheduleMaterializer::new(default_schedule_repo.clone(), schedule_repo.clone()));
        let booking_manager = Arc::new(BookingManager::new(
            schedule_repo.clone(),
            booking_repo.clone(),
            user_repo.clone(),
            materializer.clone(),
        ));
        let class_detail = Arc::new(ClassDetailAssembler::new(
            schedule_repo.clone(),
            booking_repo.clone(),
            user_repo.clone(),
            config.program_start_date,
        ));

        Self {
            config,
            user_repo,
            auth_repo,
            default_schedule_repo,
            schedule_repo,
            booking_repo,
            auth_service,
            registry,
            materializer,
            booking_manager,
            class_detail,
        }
    }
}
