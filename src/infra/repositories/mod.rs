pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_default_schedule_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_booking_repo;

pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_default_schedule_repo;
pub mod postgres_schedule_repo;
pub mod postgres_booking_repo;
