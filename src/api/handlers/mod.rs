pub mod auth;
pub mod booking;
pub mod class_detail;
pub mod default_schedule;
pub mod health;
pub mod member;
pub mod profile;
pub mod schedule;
pub mod workout;
