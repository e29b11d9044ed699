pub mod auth_service;
pub mod booking_manager;
pub mod calendar;
pub mod class_detail;
pub mod materializer;
pub mod registry;
pub mod schemes;
pub mod weights;
