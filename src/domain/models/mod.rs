pub mod auth;
pub mod booking;
pub mod default_schedule;
pub mod schedule;
pub mod user;
pub mod workout;

use thiserror::Error;

/// Raised when a stored or submitted enum string matches no variant.
#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
