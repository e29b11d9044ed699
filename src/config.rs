use std::env;
use chrono::NaiveDate;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub gym_timezone: Tz,
    /// Monday of week 1 of the 8-week program cycle.
    pub program_start_date: NaiveDate,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.gym-scheduler.local".to_string()),
            gym_timezone: env::var("GYM_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()).parse().expect("GYM_TIMEZONE must be an IANA timezone"),
            program_start_date: NaiveDate::parse_from_str(
                &env::var("PROGRAM_START_DATE").unwrap_or_else(|_| "2024-01-01".to_string()),
                "%Y-%m-%d",
            ).expect("PROGRAM_START_DATE must be YYYY-MM-DD"),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }
}
