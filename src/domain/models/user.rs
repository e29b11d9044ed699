use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use super::UnknownVariant;
use super::workout::MemberMaxLifts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Coach,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Coach => "COACH",
            Role::Admin => "ADMIN",
        }
    }

    pub fn manages_schedules(&self) -> bool {
        matches!(self, Role::Coach | Role::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "COACH" => Ok(Role::Coach),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownVariant { kind: "role", value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Authenticated caller as asserted by the access token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub max_bench: Option<f64>,
    pub max_ohp: Option<f64>,
    pub max_squat: Option<f64>,
    pub max_deadlift: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role,
            max_bench: None,
            max_ohp: None,
            max_squat: None,
            max_deadlift: None,
            created_at: Utc::now(),
        }
    }

    pub fn max_lifts(&self) -> MemberMaxLifts {
        MemberMaxLifts {
            max_bench: self.max_bench,
            max_ohp: self.max_ohp,
            max_squat: self.max_squat,
            max_deadlift: self.max_deadlift,
        }
    }
}
