use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkoutType {
    Upper,
    Lower,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Upper => "UPPER",
            WorkoutType::Lower => "LOWER",
        }
    }

    /// Lifts trained in a session of this type, in display order.
    pub fn lifts(&self) -> [Lift; 2] {
        match self {
            WorkoutType::Upper => [Lift::Bench, Lift::OverheadPress],
            WorkoutType::Lower => [Lift::Squat, Lift::Deadlift],
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UPPER" => Ok(WorkoutType::Upper),
            "LOWER" => Ok(WorkoutType::Lower),
            _ => Err(UnknownVariant { kind: "workout type", value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for WorkoutType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lift {
    #[serde(rename = "BENCH")]
    Bench,
    #[serde(rename = "OHP")]
    OverheadPress,
    #[serde(rename = "SQUAT")]
    Squat,
    #[serde(rename = "DEADLIFT")]
    Deadlift,
}

impl FromStr for Lift {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bench" => Ok(Lift::Bench),
            "ohp" | "overhead_press" => Ok(Lift::OverheadPress),
            "squat" => Ok(Lift::Squat),
            "deadlift" => Ok(Lift::Deadlift),
            _ => Err(UnknownVariant { kind: "lift", value: s.to_string() }),
        }
    }
}

/// One-rep maxes owned by the member profile. Unset lifts are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberMaxLifts {
    pub max_bench: Option<f64>,
    pub max_ohp: Option<f64>,
    pub max_squat: Option<f64>,
    pub max_deadlift: Option<f64>,
}

impl MemberMaxLifts {
    pub fn get(&self, lift: Lift) -> Option<f64> {
        match lift {
            Lift::Bench => self.max_bench,
            Lift::OverheadPress => self.max_ohp,
            Lift::Squat => self.max_squat,
            Lift::Deadlift => self.max_deadlift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Weight {
    Scalar(f64),
    PerSet(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutScheme {
    pub week: i32,
    pub day: u32,
    pub lift_type: WorkoutType,
    pub reps: Vec<u32>,
    pub percentages: Vec<f64>,
    pub rest_time_seconds: u32,
}
