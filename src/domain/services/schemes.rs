use chrono::NaiveDate;
use crate::domain::models::workout::{WorkoutScheme, WorkoutType};
use crate::error::AppError;

pub const PROGRAM_WEEKS: i32 = 8;

struct SchemeRow {
    reps: &'static [u32],
    percentages: &'static [f64],
    rest_time_seconds: u32,
}

const fn row(reps: &'static [u32], percentages: &'static [f64], rest_time_seconds: u32) -> SchemeRow {
    SchemeRow { reps, percentages, rest_time_seconds }
}

// [upper, lower] per program week.
const PROGRAM: [[SchemeRow; 2]; PROGRAM_WEEKS as usize] = [
    [row(&[8, 8, 8], &[60.0, 65.0, 70.0], 90), row(&[8, 8, 8], &[60.0, 65.0, 70.0], 120)],
    [row(&[6, 6, 6], &[65.0, 70.0, 75.0], 90), row(&[6, 6, 6], &[65.0, 70.0, 75.0], 120)],
    [row(&[5, 5, 5], &[70.0, 75.0, 80.0], 120), row(&[5, 5, 5], &[70.0, 75.0, 80.0], 150)],
    [row(&[5, 5, 5], &[50.0, 55.0, 60.0], 60), row(&[5, 5, 5], &[50.0, 55.0, 60.0], 90)],
    [row(&[5, 3, 1], &[75.0, 85.0, 95.0], 150), row(&[5, 3, 1], &[75.0, 85.0, 95.0], 180)],
    [row(&[3, 3, 3], &[80.0, 85.0, 90.0], 150), row(&[3, 3, 3], &[80.0, 85.0, 90.0], 180)],
    [row(&[3, 2, 1], &[85.0, 90.0, 95.0], 180), row(&[3, 2, 1], &[85.0, 90.0, 95.0], 180)],
    [row(&[5, 5, 5], &[50.0, 55.0, 60.0], 60), row(&[5, 5, 5], &[50.0, 55.0, 60.0], 90)],
];

/// Scheme for a program week and a Monday = 1 .. Sunday = 7 day.
/// Days past Friday fold back to Monday; odd days train upper body.
pub fn get_scheme(week: i32, day_of_week: u32) -> Result<WorkoutScheme, AppError> {
    if !(1..=7).contains(&day_of_week) {
        return Err(AppError::Validation(format!("Day of week must be 1-7, got {}", day_of_week)));
    }
    let day = if day_of_week > 5 { 1 } else { day_of_week };
    let lift_type = if day % 2 == 1 { WorkoutType::Upper } else { WorkoutType::Lower };
    scheme_for(week, day, lift_type)
}

/// Scheme for an explicitly chosen lift type, bypassing day parity.
pub fn scheme_for(week: i32, day: u32, lift_type: WorkoutType) -> Result<WorkoutScheme, AppError> {
    if !(1..=PROGRAM_WEEKS).contains(&week) {
        return Err(AppError::InvalidWeek(week));
    }
    let rows = &PROGRAM[(week - 1) as usize];
    let row = match lift_type {
        WorkoutType::Upper => &rows[0],
        WorkoutType::Lower => &rows[1],
    };

    Ok(WorkoutScheme {
        week,
        day,
        lift_type,
        reps: row.reps.to_vec(),
        percentages: row.percentages.to_vec(),
        rest_time_seconds: row.rest_time_seconds,
    })
}

/// Week of the repeating program cycle that `date` falls in.
pub fn program_week(program_start: NaiveDate, date: NaiveDate) -> i32 {
    let days = (date - program_start).num_days();
    (days.div_euclid(7).rem_euclid(PROGRAM_WEEKS as i64) + 1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parity_selects_lift_type() {
        assert_eq!(get_scheme(1, 1).unwrap().lift_type, WorkoutType::Upper);
        assert_eq!(get_scheme(1, 2).unwrap().lift_type, WorkoutType::Lower);
        assert_eq!(get_scheme(1, 3).unwrap().lift_type, WorkoutType::Upper);
        assert_eq!(get_scheme(1, 4).unwrap().lift_type, WorkoutType::Lower);
        assert_eq!(get_scheme(1, 5).unwrap().lift_type, WorkoutType::Upper);
    }

    #[test]
    fn test_weekend_folds_to_monday() {
        let saturday = get_scheme(3, 6).unwrap();
        assert_eq!(saturday.day, 1);
        assert_eq!(saturday, get_scheme(3, 1).unwrap());
        assert_eq!(get_scheme(3, 7).unwrap().day, 1);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(get_scheme(0, 1), Err(AppError::InvalidWeek(0))));
        assert!(matches!(get_scheme(9, 1), Err(AppError::InvalidWeek(9))));
        assert!(matches!(get_scheme(1, 0), Err(AppError::Validation(_))));
        assert!(matches!(get_scheme(1, 8), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_table_rows_are_consistent() {
        for week in 1..=PROGRAM_WEEKS {
            for lift_type in [WorkoutType::Upper, WorkoutType::Lower] {
                let scheme = scheme_for(week, 1, lift_type).unwrap();
                assert_eq!(scheme.reps.len(), scheme.percentages.len(), "week {} {}", week, lift_type);
                assert!(scheme.rest_time_seconds > 0);
            }
        }
    }

    #[test]
    fn test_program_week_cycles() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(program_week(start, start), 1);
        assert_eq!(program_week(start, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()), 1);
        assert_eq!(program_week(start, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()), 2);
        assert_eq!(program_week(start, start + chrono::Duration::days(7 * 8)), 1);
        assert_eq!(program_week(start, start - chrono::Duration::days(1)), 8);
    }
}
