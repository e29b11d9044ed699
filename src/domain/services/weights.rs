use crate::domain::models::workout::{MemberMaxLifts, Weight};
use crate::error::AppError;

/// Rounds to the nearest multiple of 5; halves round away from zero.
pub fn round_to_nearest_5(value: f64) -> f64 {
    (value / 5.0).round() * 5.0
}

/// Working weight for `percentage` of `max_lift`. An unset max stays unset.
pub fn calculate(max_lift: Option<f64>, percentage: f64) -> Option<f64> {
    max_lift.map(|max| round_to_nearest_5(max * percentage / 100.0))
}

/// One weight per set, in set order.
pub fn per_set(max_lift: Option<f64>, percentages: &[f64]) -> Option<Weight> {
    let max = max_lift?;
    Some(Weight::PerSet(
        percentages.iter().map(|pct| round_to_nearest_5(max * pct / 100.0)).collect(),
    ))
}

/// Maxes must be finite and non-negative when set.
pub fn validate_max_lifts(lifts: &MemberMaxLifts) -> Result<(), AppError> {
    let all = [lifts.max_bench, lifts.max_ohp, lifts.max_squat, lifts.max_deadlift];
    if all.into_iter().flatten().any(|v| !v.is_finite() || v < 0.0) {
        return Err(AppError::Validation("Max lifts must be non-negative numbers".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_basic() {
        assert_eq!(calculate(Some(200.0), 75.0), Some(150.0));
        assert_eq!(calculate(None, 75.0), None);
    }

    #[test]
    fn test_rounding_midpoints() {
        assert_eq!(round_to_nearest_5(22.5), 25.0);
        assert_eq!(round_to_nearest_5(22.4), 20.0);
        assert_eq!(calculate(Some(100.0), 22.5), Some(25.0));
    }

    #[test]
    fn test_rounding_negative_values() {
        assert_eq!(round_to_nearest_5(-7.0), -5.0);
        assert_eq!(round_to_nearest_5(-13.0), -15.0);
    }

    #[test]
    fn test_rounding_halves_go_away_from_zero() {
        assert_eq!(round_to_nearest_5(12.5), 15.0);
        assert_eq!(round_to_nearest_5(-12.5), -15.0);
        assert_eq!(round_to_nearest_5(-2.5), -5.0);
    }

    #[test]
    fn test_per_set_keeps_set_order() {
        let weights = per_set(Some(100.0), &[65.0, 75.0, 85.0]);
        assert_eq!(weights, Some(Weight::PerSet(vec![65.0, 75.0, 85.0])));

        let uneven = per_set(Some(137.0), &[70.0, 80.0]);
        // 95.9 -> 95, 109.6 -> 110
        assert_eq!(uneven, Some(Weight::PerSet(vec![95.0, 110.0])));

        assert_eq!(per_set(None, &[70.0]), None);
    }

    #[test]
    fn test_validate_max_lifts() {
        let ok = MemberMaxLifts { max_bench: Some(100.0), ..Default::default() };
        assert!(validate_max_lifts(&ok).is_ok());
        assert!(validate_max_lifts(&MemberMaxLifts::default()).is_ok());

        let negative = MemberMaxLifts { max_squat: Some(-5.0), ..Default::default() };
        assert!(matches!(validate_max_lifts(&negative), Err(AppError::Validation(_))));
    }
}
