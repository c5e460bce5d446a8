//! Progress statistics for the weight journey.
//!
//! Pure helpers behind the progress view: how far along the user is
//! between starting and goal weight, and where their BMI sits on the
//! displayed scale.

use crate::{Profile, WeightEntry};

/// Fraction of the way from starting weight to goal weight, in [0, 1]
///
/// Returns 0 when start equals goal or the ratio is not finite.
pub fn weight_progress_ratio(start_kg: f64, current_kg: f64, goal_kg: f64) -> f64 {
    if start_kg == goal_kg {
        return 0.0;
    }
    let ratio = (start_kg - current_kg) / (start_kg - goal_kg);
    if !ratio.is_finite() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Position of a BMI value on the displayed 15-40 scale, percent in [0, 100]
pub fn bmi_scale_position(bmi: f64) -> f64 {
    ((bmi - 15.0) / 25.0 * 100.0).clamp(0.0, 100.0)
}

/// Most recent known weight: profile value first, then the newest journal
/// entry, then 0
pub fn latest_weight(profile: Option<&Profile>, entries: &[WeightEntry]) -> f64 {
    if let Some(profile) = profile {
        if profile.current_weight_kg > 0.0 {
            return profile.current_weight_kg;
        }
    }
    entries.first().map(|e| e.weight_kg).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, Gender};
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_progress_ratio_midway() {
        assert_eq!(weight_progress_ratio(80.0, 75.0, 70.0), 0.5);
    }

    #[test]
    fn test_progress_ratio_clamps() {
        // Gained weight while trying to lose
        assert_eq!(weight_progress_ratio(80.0, 85.0, 70.0), 0.0);
        // Past the goal
        assert_eq!(weight_progress_ratio(80.0, 65.0, 70.0), 1.0);
    }

    #[test]
    fn test_progress_ratio_degenerate() {
        assert_eq!(weight_progress_ratio(70.0, 70.0, 70.0), 0.0);
    }

    #[test]
    fn test_progress_ratio_gain_direction() {
        assert_eq!(weight_progress_ratio(60.0, 62.0, 68.0), 0.25);
    }

    #[test]
    fn test_bmi_scale_position() {
        assert_eq!(bmi_scale_position(15.0), 0.0);
        assert_eq!(bmi_scale_position(40.0), 100.0);
        assert_eq!(bmi_scale_position(27.5), 50.0);
        // Out-of-scale values clamp
        assert_eq!(bmi_scale_position(10.0), 0.0);
        assert_eq!(bmi_scale_position(50.0), 100.0);
    }

    #[test]
    fn test_latest_weight_prefers_profile() {
        let profile = Profile {
            id: Uuid::new_v4(),
            gender: Gender::Male,
            age: 35,
            height_cm: 180.0,
            current_weight_kg: 82.0,
            starting_weight_kg: 85.0,
            goal_weight_kg: 78.0,
            activity_level: ActivityLevel::Active,
            weekly_goal_kg: 0.5,
            daily_calorie_goal: 2200,
            daily_steps_goal: 9000,
            daily_water_goal_ml: 2460,
            add_burned_calories: false,
            program_steps: vec![],
            updated_at: Utc::now(),
        };
        let entries = vec![WeightEntry {
            id: Uuid::new_v4(),
            weight_kg: 81.0,
            logged_at: Utc::now(),
            note: None,
        }];

        assert_eq!(latest_weight(Some(&profile), &entries), 82.0);
        assert_eq!(latest_weight(None, &entries), 81.0);
        assert_eq!(latest_weight(None, &[]), 0.0);
    }
}
