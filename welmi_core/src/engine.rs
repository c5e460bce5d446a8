//! Goal-calculation engine.
//!
//! Pure, deterministic transformation of biometric/activity/goal inputs
//! into bounded daily targets:
//! - Mifflin-St Jeor BMR and activity-scaled TDEE
//! - Calorie target capped by gender and goal direction
//! - Safe weekly pace ceiling for the pace control
//! - Water goal, BMI and classification
//!
//! No I/O, no randomness, no shared state. Cheap enough to call on every
//! slider tick; callers recompute rather than cache.

use crate::{ActivityLevel, BmiCategory, Gender, GoalDirection, GoalInput, GoalOutput};

/// Energy equivalent of one kilogram of body mass, kcal
const KCAL_PER_KG: f64 = 7700.0;

/// Flat TDEE used when the computed value is zero or non-finite
const FALLBACK_TDEE: f64 = 2000.0;

// Neutral defaults substituted for zero/unset biometrics so degenerate
// input can never produce NaN or Infinity downstream.
const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_AGE_YEARS: u32 = 30;

/// Gender- and direction-specific calorie policy
#[derive(Clone, Copy, Debug)]
struct CaloriePolicy {
    deficit_pct: f64,
    max_daily_deficit: f64,
    surplus_pct: f64,
    max_daily_surplus: f64,
    min_calories: f64,
    pace_ceiling_gain: f64,
    pace_clamp_lose: f64,
}

fn calorie_policy(gender: Gender) -> CaloriePolicy {
    match gender {
        Gender::Female => CaloriePolicy {
            deficit_pct: 0.25,
            max_daily_deficit: 600.0,
            surplus_pct: 0.15,
            max_daily_surplus: 300.0,
            min_calories: 1200.0,
            pace_ceiling_gain: 0.6,
            pace_clamp_lose: 1.0,
        },
        Gender::Male => CaloriePolicy {
            deficit_pct: 0.30,
            max_daily_deficit: 750.0,
            surplus_pct: 0.15,
            max_daily_surplus: 400.0,
            min_calories: 1500.0,
            pace_ceiling_gain: 0.8,
            pace_clamp_lose: 1.2,
        },
    }
}

/// Healthy kilogram band for a given height
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthyWeightRange {
    pub min_kg: u32,
    pub max_kg: u32,
}

/// Compute all daily targets for the given input
///
/// Never fails and never returns NaN/Infinity: degenerate numeric input
/// (zero/unset fields) is substituted with neutral defaults. Range
/// validation of in-domain values belongs to the calling form layer.
pub fn compute_goals(input: &GoalInput) -> GoalOutput {
    let bmr = basal_metabolic_rate(input);
    let tdee = total_energy_expenditure(bmr, input.activity_level);
    let policy = calorie_policy(input.gender);

    let daily_calorie_goal = daily_calorie_goal(tdee, &policy, input);
    let safe_weekly_pace_max_kg = safe_weekly_pace_max(tdee, &policy, input.goal_direction);

    let bmi = body_mass_index(input.current_weight_kg, input.height_cm);

    GoalOutput {
        bmr,
        tdee,
        daily_calorie_goal,
        safe_weekly_pace_max_kg,
        daily_water_goal_ml: water_goal_ml(input.current_weight_kg),
        bmi,
        bmi_category: classify_bmi(bmi),
    }
}

/// Mifflin-St Jeor BMR estimate, kcal/day
///
/// Zero/unset weight, height or age fall back to 70 kg / 170 cm / 30 y.
pub fn basal_metabolic_rate(input: &GoalInput) -> f64 {
    let weight = if input.current_weight_kg > 0.0 {
        input.current_weight_kg
    } else {
        DEFAULT_WEIGHT_KG
    };
    let height = if input.height_cm > 0.0 {
        input.height_cm
    } else {
        DEFAULT_HEIGHT_CM
    };
    let age = if input.age_years > 0 {
        input.age_years
    } else {
        DEFAULT_AGE_YEARS
    };

    let offset = match input.gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };

    10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + offset
}

/// Activity multiplier; unset levels scale like `Inactive`
pub fn activity_factor(level: Option<ActivityLevel>) -> f64 {
    match level {
        Some(ActivityLevel::Inactive) | None => 1.2,
        Some(ActivityLevel::LightlyActive) => 1.375,
        Some(ActivityLevel::Active) => 1.55,
        Some(ActivityLevel::VeryActive) => 1.725,
    }
}

/// TDEE = BMR x activity factor, with a flat 2000 kcal fallback
pub fn total_energy_expenditure(bmr: f64, level: Option<ActivityLevel>) -> f64 {
    let tdee = bmr * activity_factor(level);
    if tdee.is_finite() && tdee > 0.0 {
        tdee
    } else {
        FALLBACK_TDEE
    }
}

fn daily_calorie_goal(tdee: f64, policy: &CaloriePolicy, input: &GoalInput) -> u32 {
    // Maintenance: no pace requested, or an explicit maintain goal
    if input.weekly_pace_kg <= 0.0 || input.goal_direction == GoalDirection::Maintain {
        return tdee.round() as u32;
    }

    let raw_change = input.weekly_pace_kg * KCAL_PER_KG / 7.0;

    if input.goal_direction == GoalDirection::Gain {
        let max_surplus = (tdee * policy.surplus_pct).min(policy.max_daily_surplus);
        let safe_surplus = raw_change.min(max_surplus);
        return (tdee + safe_surplus).round() as u32;
    }

    let max_deficit = (tdee * policy.deficit_pct).min(policy.max_daily_deficit);
    let safe_deficit = raw_change.min(max_deficit);
    let target = tdee - safe_deficit;

    // The gender floor always wins, even over the requested pace
    policy.min_calories.max(target.round()) as u32
}

/// Upper bound for the weekly pace control, kg/week
///
/// Gain goals use a flat gender ceiling; lose/maintain goals derive the
/// bound from the deficit cap, clamped to [0.1, gender clamp] and rounded
/// to one decimal place.
fn safe_weekly_pace_max(tdee: f64, policy: &CaloriePolicy, direction: GoalDirection) -> f64 {
    if direction == GoalDirection::Gain {
        return policy.pace_ceiling_gain;
    }

    let max_daily_deficit = (tdee * policy.deficit_pct).min(policy.max_daily_deficit);
    let max_weekly_kg = max_daily_deficit * 7.0 / KCAL_PER_KG;
    let bounded = max_weekly_kg.min(policy.pace_clamp_lose).max(0.1);
    (bounded * 10.0).round() / 10.0
}

/// Daily water goal: 30 ml per kg of body weight
pub fn water_goal_ml(current_weight_kg: f64) -> u32 {
    (current_weight_kg.max(0.0) * 30.0).round() as u32
}

/// BMI from raw weight/height; 0 when height is unset
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// Classification bands: inclusive lower bound, exclusive upper bound
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Healthy kilogram band for the given height (BMI 18.5 to 24.9)
pub fn healthy_weight_range(height_cm: f64) -> HealthyWeightRange {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return HealthyWeightRange { min_kg: 0, max_kg: 0 };
    }
    HealthyWeightRange {
        min_kg: (18.5 * height_m * height_m).round() as u32,
        max_kg: (24.9 * height_m * height_m).round() as u32,
    }
}

/// Whether a target weight lands in the healthy BMI band, inclusive
pub fn is_healthy_target_weight(weight_kg: f64, height_cm: f64) -> bool {
    let bmi = body_mass_index(weight_kg, height_cm);
    (18.5..=24.9).contains(&bmi)
}

/// Weeks to reach the goal weight at the given pace; 0 when already there
/// or no pace is set
pub fn weeks_to_goal(current_weight_kg: f64, goal_weight_kg: f64, weekly_pace_kg: f64) -> u32 {
    let total_change = (current_weight_kg - goal_weight_kg).abs();
    if total_change == 0.0 || weekly_pace_kg <= 0.0 {
        return 0;
    }
    (total_change / weekly_pace_kg).ceil() as u32
}
