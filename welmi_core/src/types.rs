//! Core domain types for the Welmi nutrition system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Biometric attributes (gender, activity level)
//! - Goal selection and direction
//! - Goal engine input/output records
//! - The profile record and its storage field names
//! - Weight and meal journal entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Biometric Types
// ============================================================================

/// User gender, as stored in the profile record (`male` / `female`)
///
/// Defaults to `Male` so that mid-wizard previews (gender not yet chosen)
/// compute with the male-equivalent policy, matching onboarding behaviour.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Parse a gender string (storage or display form)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Self-reported activity level
///
/// Storage names preserve the backend schema: `Active` is stored as
/// `moderately_active` (the backend's naming, not a typo).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Inactive,
    LightlyActive,
    #[serde(rename = "moderately_active")]
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Parse an activity level string (storage or display form)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "inactive" | "mostly_inactive" | "sedentary" => Some(ActivityLevel::Inactive),
            "lightly_active" | "light" => Some(ActivityLevel::LightlyActive),
            "active" | "moderately_active" | "moderate" => Some(ActivityLevel::Active),
            "very_active" | "very" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }
}

// ============================================================================
// Goal Types
// ============================================================================

/// The onboarding goal selection
///
/// Drives the preset defaults (weekly pace, steps goal, program steps) and
/// the goal direction. Only `BuildHealthyWeight` is a gain goal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalSelection {
    LoseWeight,
    BuildHealthyWeight,
    GetHealthier,
    LookBetter,
    MoreEnergy,
}

impl GoalSelection {
    /// The weight-change direction implied by this selection
    pub fn direction(self) -> GoalDirection {
        match self {
            GoalSelection::BuildHealthyWeight => GoalDirection::Gain,
            _ => GoalDirection::Lose,
        }
    }

    /// Parse a goal selection string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "lose_weight" | "lose" => Some(GoalSelection::LoseWeight),
            "build_healthy_weight" | "build" | "gain" => Some(GoalSelection::BuildHealthyWeight),
            "get_healthier" | "healthier" => Some(GoalSelection::GetHealthier),
            "look_better" | "look" => Some(GoalSelection::LookBetter),
            "more_energy" | "energy" => Some(GoalSelection::MoreEnergy),
            _ => None,
        }
    }
}

/// Direction of the weight goal, as consumed by the goal engine
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Lose,
    Gain,
    #[default]
    Maintain,
}

impl GoalDirection {
    /// Infer a direction from current and goal weight (settings revalidation)
    pub fn from_weights(current_kg: f64, goal_kg: f64) -> Self {
        if goal_kg > current_kg {
            GoalDirection::Gain
        } else if goal_kg < current_kg {
            GoalDirection::Lose
        } else {
            GoalDirection::Maintain
        }
    }
}

/// BMI classification band
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

// ============================================================================
// Goal Engine Records
// ============================================================================

/// Input to the goal engine, built fresh from form state on every change
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GoalInput {
    pub gender: Gender,
    pub age_years: u32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    /// `None` means the user has not picked a level yet
    pub activity_level: Option<ActivityLevel>,
    pub goal_direction: GoalDirection,
    /// Magnitude of weekly weight change, always non-negative
    pub weekly_pace_kg: f64,
}

/// Output of the goal engine, recomputed whenever any input changes
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalOutput {
    /// Basal metabolic rate, kcal/day
    pub bmr: f64,
    /// Total daily energy expenditure, kcal/day
    pub tdee: f64,
    /// Bounded daily calorie target, kcal/day
    pub daily_calorie_goal: u32,
    /// Upper bound for the weekly pace control, kg/week
    pub safe_weekly_pace_max_kg: f64,
    /// Daily water goal, ml
    pub daily_water_goal_ml: u32,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
}

// ============================================================================
// Profile Record
// ============================================================================

/// The persisted user profile
///
/// Field names match the backend `profiles` schema exactly, so the
/// serialized form is interchangeable with the hosted table rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub starting_weight_kg: f64,
    pub goal_weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub weekly_goal_kg: f64,
    pub daily_calorie_goal: u32,
    pub daily_steps_goal: u32,
    pub daily_water_goal_ml: u32,
    pub add_burned_calories: bool,
    #[serde(default)]
    pub program_steps: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Journal Entry Types
// ============================================================================

/// A logged body-weight measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub id: Uuid,
    pub weight_kg: f64,
    pub logged_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Meal slot within the day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    /// Parse a meal slot string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snack" => Some(MealSlot::Snack),
            _ => None,
        }
    }
}

/// A logged meal item with its nutrition facts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    pub id: Uuid,
    pub name: String,
    pub slot: MealSlot,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub logged_at: DateTime<Utc>,
}

/// Nutrition totals for one calendar day
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}
