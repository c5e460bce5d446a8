//! Onboarding orchestration.
//!
//! Thin layer over the goal engine: carries the wizard form state,
//! applies goal presets, and turns the computed targets into a persisted
//! profile via the injected repository.

use crate::{
    engine, presets::PresetCatalog, profile::ProfileRepository, ActivityLevel, Gender, GoalInput,
    GoalOutput, GoalSelection, Profile, Result,
};
use chrono::Utc;
use uuid::Uuid;

/// Wizard form state, mirrored by every onboarding surface
#[derive(Clone, Debug, PartialEq)]
pub struct OnboardingForm {
    pub goal: Option<GoalSelection>,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub goal_weight_kg: f64,
    pub activity_level: Option<ActivityLevel>,
    pub weekly_pace_kg: f64,
    pub daily_steps_goal: u32,
    pub daily_water_goal_ml: u32,
    pub add_burned_calories: bool,
    pub program_steps: Vec<String>,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            goal: None,
            gender: Gender::Male,
            age: 25,
            height_cm: 170.0,
            current_weight_kg: 70.0,
            goal_weight_kg: 70.0,
            activity_level: None,
            weekly_pace_kg: 0.5,
            daily_steps_goal: 10_000,
            daily_water_goal_ml: 2_000,
            add_burned_calories: false,
            program_steps: vec![],
        }
    }
}

impl OnboardingForm {
    /// Apply a goal selection's preset defaults
    ///
    /// The pace is only overwritten while the user hasn't touched the pace
    /// control themselves; steps and program steps follow the preset, with
    /// already-chosen program steps preserved.
    pub fn apply_preset(
        &mut self,
        selection: GoalSelection,
        user_adjusted_pace: bool,
        catalog: &PresetCatalog,
    ) {
        let preset = catalog.get(Some(selection));

        self.goal = Some(selection);
        if !user_adjusted_pace {
            self.weekly_pace_kg = preset.default_weekly_pace_kg;
        }
        self.daily_steps_goal = preset.daily_steps_goal;
        if self.program_steps.is_empty() {
            self.program_steps = preset.program_steps;
        }
    }

    /// Engine input for the current form state
    pub fn goal_input(&self) -> GoalInput {
        GoalInput {
            gender: self.gender,
            age_years: self.age,
            height_cm: self.height_cm,
            current_weight_kg: self.current_weight_kg,
            activity_level: self.activity_level,
            goal_direction: self
                .goal
                .map(GoalSelection::direction)
                .unwrap_or_default(),
            weekly_pace_kg: self.weekly_pace_kg,
        }
    }

    /// Recompute the derived daily targets for the current form state
    pub fn compute_goals(&self) -> GoalOutput {
        engine::compute_goals(&self.goal_input())
    }
}

/// Finish onboarding: compute targets, build the profile record, persist it
///
/// The chosen pace is allowed to exceed the safe ceiling (the engine caps
/// the resulting calorie target anyway), but it is logged so the calling
/// surface can warn.
pub fn complete(form: &OnboardingForm, repo: &dyn ProfileRepository) -> Result<Profile> {
    let output = form.compute_goals();

    if form.weekly_pace_kg > output.safe_weekly_pace_max_kg {
        tracing::warn!(
            "Chosen pace {} kg/week exceeds safe ceiling {} kg/week; calorie target is capped",
            form.weekly_pace_kg,
            output.safe_weekly_pace_max_kg
        );
    }

    let profile = Profile {
        id: Uuid::new_v4(),
        gender: form.gender,
        age: form.age,
        height_cm: form.height_cm,
        current_weight_kg: form.current_weight_kg,
        starting_weight_kg: form.current_weight_kg,
        goal_weight_kg: form.goal_weight_kg,
        activity_level: form.activity_level.unwrap_or(ActivityLevel::Inactive),
        weekly_goal_kg: form.weekly_pace_kg,
        daily_calorie_goal: output.daily_calorie_goal,
        daily_steps_goal: form.daily_steps_goal,
        daily_water_goal_ml: engine::water_goal_ml(form.current_weight_kg),
        add_burned_calories: form.add_burned_calories,
        program_steps: form.program_steps.clone(),
        updated_at: Utc::now(),
    };

    repo.save(&profile)?;

    tracing::info!(
        "Onboarding complete: {} kcal/day, {} steps, {} ml water",
        profile.daily_calorie_goal,
        profile.daily_steps_goal,
        profile.daily_water_goal_ml
    );

    Ok(profile)
}
