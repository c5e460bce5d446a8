//! Default goal presets and program steps.
//!
//! Each onboarding goal selection carries defaults the engine does not
//! compute: the starting weekly pace, the daily steps goal, and the
//! program steps shown on the plan screen.

use crate::types::GoalSelection;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A program step the user commits to during onboarding
#[derive(Clone, Debug)]
pub struct ProgramStep {
    pub id: String,
    pub label: String,
}

/// Preset defaults for one goal selection
#[derive(Clone, Debug)]
pub struct GoalPreset {
    pub default_weekly_pace_kg: f64,
    pub daily_steps_goal: u32,
    pub program_steps: Vec<String>,
}

/// The complete preset table: program steps plus per-goal defaults
#[derive(Clone, Debug)]
pub struct PresetCatalog {
    pub steps: HashMap<String, ProgramStep>,
    pub presets: HashMap<GoalSelection, GoalPreset>,
}

/// Cached default preset table - built once and reused across all operations
static DEFAULT_PRESETS: Lazy<PresetCatalog> = Lazy::new(build_default_presets_internal);

/// Get a reference to the cached default preset table
pub fn get_default_presets() -> &'static PresetCatalog {
    &DEFAULT_PRESETS
}

/// Builds the default preset table
///
/// **Note**: For production use, prefer `get_default_presets()` which
/// returns a cached reference. This function is retained for testing and
/// custom preset construction.
pub fn build_default_presets() -> PresetCatalog {
    build_default_presets_internal()
}

fn build_default_presets_internal() -> PresetCatalog {
    let mut steps = HashMap::new();
    let mut presets = HashMap::new();

    // ========================================================================
    // Program Steps
    // ========================================================================

    steps.insert(
        "log_meals".into(),
        ProgramStep {
            id: "log_meals".into(),
            label: "Log your meals".into(),
        },
    );

    steps.insert(
        "cook_healthy".into(),
        ProgramStep {
            id: "cook_healthy".into(),
            label: "Cook healthy meals".into(),
        },
    );

    steps.insert(
        "move_more".into(),
        ProgramStep {
            id: "move_more".into(),
            label: "Move more during the day".into(),
        },
    );

    // ========================================================================
    // Goal Presets
    // ========================================================================

    presets.insert(
        GoalSelection::LoseWeight,
        GoalPreset {
            default_weekly_pace_kg: 0.7,
            daily_steps_goal: 10_000,
            program_steps: vec!["log_meals".into(), "move_more".into()],
        },
    );

    presets.insert(
        GoalSelection::BuildHealthyWeight,
        GoalPreset {
            default_weekly_pace_kg: 0.4,
            daily_steps_goal: 9_000,
            program_steps: vec![
                "log_meals".into(),
                "cook_healthy".into(),
                "move_more".into(),
            ],
        },
    );

    presets.insert(
        GoalSelection::GetHealthier,
        GoalPreset {
            default_weekly_pace_kg: 0.3,
            daily_steps_goal: 8_500,
            program_steps: vec![
                "log_meals".into(),
                "cook_healthy".into(),
                "move_more".into(),
            ],
        },
    );

    presets.insert(
        GoalSelection::LookBetter,
        GoalPreset {
            default_weekly_pace_kg: 0.5,
            daily_steps_goal: 9_000,
            program_steps: vec!["log_meals".into(), "move_more".into()],
        },
    );

    presets.insert(
        GoalSelection::MoreEnergy,
        GoalPreset {
            default_weekly_pace_kg: 0.4,
            daily_steps_goal: 9_000,
            program_steps: vec!["move_more".into(), "cook_healthy".into()],
        },
    );

    PresetCatalog { steps, presets }
}

impl PresetCatalog {
    /// Preset for a selection; falls back to the neutral defaults used
    /// before the user has picked a goal
    pub fn get(&self, selection: Option<GoalSelection>) -> GoalPreset {
        selection
            .and_then(|s| self.presets.get(&s).cloned())
            .unwrap_or_else(Self::fallback)
    }

    /// Neutral defaults for an unset goal selection
    pub fn fallback() -> GoalPreset {
        GoalPreset {
            default_weekly_pace_kg: 0.5,
            daily_steps_goal: 10_000,
            program_steps: vec![],
        }
    }

    /// Validate internal consistency; returns human-readable problems
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (selection, preset) in &self.presets {
            if preset.default_weekly_pace_kg <= 0.0 {
                errors.push(format!(
                    "Preset {:?} has non-positive default pace",
                    selection
                ));
            }
            if preset.daily_steps_goal == 0 {
                errors.push(format!("Preset {:?} has zero steps goal", selection));
            }
            for step_id in &preset.program_steps {
                if !self.steps.contains_key(step_id) {
                    errors.push(format!(
                        "Preset {:?} references unknown program step '{}'",
                        selection, step_id
                    ));
                }
            }
        }

        errors
    }
}
