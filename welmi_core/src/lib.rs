#![forbid(unsafe_code)]

//! Core domain model and business logic for the Welmi nutrition system.
//!
//! This crate provides:
//! - Domain types (biometrics, goals, profile, journal entries)
//! - The goal-calculation engine (BMR, TDEE, capped calorie targets)
//! - Goal presets
//! - Persistence (profile store, JSONL journals, CSV export)
//! - Diary and progress statistics

pub mod types;
pub mod error;
pub mod presets;
pub mod config;
pub mod logging;
pub mod journal;
pub mod export;
pub mod profile;
pub mod diary;
pub mod progress;
pub mod onboarding;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use presets::{build_default_presets, get_default_presets};
pub use config::Config;
pub use journal::{load_recent_meals, load_recent_weights, EntrySink, JsonlSink};
pub use profile::{update_profile, JsonProfileStore, ProfileRepository};
pub use onboarding::OnboardingForm;
pub use engine::{compute_goals, healthy_weight_range, weeks_to_goal, HealthyWeightRange};
