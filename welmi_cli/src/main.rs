use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use welmi_core::*;

#[derive(Parser)]
#[command(name = "welmi")]
#[command(about = "Nutrition and weight-goal tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Onboard: compute daily goals and save the profile
    Setup {
        /// Goal selection (lose, build, healthier, look, energy)
        #[arg(long)]
        goal: Option<String>,

        /// Gender (male, female)
        #[arg(long)]
        gender: String,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Height in centimeters
        #[arg(long)]
        height_cm: f64,

        /// Current weight in kilograms
        #[arg(long)]
        weight_kg: f64,

        /// Goal weight in kilograms
        #[arg(long)]
        goal_weight_kg: f64,

        /// Activity level (inactive, lightly_active, active, very_active)
        #[arg(long)]
        activity: Option<String>,

        /// Weekly pace in kg/week (defaults to the goal preset)
        #[arg(long)]
        pace: Option<f64>,

        /// Add burned activity calories back to the daily budget
        #[arg(long)]
        add_burned: bool,

        /// Dry run - show computed goals without saving a profile
        #[arg(long)]
        dry_run: bool,
    },

    /// Recompute daily goals from the stored profile
    Goals {
        /// Override the weekly pace, kg/week
        #[arg(long)]
        pace: Option<f64>,

        /// Override the current weight, kg
        #[arg(long)]
        weight_kg: Option<f64>,

        /// Persist the recomputed goals back to the profile
        #[arg(long)]
        save: bool,
    },

    /// Log a body-weight measurement
    Weigh {
        /// Weight in kilograms
        kg: f64,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// Log a meal item
    Meal {
        /// Food name
        name: String,

        /// Meal slot (breakfast, lunch, dinner, snack)
        #[arg(long, default_value = "snack")]
        slot: String,

        /// Calories, kcal
        #[arg(long)]
        calories: f64,

        /// Protein, grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Carbohydrates, grams
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Fats, grams
        #[arg(long, default_value_t = 0.0)]
        fats: f64,
    },

    /// Show today's diary totals against the daily goals (default)
    Today,

    /// Show weight progress and BMI status
    Status,

    /// Export the weight journal to CSV
    Export {
        /// Clean up processed journal files after export
        #[arg(long)]
        cleanup: bool,
    },
}

struct DataPaths {
    profile: PathBuf,
    weights: PathBuf,
    meals: PathBuf,
    csv: PathBuf,
    journal_dir: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let journal_dir = data_dir.join("journal");
        Self {
            profile: data_dir.join("profile.json"),
            weights: journal_dir.join("weights.jsonl"),
            meals: journal_dir.join("meals.jsonl"),
            csv: data_dir.join("weights.csv"),
            journal_dir,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    welmi_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Some(Commands::Setup {
            goal,
            gender,
            age,
            height_cm,
            weight_kg,
            goal_weight_kg,
            activity,
            pace,
            add_burned,
            dry_run,
        }) => cmd_setup(
            &paths,
            &config,
            goal,
            gender,
            age,
            height_cm,
            weight_kg,
            goal_weight_kg,
            activity,
            pace,
            add_burned,
            dry_run,
        ),
        Some(Commands::Goals {
            pace,
            weight_kg,
            save,
        }) => cmd_goals(&paths, pace, weight_kg, save),
        Some(Commands::Weigh { kg, note }) => cmd_weigh(&paths, kg, note),
        Some(Commands::Meal {
            name,
            slot,
            calories,
            protein,
            carbs,
            fats,
        }) => cmd_meal(&paths, &config, name, slot, calories, protein, carbs, fats),
        Some(Commands::Today) => cmd_today(&paths, &config),
        Some(Commands::Status) => cmd_status(&paths, &config),
        Some(Commands::Export { cleanup }) => cmd_export(&paths, cleanup),
        None => cmd_today(&paths, &config),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_setup(
    paths: &DataPaths,
    config: &Config,
    goal: Option<String>,
    gender: String,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    goal_weight_kg: f64,
    activity: Option<String>,
    pace: Option<f64>,
    add_burned: bool,
    dry_run: bool,
) -> Result<()> {
    let presets = get_default_presets();

    let goal_selection = goal.as_deref().and_then(|g| {
        let parsed = GoalSelection::parse(g);
        if parsed.is_none() {
            eprintln!("Unknown goal: {}. Using neutral defaults.", g);
        }
        parsed
    });

    let gender = Gender::parse(&gender).unwrap_or_else(|| {
        eprintln!("Unknown gender: {}. Using male.", gender);
        Gender::Male
    });

    let activity_level = activity.as_deref().and_then(|a| {
        let parsed = ActivityLevel::parse(a);
        if parsed.is_none() {
            eprintln!("Unknown activity level: {}. Treating as unset.", a);
        }
        parsed
    });

    let mut form = OnboardingForm {
        gender,
        age,
        height_cm,
        current_weight_kg: weight_kg,
        goal_weight_kg,
        activity_level,
        add_burned_calories: add_burned,
        ..OnboardingForm::default()
    };

    if let Some(selection) = goal_selection {
        form.apply_preset(selection, pace.is_some(), presets);
    }
    if let Some(pace) = pace {
        form.weekly_pace_kg = pace.max(0.0);
    }

    // Locally-configured extra program steps join the plan
    for step in &config.program.custom {
        if !form.program_steps.contains(&step.id) {
            form.program_steps.push(step.id.clone());
        }
    }

    let output = form.compute_goals();
    display_goals(&output, form.daily_steps_goal);
    display_goal_weight_feedback(goal_weight_kg, height_cm);

    if form.weekly_pace_kg > output.safe_weekly_pace_max_kg {
        println!(
            "  ⚠ Pace {:.1} kg/week is above the safe maximum of {:.1} kg/week;",
            form.weekly_pace_kg, output.safe_weekly_pace_max_kg
        );
        println!("    the calorie target stays capped at a safe level.");
        println!();
    }

    if dry_run {
        println!("[Dry run - profile not saved]");
        return Ok(());
    }

    let store = JsonProfileStore::new(&paths.profile);
    let profile = onboarding::complete(&form, &store)?;

    println!("✓ Profile saved!");
    println!(
        "  {} weeks to reach {} kg at {:.1} kg/week",
        weeks_to_goal(
            profile.current_weight_kg,
            profile.goal_weight_kg,
            profile.weekly_goal_kg
        ),
        profile.goal_weight_kg,
        profile.weekly_goal_kg
    );

    Ok(())
}

fn cmd_goals(
    paths: &DataPaths,
    pace: Option<f64>,
    weight_kg: Option<f64>,
    save: bool,
) -> Result<()> {
    let store = JsonProfileStore::new(&paths.profile);
    let profile = store
        .load()?
        .ok_or_else(|| Error::Profile("no profile saved yet - run `welmi setup` first".into()))?;

    let current_weight = weight_kg.unwrap_or(profile.current_weight_kg);
    let weekly_pace = pace.unwrap_or(profile.weekly_goal_kg).max(0.0);

    let input = GoalInput {
        gender: profile.gender,
        age_years: profile.age,
        height_cm: profile.height_cm,
        current_weight_kg: current_weight,
        activity_level: Some(profile.activity_level),
        goal_direction: GoalDirection::from_weights(current_weight, profile.goal_weight_kg),
        weekly_pace_kg: weekly_pace,
    };

    let output = engine::compute_goals(&input);
    display_goals(&output, profile.daily_steps_goal);

    if save {
        update_profile(&store, |p| {
            p.current_weight_kg = current_weight;
            p.weekly_goal_kg = weekly_pace;
            p.daily_calorie_goal = output.daily_calorie_goal;
            p.daily_water_goal_ml = output.daily_water_goal_ml;
            p.updated_at = Utc::now();
            Ok(())
        })?;
        println!("✓ Goals updated!");
    }

    Ok(())
}

fn cmd_weigh(paths: &DataPaths, kg: f64, note: Option<String>) -> Result<()> {
    let entry = WeightEntry {
        id: Uuid::new_v4(),
        weight_kg: kg,
        logged_at: Utc::now(),
        note,
    };

    let mut sink = JsonlSink::new(&paths.weights);
    sink.append(&entry)?;

    println!("✓ Logged {} kg", kg);

    // Keep the profile weight and the weight-derived water goal in sync
    let store = JsonProfileStore::new(&paths.profile);
    if store.load()?.is_some() {
        let profile = update_profile(&store, |p| {
            p.current_weight_kg = kg;
            p.daily_water_goal_ml = engine::water_goal_ml(kg);
            p.updated_at = Utc::now();
            Ok(())
        })?;

        let ratio = progress::weight_progress_ratio(
            profile.starting_weight_kg,
            profile.current_weight_kg,
            profile.goal_weight_kg,
        );
        println!(
            "  Progress: {:.0}% of the way to {} kg",
            ratio * 100.0,
            profile.goal_weight_kg
        );
        println!("  Water goal adjusted to {} ml", profile.daily_water_goal_ml);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_meal(
    paths: &DataPaths,
    config: &Config,
    name: String,
    slot: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
) -> Result<()> {
    let slot = MealSlot::parse(&slot).unwrap_or_else(|| {
        eprintln!("Unknown meal slot: {}. Using snack.", slot);
        MealSlot::Snack
    });

    let entry = MealEntry {
        id: Uuid::new_v4(),
        name: name.clone(),
        slot,
        calories,
        protein_g: protein,
        carbs_g: carbs,
        fats_g: fats,
        logged_at: Utc::now(),
    };

    let mut sink = JsonlSink::new(&paths.meals);
    sink.append(&entry)?;

    println!("✓ Logged {} ({:.0} kcal)", name, calories);

    let meals = load_recent_meals(&paths.meals, config.history.window_days)?;
    let totals = diary::totals_for_date(&meals, Utc::now().date_naive());
    println!("  Today so far: {:.0} kcal", totals.calories);

    Ok(())
}

fn cmd_today(paths: &DataPaths, config: &Config) -> Result<()> {
    let store = JsonProfileStore::new(&paths.profile);
    let profile = store.load()?;

    let meals = load_recent_meals(&paths.meals, config.history.window_days)?;
    let totals = diary::totals_for_date(&meals, Utc::now().date_naive());

    let calorie_goal = profile
        .as_ref()
        .map(|p| p.daily_calorie_goal)
        .unwrap_or(2000);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TODAY");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Calories: {:.0} / {} kcal ({:.0}%)",
        totals.calories,
        calorie_goal,
        diary::calorie_progress(calorie_goal, totals.calories) * 100.0
    );
    println!(
        "  Left:     {:.0} kcal",
        diary::calories_left(calorie_goal, totals.calories)
    );
    println!(
        "  Macros:   {:.0}g protein / {:.0}g carbs / {:.0}g fats",
        totals.protein_g, totals.carbs_g, totals.fats_g
    );

    if let Some(profile) = &profile {
        println!();
        println!("  Water goal: {} ml", profile.daily_water_goal_ml);
        println!("  Steps goal: {}", profile.daily_steps_goal);
    }

    println!();
    Ok(())
}

fn cmd_status(paths: &DataPaths, config: &Config) -> Result<()> {
    let store = JsonProfileStore::new(&paths.profile);
    let profile = store
        .load()?
        .ok_or_else(|| Error::Profile("no profile saved yet - run `welmi setup` first".into()))?;

    let weights = load_recent_weights(&paths.weights, config.history.window_days)?;
    let current = progress::latest_weight(Some(&profile), &weights);

    let bmi = engine::body_mass_index(current, profile.height_cm);
    let category = engine::classify_bmi(bmi);
    let range = healthy_weight_range(profile.height_cm);
    let ratio =
        progress::weight_progress_ratio(profile.starting_weight_kg, current, profile.goal_weight_kg);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROGRESS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Weight:  {} kg (started {}, goal {})",
        current, profile.starting_weight_kg, profile.goal_weight_kg
    );
    println!("  Progress: {:.0}%", ratio * 100.0);
    println!(
        "  BMI:     {:.1} ({:?}), healthy range {}-{} kg",
        bmi, category, range.min_kg, range.max_kg
    );
    println!(
        "  Pace:    {:.1} kg/week, about {} weeks to goal",
        profile.weekly_goal_kg,
        weeks_to_goal(current, profile.goal_weight_kg, profile.weekly_goal_kg)
    );
    println!();

    Ok(())
}

fn cmd_export(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.weights.exists() {
        println!("No weight journal found - nothing to export.");
        return Ok(());
    }

    let count = export::journal_to_csv_and_archive(&paths.weights, &paths.csv)?;

    println!("✓ Exported {} entries to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = export::cleanup_processed_journals(&paths.journal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed journal files", cleaned);
        }
    }

    Ok(())
}

fn display_goals(output: &GoalOutput, steps_goal: u32) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DAILY TARGETS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Calories: {} kcal", output.daily_calorie_goal);
    println!("  Water:    {} ml", output.daily_water_goal_ml);
    println!("  Steps:    {}", steps_goal);
    println!();
    println!(
        "  BMR {:.0} kcal, TDEE {:.0} kcal",
        output.bmr, output.tdee
    );
    println!("  BMI {:.1} ({:?})", output.bmi, output.bmi_category);
    println!(
        "  Safe pace: up to {:.1} kg/week",
        output.safe_weekly_pace_max_kg
    );
    println!();
}

fn display_goal_weight_feedback(goal_weight_kg: f64, height_cm: f64) {
    let range = healthy_weight_range(height_cm);
    if engine::is_healthy_target_weight(goal_weight_kg, height_cm) {
        println!(
            "  Goal weight {} kg is in the healthy range ({}-{} kg)",
            goal_weight_kg, range.min_kg, range.max_kg
        );
    } else {
        println!(
            "  Goal weight {} kg is outside the healthy range ({}-{} kg)",
            goal_weight_kg, range.min_kg, range.max_kg
        );
    }
    println!();
}
