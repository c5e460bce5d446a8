//! Daily diary summaries.
//!
//! Sums logged meal entries into per-day nutrition totals and derives the
//! remaining-calories figures the diary header shows.

use crate::{DailyTotals, MealEntry};
use chrono::NaiveDate;

/// Sum the nutrition totals of all meal entries on one calendar date (UTC)
pub fn totals_for_date(entries: &[MealEntry], date: NaiveDate) -> DailyTotals {
    entries
        .iter()
        .filter(|e| e.logged_at.date_naive() == date)
        .fold(DailyTotals::default(), |mut acc, e| {
            acc.calories += e.calories;
            acc.protein_g += e.protein_g;
            acc.carbs_g += e.carbs_g;
            acc.fats_g += e.fats_g;
            acc
        })
}

/// Calories remaining against the daily goal, floored at zero
pub fn calories_left(daily_goal: u32, consumed: f64) -> f64 {
    (f64::from(daily_goal) - consumed).max(0.0)
}

/// Fraction of the daily goal consumed, capped at 1; 0 when no goal is set
pub fn calorie_progress(daily_goal: u32, consumed: f64) -> f64 {
    if daily_goal == 0 {
        return 0.0;
    }
    (consumed / f64::from(daily_goal)).min(1.0)
}
