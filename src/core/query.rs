use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::{GroupedView, group};
use super::metrics::coefficients_for;
use super::recommend::{Recommendation, recommend, recommend_category};
use super::store::{LogStore, MealCatalog, ProfileStore};
use super::totals::{self, DailyTotals, WeeklyComparison, previous_window, recent_window};
use crate::error::NutritionError;
use crate::models::config::Config;
use crate::models::{MealLogEntry, MealType};

/// All of a user's logged meals, as stored.
pub fn entries<S: LogStore + ?Sized>(store: &S, username: &str) -> Result<Vec<MealLogEntry>> {
    store.fetch_entries(username)
}

/// A user's meals grouped by date and meal type.
pub fn grouped<S: LogStore + ?Sized>(store: &S, username: &str) -> Result<GroupedView> {
    let entries = store.fetch_entries(username)?;
    tracing::debug!(username, rows = entries.len(), "grouping meal logs");
    Ok(group(&entries))
}

#[derive(Debug, Serialize)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub entries: usize,
    #[serde(flatten)]
    pub totals: DailyTotals,
}

/// Nutrient totals for one day.
pub fn day_totals<S: LogStore + ?Sized>(
    store: &S,
    config: &Config,
    username: &str,
    date: NaiveDate,
) -> Result<DayTotals> {
    let entries = store.fetch_entries_for_date(username, date)?;
    let totals = totals::daily_totals(&entries, &config.nutrients)?;
    Ok(DayTotals {
        date,
        entries: entries.len(),
        totals,
    })
}

/// Calories of the last 7 days against the 7 days before, ending `today`.
pub fn weekly<S: LogStore + ?Sized>(
    store: &S,
    config: &Config,
    username: &str,
    today: NaiveDate,
) -> Result<WeeklyComparison> {
    let (start, _) = previous_window(today);
    let (_, end) = recent_window(today);
    let entries = store.fetch_entries_in_range(username, start, end)?;
    Ok(totals::recent_vs_previous(&entries, today, &config.nutrients)?)
}

/// Calories per day over an inclusive range.
pub fn calories_between<S: LogStore + ?Sized>(
    store: &S,
    config: &Config,
    username: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<totals::CalorieSeries> {
    let entries = store.fetch_entries_in_range(username, start, end)?;
    Ok(totals::period_totals(&entries, start, end, &config.nutrients)?)
}

/// Diet category, calorie budget, macros and meal suggestions for a user.
pub fn recommendation<P, C>(
    profiles: &P,
    catalog: &C,
    config: &Config,
    username: &str,
) -> Result<Recommendation>
where
    P: ProfileStore + ?Sized,
    C: MealCatalog + ?Sized,
{
    let profile = profiles
        .fetch_profile(username)?
        .ok_or_else(|| NutritionError::not_found("health profile", username))?;
    let coefficients = coefficients_for(&profile, config)?;

    let bmi = super::metrics::profile_bmi(&profile)?;
    let category = recommend_category(profile.diet_goal, bmi);

    let mut candidates = Vec::new();
    for meal_type in MealType::CANONICAL.iter() {
        candidates.extend(catalog.fetch_candidates(meal_type, category.tag())?);
    }
    tracing::debug!(
        username,
        category = category.tag(),
        candidates = candidates.len(),
        "building recommendation"
    );

    Ok(recommend(&profile, &coefficients, &candidates)?)
}
