use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::NutritionError;
use crate::models::MealLogEntry;
use crate::models::config::NutrientCodes;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub calories: i64,
    pub carbohydrates: i64,
    pub protein: i64,
    pub fat: i64,
}

/// Date -> calories, one key per calendar day of the range.
pub type CalorieSeries = BTreeMap<NaiveDate, i64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyComparison {
    pub recent: CalorieSeries,
    pub previous: CalorieSeries,
}

impl WeeklyComparison {
    pub fn recent_total(&self) -> i64 {
        self.recent.values().sum()
    }

    pub fn previous_total(&self) -> i64 {
        self.previous.values().sum()
    }
}

/// Per-unit value of a nutrient on an entry, truncated toward zero.
///
/// A missing or blank value counts as 0. Anything else must parse as a finite
/// number; otherwise the entry is reported rather than zeroed.
pub fn nutrient_value(entry: &MealLogEntry, code: &str) -> Result<i64, NutritionError> {
    let Some(raw) = entry.nutrients.get(code) else {
        return Ok(0);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    // i64::MAX as f64 rounds up to 2^63, hence the half-open upper bound.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.trunc() >= i64::MIN as f64 && v.trunc() < i64::MAX as f64 => {
            Ok(v.trunc() as i64)
        }
        _ => Err(integrity(entry, code)),
    }
}

fn integrity(entry: &MealLogEntry, code: &str) -> NutritionError {
    NutritionError::DataIntegrity {
        entry_id: entry.id,
        code: code.to_string(),
        value: entry.nutrients.get(code).cloned().unwrap_or_default(),
    }
}

fn weighted(entry: &MealLogEntry, code: &str) -> Result<i64, NutritionError> {
    nutrient_value(entry, code)?
        .checked_mul(i64::from(entry.quantity))
        .ok_or_else(|| integrity(entry, code))
}

/// Add an entry's weighted nutrient to a running total, failing on overflow.
fn accumulate(total: &mut i64, entry: &MealLogEntry, code: &str) -> Result<(), NutritionError> {
    *total = total
        .checked_add(weighted(entry, code)?)
        .ok_or_else(|| integrity(entry, code))?;
    Ok(())
}

/// Sum `quantity × value` over the given entries for each tracked nutrient.
pub fn daily_totals(
    entries: &[MealLogEntry],
    codes: &NutrientCodes,
) -> Result<DailyTotals, NutritionError> {
    let mut totals = DailyTotals::default();
    for e in entries {
        accumulate(&mut totals.calories, e, &codes.calories)?;
        accumulate(&mut totals.carbohydrates, e, &codes.carbohydrates)?;
        accumulate(&mut totals.protein, e, &codes.protein)?;
        accumulate(&mut totals.fat, e, &codes.fat)?;
    }
    Ok(totals)
}

/// Calories per day over the inclusive range, with every day present.
pub fn period_totals(
    entries: &[MealLogEntry],
    start: NaiveDate,
    end: NaiveDate,
    codes: &NutrientCodes,
) -> Result<CalorieSeries, NutritionError> {
    if start > end {
        return Err(NutritionError::validation(
            "date range",
            format!("start {} is after end {}", start, end),
        ));
    }

    let mut series: CalorieSeries = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| (d, 0))
        .collect();

    for e in entries {
        if let Some(total) = series.get_mut(&e.date) {
            accumulate(total, e, &codes.calories)?;
        }
    }
    Ok(series)
}

/// Calories for the 7 days ending `today` against the 7 days before them.
pub fn recent_vs_previous(
    entries: &[MealLogEntry],
    today: NaiveDate,
    codes: &NutrientCodes,
) -> Result<WeeklyComparison, NutritionError> {
    let (recent_start, recent_end) = recent_window(today);
    let (previous_start, previous_end) = previous_window(today);
    Ok(WeeklyComparison {
        recent: period_totals(entries, recent_start, recent_end, codes)?,
        previous: period_totals(entries, previous_start, previous_end, codes)?,
    })
}

/// `[today − 6, today]`
pub fn recent_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(6), today)
}

/// `[today − 13, today − 7]`
pub fn previous_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(13), today - Duration::days(7))
}
