use anyhow::{Result, bail};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::aggregate::{MergeAction, upsert};
use super::store::{LogStore, apply_update};
use crate::error::NutritionError;
use crate::models::config::NutrientCodes;
use crate::models::{MealLogEntry, MealLogUpdate, MealType, NewMealLog, Nutrients};

#[derive(Debug, Serialize)]
pub struct Logged {
    pub entry: MealLogEntry,
    /// True when the log was added to an existing row's quantity.
    pub merged: bool,
}

fn validate_candidate(candidate: &NewMealLog) -> Result<(), NutritionError> {
    if candidate.username.trim().is_empty() {
        return Err(NutritionError::validation("username", "must not be empty"));
    }
    if candidate.description.trim().is_empty() {
        return Err(NutritionError::validation("description", "must not be empty"));
    }
    if candidate.quantity < 1 {
        return Err(NutritionError::validation("quantity", "must be at least 1"));
    }
    Ok(())
}

/// Log a meal, merging into an existing row with the same merge key.
pub fn log_meal<S: LogStore + ?Sized>(
    store: &S,
    candidate: NewMealLog,
    today: NaiveDate,
) -> Result<Logged> {
    validate_candidate(&candidate)?;
    let mut resolved = candidate;
    resolved.date = Some(resolved.resolved_date(today));

    let (entry, merged) = store.upsert_by_key(&resolved)?;
    tracing::info!(
        id = entry.id,
        username = %entry.username,
        date = %entry.date,
        meal_type = %entry.meal_type,
        quantity = entry.quantity,
        merged,
        "meal logged"
    );
    Ok(Logged { entry, merged })
}

/// Dry run of `log_meal`: what the store would do, without writing.
pub fn preview_meal<S: LogStore + ?Sized>(
    store: &S,
    candidate: &NewMealLog,
    today: NaiveDate,
) -> Result<MergeAction> {
    validate_candidate(candidate)?;
    let date = candidate.resolved_date(today);
    let existing = store.fetch_entries_for_date(&candidate.username, date)?;
    Ok(upsert(&existing, candidate, today))
}

/// Batch-log meals from a JSON array string. Entries without a username are
/// logged for `username`.
pub fn log_batch<S: LogStore + ?Sized>(
    store: &S,
    username: &str,
    batch_json: &str,
    today: NaiveDate,
) -> Result<Vec<Logged>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(batch_json)?;
    let mut results = Vec::new();

    for entry in &entries {
        let meal_type = entry["meal_type"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing 'meal_type' in batch entry"))?;
        let description = entry["description"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing 'description' in batch entry"))?;
        let quantity = match entry.get("quantity") {
            None | Some(serde_json::Value::Null) => 1,
            Some(q) => q
                .as_u64()
                .and_then(|q| u32::try_from(q).ok())
                .ok_or_else(|| anyhow::anyhow!("invalid 'quantity' in batch entry: {}", q))?,
        };
        let user = entry["username"].as_str().unwrap_or(username);

        let mut candidate =
            NewMealLog::new(user, meal_type.parse::<MealType>()?, description, quantity);
        if let Some(d) = entry["date"].as_str() {
            candidate.date = Some(d.parse()?);
        }
        if let Some(obj) = entry["nutrients"].as_object() {
            candidate.nutrients = nutrients_from_json(obj)?;
        }
        results.push(log_meal(store, candidate, today)?);
    }

    Ok(results)
}

fn nutrients_from_json(obj: &serde_json::Map<String, serde_json::Value>) -> Result<Nutrients> {
    let mut nutrients = Nutrients::new();
    for (code, value) in obj {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            other => bail!("nutrient '{}' must be a string or number, got {}", code, other),
        };
        nutrients.insert(code.clone(), text);
    }
    Ok(nutrients)
}

/// Overwrite only the supplied fields of a logged meal.
pub fn update_meal_log<S: LogStore + ?Sized>(
    store: &S,
    id: i64,
    update: &MealLogUpdate,
) -> Result<MealLogEntry> {
    if update.quantity == Some(0) {
        return Err(NutritionError::validation("quantity", "must be at least 1").into());
    }
    if let Some(ref d) = update.description
        && d.trim().is_empty()
    {
        return Err(NutritionError::validation("description", "must not be empty").into());
    }

    let Some(entry) = store.get_entry(id)? else {
        return Err(NutritionError::not_found("meal log", id).into());
    };
    if update.is_empty() {
        return Ok(entry);
    }

    match apply_update(store, entry, update) {
        Ok(updated) => {
            tracing::info!(id, "meal log updated");
            Ok(updated)
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("constraint") {
                bail!(
                    "meal log {} would duplicate an existing entry with the same date, meal type and description",
                    id
                );
            }
            Err(e)
        }
    }
}

pub fn delete_meal_log<S: LogStore + ?Sized>(store: &S, id: i64) -> Result<()> {
    if !store.delete_entry(id)? {
        return Err(NutritionError::not_found("meal log", id).into());
    }
    tracing::info!(id, "meal log deleted");
    Ok(())
}

static NUTRIENT_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_\-]*)\s*=\s*(\S+)\s*$").expect("valid nutrient pattern")
});

/// Parse `NAME=VALUE` arguments into a nutrients map. Friendly names
/// (calories, carbs, protein, fat) resolve to the configured codes; values
/// must be finite numbers.
pub fn parse_nutrients(args: &[String], codes: &NutrientCodes) -> Result<Nutrients> {
    let mut nutrients = Nutrients::new();
    for arg in args {
        let caps = NUTRIENT_ARG
            .captures(arg)
            .ok_or_else(|| anyhow::anyhow!("invalid nutrient '{}' (expected CODE=VALUE)", arg))?;
        let code = codes.resolve(&caps[1]);
        let value = caps[2].to_string();
        if !value.parse::<f64>().is_ok_and(f64::is_finite) {
            return Err(NutritionError::validation(
                "nutrient",
                format!("{} must be a number, got '{}'", code, value),
            )
            .into());
        }
        nutrients.insert(code, value);
    }
    Ok(nutrients)
}
