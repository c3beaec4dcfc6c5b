//! Read/write contracts between the engine and its external collaborators.
//!
//! `db::Database` implements all three against SQLite.

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{CandidateMeal, HealthProfile, MealLogEntry, MealLogUpdate, MealType, NewMealLog};

pub trait LogStore {
    fn fetch_entries(&self, username: &str) -> Result<Vec<MealLogEntry>>;

    fn fetch_entries_for_date(&self, username: &str, date: NaiveDate) -> Result<Vec<MealLogEntry>>;

    /// Entries with `start <= date <= end`.
    fn fetch_entries_in_range(
        &self,
        username: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealLogEntry>>;

    fn get_entry(&self, id: i64) -> Result<Option<MealLogEntry>>;

    /// Insert the row, or add its quantity to the row with the same merge key,
    /// as one atomic operation. `candidate.date` must already be resolved.
    /// Returns the stored row and whether it was merged into an existing one.
    fn upsert_by_key(&self, candidate: &NewMealLog) -> Result<(MealLogEntry, bool)>;

    /// Overwrite a row with `entry`'s fields. Returns false if the id is unknown.
    fn save_entry(&self, entry: &MealLogEntry) -> Result<bool>;

    /// Returns false if the id is unknown.
    fn delete_entry(&self, id: i64) -> Result<bool>;
}

pub trait ProfileStore {
    fn fetch_profile(&self, username: &str) -> Result<Option<HealthProfile>>;

    fn insert_profile(&self, profile: &HealthProfile) -> Result<()>;

    /// Returns false if no profile exists for the username.
    fn save_profile(&self, profile: &HealthProfile) -> Result<bool>;

    fn delete_profile(&self, username: &str) -> Result<bool>;
}

pub trait MealCatalog {
    fn fetch_candidates(&self, meal_type: &MealType, diet_type: &str) -> Result<Vec<CandidateMeal>>;

    fn insert_candidate(&self, meal: &CandidateMeal) -> Result<()>;

    /// Insert all meals or none.
    fn insert_candidates(&self, meals: &[CandidateMeal]) -> Result<()>;

    fn list_candidates(&self) -> Result<Vec<CandidateMeal>>;
}

/// Apply a partial update through the store, for callers that hold the row.
pub(crate) fn apply_update<S: LogStore + ?Sized>(
    store: &S,
    mut entry: MealLogEntry,
    update: &MealLogUpdate,
) -> Result<MealLogEntry> {
    update.apply_to(&mut entry);
    store.save_entry(&entry)?;
    Ok(entry)
}
