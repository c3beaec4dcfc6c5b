#![allow(dead_code)]

use chrono::NaiveDate;
use nutrilog::db::Database;
use nutrilog::models::{DietGoal, Gender, HealthProfile, MealLogEntry, NewMealLog, Nutrients};
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A stored-looking entry with a calorie value per serving.
pub fn entry(id: i64, date: NaiveDate, meal_type: &str, description: &str, kcal: &str) -> MealLogEntry {
    let mut nutrients = Nutrients::new();
    nutrients.insert("NUTR_CONT1".into(), kcal.into());
    MealLogEntry {
        id,
        username: "alice".into(),
        date,
        meal_type: meal_type.parse().unwrap(),
        description: description.into(),
        quantity: 1,
        nutrients,
    }
}

pub fn meal(meal_type: &str, description: &str, quantity: u32, date: NaiveDate) -> NewMealLog {
    NewMealLog::new("alice", meal_type.parse().unwrap(), description, quantity).on(date)
}

/// Male, 30y, 180 cm, 75 kg, activity 1.55, losing weight.
pub fn reference_profile() -> HealthProfile {
    HealthProfile::new("alice", DietGoal::LoseWeight, 30, Gender::Male, 180.0, 75.0, 1.55)
}
