use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeSet;

use crate::core::store::ProfileStore;
use crate::models::HealthProfile;

use super::Database;

struct ProfileRow {
    username: String,
    diet_goal: String,
    age: i32,
    gender: String,
    height_cm: f64,
    weight_kg: f64,
    activity_factor: f64,
    allergies: String,
    updated_at: String,
}

fn row_to_profile(r: ProfileRow) -> Result<HealthProfile> {
    let allergies: BTreeSet<String> = serde_json::from_str(&r.allergies)?;
    let updated_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.updated_at)?.with_timezone(&Utc);
    Ok(HealthProfile {
        username: r.username,
        diet_goal: r.diet_goal.parse()?,
        age: r.age,
        gender: r.gender.into(),
        height_cm: r.height_cm,
        weight_kg: r.weight_kg,
        activity_factor: r.activity_factor,
        allergies,
        updated_at,
    })
}

impl ProfileStore for Database {
    fn fetch_profile(&self, username: &str) -> Result<Option<HealthProfile>> {
        let row = self
            .conn
            .query_row(
                "SELECT username, diet_goal, age, gender, height_cm, weight_kg, activity_factor,
                        allergies, updated_at
                 FROM health_profiles WHERE username = ?1",
                params![username],
                |row| {
                    Ok(ProfileRow {
                        username: row.get(0)?,
                        diet_goal: row.get(1)?,
                        age: row.get(2)?,
                        gender: row.get(3)?,
                        height_cm: row.get(4)?,
                        weight_kg: row.get(5)?,
                        activity_factor: row.get(6)?,
                        allergies: row.get(7)?,
                        updated_at: row.get(8)?,
                    })
                },
            )
            .optional()?;
        row.map(row_to_profile).transpose()
    }

    fn insert_profile(&self, p: &HealthProfile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO health_profiles (username, diet_goal, age, gender, height_cm, weight_kg,
                                          activity_factor, allergies, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                p.username,
                p.diet_goal.to_string(),
                p.age,
                p.gender.to_string(),
                p.height_cm,
                p.weight_kg,
                p.activity_factor,
                serde_json::to_string(&p.allergies)?,
                p.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn save_profile(&self, p: &HealthProfile) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE health_profiles
             SET diet_goal = ?2, age = ?3, gender = ?4, height_cm = ?5, weight_kg = ?6,
                 activity_factor = ?7, allergies = ?8, updated_at = ?9
             WHERE username = ?1",
            params![
                p.username,
                p.diet_goal.to_string(),
                p.age,
                p.gender.to_string(),
                p.height_cm,
                p.weight_kg,
                p.activity_factor,
                serde_json::to_string(&p.allergies)?,
                p.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(count > 0)
    }

    fn delete_profile(&self, username: &str) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM health_profiles WHERE username = ?1",
            params![username],
        )?;
        Ok(count > 0)
    }
}
