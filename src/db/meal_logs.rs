use anyhow::{Result, anyhow};
use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension, params};

use crate::core::store::LogStore;
use crate::error::NutritionError;
use crate::models::{MealLogEntry, NewMealLog, Nutrients};

use super::Database;

struct MealLogRow {
    id: i64,
    username: String,
    date: String,
    meal_type: String,
    description: String,
    quantity: u32,
    nutrients: String,
}

fn row_to_entry(r: MealLogRow) -> Result<MealLogEntry> {
    let date: NaiveDate = r.date.parse()?;
    let nutrients: Nutrients = serde_json::from_str(&r.nutrients)?;
    Ok(MealLogEntry {
        id: r.id,
        username: r.username,
        date,
        meal_type: r.meal_type.into(),
        description: r.description,
        quantity: r.quantity,
        nutrients,
    })
}

const SELECT_COLS: &str = "id, username, date, meal_type, description, quantity, nutrients";

macro_rules! map_row {
    ($row:expr) => {
        Ok(MealLogRow {
            id: $row.get(0)?,
            username: $row.get(1)?,
            date: $row.get(2)?,
            meal_type: $row.get(3)?,
            description: $row.get(4)?,
            quantity: $row.get(5)?,
            nutrients: $row.get(6)?,
        })
    };
}

impl Database {
    fn query_entries(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<MealLogEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| map_row!(row))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row_to_entry(row?)?);
        }
        Ok(entries)
    }
}

impl LogStore for Database {
    fn fetch_entries(&self, username: &str) -> Result<Vec<MealLogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM meal_logs WHERE username = ?1 ORDER BY date, id"
        );
        self.query_entries(&sql, &[&username])
    }

    fn fetch_entries_for_date(&self, username: &str, date: NaiveDate) -> Result<Vec<MealLogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM meal_logs WHERE username = ?1 AND date = ?2 ORDER BY id"
        );
        self.query_entries(&sql, &[&username, &date.to_string()])
    }

    fn fetch_entries_in_range(
        &self,
        username: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealLogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM meal_logs
             WHERE username = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date, id"
        );
        self.query_entries(&sql, &[&username, &start.to_string(), &end.to_string()])
    }

    fn get_entry(&self, id: i64) -> Result<Option<MealLogEntry>> {
        let sql = format!("SELECT {SELECT_COLS} FROM meal_logs WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id], |row| map_row!(row))
            .optional()?;
        row.map(row_to_entry).transpose()
    }

    fn upsert_by_key(&self, candidate: &NewMealLog) -> Result<(MealLogEntry, bool)> {
        let date = candidate
            .date
            .ok_or_else(|| anyhow!("meal log date must be resolved before storing"))?;
        let nutrients = serde_json::to_string(&candidate.nutrients)?;

        // The unique merge key turns a repeated log into a single increment.
        let sql = format!(
            "INSERT INTO meal_logs (username, date, meal_type, description, quantity, nutrients, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (username, date, meal_type, description)
             DO UPDATE SET quantity = meal_logs.quantity + excluded.quantity
             RETURNING {SELECT_COLS}"
        );
        let result = self.conn.query_row(
            &sql,
            params![
                candidate.username,
                date.to_string(),
                candidate.meal_type.to_string(),
                candidate.description,
                candidate.quantity,
                nutrients,
                Utc::now().to_rfc3339(),
            ],
            |row| map_row!(row),
        );
        // A merged quantity past u32 range trips the CHECK and the statement is rolled back.
        let row = match result {
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(NutritionError::validation(
                    "quantity",
                    format!("merged quantity would exceed {}", u32::MAX),
                )
                .into());
            }
            other => other?,
        };
        let entry = row_to_entry(row)?;
        let merged = entry.quantity > candidate.quantity;
        Ok((entry, merged))
    }

    fn save_entry(&self, entry: &MealLogEntry) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE meal_logs
             SET date = ?2, meal_type = ?3, description = ?4, quantity = ?5, nutrients = ?6
             WHERE id = ?1",
            params![
                entry.id,
                entry.date.to_string(),
                entry.meal_type.to_string(),
                entry.description,
                entry.quantity,
                serde_json::to_string(&entry.nutrients)?,
            ],
        )?;
        Ok(count > 0)
    }

    fn delete_entry(&self, id: i64) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM meal_logs WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}
