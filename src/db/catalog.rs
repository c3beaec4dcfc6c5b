use anyhow::Result;
use rusqlite::params;
use std::collections::BTreeSet;

use crate::core::store::MealCatalog;
use crate::models::{CandidateMeal, MealType};

use super::Database;

struct CandidateRow {
    id: String,
    name: String,
    meal_type: String,
    diet_types: String,
    allergy_tags: String,
    calories: Option<f64>,
    serving: Option<String>,
}

fn row_to_candidate(r: CandidateRow) -> Result<CandidateMeal> {
    let diet_types: BTreeSet<String> = serde_json::from_str(&r.diet_types)?;
    let allergy_tags: BTreeSet<String> = serde_json::from_str(&r.allergy_tags)?;
    Ok(CandidateMeal {
        id: r.id,
        name: r.name,
        meal_type: r.meal_type.into(),
        diet_types,
        allergy_tags,
        calories: r.calories,
        serving: r.serving,
    })
}

const SELECT_COLS: &str = "id, name, meal_type, diet_types, allergy_tags, calories, serving";

impl Database {
    fn query_candidates(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<CandidateMeal>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok(CandidateRow {
                id: row.get(0)?,
                name: row.get(1)?,
                meal_type: row.get(2)?,
                diet_types: row.get(3)?,
                allergy_tags: row.get(4)?,
                calories: row.get(5)?,
                serving: row.get(6)?,
            })
        })?;

        let mut meals = Vec::new();
        for row in rows {
            meals.push(row_to_candidate(row?)?);
        }
        Ok(meals)
    }
}

impl MealCatalog for Database {
    fn fetch_candidates(&self, meal_type: &MealType, diet_type: &str) -> Result<Vec<CandidateMeal>> {
        let sql = format!("SELECT {SELECT_COLS} FROM candidate_meals WHERE meal_type = ?1 ORDER BY name");
        let meals = self.query_candidates(&sql, &[&meal_type.to_string()])?;
        Ok(meals
            .into_iter()
            .filter(|m| m.has_diet_type(diet_type))
            .collect())
    }

    fn insert_candidate(&self, m: &CandidateMeal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO candidate_meals (id, name, meal_type, diet_types, allergy_tags, calories, serving)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                m.id,
                m.name,
                m.meal_type.to_string(),
                serde_json::to_string(&m.diet_types)?,
                serde_json::to_string(&m.allergy_tags)?,
                m.calories,
                m.serving,
            ],
        )?;
        Ok(())
    }

    fn insert_candidates(&self, meals: &[CandidateMeal]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for m in meals {
            self.insert_candidate(m)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn list_candidates(&self) -> Result<Vec<CandidateMeal>> {
        let sql = format!("SELECT {SELECT_COLS} FROM candidate_meals ORDER BY meal_type, name");
        self.query_candidates(&sql, &[])
    }
}
