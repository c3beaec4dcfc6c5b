use anyhow::Result;
use serde_json::json;
use std::path::Path;

use nutrilog::core::catalog;
use nutrilog::core::store::MealCatalog;
use nutrilog::models::{CandidateMeal, MealType};
use nutrilog::output;
use nutrilog::output::human;

pub fn run_add(
    name: &str,
    meal_type: &str,
    diets: &[String],
    allergens: &[String],
    calories: Option<f64>,
    serving: Option<String>,
    human_flag: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("meal name must not be empty");
    }
    let (_, db) = super::open()?;

    let mut meal = CandidateMeal::new(name.trim(), meal_type.parse::<MealType>()?)
        .with_allergens(allergens);
    for diet in diets {
        meal = meal.with_diet_type(diet);
    }
    meal.calories = calories;
    meal.serving = serving;
    db.insert_candidate(&meal)?;

    if human_flag {
        println!("Added {} ({}) to the catalog", meal.name, meal.meal_type);
    } else {
        output::print_success("catalog", &json!({ "meal": meal }))?;
    }
    Ok(())
}

pub fn run_list(human_flag: bool) -> Result<()> {
    let (_, db) = super::open()?;
    let meals = db.list_candidates()?;

    if human_flag {
        println!("{}", human::format_catalog(&meals));
    } else {
        output::print_success("catalog", &json!({ "meals": meals }))?;
    }
    Ok(())
}

pub fn run_import(file: &Path, human_flag: bool) -> Result<()> {
    let (_, db) = super::open()?;
    let contents = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", file.display(), e))?;
    let imported = catalog::import(&db, &contents)?;

    if human_flag {
        println!("Imported {} meals from {}", imported.len(), file.display());
    } else {
        output::print_success("catalog", &json!({ "imported": imported.len() }))?;
    }
    Ok(())
}
