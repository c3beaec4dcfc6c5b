use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::core::aggregate::{GroupedView, MergeAction};
use crate::core::catalog::MealSuggestion;
use crate::core::query::DayTotals;
use crate::core::recommend::Recommendation;
use crate::core::totals::WeeklyComparison;
use crate::models::config::NutrientCodes;
use crate::models::{CandidateMeal, HealthProfile, MealLogEntry};

/// One-line summary of a stored meal log.
pub fn format_entry(e: &MealLogEntry, codes: &NutrientCodes) -> String {
    let mut line = format!(
        "#{} {} | {} | {} x{}",
        e.id, e.date, e.meal_type, e.description, e.quantity
    );
    if let Some(kcal) = e.nutrients.get(&codes.calories) {
        line.push_str(&format!("  ({} kcal each)", kcal));
    }
    line
}

pub fn format_merge_action(action: &MergeAction) -> String {
    match action {
        MergeAction::Increment { id, by } => {
            format!("Would add {} to the quantity of meal log #{}", by, id)
        }
        MergeAction::Insert { entry } => format!(
            "Would insert new meal log: {} | {} | {} x{}",
            entry
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "today".to_string()),
            entry.meal_type,
            entry.description,
            entry.quantity
        ),
    }
}

/// Grouped meal view, one block per date.
pub fn format_grouped(view: &GroupedView) -> String {
    if view.is_empty() {
        return "No meals logged.".to_string();
    }
    let mut out = String::new();
    for (date, day) in view {
        out.push_str(&format!("{}\n", format!("=== {} ===", date).bold()));
        for (meal_type, items) in day.iter() {
            if items.is_empty() {
                out.push_str(&format!("  {:10} -\n", meal_type.to_string()));
                continue;
            }
            let names: Vec<String> = items
                .iter()
                .map(|i| format!("{} x{} (#{})", i.description, i.quantity, i.id))
                .collect();
            out.push_str(&format!("  {:10} {}\n", meal_type.to_string(), names.join(", ")));
        }
    }
    out.trim_end().to_string()
}

pub fn format_day_totals(t: &DayTotals) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Nutrient", "Total"]);
    table.add_row(vec!["calories (kcal)".to_string(), t.totals.calories.to_string()]);
    table.add_row(vec![
        "carbohydrates (g)".to_string(),
        t.totals.carbohydrates.to_string(),
    ]);
    table.add_row(vec!["protein (g)".to_string(), t.totals.protein.to_string()]);
    table.add_row(vec!["fat (g)".to_string(), t.totals.fat.to_string()]);
    format!(
        "{} ({} entries)\n{}",
        format!("Totals for {}", t.date).bold(),
        t.entries,
        table
    )
}

pub fn format_weekly(w: &WeeklyComparison) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Previous week", "kcal", "Recent week", "kcal"]);
    for ((prev_date, prev), (recent_date, recent)) in w.previous.iter().zip(w.recent.iter()) {
        table.add_row(vec![
            prev_date.to_string(),
            prev.to_string(),
            recent_date.to_string(),
            recent.to_string(),
        ]);
    }
    table.add_row(vec![
        "total".to_string(),
        w.previous_total().to_string(),
        "total".to_string(),
        w.recent_total().to_string(),
    ]);
    table.to_string()
}

pub fn format_profile(p: &HealthProfile) -> String {
    let allergies = if p.allergies.is_empty() {
        "none".to_string()
    } else {
        p.allergies.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    format!(
        "{}\n  goal: {}\n  age: {} | gender: {}\n  height: {} cm | weight: {} kg\n  activity factor: {}\n  allergies: {}",
        format!("Profile: {}", p.username).bold(),
        p.diet_goal,
        p.age,
        p.gender,
        p.height_cm,
        p.weight_kg,
        p.activity_factor,
        allergies
    )
}

pub fn format_recommendation(r: &Recommendation) -> String {
    let mut out = format!(
        "{} {}\n  {}\n  BMI: {:.1}\n  Daily calories: {} kcal\n  Macros: carbohydrates {} g | proteins {} g | fats {} g\n",
        "Diet:".bold(),
        r.diet_category.tag().green(),
        r.description,
        r.bmi,
        r.daily_calories,
        r.macros.carbohydrates,
        r.macros.proteins,
        r.macros.fats
    );
    for (meal_type, suggestion) in r.meals.iter() {
        match suggestion {
            MealSuggestion::Meals(meals) => {
                let names: Vec<&str> = meals.iter().map(|m| m.name.as_str()).collect();
                out.push_str(&format!("  {:10} {}\n", meal_type.to_string(), names.join(", ")));
            }
            MealSuggestion::NoneSuitable => {
                out.push_str(&format!(
                    "  {:10} {}\n",
                    meal_type.to_string(),
                    crate::core::catalog::NO_SUITABLE_MEALS.dimmed()
                ));
            }
        }
    }
    out.trim_end().to_string()
}

pub fn format_catalog(meals: &[CandidateMeal]) -> String {
    if meals.is_empty() {
        return "Catalog is empty.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Meal type", "Name", "Diet types", "Allergens", "kcal"]);
    for m in meals {
        table.add_row(vec![
            m.meal_type.to_string(),
            m.name.clone(),
            m.diet_types.iter().cloned().collect::<Vec<_>>().join("; "),
            m.allergy_tags.iter().cloned().collect::<Vec<_>>().join(", "),
            m.calories.map(|c| c.to_string()).unwrap_or_default(),
        ]);
    }
    table.to_string()
}
