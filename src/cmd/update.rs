use anyhow::Result;
use chrono::NaiveDate;

use nutrilog::core::logging;
use nutrilog::models::{MealLogUpdate, MealType};
use nutrilog::output;
use nutrilog::output::human;

pub fn run(
    id: i64,
    meal_type: Option<String>,
    description: Option<String>,
    quantity: Option<u32>,
    nutrients: &[String],
    on: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = super::open()?;

    let update = MealLogUpdate {
        meal_type: meal_type.map(|t| t.parse::<MealType>()).transpose()?,
        description,
        quantity,
        nutrients: if nutrients.is_empty() {
            None
        } else {
            Some(logging::parse_nutrients(nutrients, &config.nutrients)?)
        },
        date: on,
    };
    let entry = logging::update_meal_log(&db, id, &update)?;

    if human_flag {
        println!("Updated: {}", human::format_entry(&entry, &config.nutrients));
    } else {
        output::print_success("update", &entry)?;
    }
    Ok(())
}
