use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use nutrilog::core::logging::{self, Logged};
use nutrilog::models::config::NutrientCodes;
use nutrilog::models::{MealType, NewMealLog};
use nutrilog::output;
use nutrilog::output::human;

pub struct LogArgs {
    pub meal_type: String,
    pub description: String,
    pub quantity: u32,
    pub nutrients: Vec<String>,
    pub calories: Option<String>,
    pub carbs: Option<String>,
    pub protein: Option<String>,
    pub fat: Option<String>,
    pub dry_run: bool,
}

impl LogArgs {
    /// `--nutrient` pairs followed by the named shortcuts, which win on conflict.
    fn nutrient_pairs(&self, codes: &NutrientCodes) -> Vec<String> {
        let mut pairs = self.nutrients.clone();
        let shortcuts = [
            (&codes.calories, &self.calories),
            (&codes.carbohydrates, &self.carbs),
            (&codes.protein, &self.protein),
            (&codes.fat, &self.fat),
        ];
        for (code, value) in shortcuts {
            if let Some(v) = value {
                pairs.push(format!("{}={}", code, v));
            }
        }
        pairs
    }
}

pub fn run(args: LogArgs, user: Option<&str>, today: NaiveDate, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;

    let mut candidate = NewMealLog::new(
        &username,
        args.meal_type.parse::<MealType>()?,
        &args.description,
        args.quantity,
    )
    .on(today);
    let pairs = args.nutrient_pairs(&config.nutrients);
    candidate.nutrients = logging::parse_nutrients(&pairs, &config.nutrients)?;

    if args.dry_run {
        let action = logging::preview_meal(&db, &candidate, today)?;
        if human_flag {
            println!("{}", human::format_merge_action(&action));
        } else {
            output::print_success("log", &json!({ "dry_run": true, "action": action }))?;
        }
        return Ok(());
    }

    let logged = logging::log_meal(&db, candidate, today)?;
    if human_flag {
        print_logged(&logged, &config.nutrients);
    } else {
        output::print_success("log", &logged)?;
    }
    Ok(())
}

pub fn run_batch(
    batch_json: &str,
    user: Option<&str>,
    today: NaiveDate,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let logged = logging::log_batch(&db, &username, batch_json, today)?;

    if human_flag {
        for l in &logged {
            print_logged(l, &config.nutrients);
        }
    } else {
        output::print_success("log", &json!({ "entries": logged }))?;
    }
    Ok(())
}

fn print_logged(logged: &Logged, codes: &NutrientCodes) {
    let verb = if logged.merged { "Merged" } else { "Logged" };
    println!("{}: {}", verb, human::format_entry(&logged.entry, codes));
}
