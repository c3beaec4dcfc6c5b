use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use nutrilog::core::query;
use nutrilog::output;
use nutrilog::output::human;

pub fn run_day(user: Option<&str>, today: NaiveDate, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let totals = query::day_totals(&db, &config, &username, today)?;

    if human_flag {
        println!("{}", human::format_day_totals(&totals));
    } else {
        output::print_success("totals", &totals)?;
    }
    Ok(())
}

pub fn run_week(user: Option<&str>, today: NaiveDate, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let weekly = query::weekly(&db, &config, &username, today)?;

    if human_flag {
        println!("{}", human::format_weekly(&weekly));
    } else {
        output::print_success(
            "week",
            &json!({
                "recent": weekly.recent,
                "previous": weekly.previous,
                "recent_total": weekly.recent_total(),
                "previous_total": weekly.previous_total(),
            }),
        )?;
    }
    Ok(())
}

pub fn run_calories(
    user: Option<&str>,
    from: NaiveDate,
    to: NaiveDate,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let series = query::calories_between(&db, &config, &username, from, to)?;

    if human_flag {
        for (date, kcal) in &series {
            println!("{}  {:>6} kcal", date, kcal);
        }
    } else {
        output::print_success(
            "calories",
            &json!({ "from": from, "to": to, "calories": series }),
        )?;
    }
    Ok(())
}
