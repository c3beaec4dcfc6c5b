use anyhow::Result;
use serde_json::json;

use nutrilog::models::config::{BmrCoefficients, Config};
use nutrilog::output;

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        output::print_success("config", &json!({ "config": config }))?;
    }
    Ok(())
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "default_user" => config.default_user = Some(value.trim().to_string()),
        "nutrients.calories" => config.nutrients.calories = value.trim().to_string(),
        "nutrients.carbohydrates" => config.nutrients.carbohydrates = value.trim().to_string(),
        "nutrients.protein" => config.nutrients.protein = value.trim().to_string(),
        "nutrients.fat" => config.nutrients.fat = value.trim().to_string(),
        k if k.starts_with("bmr.") => {
            let gender = k.trim_start_matches("bmr.").trim().to_lowercase();
            if gender.is_empty() {
                anyhow::bail!("bmr key needs a gender, e.g. bmr.female");
            }
            config.bmr.insert(gender, parse_coefficients(value)?);
        }
        _ => anyhow::bail!("unknown config key: {}", key),
    }

    config.save()?;
    output::print_success("config", &json!({ "key": key, "value": value }))?;
    Ok(())
}

/// `base,weight,height,age`
fn parse_coefficients(value: &str) -> Result<BmrCoefficients> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| anyhow::anyhow!("bmr coefficients must be numbers: {}", value))?;
    match parts.as_slice() {
        [base, weight, height, age] => Ok(BmrCoefficients {
            base: *base,
            weight: *weight,
            height: *height,
            age: *age,
        }),
        _ => anyhow::bail!("bmr coefficients must be base,weight,height,age"),
    }
}
