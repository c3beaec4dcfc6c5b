use anyhow::Result;
use std::io::{self, Write};

use nutrilog::core::profile;
use nutrilog::db::Database;
use nutrilog::models::config::Config;
use nutrilog::models::{DietGoal, Gender, HealthProfile};

pub fn run(skip: bool, user: Option<&str>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(u) = user.map(str::trim).filter(|u| !u.is_empty()) {
        config.default_user = Some(u.to_string());
    }

    if skip {
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
        return Ok(());
    }

    println!("NutriLog: initial setup\n");
    if config.default_user.is_none() {
        config.default_user = Some(prompt_nonempty("Username")?);
    }
    let username = config.resolve_user(None)?;

    let goal = prompt_parsed::<DietGoal>("Goal (lose_weight/maintain_weight/gain_weight)")?;
    let age = prompt_parsed::<i32>("Age")?;
    let gender = prompt_nonempty("Gender (male/female/other)")?.parse::<Gender>()?;
    let height = prompt_parsed::<f64>("Height (cm)")?;
    let weight = prompt_parsed::<f64>("Weight (kg)")?;
    let activity = prompt_parsed::<f64>("Activity factor (1.2 sedentary .. 1.9 very active)")?;
    let allergies = prompt_string("Allergies (comma separated, or empty)")?;

    config.save()?;

    let db = Database::open(&Config::db_path())?;
    let p = HealthProfile::new(&username, goal, age, gender, height, weight, activity)
        .with_allergies(allergies.split(','));
    profile::create(&db, p)?;

    println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        anyhow::bail!("unexpected end of input while reading {}", label);
    }
    Ok(buf.trim().to_string())
}

fn prompt_nonempty(label: &str) -> Result<String> {
    loop {
        let s = prompt_string(label)?;
        if !s.is_empty() {
            return Ok(s);
        }
        println!("Please enter a value.");
    }
}

fn prompt_parsed<T: std::str::FromStr>(label: &str) -> Result<T> {
    loop {
        let s = prompt_string(label)?;
        match s.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a valid value."),
        }
    }
}
