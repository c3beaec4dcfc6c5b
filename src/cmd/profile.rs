use anyhow::Result;
use serde_json::json;

use nutrilog::core::profile;
use nutrilog::models::{DietGoal, Gender, HealthProfile, ProfileUpdate};
use nutrilog::output;
use nutrilog::output::human;

pub struct ProfileArgs {
    pub goal: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity: f64,
    pub allergies: Option<String>,
}

pub struct ProfileChanges {
    pub goal: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity: Option<f64>,
    pub allergies: Option<String>,
}

fn split_tags(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn run_show(user: Option<&str>, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let p = profile::get(&db, &username)?;
    print_profile(&p, human_flag)
}

pub fn run_set(user: Option<&str>, args: ProfileArgs, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;

    let mut p = HealthProfile::new(
        &username,
        args.goal.parse::<DietGoal>()?,
        args.age,
        args.gender.parse::<Gender>()?,
        args.height,
        args.weight,
        args.activity,
    );
    if let Some(ref list) = args.allergies {
        p = p.with_allergies(split_tags(list));
    }
    let created = profile::create(&db, p)?;
    print_profile(&created, human_flag)
}

pub fn run_update(user: Option<&str>, changes: ProfileChanges, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;

    let update = ProfileUpdate {
        diet_goal: changes.goal.map(|g| g.parse::<DietGoal>()).transpose()?,
        age: changes.age,
        gender: changes.gender.map(|g| g.parse::<Gender>()).transpose()?,
        height_cm: changes.height,
        weight_kg: changes.weight,
        activity_factor: changes.activity,
        allergies: changes.allergies.as_deref().map(split_tags),
    };
    let updated = profile::update(&db, &username, &update)?;
    print_profile(&updated, human_flag)
}

pub fn run_delete(user: Option<&str>, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    profile::delete(&db, &username)?;

    if human_flag {
        println!("Deleted health profile for '{}'", username);
    } else {
        output::print_success("profile", &json!({ "username": username, "deleted": true }))?;
    }
    Ok(())
}

fn print_profile(p: &HealthProfile, human_flag: bool) -> Result<()> {
    if human_flag {
        println!("{}", human::format_profile(p));
    } else {
        output::print_success("profile", &json!({ "profile": p }))?;
    }
    Ok(())
}
