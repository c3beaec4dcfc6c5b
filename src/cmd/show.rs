use anyhow::Result;
use serde_json::json;

use nutrilog::core::query;
use nutrilog::output;
use nutrilog::output::human;

pub fn run(raw: bool, user: Option<&str>, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;

    if raw {
        let entries = query::entries(&db, &username)?;
        if human_flag {
            if entries.is_empty() {
                println!("No meals logged for '{}'", username);
            }
            for e in &entries {
                println!("{}", human::format_entry(e, &config.nutrients));
            }
        } else {
            output::print_success("show", &json!({ "username": username, "entries": entries }))?;
        }
        return Ok(());
    }

    let view = query::grouped(&db, &username)?;
    if human_flag {
        println!("{}", human::format_grouped(&view));
    } else {
        output::print_success("show", &json!({ "username": username, "meals": view }))?;
    }
    Ok(())
}
