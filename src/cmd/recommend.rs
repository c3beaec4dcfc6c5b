use anyhow::Result;

use nutrilog::core::query;
use nutrilog::output;
use nutrilog::output::human;

pub fn run(user: Option<&str>, human_flag: bool) -> Result<()> {
    let (config, db) = super::open()?;
    let username = config.resolve_user(user)?;
    let rec = query::recommendation(&db, &db, &config, &username)?;

    if human_flag {
        println!("{}", human::format_recommendation(&rec));
    } else {
        output::print_success("recommend", &rec)?;
    }
    Ok(())
}
