use anyhow::Result;
use serde_json::json;

use nutrilog::core::logging;
use nutrilog::output;

pub fn run(id: i64, human_flag: bool) -> Result<()> {
    let (_, db) = super::open()?;
    logging::delete_meal_log(&db, id)?;

    if human_flag {
        println!("Deleted meal log #{}", id);
    } else {
        output::print_success("delete", &json!({ "id": id, "deleted": true }))?;
    }
    Ok(())
}
