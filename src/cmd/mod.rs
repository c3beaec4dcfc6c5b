pub mod catalog;
pub mod completions;
pub mod config;
pub mod delete;
pub mod init;
pub mod log;
pub mod profile;
pub mod recommend;
pub mod show;
pub mod totals;
pub mod update;

use anyhow::Result;

use nutrilog::db::Database;
use nutrilog::models::config::Config;

/// Config plus an open database, the starting point of most commands.
pub(crate) fn open() -> Result<(Config, Database)> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    Ok((config, db))
}
