use anyhow::Result;

use rxscan::db::Database;
use rxscan::models::config::Config;

pub fn run() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    config.save()?;
    Database::open(&Config::db_path())?;

    println!("Config initialized with defaults at {:?}", Config::path());
    Ok(())
}
