use anyhow::Result;
use serde_json::json;

use rxscan::models::config::Config;
use rxscan::output;

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        let toml_str = toml::to_string_pretty(&config)?;
        println!("{}", toml_str);
    } else {
        let out = output::success(
            "config",
            json!({
                "config": config,
                "path": Config::path(),
                "data_dir": Config::data_dir(),
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
