use anyhow::Result;
use serde_json::json;

use rxscan::core::prescriptions::dictionary_for;
use rxscan::models::config::Config;
use rxscan::output;

pub fn run_list(human: bool) -> Result<()> {
    let config = Config::load()?;
    let dictionary = dictionary_for(&config);

    if human {
        for name in dictionary.iter() {
            println!("{}", name);
        }
    } else {
        let names: Vec<&str> = dictionary.iter().collect();
        let out = output::success(
            "dict",
            json!({
                "medications": names,
                "count": names.len(),
                "extra": config.dictionary.extra,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_add(name: &str, human: bool) -> Result<()> {
    let mut config = Config::load()?;
    if dictionary_for(&config).contains(name) {
        anyhow::bail!("'{}' is already in the dictionary.", name.trim());
    }
    if !config.add_medication(name) {
        anyhow::bail!("medication name cannot be empty");
    }
    config.save()?;

    let added = name.trim().to_lowercase();
    if human {
        println!("Added '{}' to the medication dictionary", added);
    } else {
        let out = output::success("dict", json!({ "added": added }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
