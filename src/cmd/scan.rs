use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;

use rxscan::core::prescriptions;
use rxscan::core::samples;
use rxscan::db::Database;
use rxscan::models::config::Config;
use rxscan::output;
use rxscan::output::human;

/// Where the recognized text comes from.
pub enum Input {
    File(PathBuf),
    Text(String),
    Simulated(String),
    Stdin,
}

impl Input {
    pub fn from_args(file: Option<PathBuf>, text: Option<String>, simulate: Option<String>) -> Self {
        match (file, text, simulate) {
            (_, Some(t), _) => Self::Text(t),
            (_, None, Some(image)) => Self::Simulated(image),
            (Some(p), None, None) if p.as_os_str() != "-" => Self::File(p),
            _ => Self::Stdin,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Text(_) => "text",
            Self::Simulated(_) => "simulated",
            Self::Stdin => "stdin",
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::File(p) => {
                let bytes =
                    std::fs::read(p).with_context(|| format!("cannot read {}", p.display()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Self::Text(t) => Ok(t.clone()),
            Self::Simulated(image) => {
                let sample = samples::sample_for_filename(image);
                tracing::info!(image = %image, sample = sample.key, "using simulated OCR text");
                Ok(sample.text.to_string())
            }
            Self::Stdin => {
                // OCR output is often not clean UTF-8; keep what decodes.
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
        }
    }
}

pub fn run(input: Input, save: bool, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let text = input.read()?;
    let today = date.unwrap_or_else(|| Utc::now().date_naive());

    let db = if save {
        Some(Database::open(&Config::db_path())?)
    } else {
        None
    };
    let extraction = prescriptions::scan(db.as_ref(), &config, &text, today)?;

    if human_flag {
        println!("{}", human::format_extraction(&extraction));
        if save {
            println!("Saved as {}", extraction.prescription.id);
        }
    } else {
        let out = output::success(
            "scan",
            json!({
                "input": input.kind(),
                "prescription": extraction.prescription,
                "sources": extraction.sources,
                "defaulted": extraction.sources.defaulted(),
                "saved": save,
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
