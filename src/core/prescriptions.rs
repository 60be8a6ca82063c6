use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::core::dictionary::MedicationDictionary;
use crate::core::extract::Extractor;
use crate::db::Database;
use crate::models::config::Config;
use crate::models::prescription::{Extraction, Prescription, PrescriptionStatus};

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

/// Dictionary used for scans: built-in names plus `[dictionary] extra`.
pub fn dictionary_for(config: &Config) -> MedicationDictionary {
    MedicationDictionary::builtin_with(&config.dictionary.extra)
}

/// Extract a prescription from recognized text, optionally saving it.
pub fn scan(
    db: Option<&Database>,
    config: &Config,
    text: &str,
    today: NaiveDate,
) -> Result<Extraction> {
    let dictionary = dictionary_for(config);
    let extraction = Extractor::new(&dictionary).extract_detailed(text, today);
    if let Some(db) = db {
        save_prescription(db, &extraction.prescription)?;
    }
    Ok(extraction)
}

// ---------------------------------------------------------------------------
// save / get / list
// ---------------------------------------------------------------------------

pub fn save_prescription(db: &Database, rx: &Prescription) -> Result<()> {
    match db.insert_prescription(rx) {
        Ok(()) => {
            tracing::info!(id = %rx.id, name = %rx.name, "prescription saved");
            Ok(())
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("constraint") {
                bail!("Prescription '{}' already exists.", rx.id);
            }
            Err(e)
        }
    }
}

pub fn get_prescription(db: &Database, id: &str) -> Result<Prescription> {
    match db.get_prescription(id)? {
        Some(rx) => Ok(rx),
        None => bail!("Prescription '{}' not found.", id),
    }
}

pub fn list_prescriptions(
    db: &Database,
    status: Option<PrescriptionStatus>,
) -> Result<Vec<Prescription>> {
    db.list_prescriptions(status)
}

// ---------------------------------------------------------------------------
// edit
// ---------------------------------------------------------------------------

/// Corrections to apply to a stored prescription. `None` leaves the field
/// as it is.
#[derive(Debug, Default)]
pub struct PrescriptionEdit<'a> {
    pub name: Option<&'a str>,
    pub dosage: Option<&'a str>,
    pub frequency: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub doctor: Option<&'a str>,
    pub date: Option<&'a str>,
}

impl PrescriptionEdit<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dosage.is_none()
            && self.frequency.is_none()
            && self.duration.is_none()
            && self.doctor.is_none()
            && self.date.is_none()
    }
}

pub fn edit_prescription(
    db: &Database,
    id: &str,
    edit: PrescriptionEdit<'_>,
) -> Result<Prescription> {
    if edit.is_empty() {
        bail!("Nothing to edit. Pass at least one field.");
    }

    let mut rx = get_prescription(db, id)?;
    let fields = [
        ("name", edit.name, &mut rx.name),
        ("dosage", edit.dosage, &mut rx.dosage),
        ("frequency", edit.frequency, &mut rx.frequency),
        ("duration", edit.duration, &mut rx.duration),
        ("doctor", edit.doctor, &mut rx.doctor),
        ("date", edit.date, &mut rx.date),
    ];
    for (field, new_value, slot) in fields {
        if let Some(v) = new_value {
            let v = v.trim();
            if v.is_empty() {
                bail!("{} cannot be empty.", field);
            }
            *slot = v.to_string();
        }
    }

    db.update_prescription(&rx)?;
    tracing::info!(id = %rx.id, "prescription edited");
    Ok(rx)
}

// ---------------------------------------------------------------------------
// status / remove
// ---------------------------------------------------------------------------

pub fn set_status(db: &Database, id: &str, status: PrescriptionStatus) -> Result<Prescription> {
    if !db.set_prescription_status(id, status)? {
        bail!("Prescription '{}' not found.", id);
    }
    tracing::info!(id, %status, "prescription status changed");
    get_prescription(db, id)
}

pub fn remove_prescription(db: &Database, id: &str) -> Result<bool> {
    db.remove_prescription(id)
}
