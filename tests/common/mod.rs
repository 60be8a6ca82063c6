#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use rxscan::db::Database;
use rxscan::models::Prescription;
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// A prescription with the given name, created `minute` minutes past noon UTC.
pub fn make_prescription(name: &str, minute: u32) -> Prescription {
    let mut rx = Prescription::placeholder(today());
    rx.name = name.to_string();
    rx.dosage = "10 mg".to_string();
    rx.frequency = "once daily".to_string();
    rx.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap();
    rx
}
