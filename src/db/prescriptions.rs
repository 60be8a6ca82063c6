use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;

use crate::models::prescription::{Prescription, PrescriptionStatus};

use super::Database;

struct PrescriptionRow {
    id: String,
    name: String,
    dosage: String,
    frequency: String,
    duration: String,
    doctor: String,
    rx_date: String,
    status: String,
    created_at: String,
}

fn row_to_prescription(r: PrescriptionRow) -> Result<Prescription> {
    let status: PrescriptionStatus = r.status.parse()?;
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);

    Ok(Prescription {
        id: r.id,
        name: r.name,
        dosage: r.dosage,
        frequency: r.frequency,
        duration: r.duration,
        doctor: r.doctor,
        date: r.rx_date,
        status,
        created_at,
    })
}

const SELECT_COLS: &str =
    "id, name, dosage, frequency, duration, doctor, rx_date, status, created_at";

macro_rules! map_row {
    ($row:expr) => {
        Ok(PrescriptionRow {
            id: $row.get(0)?,
            name: $row.get(1)?,
            dosage: $row.get(2)?,
            frequency: $row.get(3)?,
            duration: $row.get(4)?,
            doctor: $row.get(5)?,
            rx_date: $row.get(6)?,
            status: $row.get(7)?,
            created_at: $row.get(8)?,
        })
    };
}

impl Database {
    pub fn insert_prescription(&self, rx: &Prescription) -> Result<()> {
        self.conn.execute(
            "INSERT INTO prescriptions (id, name, dosage, frequency, duration, doctor, rx_date, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                rx.id,
                rx.name,
                rx.dosage,
                rx.frequency,
                rx.duration,
                rx.doctor,
                rx.date,
                rx.status.to_string(),
                rx.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        Ok(())
    }

    pub fn get_prescription(&self, id: &str) -> Result<Option<Prescription>> {
        let sql = format!("SELECT {SELECT_COLS} FROM prescriptions WHERE id = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], |row| map_row!(row))?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_prescription(row?)?)),
            None => Ok(None),
        }
    }

    pub fn list_prescriptions(
        &self,
        status: Option<PrescriptionStatus>,
    ) -> Result<Vec<Prescription>> {
        let mut out = Vec::new();
        match status {
            Some(s) => {
                let sql = format!(
                    "SELECT {SELECT_COLS} FROM prescriptions WHERE status = ?1 ORDER BY created_at ASC, id ASC"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![s.to_string()], |row| map_row!(row))?;
                for row in rows {
                    out.push(row_to_prescription(row?)?);
                }
            }
            None => {
                let sql = format!(
                    "SELECT {SELECT_COLS} FROM prescriptions ORDER BY created_at ASC, id ASC"
                );
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], |row| map_row!(row))?;
                for row in rows {
                    out.push(row_to_prescription(row?)?);
                }
            }
        }
        Ok(out)
    }

    /// Overwrite the editable fields of a stored prescription. `id` and
    /// `created_at` are never touched.
    pub fn update_prescription(&self, rx: &Prescription) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE prescriptions
             SET name = ?1, dosage = ?2, frequency = ?3, duration = ?4, doctor = ?5, rx_date = ?6, status = ?7
             WHERE id = ?8",
            params![
                rx.name,
                rx.dosage,
                rx.frequency,
                rx.duration,
                rx.doctor,
                rx.date,
                rx.status.to_string(),
                rx.id,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn set_prescription_status(&self, id: &str, status: PrescriptionStatus) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE prescriptions SET status = ?1 WHERE id = ?2",
            params![status.to_string(), id],
        )?;
        Ok(count > 0)
    }

    pub fn remove_prescription(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM prescriptions WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }
}
