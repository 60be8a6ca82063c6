use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS prescriptions (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            dosage      TEXT NOT NULL,
            frequency   TEXT NOT NULL,
            duration    TEXT NOT NULL,
            doctor      TEXT NOT NULL,
            rx_date     TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'active',
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_prescriptions_status ON prescriptions(status, created_at);",
    )?;
    Ok(())
}
